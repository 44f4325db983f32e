//! ThreadReader - blocking reader moved onto its own OS thread
//!
//! `tokio::io::stdin` reads on the runtime's blocking pool, and runtime
//! shutdown waits for that read to return. A dedicated thread is never
//! joined, so the process can exit while the read is still parked.

use std::io::{self, Read};
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};
use tokio::sync::mpsc;
use tracing::debug;

const CHUNK_SIZE: usize = 8 * 1024;
const CHANNEL_CAPACITY: usize = 16;

/// Async adapter over a blocking reader running on a detached thread
pub struct ThreadReader {
    rx: mpsc::Receiver<io::Result<Vec<u8>>>,
    chunk: Vec<u8>,
    pos: usize,
}

impl ThreadReader {
    /// Read process stdin on a dedicated thread
    pub fn stdin() -> io::Result<Self> {
        Self::spawn(io::stdin())
    }

    /// Move `reader` onto a new thread and forward its chunks.
    ///
    /// The thread ends at end of input, on a read error, or once this
    /// handle is dropped and its next chunk has nowhere to go.
    pub fn spawn<R>(mut reader: R) -> io::Result<Self>
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        std::thread::Builder::new()
            .name("noti-input".into())
            .spawn(move || {
                let mut buffer = vec![0u8; CHUNK_SIZE];
                loop {
                    let sent = match reader.read(&mut buffer) {
                        Ok(0) => break,
                        Ok(n) => tx.blocking_send(Ok(buffer[..n].to_vec())),
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => {
                            let _ = tx.blocking_send(Err(e));
                            break;
                        }
                    };
                    if sent.is_err() {
                        break;
                    }
                }
                debug!("Input reader thread finished");
            })?;

        Ok(Self {
            rx,
            chunk: Vec::new(),
            pos: 0,
        })
    }
}

impl AsyncRead for ThreadReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = &mut *self;

        while this.pos >= this.chunk.len() {
            match ready!(this.rx.poll_recv(cx)) {
                Some(Ok(chunk)) => {
                    this.chunk = chunk;
                    this.pos = 0;
                }
                Some(Err(e)) => return Poll::Ready(Err(e)),
                // End of input
                None => return Poll::Ready(Ok(())),
            }
        }

        let n = (this.chunk.len() - this.pos).min(buf.remaining());
        buf.put_slice(&this.chunk[this.pos..this.pos + n]);
        this.pos += n;
        Poll::Ready(Ok(()))
    }
}
