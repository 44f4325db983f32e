//! StreamFilter - lazy line-to-message filter

use futures::stream::{self, Stream};
use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, instrument, trace};

use contracts::{Message, Redirect};

use crate::config::StreamConfig;
use crate::error::Result;
use crate::reader::ThreadReader;

/// Type-erased redirect target (stdout or stderr)
pub type RedirectWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Counters for one filter run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub lines_read: u64,
    pub messages_emitted: u64,
}

/// Filters an input line stream into messages.
///
/// Each call to [`next_message`](Self::next_message) reads lines until one
/// qualifies or input ends. Every line read is echoed byte for byte
/// (line ending included) to the redirect writer before the next line is
/// read, so echo order equals input order.
pub struct StreamFilter<'a, R, W = RedirectWriter> {
    reader: R,
    line: Vec<u8>,
    config: &'a StreamConfig,
    redirect: Option<W>,
    stats: FilterStats,
}

impl<'a> StreamFilter<'a, BufReader<ThreadReader>, RedirectWriter> {
    /// Filter over process stdin, echoing to the configured redirect stream
    ///
    /// # Errors
    /// The input thread could not be started
    pub fn stdin(config: &'a StreamConfig) -> Result<Self> {
        let redirect = config.redirect.map(|target| -> RedirectWriter {
            match target {
                Redirect::Stdout => Box::new(tokio::io::stdout()),
                Redirect::Stderr => Box::new(tokio::io::stderr()),
            }
        });
        let input = ThreadReader::stdin()?;
        Ok(Self::new(BufReader::new(input), config, redirect))
    }
}

impl<'a, R, W> StreamFilter<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a filter over any buffered reader
    pub fn new(reader: R, config: &'a StreamConfig, redirect: Option<W>) -> Self {
        Self {
            reader,
            line: Vec::new(),
            config,
            redirect,
            stats: FilterStats::default(),
        }
    }

    /// Counters so far
    pub fn stats(&self) -> FilterStats {
        self.stats
    }

    /// Redirect target, if any
    pub fn redirect_writer(&self) -> Option<&W> {
        self.redirect.as_ref()
    }

    /// Next message, or `None` at end of input.
    ///
    /// Cancelling while waiting for input loses nothing: a partly read
    /// line stays buffered for the next call. Cancelling during the
    /// redirect write drops the line being echoed, neither finishing its
    /// echo nor emitting it.
    ///
    /// # Errors
    /// Input read failure (including invalid UTF-8) or redirect write failure
    #[instrument(name = "stream_filter_next", skip(self), level = "trace")]
    pub async fn next_message(&mut self) -> Result<Option<Message>> {
        loop {
            let read = self.reader.read_until(b'\n', &mut self.line).await?;
            if read == 0 && self.line.is_empty() {
                break;
            }

            let raw = std::mem::take(&mut self.line);
            let line = String::from_utf8(raw)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            self.stats.lines_read += 1;
            self.echo(line.as_bytes()).await?;

            if let Some(message) = self.config.extract(strip_line_ending(&line)) {
                self.stats.messages_emitted += 1;
                trace!(line = self.stats.lines_read, "Line matched");
                return Ok(Some(message));
            }
        }

        debug!(
            lines = self.stats.lines_read,
            messages = self.stats.messages_emitted,
            "Input stream closed"
        );
        Ok(None)
    }

    /// Adapt into a lazy `Stream` of messages
    pub fn into_stream(self) -> impl Stream<Item = Result<Message>> + 'a
    where
        R: 'a,
        W: 'a,
    {
        stream::unfold(Some(self), |state| async move {
            let Some(mut filter) = state else {
                return None;
            };
            match filter.next_message().await {
                Ok(Some(message)) => Some((Ok(message), Some(filter))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
    }

    async fn echo(&mut self, raw: &[u8]) -> Result<()> {
        if let Some(writer) = self.redirect.as_mut() {
            writer.write_all(raw).await?;
            writer.flush().await?;
        }
        Ok(())
    }
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
