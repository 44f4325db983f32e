//! Pipeline orchestrator - resolves the run mode and drives dispatch.
//!
//! Single-shot mode dispatches one message and waits for the report.
//! Stream mode reads messages from a `StreamFilter` and dispatches each on
//! its own task, so a slow destination never holds up reading. At most
//! `delivery.max_in_flight` dispatches run at once; past that, reading
//! waits for a free slot.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use contracts::{DispatchReport, Message, NotiConfig};
use dispatcher::{DesktopBackend, Dispatcher, DispatcherBuilder, DispatcherConfig};
use stream_filter::{StreamConfig, StreamFilter};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};

use super::PipelineStats;
use crate::error::CliError;

/// What a run does, decided from the config and the CLI message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Dispatch this message once
    Single(Message),
    /// Dispatch messages filtered from stdin
    Stream,
}

impl Mode {
    /// Pick the mode; a message and stream mode are mutually exclusive.
    pub fn resolve(stream_enabled: bool, message: Option<String>) -> Result<Self, CliError> {
        match (stream_enabled, message) {
            (true, None) => Ok(Self::Stream),
            (true, Some(_)) => Err(CliError::StreamAndMessage),
            (false, None) => Err(CliError::NoMessage),
            (false, Some(message)) => Ok(Self::Single(Message::from(message))),
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Loaded and validated configuration
    pub config: NotiConfig,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    dispatcher: Arc<Dispatcher>,
    stream: StreamConfig,
    max_in_flight: usize,
}

type DispatchOutcome = (DispatchReport, std::time::Duration);

impl Pipeline {
    /// Build the dispatcher and compile the stream settings
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Self::build(config, None)
    }

    /// Like [`new`](Self::new) with a substitute desktop binding
    #[cfg(test)]
    pub fn with_desktop_backend(
        config: PipelineConfig,
        backend: Arc<dyn DesktopBackend>,
    ) -> Result<Self> {
        Self::build(config, Some(backend))
    }

    fn build(config: PipelineConfig, backend: Option<Arc<dyn DesktopBackend>>) -> Result<Self> {
        let PipelineConfig { config } = config;

        let stream =
            StreamConfig::from_settings(&config.stream).context("Invalid stream configuration")?;

        let max_in_flight = config.delivery.max_in_flight;
        let mut builder = DispatcherBuilder::new(DispatcherConfig {
            destinations: config.destinations,
            delivery: config.delivery,
        });
        if let Some(backend) = backend {
            builder = builder.with_desktop_backend(backend);
        }
        let dispatcher = builder.build().context("Failed to create dispatcher")?;

        info!(
            destinations = dispatcher.len(),
            stream = stream.enabled,
            max_in_flight,
            "Pipeline configured"
        );

        Ok(Self {
            dispatcher: Arc::new(dispatcher),
            stream,
            max_in_flight,
        })
    }

    /// Compiled stream settings
    pub fn stream_config(&self) -> &StreamConfig {
        &self.stream
    }

    /// Dispatch one message and wait for every destination.
    ///
    /// # Errors
    /// `CliError::DeliveryFailed` when no destination accepted the message
    pub async fn send_once(&self, message: &Message) -> Result<PipelineStats> {
        let start_time = Instant::now();
        let mut stats = PipelineStats::default();

        let report = self.dispatcher.dispatch(message).await;
        stats.messages_dispatched = 1;
        stats.record(&report, start_time.elapsed());
        stats.duration = start_time.elapsed();

        if report.all_failed() {
            return Err(CliError::DeliveryFailed {
                destinations: report.len(),
            }
            .into());
        }

        if report.failed() > 0 {
            warn!(
                failed = report.failed(),
                succeeded = report.succeeded(),
                "Message delivered to some destinations only"
            );
        }

        Ok(stats)
    }

    /// Read messages from `filter` until input ends or `shutdown` resolves.
    ///
    /// Each message is dispatched on its own task, holding one of
    /// `max_in_flight` permits. On shutdown no further input is read;
    /// dispatches already in flight run to completion (bounded by the
    /// per-request timeout) before this returns.
    ///
    /// # Errors
    /// Input read or redirect write failure, after in-flight dispatches
    /// have drained
    pub async fn run_stream<R, W, S>(
        &self,
        mut filter: StreamFilter<'_, R, W>,
        shutdown: S,
    ) -> Result<PipelineStats>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        S: Future<Output = ()>,
    {
        let start_time = Instant::now();
        let mut stats = PipelineStats::default();
        let mut in_flight: JoinSet<DispatchOutcome> = JoinSet::new();
        let permits = Arc::new(Semaphore::new(self.max_in_flight));
        let mut read_error = None;

        tokio::pin!(shutdown);

        info!(destinations = self.dispatcher.len(), "Streaming from stdin");

        loop {
            let next = tokio::select! {
                biased;
                _ = &mut shutdown => {
                    warn!(in_flight = in_flight.len(), "Received shutdown signal, stopping input");
                    break;
                }
                next = filter.next_message() => next,
            };

            match next {
                Ok(Some(message)) => {
                    let permit = tokio::select! {
                        biased;
                        _ = &mut shutdown => {
                            warn!(
                                in_flight = in_flight.len(),
                                "Received shutdown signal, dropping queued message"
                            );
                            break;
                        }
                        permit = Arc::clone(&permits).acquire_owned() => permit,
                    };
                    let Ok(permit) = permit else {
                        break;
                    };

                    stats.messages_dispatched += 1;
                    let dispatcher = Arc::clone(&self.dispatcher);
                    in_flight.spawn(async move {
                        let _permit = permit;
                        let started = Instant::now();
                        let report = dispatcher.dispatch(&message).await;
                        (report, started.elapsed())
                    });
                }
                Ok(None) => break,
                Err(e) => {
                    error!(error = %e, "Failed to read input");
                    read_error = Some(e);
                    break;
                }
            }

            while let Some(joined) = in_flight.try_join_next() {
                Self::collect(&mut stats, joined);
            }
        }

        if !in_flight.is_empty() {
            debug!(in_flight = in_flight.len(), "Draining in-flight dispatches");
        }
        while let Some(joined) = in_flight.join_next().await {
            Self::collect(&mut stats, joined);
        }

        let filter_stats = filter.stats();
        stats.lines_read = filter_stats.lines_read;
        stats.duration = start_time.elapsed();

        match read_error {
            Some(e) => Err(CliError::stream_read(e.to_string()).into()),
            None => Ok(stats),
        }
    }

    fn collect(stats: &mut PipelineStats, joined: Result<DispatchOutcome, JoinError>) {
        match joined {
            Ok((report, latency)) => {
                if report.all_failed() {
                    warn!(destinations = report.len(), "Message failed for every destination");
                }
                stats.record(&report, latency);
            }
            Err(e) => {
                error!(error = %e, "Dispatch task failed");
                stats.tasks_lost += 1;
            }
        }
    }
}
