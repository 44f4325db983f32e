//! Pipeline statistics.

use std::time::Duration;

use contracts::DispatchReport;
use observability::DispatchMetricsAggregator;

/// Statistics from a pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Input lines read (stream mode only)
    pub lines_read: u64,

    /// Messages handed to the dispatcher
    pub messages_dispatched: u64,

    /// Dispatch tasks that panicked or were aborted
    pub tasks_lost: u64,

    /// Total duration of the run
    pub duration: Duration,

    /// Per-report delivery totals
    pub deliveries: DispatchMetricsAggregator,
}

impl PipelineStats {
    /// Fold one finished dispatch into the totals
    pub fn record(&mut self, report: &DispatchReport, latency: Duration) {
        self.deliveries.update(report, latency.as_secs_f64() * 1000.0);
    }

    /// Messages for which every destination failed
    pub fn messages_failed(&self) -> u64 {
        self.deliveries.messages_failed
    }

    pub fn deliveries_ok(&self) -> u64 {
        self.deliveries.deliveries_ok
    }

    pub fn deliveries_failed(&self) -> u64 {
        self.deliveries.deliveries_failed
    }

    /// Log the run summary
    pub fn log_summary(&self) {
        tracing::info!(
            lines_read = self.lines_read,
            messages_dispatched = self.messages_dispatched,
            deliveries_ok = self.deliveries_ok(),
            deliveries_failed = self.deliveries_failed(),
            messages_failed = self.messages_failed(),
            tasks_lost = self.tasks_lost,
            duration_secs = self.duration.as_secs_f64(),
            "Pipeline finished"
        );
        tracing::debug!("\n{}", self.deliveries.summary());
    }
}
