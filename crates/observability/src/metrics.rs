//! Dispatch metrics
//!
//! Counters exported through the `metrics` facade plus an in-memory
//! aggregator for the end-of-run summary.

use std::collections::HashMap;

use contracts::{DispatchReport, DispatchResult};
use metrics::{counter, histogram};

/// Record one per-destination outcome
pub fn record_delivery(result: &DispatchResult) {
    let status = if result.ok { "success" } else { "failure" };
    counter!(
        "noti_deliveries_total",
        "destination" => result.destination.clone(),
        "status" => status.to_string()
    )
    .increment(1);

    if let Some(error) = &result.error {
        counter!(
            "noti_delivery_errors_total",
            "destination" => result.destination.clone(),
            "kind" => error.kind().to_string()
        )
        .increment(1);
    }
}

/// Record one completed dispatch
///
/// # Example
///
/// ```ignore
/// let report = dispatcher.dispatch(&message).await;
/// observability::record_dispatch(&report, started.elapsed().as_secs_f64() * 1000.0);
/// ```
pub fn record_dispatch(report: &DispatchReport, latency_ms: f64) {
    let status = if report.all_failed() {
        "failed"
    } else if report.failed() > 0 {
        "partial"
    } else {
        "delivered"
    };
    counter!("noti_messages_total", "status" => status.to_string()).increment(1);
    histogram!("noti_dispatch_latency_ms").record(latency_ms);
}

/// Dispatch metrics aggregator
///
/// Aggregates reports in memory for the run summary.
#[derive(Debug, Clone, Default)]
pub struct DispatchMetricsAggregator {
    /// Messages dispatched
    pub total_messages: u64,

    /// Messages for which every destination failed
    pub messages_failed: u64,

    /// Successful deliveries
    pub deliveries_ok: u64,

    /// Failed deliveries
    pub deliveries_failed: u64,

    /// Dispatch latency statistics
    pub latency_stats: RunningStats,

    /// Failures per destination
    pub failure_counts: HashMap<String, u64>,
}

impl DispatchMetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one report into the totals
    pub fn update(&mut self, report: &DispatchReport, latency_ms: f64) {
        self.total_messages += 1;
        if report.all_failed() {
            self.messages_failed += 1;
        }

        self.deliveries_ok += report.succeeded() as u64;
        self.deliveries_failed += report.failed() as u64;

        for result in report.iter().filter(|r| !r.ok) {
            *self
                .failure_counts
                .entry(result.destination.clone())
                .or_insert(0) += 1;
        }

        self.latency_stats.push(latency_ms);
    }

    /// Build a summary
    pub fn summary(&self) -> MetricsSummary {
        let deliveries = self.deliveries_ok + self.deliveries_failed;
        MetricsSummary {
            total_messages: self.total_messages,
            messages_failed: self.messages_failed,
            deliveries_ok: self.deliveries_ok,
            deliveries_failed: self.deliveries_failed,
            failure_rate: if deliveries > 0 {
                self.deliveries_failed as f64 / deliveries as f64 * 100.0
            } else {
                0.0
            },
            latency_ms: StatsSummary::from(&self.latency_stats),
            destination_failure_counts: self.failure_counts.clone(),
        }
    }
}

/// Metrics summary
#[derive(Debug, Clone, Default)]
pub struct MetricsSummary {
    pub total_messages: u64,
    pub messages_failed: u64,
    pub deliveries_ok: u64,
    pub deliveries_failed: u64,
    pub failure_rate: f64,
    pub latency_ms: StatsSummary,
    pub destination_failure_counts: HashMap<String, u64>,
}

impl std::fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Dispatch Summary ===")?;
        writeln!(f, "Messages: {}", self.total_messages)?;
        writeln!(f, "Messages failed everywhere: {}", self.messages_failed)?;
        writeln!(
            f,
            "Deliveries: {} ok, {} failed ({:.2}%)",
            self.deliveries_ok, self.deliveries_failed, self.failure_rate
        )?;
        writeln!(f, "Dispatch latency (ms): {}", self.latency_ms)?;

        if !self.destination_failure_counts.is_empty() {
            writeln!(f, "Failures by destination:")?;
            for (destination, count) in &self.destination_failure_counts {
                writeln!(f, "  {}: {}", destination, count)?;
            }
        }

        Ok(())
    }
}

/// Statistics summary
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.1}, max={:.1}, mean={:.1} (n={})",
                self.min, self.max, self.mean, self.count
            )
        }
    }
}

/// Online min/max/mean
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Add a value
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
            self.mean += (value - self.mean) / self.count as f64;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
