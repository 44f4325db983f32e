//! Dispatcher - concurrent fan-out of one message to every sink

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{debug, instrument, warn};

use contracts::{DeliverySettings, Destination, DispatchReport, DispatchResult, Message, Notifier};

use crate::error::DispatcherError;
use crate::sinks::{DesktopBackend, NotifyRustBackend, Sink};

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Destinations in delivery order
    pub destinations: Vec<Destination>,
    /// Timeout and desktop app name
    pub delivery: DeliverySettings,
}

/// Builder for creating a Dispatcher
pub struct DispatcherBuilder {
    config: DispatcherConfig,
    desktop: Option<Arc<dyn DesktopBackend>>,
}

impl DispatcherBuilder {
    /// Create a new DispatcherBuilder
    pub fn new(config: DispatcherConfig) -> Self {
        Self {
            config,
            desktop: None,
        }
    }

    /// Replace the notify-rust binding used by desktop destinations
    pub fn with_desktop_backend(mut self, backend: Arc<dyn DesktopBackend>) -> Self {
        self.desktop = Some(backend);
        self
    }

    /// Build the dispatcher and its shared HTTP client
    #[instrument(
        name = "dispatcher_builder_build",
        skip(self),
        fields(destinations = self.config.destinations.len())
    )]
    pub fn build(self) -> Result<Dispatcher, DispatcherError> {
        let delivery = &self.config.delivery;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(delivery.timeout_secs))
            .user_agent(concat!("noti/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DispatcherError::client_build(e.to_string()))?;

        let desktop = self.desktop.unwrap_or_else(|| {
            Arc::new(NotifyRustBackend::new(delivery.app_name.clone())) as Arc<dyn DesktopBackend>
        });

        let sinks = self
            .config
            .destinations
            .iter()
            .map(|destination| Sink::from_destination(destination, &client, &desktop))
            .collect();

        Ok(Dispatcher::with_sinks(sinks))
    }
}

/// Fans one message out to every sink and collects the outcomes
///
/// Immutable after construction; share it behind an `Arc` to dispatch
/// several messages concurrently.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    sinks: Vec<Sink>,
}

impl Dispatcher {
    /// Create a dispatcher from prebuilt sinks
    pub fn with_sinks(sinks: Vec<Sink>) -> Self {
        Self { sinks }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Names of the sinks, in delivery order
    pub fn sink_names(&self) -> impl Iterator<Item = &str> {
        self.sinks.iter().map(|sink| sink.name())
    }

    /// Send `message` to every sink concurrently.
    ///
    /// Never fails: each sink's outcome lands in the report at the sink's
    /// position. A failing sink does not cancel the others, and the only
    /// bound on a send is the sink's own timeout.
    #[instrument(
        name = "dispatcher_dispatch",
        skip(self, message),
        fields(sinks = self.sinks.len(), bytes = message.len())
    )]
    pub async fn dispatch(&self, message: &Message) -> DispatchReport {
        let started = Instant::now();

        let sends = self.sinks.iter().enumerate().map(|(index, sink)| async move {
            let outcome = sink.send(message).await;
            DispatchResult::from_outcome(index, sink.name(), outcome)
        });

        let report = DispatchReport::new(join_all(sends).await);

        for result in report.iter() {
            observability::record_delivery(result);
            if let Some(error) = &result.error {
                warn!(
                    destination = %result.destination,
                    kind = error.kind(),
                    error = %error,
                    "Delivery failed"
                );
            }
        }

        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
        observability::record_dispatch(&report, latency_ms);

        debug!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            latency_ms,
            "Dispatch complete"
        );

        report
    }
}

/// Convenience function to create a dispatcher from destinations
#[instrument(name = "dispatcher_create", skip(destinations, delivery))]
pub fn create_dispatcher(
    destinations: Vec<Destination>,
    delivery: DeliverySettings,
) -> Result<Dispatcher, DispatcherError> {
    let config = DispatcherConfig {
        destinations,
        delivery,
    };
    DispatcherBuilder::new(config).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::RecordingBackend;
    use contracts::{FormatSpec, SendError};

    fn delivery() -> DeliverySettings {
        DeliverySettings {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    fn desktop(summary: &str) -> Destination {
        Destination::Desktop {
            summary: summary.to_string(),
            persistent: false,
        }
    }

    #[tokio::test]
    async fn test_report_preserves_destination_order() {
        let backend = Arc::new(RecordingBackend::default());
        let destinations = vec![desktop("first"), desktop("second"), desktop("third")];

        let dispatcher = DispatcherBuilder::new(DispatcherConfig {
            destinations,
            delivery: delivery(),
        })
        .with_desktop_backend(backend.clone())
        .build()
        .unwrap();

        let report = dispatcher.dispatch(&Message::from("hello")).await;

        assert_eq!(report.len(), 3);
        let names: Vec<_> = report.iter().map(|r| r.destination.as_str()).collect();
        assert_eq!(names, ["desktop(first)", "desktop(second)", "desktop(third)"]);
        let indices: Vec<_> = report.iter().map(|r| r.index).collect();
        assert_eq!(indices, [0, 1, 2]);
        assert!(report.iter().all(|r| r.ok));
        assert_eq!(backend.shown.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_partial_failure_does_not_block_others() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(500)
            .create_async()
            .await;

        let backend = Arc::new(RecordingBackend::default());
        let destinations = vec![
            Destination::Webhook {
                url: server.url(),
                format: FormatSpec::Discord,
            },
            desktop("ok"),
        ];

        let dispatcher = DispatcherBuilder::new(DispatcherConfig {
            destinations,
            delivery: delivery(),
        })
        .with_desktop_backend(backend.clone())
        .build()
        .unwrap();

        let report = dispatcher.dispatch(&Message::from("deploy failed")).await;

        assert_eq!(report.len(), 2);
        assert!(!report.results()[0].ok);
        assert_eq!(
            report.results()[0].error,
            Some(SendError::HttpStatus { status: 500 })
        );
        assert!(report.results()[1].ok);
        assert!(!report.all_failed());
        assert_eq!(backend.shown.lock().unwrap()[0].1, "deploy failed");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_all_failed() {
        let backend = Arc::new(RecordingBackend {
            fail: true,
            ..Default::default()
        });

        let dispatcher = DispatcherBuilder::new(DispatcherConfig {
            destinations: vec![desktop("a"), desktop("b")],
            delivery: delivery(),
        })
        .with_desktop_backend(backend)
        .build()
        .unwrap();

        let report = dispatcher.dispatch(&Message::from("x")).await;
        assert!(report.all_failed());
        assert_eq!(report.failed(), 2);
    }

    #[tokio::test]
    async fn test_empty_destination_list_yields_empty_report() {
        let dispatcher = create_dispatcher(Vec::new(), delivery()).unwrap();
        assert!(dispatcher.is_empty());

        let report = dispatcher.dispatch(&Message::from("nobody listens")).await;
        assert!(report.is_empty());
        assert!(!report.all_failed());
    }

    #[test]
    fn test_sink_names() {
        let dispatcher = create_dispatcher(vec![desktop("x")], delivery()).unwrap();
        assert_eq!(dispatcher.len(), 1);
        assert_eq!(dispatcher.sink_names().collect::<Vec<_>>(), ["desktop(x)"]);
    }
}
