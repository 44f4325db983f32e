//! Sink implementations
//!
//! Contains WebhookSink and DesktopSink, plus the `Sink` enum that
//! dispatches between them.

mod desktop;
mod webhook;

use std::sync::Arc;

use contracts::{Destination, Message, Notifier, SendError};

pub use self::desktop::{DesktopBackend, DesktopSink, NotifyRustBackend};
pub use self::webhook::WebhookSink;

#[cfg(test)]
pub(crate) use self::desktop::tests::RecordingBackend;

/// One destination sender, closed over the destination variants
#[derive(Debug, Clone)]
pub enum Sink {
    Webhook(WebhookSink),
    Desktop(DesktopSink),
}

impl Sink {
    /// Build the sender for a destination
    pub fn from_destination(
        destination: &Destination,
        client: &reqwest::Client,
        desktop: &Arc<dyn DesktopBackend>,
    ) -> Self {
        let name = destination.label();
        match destination {
            Destination::Webhook { url, format } => Self::Webhook(WebhookSink::new(
                name,
                url.clone(),
                format.clone(),
                client.clone(),
            )),
            Destination::Desktop {
                summary,
                persistent,
            } => Self::Desktop(DesktopSink::new(
                name,
                summary.clone(),
                *persistent,
                Arc::clone(desktop),
            )),
        }
    }
}

impl Notifier for Sink {
    fn name(&self) -> &str {
        match self {
            Self::Webhook(sink) => sink.name(),
            Self::Desktop(sink) => sink.name(),
        }
    }

    async fn send(&self, message: &Message) -> Result<(), SendError> {
        match self {
            Self::Webhook(sink) => sink.send(message).await,
            Self::Desktop(sink) => sink.send(message).await,
        }
    }
}
