//! Notifier trait - Destination Sender interface
//!
//! Defines the abstract interface for delivering one message to one destination.

use crate::{Message, SendError};

/// Message delivery trait
///
/// Every destination sender implements this trait. Implementations never
/// retry; a failure is reported once.
#[trait_variant::make(Notifier: Send)]
pub trait LocalNotifier {
    /// Sender name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Deliver one message
    ///
    /// # Errors
    /// Returns the classified delivery failure
    async fn send(&self, message: &Message) -> Result<(), SendError>;
}
