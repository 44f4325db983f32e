//! # Dispatcher
//!
//! Message delivery for noti.
//!
//! Responsible for:
//! - Formatting a message per destination (`payload`)
//! - Sending it over HTTP or to the desktop (`sinks`)
//! - Fanning one message out to every destination concurrently and
//!   reporting per-destination outcomes in order

pub mod dispatcher;
pub mod error;
pub mod payload;
pub mod sinks;

pub use contracts::{DispatchReport, DispatchResult, Message, Notifier};
pub use dispatcher::{Dispatcher, DispatcherBuilder, DispatcherConfig, create_dispatcher};
pub use error::DispatcherError;
pub use payload::Payload;
pub use sinks::{DesktopBackend, DesktopSink, NotifyRustBackend, Sink, WebhookSink};
