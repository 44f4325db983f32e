//! # Contracts
//!
//! Frozen interface contracts shared by every noti crate: the destination
//! model, the message type, dispatch reports, the sender trait and the
//! layered error types.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Data flow
//! input line -> `Message` -> one `Notifier::send` per `Destination` -> `DispatchReport`

mod config;
mod destination;
mod error;
mod message;
mod notifier;
mod report;

pub use config::*;
pub use destination::*;
pub use error::*;
pub use message::Message;
pub use notifier::{LocalNotifier, Notifier};
pub use report::*;
