//! # Stream Filter
//!
//! Turns a line stream (normally stdin) into notification messages.
//!
//! Responsibilities:
//! - Compile `StreamSettings` into a `StreamConfig`
//! - Select lines with the optional `matching` regex
//! - Echo every line to the redirect target, in input order
//! - Yield messages lazily until end of input
//! - Read stdin on a detached thread so shutdown never waits on it
//!
//! ## Usage Example
//!
//! ```ignore
//! use stream_filter::{StreamConfig, StreamFilter};
//!
//! let config = StreamConfig::from_settings(&noti_config.stream)?;
//! let mut filter = StreamFilter::stdin(&config)?;
//! while let Some(message) = filter.next_message().await? {
//!     dispatcher.dispatch(&message).await;
//! }
//! ```

mod config;
mod error;
mod filter;
mod reader;

// Re-exports
pub use config::StreamConfig;
pub use contracts::{Message, Redirect};
pub use error::{Result, StreamError};
pub use filter::{FilterStats, RedirectWriter, StreamFilter};
pub use reader::ThreadReader;
