//! Error types for CLI operations.

use std::path::PathBuf;

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Stream mode is off and no message was given
    #[error("A message must be provided when not streaming notifications")]
    NoMessage,

    /// Stream mode is on and a message was given anyway
    #[error("A message cannot be provided when using streaming")]
    StreamAndMessage,

    /// `init` would overwrite an existing file
    #[error("Configuration file already exists: {}", path.display())]
    ConfigConflict { path: PathBuf },

    /// Every destination failed for a single-shot message
    #[error("Delivery failed to all {destinations} destination(s)")]
    DeliveryFailed { destinations: usize },

    /// Reading the input stream failed
    #[error("Failed to read input stream: {message}")]
    StreamRead { message: String },
}

impl CliError {
    pub fn config_conflict(path: impl Into<PathBuf>) -> Self {
        Self::ConfigConflict { path: path.into() }
    }

    pub fn stream_read(message: impl Into<String>) -> Self {
        Self::StreamRead {
            message: message.into(),
        }
    }
}
