//! Dispatcher error types

use thiserror::Error;

/// Dispatcher-specific errors
///
/// Delivery failures never surface here; they are captured per destination
/// in the `DispatchReport`.
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// HTTP client construction failed
    #[error("failed to build http client: {message}")]
    ClientBuild { message: String },
}

impl DispatcherError {
    /// Create a client build error
    pub fn client_build(message: impl Into<String>) -> Self {
        Self::ClientBuild {
            message: message.into(),
        }
    }
}
