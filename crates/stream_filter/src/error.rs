//! Stream filter error types

use thiserror::Error;

/// Stream filter errors
#[derive(Debug, Error)]
pub enum StreamError {
    /// `stream.matching` is not a valid regex
    #[error("invalid matching pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Reading input or writing the redirect target failed
    #[error("stream io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stream filter Result alias
pub type Result<T> = std::result::Result<T, StreamError>;
