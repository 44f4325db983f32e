//! Layered error definitions
//!
//! Categorized by source: config / format / send

use thiserror::Error;

/// Unified error type for loading and validating configuration
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Payload formatting failure
///
/// Normally caught by config validation before any send happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Custom format with neither template nor content type
    #[error("custom format has an empty template and an empty content type")]
    Empty,

    /// Payload could not be serialized
    #[error("payload serialization failed: {message}")]
    Serialize { message: String },
}

/// Per-destination delivery failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// Request exceeded the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Desktop notification binding failed
    #[error("desktop notifications unavailable: {message}")]
    DesktopUnavailable { message: String },

    /// Endpoint answered with a non-2xx status
    #[error("endpoint returned HTTP {status}")]
    HttpStatus { status: u16 },

    /// DNS, connect or protocol failure
    #[error("transport error: {reason}")]
    Transport { reason: String },

    /// Payload could not be built
    #[error("format error: {0}")]
    Format(#[from] FormatError),
}

impl SendError {
    /// Create desktop unavailable error
    pub fn desktop_unavailable(message: impl Into<String>) -> Self {
        Self::DesktopUnavailable {
            message: message.into(),
        }
    }

    /// Create transport error
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Stable short name, used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::DesktopUnavailable { .. } => "desktop_unavailable",
            Self::HttpStatus { .. } => "http_status",
            Self::Transport { .. } => "transport",
            Self::Format(_) => "format",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ContractError::config_validation(
            "destinations",
            "at least one destination is required",
        );
        assert_eq!(
            err.to_string(),
            "config validation error at 'destinations': at least one destination is required"
        );

        assert_eq!(
            SendError::HttpStatus { status: 500 }.to_string(),
            "endpoint returned HTTP 500"
        );
        assert_eq!(SendError::from(FormatError::Empty).kind(), "format");
    }
}
