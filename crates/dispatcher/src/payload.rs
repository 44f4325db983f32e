//! Payload Formatter
//!
//! Pure mapping from (format, message) to content type and body. Never
//! performs I/O.

use bytes::Bytes;
use serde_json::{Map, Value};

use contracts::{CustomFormat, FormatError, FormatSpec, MESSAGE_PLACEHOLDER};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

/// Transport payload for one destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    /// `Content-Type` header value, empty means "do not send the header"
    pub content_type: String,
    pub body: Bytes,
}

/// Format a message for a destination format
///
/// # Errors
/// `FormatError::Empty` for a custom format with no template and no
/// content type
pub fn format(format_spec: &FormatSpec, message: &str) -> Result<Payload, FormatError> {
    match format_spec {
        FormatSpec::Discord => json_object("content", message),
        FormatSpec::GoogleChat => json_object("text", message),
        FormatSpec::PlainText => Ok(Payload {
            content_type: CONTENT_TYPE_TEXT.to_string(),
            body: Bytes::copy_from_slice(message.as_bytes()),
        }),
        FormatSpec::Custom(custom) => format_custom(custom, message),
    }
}

fn json_object(field: &str, message: &str) -> Result<Payload, FormatError> {
    let mut object = Map::new();
    object.insert(field.to_string(), Value::String(message.to_string()));
    let body = serde_json::to_vec(&Value::Object(object)).map_err(serialize_error)?;
    Ok(Payload {
        content_type: CONTENT_TYPE_JSON.to_string(),
        body: Bytes::from(body),
    })
}

fn format_custom(custom: &CustomFormat, message: &str) -> Result<Payload, FormatError> {
    if custom.template.is_empty() && custom.content_type.is_empty() {
        return Err(FormatError::Empty);
    }

    // Only JSON content types get escaping; anything else is substituted raw.
    let substitution = if custom.escape && is_json(&custom.content_type) {
        escape_json(message)?
    } else {
        message.to_string()
    };

    let body = custom.template.replace(MESSAGE_PLACEHOLDER, &substitution);

    Ok(Payload {
        content_type: custom.content_type.clone(),
        body: Bytes::from(body),
    })
}

fn is_json(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("json")
}

/// Escape for embedding inside a JSON string literal (no surrounding quotes)
fn escape_json(message: &str) -> Result<String, FormatError> {
    let quoted = serde_json::to_string(message).map_err(serialize_error)?;
    Ok(quoted[1..quoted.len() - 1].to_string())
}

fn serialize_error(e: serde_json::Error) -> FormatError {
    FormatError::Serialize {
        message: e.to_string(),
    }
}
