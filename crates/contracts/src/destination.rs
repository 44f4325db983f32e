//! Destination - where a message is delivered
//!
//! Closed variant sets for destinations and payload formats.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// One configured notification target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Destination {
    /// HTTP webhook endpoint
    Webhook {
        /// Absolute http(s) URL
        url: String,
        /// Payload format expected by the endpoint
        format: FormatSpec,
    },

    /// Desktop toast
    Desktop {
        /// Notification title
        #[serde(default = "default_summary")]
        summary: String,
        /// Keep the toast on screen until dismissed
        #[serde(default)]
        persistent: bool,
    },
}

fn default_summary() -> String {
    "noti".to_string()
}

impl Destination {
    /// Short type name (`webhook` / `desktop`)
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Webhook { .. } => "webhook",
            Self::Desktop { .. } => "desktop",
        }
    }

    /// Human label used in logs, metrics and reports.
    ///
    /// Webhooks are labelled by host only so tokens embedded in the path
    /// never reach the logs.
    pub fn label(&self) -> String {
        match self {
            Self::Webhook { url, format } => {
                match Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_owned)) {
                    Some(host) => format!("webhook({host}, {})", format.name()),
                    None => "webhook(<invalid>)".to_string(),
                }
            }
            Self::Desktop { summary, .. } => format!("desktop({summary})"),
        }
    }
}

/// Rule set for turning a message into a transport payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatSpec {
    /// `{"content": message}`
    Discord,
    /// `{"text": message}`
    GoogleChat,
    /// Raw message bytes
    PlainText,
    /// User supplied template
    Custom(CustomFormat),
}

impl FormatSpec {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Discord => "discord",
            Self::GoogleChat => "google_chat",
            Self::PlainText => "plain_text",
            Self::Custom(_) => "custom",
        }
    }
}

/// Placeholder replaced by the message in custom templates
pub const MESSAGE_PLACEHOLDER: &str = "$(message)";

/// Custom webhook format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFormat {
    /// Sent verbatim as `Content-Type`
    #[serde(default)]
    pub content_type: String,

    /// Body template, `$(message)` is substituted
    #[serde(default)]
    pub template: String,

    /// Escape the message for the content type before substitution
    #[serde(default)]
    pub escape: bool,

    /// Request method
    #[serde(default)]
    pub method: HttpMethod,

    /// Extra request headers (`Content-Type` not allowed here)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, String>,
}

/// Subset of HTTP methods usable with webhooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Post,
    Put,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
