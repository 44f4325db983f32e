//! NotiConfig - Config Loader output
//!
//! Destinations, stream settings and delivery tuning for one invocation.

use serde::{Deserialize, Serialize};

use crate::Destination;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// A complete noti configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotiConfig {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Ordered destination list, immutable once loaded
    #[serde(alias = "destination")]
    pub destinations: Vec<Destination>,

    /// Stream mode settings
    #[serde(default)]
    pub stream: StreamSettings,

    /// Transport tuning
    #[serde(default)]
    pub delivery: DeliverySettings,
}

/// Where to echo received stdin lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Redirect {
    Stdout,
    Stderr,
}

/// Stream mode settings as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreamSettings {
    /// Read messages from stdin instead of the command line
    #[serde(default)]
    pub enabled: bool,

    /// Regex selecting which lines become notifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching: Option<String>,

    /// Echo every input line to this stream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Redirect>,
}

/// Transport tuning shared by all destinations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverySettings {
    /// Per-request HTTP timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Application name shown by desktop notifications
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Stream mode: most messages being dispatched at once
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_app_name() -> String {
    "noti".to_string()
}

fn default_max_in_flight() -> usize {
    32
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            app_name: default_app_name(),
            max_in_flight: default_max_in_flight(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_sections_missing() {
        let content = r#"
[[destinations]]
type = "desktop"
"#;
        let config: NotiConfig = toml::from_str(content).unwrap();
        assert_eq!(config.version, ConfigVersion::V1);
        assert!(!config.stream.enabled);
        assert_eq!(config.stream.redirect, None);
        assert_eq!(config.delivery.timeout_secs, 10);
        assert_eq!(config.delivery.app_name, "noti");
        assert_eq!(config.delivery.max_in_flight, 32);
    }

    #[test]
    fn test_singular_destination_key() {
        let content = r#"
[[destination]]
type = "desktop"
summary = "Noti"
persistent = false
"#;
        let config: NotiConfig = toml::from_str(content).unwrap();
        assert_eq!(config.destinations.len(), 1);
    }

    #[test]
    fn test_stream_section() {
        let content = r#"
destinations = []

[stream]
enabled = true
matching = "^(WARN:.*)|^(ERROR:.*)"
redirect = "stderr"
"#;
        let config: NotiConfig = toml::from_str(content).unwrap();
        assert!(config.stream.enabled);
        assert_eq!(config.stream.redirect, Some(Redirect::Stderr));
        assert_eq!(
            config.stream.matching.as_deref(),
            Some("^(WARN:.*)|^(ERROR:.*)")
        );
    }
}
