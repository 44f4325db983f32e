//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON/YAML configuration files
//! - Validate configuration legality
//! - Generate `NotiConfig`
//! - Render starter configurations for `noti init`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("noti.toml")).unwrap();
//! println!("Destinations: {}", config.destinations.len());
//! ```

mod parser;
mod templates;
mod validator;

pub use contracts::NotiConfig;
pub use parser::ConfigFormat;
pub use templates::{starter, Starter};

use contracts::ContractError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json / .yaml / .yml).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<NotiConfig, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<NotiConfig, ContractError> {
        Self::parse_and_validate(content, format)
    }

    /// Serialize NotiConfig to TOML string
    pub fn to_toml(config: &NotiConfig) -> Result<String, ContractError> {
        toml::to_string_pretty(config)
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize NotiConfig to JSON string
    pub fn to_json(config: &NotiConfig) -> Result<String, ContractError> {
        serde_json::to_string_pretty(config)
            .map_err(|e| ContractError::config_parse(format!("JSON serialize error: {e}")))
    }

    /// Serialize NotiConfig to YAML string
    ///
    /// Enums are written as single-key maps (`format: {custom: ...}`);
    /// YAML tags would not survive the tagged `Destination` on reload.
    pub fn to_yaml(config: &NotiConfig) -> Result<String, ContractError> {
        let serialize_error = |e: &dyn std::fmt::Display| {
            ContractError::config_parse(format!("YAML serialize error: {e}"))
        };

        let mut out = Vec::new();
        {
            let mut serializer = serde_yaml::Serializer::new(&mut out);
            serde_yaml::with::singleton_map_recursive::serialize(config, &mut serializer)
                .map_err(|e| serialize_error(&e))?;
        }
        String::from_utf8(out).map_err(|e| serialize_error(&e))
    }

    /// Serialize NotiConfig in the format implied by `path`
    pub fn render_for_path(config: &NotiConfig, path: &Path) -> Result<String, ContractError> {
        match Self::detect_format(path)? {
            ConfigFormat::Toml => Self::to_toml(config),
            ConfigFormat::Json => Self::to_json(config),
            ConfigFormat::Yaml => Self::to_yaml(config),
        }
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Parse and validate configuration content
    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<NotiConfig, ContractError> {
        let config = parser::parse(content, format)?;
        validator::validate(&config)?;
        Ok(config)
    }
}
