//! `validate` command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use contracts::{Destination, NotiConfig};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    destinations: Vec<String>,
    stream_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    matching: Option<String>,
    timeout_secs: u64,
}

/// Execute the `validate` command
pub fn run_validate(path: &Path, args: &ValidateArgs) -> Result<()> {
    info!(config = %path.display(), "Validating configuration");

    let result = validate_config(path);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(path: &Path) -> ValidationResult {
    let config_path = path.display().to_string();

    if !path.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", path.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(path) {
        Ok(config) => {
            let warnings = collect_warnings(&config);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", config.version),
                    destinations: config.destinations.iter().map(Destination::label).collect(),
                    stream_enabled: config.stream.enabled,
                    matching: config.stream.matching.clone(),
                    timeout_secs: config.delivery.timeout_secs,
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(config: &NotiConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.stream.enabled && config.stream.matching.is_none() {
        warnings.push(
            "stream.matching is not set - every stdin line will be sent as a notification"
                .to_string(),
        );
    }

    let stream_configured = config.stream.matching.is_some() || config.stream.redirect.is_some();
    if !config.stream.enabled && stream_configured {
        warnings.push("stream settings are ignored while stream.enabled is false".to_string());
    }

    for destination in &config.destinations {
        if let Destination::Webhook { url, .. } = destination {
            if url.contains("%3C") || url.contains('<') {
                warnings.push(format!(
                    "{} still contains a placeholder URL",
                    destination.label()
                ));
            }
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Destinations ({}):", summary.destinations.len());
            for destination in &summary.destinations {
                println!("    - {}", destination);
            }
            match (&summary.stream_enabled, &summary.matching) {
                (true, Some(pattern)) => println!("  Stream: enabled, matching {}", pattern),
                (true, None) => println!("  Stream: enabled, every line"),
                (false, _) => println!("  Stream: disabled"),
            }
            println!("  Timeout: {}s", summary.timeout_secs);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_valid_config_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "noti.toml",
            r#"
[[destinations]]
type = "desktop"

[stream]
enabled = true
"#,
        );

        let result = validate_config(&path);

        assert!(result.valid);
        let summary = result.summary.unwrap();
        assert_eq!(summary.destinations, ["desktop(noti)"]);
        assert!(summary.stream_enabled);
        assert_eq!(result.warnings.unwrap().len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = validate_config(&dir.path().join("absent.toml"));
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("File not found"));
    }

    #[test]
    fn test_invalid_config_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "noti.json", r#"{"destinations": []}"#);

        let result = validate_config(&path);

        assert!(!result.valid);
        assert!(result.error.unwrap().contains("at least one destination"));
    }

    #[test]
    fn test_placeholder_url_warning() {
        let config = config_loader::starter(config_loader::Starter::Webhook);
        let warnings = collect_warnings(&config);
        assert!(warnings.iter().any(|w| w.contains("placeholder URL")));
    }
}
