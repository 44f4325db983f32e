//! Config validation
//!
//! Rules:
//! - at least one destination
//! - webhook url is an absolute http(s) URL
//! - custom format: template or content_type present, header names/values legal,
//!   no `Content-Type` entry in `headers`
//! - desktop summary not empty
//! - stream.matching compiles
//! - delivery.timeout_secs > 0, delivery.max_in_flight > 0

use contracts::{ContractError, CustomFormat, Destination, FormatSpec, NotiConfig};
use http::{HeaderName, HeaderValue};
use url::Url;

/// Validate a NotiConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &NotiConfig) -> Result<(), ContractError> {
    validate_destination_list(config)?;
    for (idx, destination) in config.destinations.iter().enumerate() {
        validate_destination(idx, destination)?;
    }
    validate_stream(config)?;
    validate_delivery(config)?;
    Ok(())
}

/// An empty list is a configuration error, never a per-message one
fn validate_destination_list(config: &NotiConfig) -> Result<(), ContractError> {
    if config.destinations.is_empty() {
        return Err(ContractError::config_validation(
            "destinations",
            "at least one destination is required",
        ));
    }
    Ok(())
}

fn validate_destination(idx: usize, destination: &Destination) -> Result<(), ContractError> {
    match destination {
        Destination::Webhook { url, format } => {
            validate_url(idx, url)?;
            if let FormatSpec::Custom(custom) = format {
                validate_custom_format(idx, custom)?;
            }
        }
        Destination::Desktop { summary, .. } => {
            if summary.trim().is_empty() {
                return Err(ContractError::config_validation(
                    format!("destinations[{idx}].summary"),
                    "summary cannot be empty",
                ));
            }
        }
    }
    Ok(())
}

fn validate_url(idx: usize, url: &str) -> Result<(), ContractError> {
    let field = format!("destinations[{idx}].url");
    let parsed = Url::parse(url).map_err(|e| {
        ContractError::config_validation(&field, format!("invalid url '{url}': {e}"))
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ContractError::config_validation(
            field,
            format!("unsupported url scheme '{other}', expected http or https"),
        )),
    }
}

fn validate_custom_format(idx: usize, custom: &CustomFormat) -> Result<(), ContractError> {
    let prefix = format!("destinations[{idx}].format.custom");

    if custom.template.is_empty() && custom.content_type.is_empty() {
        return Err(ContractError::config_validation(
            &prefix,
            "template and content_type cannot both be empty",
        ));
    }

    if HeaderValue::from_str(&custom.content_type).is_err() {
        return Err(ContractError::config_validation(
            format!("{prefix}.content_type"),
            format!("'{}' is not a valid header value", custom.content_type),
        ));
    }

    for (name, value) in &custom.headers {
        let field = format!("{prefix}.headers.{name}");
        let header = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            ContractError::config_validation(&field, "invalid header name")
        })?;
        if header == http::header::CONTENT_TYPE {
            return Err(ContractError::config_validation(
                field,
                "set the content type with content_type, not headers",
            ));
        }
        HeaderValue::from_str(value).map_err(|_| {
            ContractError::config_validation(&field, "invalid header value")
        })?;
    }

    Ok(())
}

fn validate_stream(config: &NotiConfig) -> Result<(), ContractError> {
    if let Some(pattern) = &config.stream.matching {
        regex::Regex::new(pattern).map_err(|e| {
            ContractError::config_validation("stream.matching", format!("invalid regex: {e}"))
        })?;
    }
    Ok(())
}

fn validate_delivery(config: &NotiConfig) -> Result<(), ContractError> {
    if config.delivery.timeout_secs == 0 {
        return Err(ContractError::config_validation(
            "delivery.timeout_secs",
            "timeout_secs must be > 0",
        ));
    }
    if config.delivery.max_in_flight == 0 {
        return Err(ContractError::config_validation(
            "delivery.max_in_flight",
            "max_in_flight must be > 0",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{DeliverySettings, HttpMethod, StreamSettings};
    use indexmap::IndexMap;

    fn minimal_config() -> NotiConfig {
        NotiConfig {
            version: Default::default(),
            destinations: vec![
                Destination::Webhook {
                    url: "https://discord.com/api/webhooks/1/abc".into(),
                    format: FormatSpec::Discord,
                },
                Destination::Desktop {
                    summary: "noti".into(),
                    persistent: false,
                },
            ],
            stream: StreamSettings::default(),
            delivery: DeliverySettings::default(),
        }
    }

    fn custom(content_type: &str, template: &str) -> CustomFormat {
        CustomFormat {
            content_type: content_type.into(),
            template: template.into(),
            escape: false,
            method: HttpMethod::Post,
            headers: IndexMap::new(),
        }
    }

    fn with_custom(format: CustomFormat) -> NotiConfig {
        let mut config = minimal_config();
        config.destinations[0] = Destination::Webhook {
            url: "https://example.com/hook".into(),
            format: FormatSpec::Custom(format),
        };
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&minimal_config()).is_ok());
    }

    #[test]
    fn test_empty_destinations() {
        let mut config = minimal_config();
        config.destinations.clear();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("at least one destination"), "got: {err}");
    }

    #[test]
    fn test_relative_url_rejected() {
        let mut config = minimal_config();
        config.destinations[0] = Destination::Webhook {
            url: "/api/webhooks".into(),
            format: FormatSpec::PlainText,
        };
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("destinations[0].url"), "got: {err}");
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut config = minimal_config();
        config.destinations[0] = Destination::Webhook {
            url: "ftp://example.com/drop".into(),
            format: FormatSpec::PlainText,
        };
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("unsupported url scheme"), "got: {err}");
    }

    #[test]
    fn test_empty_custom_format_rejected() {
        let err = validate(&with_custom(custom("", ""))).unwrap_err().to_string();
        assert!(err.contains("cannot both be empty"), "got: {err}");
    }

    #[test]
    fn test_template_without_placeholder_is_valid() {
        assert!(validate(&with_custom(custom("text/plain", "build finished"))).is_ok());
    }

    #[test]
    fn test_content_type_in_headers_rejected() {
        let mut format = custom("application/json", "{}");
        format
            .headers
            .insert("content-type".into(), "text/plain".into());
        let err = validate(&with_custom(format)).unwrap_err().to_string();
        assert!(err.contains("content_type, not headers"), "got: {err}");
    }

    #[test]
    fn test_invalid_header_name_rejected() {
        let mut format = custom("application/json", "{}");
        format.headers.insert("bad header".into(), "x".into());
        let err = validate(&with_custom(format)).unwrap_err().to_string();
        assert!(err.contains("invalid header name"), "got: {err}");
    }

    #[test]
    fn test_empty_summary_rejected() {
        let mut config = minimal_config();
        config.destinations[1] = Destination::Desktop {
            summary: "  ".into(),
            persistent: true,
        };
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("destinations[1].summary"), "got: {err}");
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let mut config = minimal_config();
        config.stream.matching = Some("(unclosed".into());
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("stream.matching"), "got: {err}");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = minimal_config();
        config.delivery.timeout_secs = 0;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("timeout_secs must be > 0"), "got: {err}");
    }

    #[test]
    fn test_zero_in_flight_rejected() {
        let mut config = minimal_config();
        config.delivery.max_in_flight = 0;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("delivery.max_in_flight"), "got: {err}");
    }
}
