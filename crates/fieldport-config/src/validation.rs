// SPDX-FileCopyrightText: 2026 Fieldport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses and credential pairing.

use crate::diagnostic::ConfigError;
use crate::model::FieldportConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &FieldportConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must not be 0".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.server.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "server.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.server.log_level
            ),
        });
    }

    // The upstream provider needs both halves of the basic-auth pair.
    // Half a credential is always a deployment mistake, so it fails
    // startup instead of silently serving fixture data.
    let has_key = config.servicem8.api_key.as_deref().is_some_and(|s| !s.trim().is_empty());
    let has_secret = config
        .servicem8
        .api_secret
        .as_deref()
        .is_some_and(|s| !s.trim().is_empty());
    if has_key != has_secret {
        errors.push(ConfigError::Validation {
            message: "servicem8.api_key and servicem8.api_secret must be set together"
                .to_string(),
        });
    }

    let base_url = config.servicem8.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("servicem8.base_url must be an http(s) URL, got `{base_url}`"),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = FieldportConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_host_fails_validation() {
        let mut config = FieldportConfig::default();
        config.server.host = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("server.host"))
        ));
    }

    #[test]
    fn port_zero_fails_validation() {
        let mut config = FieldportConfig::default();
        config.server.port = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("server.port"))
        ));
    }

    #[test]
    fn bad_log_level_fails_validation() {
        let mut config = FieldportConfig::default();
        config.server.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))
        ));
    }

    #[test]
    fn lone_api_key_fails_validation() {
        let mut config = FieldportConfig::default();
        config.servicem8.api_key = Some("key".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("set together"))
        ));
    }

    #[test]
    fn credential_pair_passes_validation() {
        let mut config = FieldportConfig::default();
        config.servicem8.api_key = Some("key".to_string());
        config.servicem8.api_secret = Some("secret".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = FieldportConfig::default();
        config.servicem8.base_url = "ftp://api.servicem8.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("base_url"))
        ));
    }

    #[test]
    fn multiple_errors_are_collected() {
        let mut config = FieldportConfig::default();
        config.server.port = 0;
        config.server.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
