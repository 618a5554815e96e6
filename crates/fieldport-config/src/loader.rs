// SPDX-FileCopyrightText: 2026 Fieldport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./fieldport.toml` > `~/.config/fieldport/fieldport.toml`
//! > `/etc/fieldport/fieldport.toml` with environment variable overrides via the
//! `FIELDPORT_` prefix, plus the legacy unprefixed variables the original
//! deployment used (`PORT`, `SERVICEM8_API_KEY`, `SERVICEM8_API_SECRET`,
//! `SERVICEM8_BASE_URL`).

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::FieldportConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/fieldport/fieldport.toml` (system-wide)
/// 3. `~/.config/fieldport/fieldport.toml` (user XDG config)
/// 4. `./fieldport.toml` (local directory)
/// 5. Legacy unprefixed environment variables
/// 6. `FIELDPORT_*` environment variables
pub fn load_config() -> Result<FieldportConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FieldportConfig::default()))
        .merge(Toml::file("/etc/fieldport/fieldport.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("fieldport/fieldport.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("fieldport.toml"))
        .merge(legacy_env_provider())
        .merge(env_provider())
        .extract()
}

/// Load configuration from a specific TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<FieldportConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FieldportConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FieldportConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FieldportConfig::default()))
        .merge(Toml::file(path))
        .merge(legacy_env_provider())
        .merge(env_provider())
        .extract()
}

/// Create the `FIELDPORT_`-prefixed environment provider using explicit
/// `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// key names stay unambiguous: `FIELDPORT_SERVICEM8_API_KEY` must map to
/// `servicem8.api_key`, not `servicem8.api.key`.
fn env_provider() -> Env {
    Env::prefixed("FIELDPORT_").map(|key| {
        // `key` keeps the env var's original case with the prefix
        // stripped. Example: FIELDPORT_SERVER_LOG_LEVEL -> "SERVER_LOG_LEVEL"
        key.as_str()
            .to_ascii_lowercase()
            .replacen("server_", "server.", 1)
            .replacen("servicem8_", "servicem8.", 1)
            .into()
    })
}

/// Create the provider for the unprefixed variable names the original
/// deployment documented (spelled out here so nothing else in the
/// environment leaks into the config).
fn legacy_env_provider() -> Env {
    Env::raw()
        .only(&[
            "PORT",
            "SERVICEM8_API_KEY",
            "SERVICEM8_API_SECRET",
            "SERVICEM8_BASE_URL",
        ])
        .map(|key| match key.as_str().to_ascii_lowercase().as_str() {
            "port" => "server.port".into(),
            "servicem8_api_key" => "servicem8.api_key".into(),
            "servicem8_api_secret" => "servicem8.api_secret".into(),
            "servicem8_base_url" => "servicem8.base_url".into(),
            other => other.to_string().into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.servicem8.base_url, "https://api.servicem8.com");
    }

    #[test]
    fn fieldport_env_vars_map_to_sections() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("FIELDPORT_SERVER_PORT", "8080");
            jail.set_env("FIELDPORT_SERVICEM8_API_KEY", "k-123");
            let config: FieldportConfig = Figment::new()
                .merge(Serialized::defaults(FieldportConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.servicem8.api_key.as_deref(), Some("k-123"));
            Ok(())
        });
    }

    #[test]
    fn legacy_env_vars_are_honored() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PORT", "9999");
            jail.set_env("SERVICEM8_API_KEY", "legacy-key");
            jail.set_env("SERVICEM8_API_SECRET", "legacy-secret");
            jail.set_env("SERVICEM8_BASE_URL", "https://staging.example.com");
            let config: FieldportConfig = Figment::new()
                .merge(Serialized::defaults(FieldportConfig::default()))
                .merge(legacy_env_provider())
                .extract()?;
            assert_eq!(config.server.port, 9999);
            assert!(config.servicem8.is_configured());
            assert_eq!(config.servicem8.base_url, "https://staging.example.com");
            Ok(())
        });
    }

    #[test]
    fn uppercase_env_names_still_map() {
        // Env vars arrive in their exported (upper) case; the mapping
        // must not assume pre-lowercased keys.
        figment::Jail::expect_with(|jail| {
            jail.set_env("PORT", "4000");
            jail.set_env("FIELDPORT_SERVER_LOG_LEVEL", "debug");
            let config: FieldportConfig = Figment::new()
                .merge(Serialized::defaults(FieldportConfig::default()))
                .merge(legacy_env_provider())
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.server.port, 4000);
            assert_eq!(config.server.log_level, "debug");
            Ok(())
        });
    }

    #[test]
    fn unrelated_env_vars_are_ignored() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SERVICEM8_UNKNOWN", "x");
            jail.set_env("HOME_PORT", "1");
            let config: FieldportConfig = Figment::new()
                .merge(Serialized::defaults(FieldportConfig::default()))
                .merge(legacy_env_provider())
                .extract()?;
            assert_eq!(config.server.port, 3001);
            Ok(())
        });
    }
}
