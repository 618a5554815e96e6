// SPDX-FileCopyrightText: 2026 Fieldport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Fieldport booking portal.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Fieldport configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; a bare process with no config file serves fixture data on
/// 127.0.0.1:3001.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FieldportConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// ServiceM8 upstream API settings.
    #[serde(default)]
    pub servicem8: ServiceM8Config,
}

impl FieldportConfig {
    /// Human-readable mode label used by logs and the health endpoint.
    pub fn mode(&self) -> &'static str {
        if self.servicem8.is_configured() {
            "ServiceM8 API"
        } else {
            "Mock Data"
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind the server to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_log_level() -> String {
    "info".to_string()
}

/// ServiceM8 upstream API configuration.
///
/// When both `api_key` and `api_secret` are set the portal proxies the
/// ServiceM8 REST API; otherwise it serves the built-in fixture data.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceM8Config {
    /// ServiceM8 API key (basic-auth username). `None` selects fixture data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// ServiceM8 API secret (basic-auth password).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_secret: Option<String>,

    /// Base URL of the ServiceM8 REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl ServiceM8Config {
    /// True when both credentials are present and non-empty.
    pub fn is_configured(&self) -> bool {
        let has = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        has(&self.api_key) && has(&self.api_secret)
    }
}

impl Default for ServiceM8Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.servicem8.com".to_string()
}
