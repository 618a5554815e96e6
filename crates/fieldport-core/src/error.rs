// SPDX-FileCopyrightText: 2026 Fieldport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Fieldport booking portal.

use thiserror::Error;

/// The primary error type used across the portal crates.
#[derive(Debug, Error)]
pub enum FieldportError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP server errors (bind failure, serve loop failure).
    #[error("server error: {message}")]
    Server {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Upstream field-service API errors (request failure, non-2xx status,
    /// undecodable body). Distinct from an empty result on purpose: the
    /// route layer maps this to 502 rather than reporting "no data".
    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
