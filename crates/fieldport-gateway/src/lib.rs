// SPDX-FileCopyrightText: 2026 Fieldport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Fieldport booking portal.
//!
//! Thin JSON handlers over an injected [`JobDirectory`] plus two
//! in-memory stores: a bearer-token session table and a per-booking
//! message log. All shared state lives in [`server::GatewayState`] and is
//! handed to the router at startup; nothing here is a module-level
//! singleton, so tests build isolated routers freely.

pub mod auth;
pub mod handlers;
pub mod messages;
pub mod server;

pub use auth::{Session, SessionStore};
pub use messages::MessageStore;
pub use server::{GatewayState, ServerConfig, router, start_server};
