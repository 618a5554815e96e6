// SPDX-FileCopyrightText: 2026 Fieldport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router assembly and server startup.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use fieldport_core::{FieldportError, JobDirectory};

use crate::auth::{self, SessionStore};
use crate::handlers;
use crate::messages::MessageStore;

/// Everything the handlers share, cloned per request by axum.
///
/// Constructed once at startup (or per test) and injected; no handler
/// reaches for a global.
#[derive(Clone)]
pub struct GatewayState {
    pub directory: Arc<dyn JobDirectory>,
    pub sessions: Arc<SessionStore>,
    pub messages: Arc<MessageStore>,
    /// Whether real ServiceM8 credentials are present; reported by /health.
    pub servicem8_configured: bool,
    /// Human-readable backend mode string, also for /health.
    pub mode: String,
}

impl GatewayState {
    pub fn new(directory: Arc<dyn JobDirectory>, servicem8_configured: bool, mode: &str) -> Self {
        Self {
            directory,
            sessions: Arc::new(SessionStore::new()),
            messages: Arc::new(MessageStore::new()),
            servicem8_configured,
            mode: mode.to_string(),
        }
    }
}

/// Bind address for [`start_server`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Builds the full route table.
///
/// Protected routes sit behind the bearer-token middleware; /health,
/// the /api index, and login stay public.
pub fn router(state: GatewayState) -> Router {
    let protected = Router::new()
        .route("/api/auth/logout", post(handlers::post_logout))
        .route("/api/bookings", get(handlers::get_bookings))
        .route("/api/bookings/{id}", get(handlers::get_booking))
        .route(
            "/api/attachments/booking/{booking_id}",
            get(handlers::get_attachments),
        )
        .route(
            "/api/messages/booking/{booking_id}",
            get(handlers::get_messages).post(handlers::post_message),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/api", get(handlers::get_api_index))
        .route("/api/auth/login", post(handlers::post_login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the listener and serves until the task is cancelled.
pub async fn start_server(config: ServerConfig, state: GatewayState) -> Result<(), FieldportError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|err| FieldportError::Server {
            message: format!("failed to bind {addr}"),
            source: Some(Box::new(err)),
        })?;

    info!(%addr, mode = %state.mode, "gateway listening");

    axum::serve(listener, router(state))
        .await
        .map_err(|err| FieldportError::Server {
            message: "server terminated unexpectedly".to_string(),
            source: Some(Box::new(err)),
        })
}
