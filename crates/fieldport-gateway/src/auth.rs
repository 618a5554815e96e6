// SPDX-FileCopyrightText: 2026 Fieldport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session store and bearer-token auth middleware.
//!
//! Tokens are 32 cryptographically random bytes, hex encoded. They carry
//! no embedded information and never expire; a session exists exactly
//! from login until logout (or process restart -- the store is not
//! persistent). A customer may hold any number of concurrent sessions.

use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use rand::RngCore;

use fieldport_core::ApiResponse;

use crate::server::GatewayState;

/// The identity a session token maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub customer_id: String,
    pub email: String,
}

/// In-memory bearer-token session table.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh opaque token for the given customer and records the
    /// mapping. Each call produces a distinct token, so concurrent logins
    /// from the same customer coexist.
    pub fn issue(&self, customer_id: &str, email: &str) -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);
        self.sessions.insert(
            token.clone(),
            Session {
                customer_id: customer_id.to_string(),
                email: email.to_string(),
            },
        );
        token
    }

    /// Looks up a token, returning the session it was issued for.
    pub fn validate(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).map(|entry| entry.clone())
    }

    /// Deletes a token. Unknown tokens are a no-op.
    pub fn clear(&self, token: &str) {
        self.sessions.remove(token);
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// The authenticated identity handlers read from request extensions.
///
/// Carries the presented token so the logout handler can clear it.
#[derive(Debug, Clone)]
pub struct AuthedSession {
    pub token: String,
    pub customer_id: String,
    pub email: String,
}

/// Middleware guarding the protected routes.
///
/// Expects `Authorization: Bearer <token>`. A missing header and an
/// unknown token get distinct 401 bodies (the client shows the message
/// verbatim); there is no expiry, so "expired" only ever means the
/// process restarted or the customer logged out.
pub async fn require_session(
    State(state): State<GatewayState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned);

    let Some(token) = token else {
        return unauthorized("No token provided");
    };

    let Some(session) = state.sessions.validate(&token) else {
        return unauthorized("Invalid or expired token");
    };

    request.extensions_mut().insert(AuthedSession {
        token,
        customer_id: session.customer_id,
        email: session.email,
    });
    next.run(request).await
}

fn unauthorized(error: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::failure(error)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_creates_a_unique_opaque_token() {
        let store = SessionStore::new();
        let t1 = store.issue("cust-001", "a@example.com");
        let t2 = store.issue("cust-001", "a@example.com");

        assert_eq!(t1.len(), 64, "32 bytes hex encoded");
        assert_ne!(t1, t2, "every login gets its own token");
        assert_eq!(store.len(), 2, "concurrent sessions coexist");
    }

    #[test]
    fn token_does_not_leak_identity() {
        let store = SessionStore::new();
        let token = store.issue("cust-001", "john.doe@example.com");
        assert!(!token.contains("cust-001"));
        assert!(!token.contains("john"));
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn validate_round_trips_the_session() {
        let store = SessionStore::new();
        let token = store.issue("cust-002", "jane@example.com");
        let session = store.validate(&token).unwrap();
        assert_eq!(session.customer_id, "cust-002");
        assert_eq!(session.email, "jane@example.com");
    }

    #[test]
    fn clear_invalidates_only_the_given_token() {
        let store = SessionStore::new();
        let t1 = store.issue("cust-001", "a@example.com");
        let t2 = store.issue("cust-001", "a@example.com");

        store.clear(&t1);
        assert!(store.validate(&t1).is_none());
        assert!(store.validate(&t2).is_some());
    }

    #[test]
    fn unknown_token_is_absent() {
        let store = SessionStore::new();
        assert!(store.validate("deadbeef").is_none());
        store.clear("deadbeef"); // no-op
    }
}
