// SPDX-FileCopyrightText: 2026 Fieldport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the portal REST API.
//!
//! Every handler validates request shape, calls the injected directory or
//! a store, and wraps the result in the `{success, data?, error?,
//! message?}` envelope. Upstream directory failures map to 502 with a
//! generic body; detail is logged server-side only.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use fieldport_core::{ApiResponse, Customer, FieldportError, Message};

use crate::auth::AuthedSession;
use crate::server::GatewayState;

/// Request body for POST /api/auth/login.
///
/// Fields default to empty so a missing field gets the portal's own 400
/// body instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Response body for POST /api/auth/login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AuthResponse {
    fn denied(message: &str) -> Self {
        Self {
            success: false,
            customer: None,
            token: None,
            message: Some(message.to_string()),
        }
    }
}

/// Request body for POST /api/messages/booking/{bookingId}.
#[derive(Debug, Deserialize)]
pub struct NewMessageRequest {
    #[serde(default)]
    pub message: String,
}

/// Response body for GET /health. `servicem8Configured` keeps the
/// camelCase key the deployed clients already read.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    #[serde(rename = "servicem8Configured")]
    pub servicem8_configured: bool,
    pub mode: String,
}

/// POST /api/auth/login
///
/// Verifies the email+phone pair against the directory and issues a
/// session token. Credential failures are 401; a blank or missing field
/// is 400 before the directory is consulted.
pub async fn post_login(
    State(state): State<GatewayState>,
    Json(body): Json<LoginRequest>,
) -> Response {
    let email = body.email.trim();
    let phone = body.phone.trim();

    if email.is_empty() || phone.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::denied("Email and phone number are required")),
        )
            .into_response();
    }

    match state.directory.find_customer(email, phone).await {
        Ok(Some(customer)) => {
            let token = state.sessions.issue(&customer.uuid, &customer.email);
            (
                StatusCode::OK,
                Json(AuthResponse {
                    success: true,
                    customer: Some(customer),
                    token: Some(token),
                    message: Some("Login successful".to_string()),
                }),
            )
                .into_response()
        }
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(AuthResponse::denied("Invalid credentials")),
        )
            .into_response(),
        Err(err) => {
            let (status, message) = match err {
                FieldportError::Upstream { .. } => {
                    (StatusCode::BAD_GATEWAY, "Upstream service unavailable")
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
            };
            error!(error = %err, "login failed");
            (status, Json(AuthResponse::denied(message))).into_response()
        }
    }
}

/// POST /api/auth/logout
///
/// Clears the presented session token. Always succeeds for an
/// authenticated caller.
pub async fn post_logout(
    State(state): State<GatewayState>,
    Extension(authed): Extension<AuthedSession>,
) -> Json<ApiResponse<()>> {
    state.sessions.clear(&authed.token);
    Json(ApiResponse {
        success: true,
        data: None,
        error: None,
        message: Some("Logged out successfully".to_string()),
    })
}

/// GET /api/bookings
///
/// Jobs scoped to the authenticated customer.
pub async fn get_bookings(
    State(state): State<GatewayState>,
    Extension(authed): Extension<AuthedSession>,
) -> Response {
    match state.directory.jobs_for_customer(&authed.customer_id).await {
        Ok(jobs) => Json(ApiResponse::ok(jobs)).into_response(),
        Err(err) => directory_failure("fetch bookings", "Failed to fetch bookings", err),
    }
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Response {
    match state.directory.job_by_uuid(&id).await {
        Ok(Some(job)) => Json(ApiResponse::ok(job)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::failure("Booking not found")),
        )
            .into_response(),
        Err(err) => directory_failure("fetch booking", "Failed to fetch booking details", err),
    }
}

/// GET /api/attachments/booking/{bookingId}
///
/// An empty list is a normal success, not an error.
pub async fn get_attachments(
    State(state): State<GatewayState>,
    Path(booking_id): Path<String>,
) -> Response {
    match state.directory.attachments_for_job(&booking_id).await {
        Ok(attachments) => Json(ApiResponse::ok(attachments)).into_response(),
        Err(err) => directory_failure("fetch attachments", "Failed to fetch attachments", err),
    }
}

/// GET /api/messages/booking/{bookingId}
pub async fn get_messages(
    State(state): State<GatewayState>,
    Path(booking_id): Path<String>,
) -> Json<ApiResponse<Vec<Message>>> {
    Json(ApiResponse::ok(state.messages.list_for_booking(&booking_id)))
}

/// POST /api/messages/booking/{bookingId}
///
/// Appends a customer message. Blank or whitespace-only text is rejected
/// with 400 before touching the store.
pub async fn post_message(
    State(state): State<GatewayState>,
    Extension(authed): Extension<AuthedSession>,
    Path(booking_id): Path<String>,
    Json(body): Json<NewMessageRequest>,
) -> Response {
    let text = body.message.trim();
    if text.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::failure("Message is required")),
        )
            .into_response();
    }

    let created = state.messages.add(&booking_id, &authed.customer_id, text);
    (
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            created,
            "Message sent successfully",
        )),
    )
        .into_response()
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Backend server is running".to_string(),
        servicem8_configured: state.servicem8_configured,
        mode: state.mode.to_string(),
    })
}

/// GET /api -- static endpoint index.
pub async fn get_api_index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Customer Portal API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/api/auth",
            "bookings": "/api/bookings",
            "attachments": "/api/attachments",
            "messages": "/api/messages"
        }
    }))
}

/// Map a directory error to the route-layer response: 502 for upstream
/// outages, 500 with a per-route generic message for anything else.
fn directory_failure(context: &str, fallback: &str, err: FieldportError) -> Response {
    match err {
        FieldportError::Upstream { .. } => {
            error!(error = %err, "{context}: upstream failure");
            (
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::<()>::failure("Upstream service unavailable")),
            )
                .into_response()
        }
        other => {
            error!(error = %other, "{context} failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::failure(fallback)),
            )
                .into_response()
        }
    }
}
