// SPDX-FileCopyrightText: 2026 Fieldport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the gateway and both directory providers.
//!
//! `Customer`, `Job`, and `Attachment` keep the upstream ServiceM8
//! snake_case field names so they deserialize straight off the wire.
//! `Message` is a portal-owned record and uses the camelCase names the
//! client contract was built around.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer identity record, sourced from the job directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub uuid: String,
    pub email: String,
    pub mobile: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// A field-service job (booking).
///
/// `status` is an opaque upstream label, not an enforced state machine.
/// Dates are kept as strings: the upstream API is not consistent about
/// formats and this system never computes on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub uuid: String,
    pub job_address: String,
    pub status: String,
    pub generated_job_id: String,
    pub job_description: String,
    pub created_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<String>,
}

/// Read-only attachment metadata for a job. No file content is handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub uuid: String,
    pub related_object: String,
    pub related_object_uuid: String,
    pub file_name: String,
    pub file_path: String,
    pub file_size: u64,
    pub upload_date: String,
}

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    Customer,
    System,
}

/// A chat message tied to a booking.
///
/// Created only through the message store; never mutated or deleted.
/// Read order is ascending by `timestamp`, not insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub booking_id: String,
    pub customer_id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub sender: MessageSender,
}

/// The JSON envelope every portal endpoint responds with.
///
/// Absent fields are omitted from the serialized body, matching the
/// client contract (`{success, data?, error?, message?}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying data.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// A successful response carrying data and a human-readable note.
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.into()),
        }
    }

    /// A failed response carrying an error string.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }
}
