// SPDX-FileCopyrightText: 2026 Fieldport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The directory trait both backend providers implement.

use async_trait::async_trait;

use crate::error::FieldportError;
use crate::types::{Attachment, Customer, Job};

/// Read-only access to customers, jobs, and attachments.
///
/// Two implementations exist: a static fixture set (used when no upstream
/// credentials are configured) and a ServiceM8 HTTP client. The gateway
/// holds one as `Arc<dyn JobDirectory>`, selected once at startup; there
/// is no per-request fallback between them.
#[async_trait]
pub trait JobDirectory: Send + Sync {
    /// Short provider label for logs and the health endpoint.
    fn name(&self) -> &'static str;

    /// Looks up a customer by credentials. Email comparison is
    /// case-insensitive; the phone number must match exactly.
    async fn find_customer(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<Customer>, FieldportError>;

    /// Lists all jobs belonging to a customer.
    async fn jobs_for_customer(
        &self,
        customer_uuid: &str,
    ) -> Result<Vec<Job>, FieldportError>;

    /// Fetches a single job, or `None` when the uuid is unknown.
    async fn job_by_uuid(&self, job_uuid: &str) -> Result<Option<Job>, FieldportError>;

    /// Lists attachment metadata for a job. An empty list is a normal
    /// result, not an error.
    async fn attachments_for_job(
        &self,
        job_uuid: &str,
    ) -> Result<Vec<Attachment>, FieldportError>;
}
