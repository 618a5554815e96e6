// SPDX-FileCopyrightText: 2026 Fieldport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static in-memory [`JobDirectory`] used when ServiceM8 credentials are
//! absent.
//!
//! The data set is demo-only: two customers, three jobs, three
//! attachments. The customer-to-job assignment is deliberately
//! hard-coded (cust-001 owns job-001 and job-002, every other customer
//! sees job-003) so the demo dashboard always has something to show.
//! That branching lives here and nowhere else.

use async_trait::async_trait;

use fieldport_core::{Attachment, Customer, FieldportError, Job, JobDirectory};

/// The demo customer the login page advertises.
pub const DEMO_EMAIL: &str = "john.doe@example.com";
/// The matching demo phone number.
pub const DEMO_PHONE: &str = "0412345678";

/// Fixture-backed job directory.
///
/// All operations are infallible reads over compiled-in data; the
/// `Result` in the trait signatures exists for the remote provider.
pub struct FixtureDirectory {
    customers: Vec<Customer>,
    jobs: Vec<Job>,
    attachments: Vec<Attachment>,
}

impl FixtureDirectory {
    pub fn new() -> Self {
        Self {
            customers: fixture_customers(),
            jobs: fixture_jobs(),
            attachments: fixture_attachments(),
        }
    }
}

impl Default for FixtureDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobDirectory for FixtureDirectory {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn find_customer(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<Customer>, FieldportError> {
        Ok(self
            .customers
            .iter()
            .find(|c| c.email.eq_ignore_ascii_case(email) && c.mobile == phone)
            .cloned())
    }

    async fn jobs_for_customer(
        &self,
        customer_uuid: &str,
    ) -> Result<Vec<Job>, FieldportError> {
        // Demo branching: cust-001 owns the first two jobs, everyone else
        // sees the third.
        let owned: &[&str] = if customer_uuid == "cust-001" {
            &["job-001", "job-002"]
        } else {
            &["job-003"]
        };
        Ok(self
            .jobs
            .iter()
            .filter(|j| owned.contains(&j.uuid.as_str()))
            .cloned()
            .collect())
    }

    async fn job_by_uuid(&self, job_uuid: &str) -> Result<Option<Job>, FieldportError> {
        Ok(self.jobs.iter().find(|j| j.uuid == job_uuid).cloned())
    }

    async fn attachments_for_job(
        &self,
        job_uuid: &str,
    ) -> Result<Vec<Attachment>, FieldportError> {
        Ok(self
            .attachments
            .iter()
            .filter(|a| a.related_object_uuid == job_uuid)
            .cloned()
            .collect())
    }
}

fn fixture_customers() -> Vec<Customer> {
    vec![
        Customer {
            uuid: "cust-001".into(),
            email: DEMO_EMAIL.into(),
            mobile: DEMO_PHONE.into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            company_name: Some("Doe Enterprises".into()),
        },
        Customer {
            uuid: "cust-002".into(),
            email: "jane.smith@example.com".into(),
            mobile: "0423456789".into(),
            first_name: "Jane".into(),
            last_name: "Smith".into(),
            company_name: Some("Smith & Co".into()),
        },
    ]
}

fn fixture_jobs() -> Vec<Job> {
    vec![
        Job {
            uuid: "job-001".into(),
            job_address: "123 Main St, Sydney NSW 2000".into(),
            status: "Completed".into(),
            generated_job_id: "JOB-2024-001".into(),
            job_description: "Plumbing repair - Kitchen sink leak".into(),
            created_date: "2024-01-15T10:00:00Z".into(),
            scheduled_date: Some("2024-01-20T09:00:00Z".into()),
            completed_date: Some("2024-01-20T11:30:00Z".into()),
        },
        Job {
            uuid: "job-002".into(),
            job_address: "123 Main St, Sydney NSW 2000".into(),
            status: "In Progress".into(),
            generated_job_id: "JOB-2024-002".into(),
            job_description: "Electrical inspection - Annual safety check".into(),
            created_date: "2024-02-01T14:00:00Z".into(),
            scheduled_date: Some("2024-02-10T10:00:00Z".into()),
            completed_date: None,
        },
        Job {
            uuid: "job-003".into(),
            job_address: "456 Oak Ave, Melbourne VIC 3000".into(),
            status: "Scheduled".into(),
            generated_job_id: "JOB-2024-003".into(),
            job_description: "HVAC maintenance - Air conditioning service".into(),
            created_date: "2024-02-15T09:00:00Z".into(),
            scheduled_date: Some("2024-03-01T13:00:00Z".into()),
            completed_date: None,
        },
    ]
}

fn fixture_attachments() -> Vec<Attachment> {
    vec![
        Attachment {
            uuid: "att-001".into(),
            related_object: "Job".into(),
            related_object_uuid: "job-001".into(),
            file_name: "before_repair.jpg".into(),
            file_path: "/attachments/before_repair.jpg".into(),
            file_size: 245_678,
            upload_date: "2024-01-20T09:15:00Z".into(),
        },
        Attachment {
            uuid: "att-002".into(),
            related_object: "Job".into(),
            related_object_uuid: "job-001".into(),
            file_name: "after_repair.jpg".into(),
            file_path: "/attachments/after_repair.jpg".into(),
            file_size: 298_456,
            upload_date: "2024-01-20T11:45:00Z".into(),
        },
        Attachment {
            uuid: "att-003".into(),
            related_object: "Job".into(),
            related_object_uuid: "job-002".into(),
            file_name: "electrical_report.pdf".into(),
            file_path: "/attachments/electrical_report.pdf".into(),
            file_size: 512_340,
            upload_date: "2024-02-10T10:30:00Z".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn find_customer_matches_email_case_insensitively() {
        let dir = FixtureDirectory::new();
        let found = dir
            .find_customer("JOHN.DOE@Example.COM", DEMO_PHONE)
            .await
            .unwrap();
        assert_eq!(found.unwrap().uuid, "cust-001");
    }

    #[tokio::test]
    async fn find_customer_requires_exact_phone() {
        let dir = FixtureDirectory::new();
        let found = dir.find_customer(DEMO_EMAIL, "0412345679").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn cust_001_owns_first_two_jobs() {
        let dir = FixtureDirectory::new();
        let jobs = dir.jobs_for_customer("cust-001").await.unwrap();
        let uuids: Vec<&str> = jobs.iter().map(|j| j.uuid.as_str()).collect();
        assert_eq!(uuids, vec!["job-001", "job-002"]);
    }

    #[tokio::test]
    async fn other_customers_see_the_third_job() {
        let dir = FixtureDirectory::new();
        for uuid in ["cust-002", "cust-999"] {
            let jobs = dir.jobs_for_customer(uuid).await.unwrap();
            let uuids: Vec<&str> = jobs.iter().map(|j| j.uuid.as_str()).collect();
            assert_eq!(uuids, vec!["job-003"], "customer {uuid}");
        }
    }

    #[tokio::test]
    async fn job_by_uuid_finds_and_misses() {
        let dir = FixtureDirectory::new();
        assert!(dir.job_by_uuid("job-002").await.unwrap().is_some());
        assert!(dir.job_by_uuid("job-404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn attachments_filter_by_job() {
        let dir = FixtureDirectory::new();
        let atts = dir.attachments_for_job("job-001").await.unwrap();
        assert_eq!(atts.len(), 2);
        assert!(atts.iter().all(|a| a.related_object_uuid == "job-001"));
    }

    #[tokio::test]
    async fn attachments_for_bare_job_are_empty_not_an_error() {
        let dir = FixtureDirectory::new();
        let atts = dir.attachments_for_job("job-003").await.unwrap();
        assert!(atts.is_empty());
    }
}
