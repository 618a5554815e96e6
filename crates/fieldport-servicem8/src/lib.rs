// SPDX-FileCopyrightText: 2026 Fieldport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ServiceM8-backed [`JobDirectory`] for the Fieldport booking portal.
//!
//! Proxies the ServiceM8 REST API over HTTP GET with basic auth:
//! `/company.json` for customers, `/job.json` (with an OData `$filter`)
//! for jobs, `/attachment.json` for attachment metadata. Upstream
//! failures surface as [`FieldportError::Upstream`] rather than being
//! silently flattened into empty results, so the route layer can report
//! 502 instead of pretending the customer has no data.

pub mod client;

use async_trait::async_trait;

use fieldport_core::{Attachment, Customer, FieldportError, Job, JobDirectory};

pub use client::ServiceM8Client;

/// Job directory backed by the ServiceM8 REST API.
pub struct ServiceM8Directory {
    client: ServiceM8Client,
}

impl ServiceM8Directory {
    /// Creates a directory from basic-auth credentials and a base URL.
    pub fn new(
        api_key: String,
        api_secret: String,
        base_url: String,
    ) -> Result<Self, FieldportError> {
        Ok(Self {
            client: ServiceM8Client::new(api_key, api_secret, base_url)?,
        })
    }
}

#[async_trait]
impl JobDirectory for ServiceM8Directory {
    fn name(&self) -> &'static str {
        "servicem8"
    }

    async fn find_customer(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<Customer>, FieldportError> {
        // ServiceM8 has no credential-lookup endpoint; fetch the company
        // list and match locally, as the portal always has.
        let customers: Vec<Customer> = self.client.get_json("/company.json", None).await?;
        Ok(customers
            .into_iter()
            .find(|c| c.email.eq_ignore_ascii_case(email) && c.mobile == phone))
    }

    async fn jobs_for_customer(
        &self,
        customer_uuid: &str,
    ) -> Result<Vec<Job>, FieldportError> {
        self.client
            .get_json(
                "/job.json",
                Some(format!("company_uuid eq '{customer_uuid}'")),
            )
            .await
    }

    async fn job_by_uuid(&self, job_uuid: &str) -> Result<Option<Job>, FieldportError> {
        self.client
            .get_json_opt(&format!("/job.json/{job_uuid}"), None)
            .await
    }

    async fn attachments_for_job(
        &self,
        job_uuid: &str,
    ) -> Result<Vec<Attachment>, FieldportError> {
        self.client
            .get_json(
                "/attachment.json",
                Some(format!("related_object_uuid eq '{job_uuid}'")),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_directory(base_url: &str) -> ServiceM8Directory {
        ServiceM8Directory::new("test-key".into(), "test-secret".into(), base_url.to_string())
            .unwrap()
    }

    fn company_body() -> serde_json::Value {
        serde_json::json!([
            {
                "uuid": "c-1",
                "email": "a@example.com",
                "mobile": "0400000001",
                "first_name": "Ada",
                "last_name": "Lovelace",
                "company_name": "Analytical Engines"
            },
            {
                "uuid": "c-2",
                "email": "b@example.com",
                "mobile": "0400000002",
                "first_name": "Bob",
                "last_name": "Builder"
            }
        ])
    }

    #[tokio::test]
    async fn find_customer_matches_case_insensitive_email() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/company.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(company_body()))
            .mount(&server)
            .await;

        let dir = test_directory(&server.uri());
        let found = dir.find_customer("A@EXAMPLE.COM", "0400000001").await.unwrap();
        assert_eq!(found.unwrap().uuid, "c-1");

        let missed = dir.find_customer("a@example.com", "0400000002").await.unwrap();
        assert!(missed.is_none(), "phone must match exactly");
    }

    #[tokio::test]
    async fn jobs_for_customer_sends_company_filter() {
        let server = MockServer::start().await;
        let body = serde_json::json!([{
            "uuid": "j-1",
            "job_address": "1 Test St",
            "status": "Quote",
            "generated_job_id": "JOB-1",
            "job_description": "desc",
            "created_date": "2024-01-01T00:00:00Z"
        }]);
        Mock::given(method("GET"))
            .and(path("/job.json"))
            .and(query_param("$filter", "company_uuid eq 'c-1'"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let dir = test_directory(&server.uri());
        let jobs = dir.jobs_for_customer("c-1").await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].uuid, "j-1");
    }

    #[tokio::test]
    async fn job_by_uuid_treats_404_as_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/job.json/j-404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = test_directory(&server.uri());
        assert!(dir.job_by_uuid("j-404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn attachments_filter_on_related_object() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/attachment.json"))
            .and(query_param("$filter", "related_object_uuid eq 'j-1'"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let dir = test_directory(&server.uri());
        let atts = dir.attachments_for_job("j-1").await.unwrap();
        assert!(atts.is_empty());
    }

    #[tokio::test]
    async fn upstream_outage_is_not_an_empty_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/job.json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let dir = test_directory(&server.uri());
        let err = dir.jobs_for_customer("c-1").await.unwrap_err();
        assert!(matches!(err, FieldportError::Upstream { .. }));
    }
}
