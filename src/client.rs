// src/client.rs
//! HTTP client for the public jobs endpoints

use anyhow::{Context, Result};
use tracing::{info, trace};

use crate::config::ClientConfig;
use crate::search::query::JobsQuery;
use crate::types::{Job, JobDetails, JobDetailsResponse, JobsListResponse, JobsPage};

const JOB_DETAILS_PATH: &str = "/api/public/jobs";

pub struct JobsClient {
    client: reqwest::Client,
    base_url: String,
}

impl JobsClient {
    /// Create a new jobs client with configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch one page of jobs. Issues a single GET per invocation; a
    /// failed fetch is only retried by whatever event triggered it.
    pub async fn fetch_jobs(&self, query: &JobsQuery) -> Result<JobsPage> {
        let url = query.url(&self.base_url)?;
        trace!("Fetching jobs: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Jobs request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Jobs endpoint returned {}: {}", status, error_text);
        }

        let response_text = response
            .text()
            .await
            .context("Failed to read jobs response body")?;

        let envelope: JobsListResponse = serde_json::from_str(&response_text)
            .with_context(|| format!("Unexpected jobs response shape: {}", response_text))?;

        let page = parse_jobs_envelope(envelope)?;
        info!(
            "Fetched {} jobs (page {} of {})",
            page.jobs.len(),
            query.page,
            page.total_jobs
        );
        Ok(page)
    }

    /// Look up a single posting by its job id.
    pub async fn job_details(&self, job_id: &str) -> Result<JobDetails> {
        let url = format!("{}{}/{}", self.base_url, JOB_DETAILS_PATH, job_id);
        trace!("Fetching job details: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Job details request failed for {}", job_id))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Job details endpoint returned {}: {}", status, error_text);
        }

        let details: JobDetailsResponse = response
            .json()
            .await
            .context("Failed to parse job details response")?;

        let mut data = details.data;
        data.employment_type = crate::utils::normalize_employment_type(&data.employment_type);
        Ok(data)
    }
}

/// Interpret the list envelope: `status` must be `"success"` and
/// `data.jobs` must be present, otherwise the fetch counts as failed.
/// Jobs come back normalized; the total defaults to 0 when absent.
fn parse_jobs_envelope(envelope: JobsListResponse) -> Result<JobsPage> {
    if envelope.status != "success" {
        anyhow::bail!("Jobs fetch returned status '{}'", envelope.status);
    }
    let jobs = envelope
        .data
        .and_then(|data| data.jobs)
        .context("Jobs response missing data.jobs")?;

    Ok(JobsPage {
        jobs: jobs.into_iter().map(Job::normalized).collect(),
        total_jobs: envelope.total_results.unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_normalizes_jobs() {
        let envelope: JobsListResponse = serde_json::from_str(
            r#"{
                "status": "success",
                "data": {
                    "jobs": [
                        {"id": "1", "title": "SDE", "employmentType": "Full Time"},
                        {"id": "2", "title": "Intern", "employmentType": "Internship"}
                    ]
                },
                "totalResults": 42
            }"#,
        )
        .unwrap();

        let page = parse_jobs_envelope(envelope).unwrap();
        assert_eq!(page.total_jobs, 42);
        assert_eq!(page.jobs[0].employment_type, "full-time");
        assert_eq!(page.jobs[1].employment_type, "internship");
    }

    #[test]
    fn test_missing_total_defaults_to_zero() {
        let envelope: JobsListResponse =
            serde_json::from_str(r#"{"status": "success", "data": {"jobs": []}}"#).unwrap();
        let page = parse_jobs_envelope(envelope).unwrap();
        assert_eq!(page.total_jobs, 0);
        assert!(page.jobs.is_empty());
    }

    #[test]
    fn test_non_success_status_is_an_error() {
        let envelope: JobsListResponse =
            serde_json::from_str(r#"{"status": "error", "data": {"jobs": []}}"#).unwrap();
        assert!(parse_jobs_envelope(envelope).is_err());
    }

    #[test]
    fn test_missing_jobs_is_an_error() {
        let envelope: JobsListResponse =
            serde_json::from_str(r#"{"status": "success", "data": {}}"#).unwrap();
        assert!(parse_jobs_envelope(envelope).is_err());

        let envelope: JobsListResponse =
            serde_json::from_str(r#"{"status": "success"}"#).unwrap();
        assert!(parse_jobs_envelope(envelope).is_err());
    }
}
