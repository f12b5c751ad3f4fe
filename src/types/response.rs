// src/types/response.rs
use serde::{Deserialize, Serialize};

use crate::types::job::{Job, JobDetails};

// ===== Jobs API Response Envelopes =====

/// Envelope returned by the jobs-list endpoints. A response only counts
/// as successful when `status == "success"` AND `data.jobs` is present;
/// anything else is treated as a failed fetch.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobsListResponse {
    pub status: String,
    pub data: Option<JobsData>,
    pub total_results: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JobsData {
    pub jobs: Option<Vec<Job>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JobDetailsResponse {
    pub data: JobDetails,
}
