// src/types/job.rs
use serde::{Deserialize, Serialize};

use crate::utils::normalize_employment_type;

/// A single job posting as served by the jobs-list endpoint.
///
/// Recreated wholesale on every fetch; never patched incrementally.
/// Salary figures are annual amounts in lakhs (LPA) and are used as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub company_name: String,
    pub brand_name: Option<String>,
    pub company_logo_url: Option<String>,
    #[serde(default)]
    pub title: String,
    pub work_type: Option<String>,
    #[serde(default)]
    pub employment_type: String,
    pub location: Option<String>,
    /// ISO-8601 timestamp; kept as the raw string since the backend is
    /// not consistent about sending it, and ordering tolerates absence.
    pub created_at: Option<String>,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub min_experience: Option<f64>,
    pub max_experience: Option<f64>,
    pub no_of_openings: Option<u32>,
    pub status: Option<String>,
}

impl Job {
    /// Normalize a freshly deserialized job: `employmentType` arrives in
    /// display form ("Full Time") and is folded to the lowercase
    /// hyphenated token ("full-time") the filter vocabulary uses.
    /// Every other field passes through unchanged.
    pub fn normalized(mut self) -> Self {
        self.employment_type = normalize_employment_type(&self.employment_type);
        self
    }
}

/// One page of normalized results plus the server's authoritative count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobsPage {
    pub jobs: Vec<Job>,
    pub total_jobs: u64,
}

/// Expanded posting served by the job-detail endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub company_name: String,
    pub brand_name: Option<String>,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub work_type: Option<String>,
    #[serde(default)]
    pub employment_type: String,
    pub location: Option<String>,
    pub created_at: Option<String>,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub min_experience: Option<f64>,
    pub max_experience: Option<f64>,
    pub no_of_openings: Option<u32>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub apply_url: Option<String>,
    pub status: Option<String>,
}
