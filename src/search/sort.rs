// src/search/sort.rs
//! Client-side re-ordering of the fetched page

use std::cmp::Reverse;
use std::str::FromStr;

use crate::types::Job;
use crate::utils::timestamp_millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Newest first; jobs with a missing or unparseable timestamp sort
    /// as epoch 0, i.e. last.
    #[default]
    Latest,
    /// Highest pay first, keyed on `max_salary`, falling back to
    /// `min_salary`, then 0.
    Salary,
    /// Alphabetical by title. Placeholder for a real relevance ranking.
    Relevance,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(SortKey::Latest),
            "salary" => Ok(SortKey::Salary),
            "relevance" => Ok(SortKey::Relevance),
            other => Err(format!(
                "unknown sort key '{}', expected latest, salary or relevance",
                other
            )),
        }
    }
}

/// Derived ordering of the currently held page. The source list is
/// never mutated; ties keep their fetched order (stable sort).
pub fn sorted(jobs: &[Job], key: SortKey) -> Vec<Job> {
    let mut ordered = jobs.to_vec();
    match key {
        SortKey::Latest => {
            ordered.sort_by_key(|job| Reverse(timestamp_millis(job.created_at.as_deref())));
        }
        SortKey::Salary => {
            ordered.sort_by(|a, b| salary_key(b).total_cmp(&salary_key(a)));
        }
        SortKey::Relevance => {
            ordered.sort_by(|a, b| a.title.cmp(&b.title));
        }
    }
    ordered
}

fn salary_key(job: &Job) -> f64 {
    job.max_salary.or(job.min_salary).unwrap_or(0.0)
}
