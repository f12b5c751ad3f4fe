// src/search/query.rs
//! Query serialization: FilterState -> sparse query parameters

use anyhow::{Context, Result};
use url::{form_urlencoded, Url};

use crate::search::filters::{FilterState, ALL_CATEGORIES};
use crate::search::pagination::PAGE_SIZE;

const PUBLIC_JOBS_PATH: &str = "/public/jobs";
const TPO_JOBS_PATH: &str = "/public/jobs/tpo";

/// UI tokens for employment type, mapped to the literal tokens the
/// server was built against. The mapping resolves to identity today;
/// the lookup step stays so the wire tokens survive any future UI
/// renaming.
const EMPLOYMENT_TYPE_TOKENS: [(&str, &str); 5] = [
    ("full-time", "full-time"),
    ("part-time", "part-time"),
    ("internship", "internship"),
    ("contract", "contract"),
    ("freelance", "freelance"),
];

/// Which jobs-list endpoint a query targets. The tpo-scoped variant has
/// its own visibility semantics server-side, so this is a hard branch,
/// not a query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    PublicJobs,
    TpoJobs,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::PublicJobs => PUBLIC_JOBS_PATH,
            Endpoint::TpoJobs => TPO_JOBS_PATH,
        }
    }
}

/// A fully serialized jobs-list request: target endpoint plus ordered
/// query pairs. Fields left at their default/empty value are omitted
/// entirely; the server tolerates sparse queries but not empty-string
/// values.
#[derive(Debug, Clone, PartialEq)]
pub struct JobsQuery {
    pub endpoint: Endpoint,
    pub params: Vec<(&'static str, String)>,
    pub page: u32,
}

impl JobsQuery {
    pub fn build(filters: &FilterState, page: u32) -> Self {
        let mut params: Vec<(&'static str, String)> = Vec::new();

        push_text(&mut params, "company", &filters.company_name);
        push_text(&mut params, "location", &filters.location);
        push_text(&mut params, "title", &filters.title);
        push_text(&mut params, "search", &filters.search_input);

        // The sentinel category means "no category filter" and is
        // stripped before encoding.
        let categories: Vec<&str> = filters
            .category
            .iter()
            .map(String::as_str)
            .filter(|c| *c != ALL_CATEGORIES)
            .collect();
        if !categories.is_empty() {
            params.push(("category", categories.join(",")));
        }

        if !filters.employment_type.is_empty() {
            let mapped: Vec<&str> = filters
                .employment_type
                .iter()
                .map(|t| map_employment_type(t))
                .collect();
            params.push(("employmentType", mapped.join(",")));
        }

        if !filters.work_type.is_empty() {
            let values: Vec<&str> = filters.work_type.iter().map(String::as_str).collect();
            params.push(("workType", values.join(",")));
        }

        if !filters.salary_range.is_empty() {
            let buckets: Vec<String> = filters
                .salary_range
                .iter()
                .map(|b| normalize_salary_bucket(b))
                .collect();
            params.push(("salaryRange", buckets.join(",")));
        }

        if !filters.experience_range.is_empty() {
            let values: Vec<&str> = filters.experience_range.iter().map(String::as_str).collect();
            params.push(("experience", values.join(",")));
        }

        let endpoint = match filters.tpo_id.as_deref() {
            Some(tpo_id) if !tpo_id.is_empty() => {
                params.push(("tpoId", tpo_id.to_string()));
                Endpoint::TpoJobs
            }
            _ => Endpoint::PublicJobs,
        };

        params.push(("page", page.to_string()));
        params.push(("pageSize", PAGE_SIZE.to_string()));
        params.push(("status", "published".to_string()));

        Self {
            endpoint,
            params,
            page,
        }
    }

    /// Render the query pairs as an `application/x-www-form-urlencoded`
    /// string, in build order.
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }

    /// Full request URL against the configured backend base.
    pub fn url(&self, base_url: &str) -> Result<Url> {
        let full = format!(
            "{}{}?{}",
            base_url.trim_end_matches('/'),
            self.endpoint.path(),
            self.query_string()
        );
        Url::parse(&full).with_context(|| format!("Invalid jobs request URL: {}", full))
    }
}

fn push_text(params: &mut Vec<(&'static str, String)>, key: &'static str, value: &str) {
    if !value.is_empty() {
        params.push((key, value.to_string()));
    }
}

fn map_employment_type(token: &str) -> &str {
    EMPLOYMENT_TYPE_TOKENS
        .iter()
        .find(|(ui, _)| *ui == token)
        .map(|(_, wire)| *wire)
        .unwrap_or(token)
}

/// Re-split a salary bucket on `-`, coerce min/max to numbers and
/// re-join. The open-ended `"10+"` bucket passes through unchanged, as
/// does anything that fails to parse.
fn normalize_salary_bucket(bucket: &str) -> String {
    if bucket == "10+" {
        return bucket.to_string();
    }
    if let Some((min, max)) = bucket.split_once('-') {
        if let (Ok(min), Ok(max)) = (min.trim().parse::<f64>(), max.trim().parse::<f64>()) {
            return format!("{}-{}", min, max);
        }
    }
    bucket.to_string()
}
