// src/utils.rs
use chrono::DateTime;

/// Fold a display-form employment type ("Full Time") into the
/// lowercase hyphenated token the filter vocabulary uses ("full-time").
pub fn normalize_employment_type(value: &str) -> String {
    value.trim().to_lowercase().replace(' ', "-")
}

/// Parse an ISO-8601 timestamp into epoch milliseconds.
/// Missing or unparseable timestamps resolve to 0 so they order last
/// under latest-first sorting.
pub fn timestamp_millis(value: Option<&str>) -> i64 {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

/// Human-readable salary band. Figures are annual lakhs, used as-is.
pub fn format_salary_range(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{}-{} LPA", min, max),
        (Some(min), None) => format!("{}+ LPA", min),
        (None, Some(max)) => format!("up to {} LPA", max),
        (None, None) => "Not disclosed".to_string(),
    }
}
