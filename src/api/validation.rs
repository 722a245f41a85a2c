use chrono::NaiveDate;
use tracing::warn;

use super::ApiError;

pub const PLAN_STATUSES: &[&str] = &["planned", "booked", "completed", "cancelled"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"];

pub fn validate_country_name(name: &str) -> Result<&str, ApiError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ApiError::validation("Country name cannot be empty"));
    }

    if trimmed.chars().count() > 100 {
        return Err(ApiError::validation(
            "Country name must be 100 characters or less",
        ));
    }

    Ok(trimmed)
}

pub fn validate_plan_status(status: &str) -> Result<&str, ApiError> {
    let trimmed = status.trim();
    PLAN_STATUSES
        .iter()
        .find(|s| **s == trimmed)
        .copied()
        .ok_or_else(|| {
            ApiError::validation(format!(
                "Invalid status: {}. Must be one of {}",
                trimmed,
                PLAN_STATUSES.join(", ")
            ))
        })
}

/// Ratings are stored as given; only non-numbers are dropped.
pub fn parse_rating(raw: Option<&str>) -> Option<i32> {
    raw.and_then(|r| r.trim().parse().ok())
}

/// Normalizes a form date to `YYYY-MM-DD`. Blank or unparseable input is `None`.
pub fn parse_plan_date(raw: Option<&str>) -> Option<String> {
    let raw = raw.map(str::trim).filter(|r| !r.is_empty())?;

    let parsed = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok());

    if parsed.is_none() {
        warn!("Ignoring unparseable plan date: {}", raw);
    }

    parsed.map(|d| d.format("%Y-%m-%d").to_string())
}

pub fn parse_budget(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|r| !r.is_empty())
        .and_then(|r| r.replace(',', ".").parse::<f64>().ok())
        .filter(|b| b.is_finite())
}
