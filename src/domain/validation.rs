//! Caller input checks run before any network call.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::response::{ApiError, JsonMap};

/// Message for empty arguments and empty payloads.
pub const INVALID_DATA: &str = "Invalid data";
/// Message for malformed dates, months and years.
pub const INVALID_DATE_FORMAT: &str = "Invalid date format";

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));
static MONTH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{2}$").expect("valid regex"));
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").expect("valid regex"));

/// Reject empty string arguments. Whitespace is passed through as-is.
pub fn require_non_empty(value: &str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::validation(INVALID_DATA));
    }
    Ok(())
}

/// `YYYY-MM-DD`, checked by shape only.
pub fn require_date(value: &str) -> Result<(), ApiError> {
    if !DATE_RE.is_match(value) {
        return Err(ApiError::validation(INVALID_DATE_FORMAT));
    }
    Ok(())
}

/// `MM` month plus `YYYY` year.
pub fn require_month_year(month: &str, year: &str) -> Result<(), ApiError> {
    if !MONTH_RE.is_match(month) || !YEAR_RE.is_match(year) {
        return Err(ApiError::validation(INVALID_DATE_FORMAT));
    }
    Ok(())
}

/// Payload must be non-empty and carry every key, non-null.
///
/// Keys are checked in order; the first missing one is reported.
pub fn require_keys(payload: &JsonMap, keys: &[&str]) -> Result<(), ApiError> {
    if payload.is_empty() {
        return Err(ApiError::validation(INVALID_DATA));
    }
    for key in keys {
        match payload.get(*key) {
            None | Some(Value::Null) => {
                return Err(ApiError::validation(format!("Missing {key}")));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Coerce a JSON value to an integer task id.
///
/// Numbers are truncated toward zero, numeric strings parsed.
pub fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}
