//! Trip-window arithmetic
//!
//! The insured period is the integer day count between the departure and
//! arrival instants, rounded to the nearest day. That count selects the
//! short-term proration bracket, so it has to be computed exactly one way
//! everywhere.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

const SECS_PER_DAY: i64 = 86_400;

/// Errors related to trip-window handling
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("unrecognized date or date-time: {0}")]
    Unparseable(String),

    #[error("arrival must be after departure")]
    NonPositivePeriod,
}

/// Parses a caller-supplied instant.
///
/// Accepts an RFC 3339 date-time, a naive `YYYY-MM-DDTHH:MM[:SS]`
/// date-time (taken as UTC), or a bare `YYYY-MM-DD` date (midnight UTC) —
/// the same shapes the booking frontend sends.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, TemporalError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc());
    }
    Err(TemporalError::Unparseable(value.to_string()))
}

/// Computes the insured period in days: `round((arrival - departure) / 1 day)`.
///
/// A non-positive period is a validation failure, never a pricing outcome.
///
/// # Errors
///
/// Returns `TemporalError::NonPositivePeriod` when the rounded difference
/// is zero or negative.
pub fn period_days(
    departure: DateTime<Utc>,
    arrival: DateTime<Utc>,
) -> Result<i64, TemporalError> {
    let secs = (arrival - departure).num_seconds();
    // Round half up toward +inf.
    let days = (secs + SECS_PER_DAY / 2).div_euclid(SECS_PER_DAY);
    if days <= 0 {
        return Err(TemporalError::NonPositivePeriod);
    }
    Ok(days)
}
