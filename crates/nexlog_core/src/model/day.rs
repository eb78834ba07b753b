//! Calendar-day keys.
//!
//! All grouping and window math is done on whole days, never on
//! wall-clock instants.

use super::log::ValidationError;
use chrono::{NaiveDate, NaiveDateTime};

/// Calendar-day key used by the date index and every day-granular query.
pub type DayKey = NaiveDate;

/// Parses an ISO `YYYY-MM-DD` string into a day key.
///
/// # Errors
/// - Returns `ValidationError::InvalidDate` when the text is not a real calendar day.
pub fn parse_day_key(value: &str) -> Result<DayKey, ValidationError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

/// Truncates a timestamp to the calendar day it falls on.
pub fn day_key_of(timestamp: NaiveDateTime) -> DayKey {
    timestamp.date()
}
