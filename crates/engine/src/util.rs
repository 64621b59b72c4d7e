//! Internal helpers for input validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so donors and donations enter the database in one shape.

use chrono::{DateTime, TimeZone, Utc};

use crate::{EngineError, ResultEngine};

const MAX_ID_LEN: usize = 50;

/// Validate an identifier: 1 to 50 ASCII letters, digits, `_` or `-`.
pub(crate) fn validate_id(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    let valid = !trimmed.is_empty()
        && trimmed.len() <= MAX_ID_LEN
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return Err(EngineError::InvalidInput(format!("invalid {label} id")));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// `[Jan 1st of year, Jan 1st of year + 1)` in UTC.
pub(crate) fn year_bounds(year: i32) -> ResultEngine<(DateTime<Utc>, DateTime<Utc>)> {
    let start = |y: i32| {
        Utc.with_ymd_and_hms(y, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| EngineError::InvalidInput(format!("invalid year {year}")))
    };
    let next = year
        .checked_add(1)
        .ok_or_else(|| EngineError::InvalidInput(format!("invalid year {year}")))?;
    Ok((start(year)?, start(next)?))
}
