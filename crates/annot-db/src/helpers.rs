//! Row parsing helpers.
//!
//! Cached and authoritative fields are compared with NULL as a distinct value,
//! so nullable TEXT columns are read as-is: SQL NULL becomes `None` and an
//! empty string stays `Some("")`.

use chrono::{DateTime, Utc};

use crate::error::DatabaseError;

/// Read a nullable TEXT column without collapsing `""` into `None`.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_nullable_text(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    Ok(row.get::<Option<String>>(idx)?)
}

/// Bind an optional string as TEXT or NULL.
#[must_use]
pub fn text_or_null(value: Option<&str>) -> libsql::Value {
    value.map_or(libsql::Value::Null, |s| libsql::Value::Text(s.to_string()))
}

/// Parse a TEXT timestamp column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::InvalidState(format!("Failed to parse datetime '{s}': {e}")))
}
