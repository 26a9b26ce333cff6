//! Row-to-entity parsing helpers.
//!
//! Rows written by this crate carry `strftime('%Y-%m-%dT%H:%M:%fZ')`
//! timestamps, but rows inserted by other writers may use `datetime('now')`
//! or a bare RFC 3339 string. All of them must load.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::DatabaseError;

const SQLITE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Accepts RFC 3339 (`"2026-10-17T14:30:00.120Z"`, `"2026-10-17T14:30:00+02:00"`)
/// and offset-less `SQLite` text (`"2026-10-17 14:30:00"`), which is read as UTC.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string matches none of the formats.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    SQLITE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DatabaseError::Query(format!("Failed to parse datetime '{s}'")))
}

/// Format a timestamp the way the `created_at` column default does.
#[must_use]
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// Use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::strftime_default("2026-10-17T09:15:30.250Z", 250)]
    #[case::rfc3339_no_fraction("2026-10-17T09:15:30Z", 0)]
    #[case::rfc3339_offset("2026-10-17T11:15:30+02:00", 0)]
    #[case::sqlite_datetime("2026-10-17 09:15:30", 0)]
    #[case::sqlite_fraction("2026-10-17 09:15:30.5", 500)]
    fn parses_known_formats(#[case] input: &str, #[case] millis: u32) {
        let parsed = parse_datetime(input).unwrap();
        let expected = Utc.with_ymd_and_hms(2026, 10, 17, 9, 15, 30).unwrap()
            + chrono::Duration::milliseconds(i64::from(millis));
        assert_eq!(parsed, expected);
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_datetime("yesterday").unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn format_matches_column_default() {
        let dt = Utc.with_ymd_and_hms(2026, 10, 17, 9, 15, 30).unwrap()
            + chrono::Duration::milliseconds(42);
        assert_eq!(format_datetime(&dt), "2026-10-17T09:15:30.042Z");
        assert_eq!(parse_datetime(&format_datetime(&dt)).unwrap(), dt);
    }
}
