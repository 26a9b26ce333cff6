use anyhow::bail;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fb_core::enums::Category;
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    let json = serde_json::to_string(&normalized)?;
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse a submission category. Only the canonical values are accepted.
pub fn parse_category(raw: &str) -> anyhow::Result<Category> {
    let category = Category::parse(&raw.replace('-', "_"));
    if !category.is_canonical() {
        let expected = Category::CANONICAL
            .iter()
            .map(Category::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        bail!("invalid category '{raw}': expected one of {expected}");
    }
    Ok(category)
}

/// Which end of a local calendar day a bare date stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayEdge {
    Start,
    End,
}

/// Parse `YYYY-MM-DD` (the start or end of that day in `tz`) or an RFC 3339 instant.
pub fn parse_time_bound<Tz: TimeZone>(
    raw: &str,
    edge: DayEdge,
    tz: &Tz,
    field: &str,
) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }

    let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") else {
        bail!("invalid {field} '{raw}': expected YYYY-MM-DD or an RFC 3339 timestamp");
    };

    let local = match edge {
        DayEdge::Start => date
            .and_hms_opt(0, 0, 0)
            .and_then(|naive| tz.from_local_datetime(&naive).earliest()),
        DayEdge::End => date
            .and_hms_milli_opt(23, 59, 59, 999)
            .and_then(|naive| tz.from_local_datetime(&naive).latest()),
    };
    match local {
        Some(at) => Ok(at.with_timezone(&Utc)),
        None => bail!("invalid {field} '{raw}': day boundary does not exist in the local time zone"),
    }
}
