//! CSV export of the current view.

use std::borrow::Borrow;

use chrono::{DateTime, TimeZone};
use fb_core::entities::Feedback;

use crate::error::DashboardError;

pub const HEADER: [&str; 5] = ["Date", "Name", "Email", "Category", "Feedback"];

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A finished export, ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub rows: usize,
    pub bytes: Vec<u8>,
}

/// `feedback-export-YYYY-MM-DD.csv`, dated in `now`'s time zone.
#[must_use]
pub fn export_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    format!("feedback-export-{}.csv", now.date_naive().format("%Y-%m-%d"))
}

/// Serialize `records` in the given order.
///
/// Fields containing commas, quotes, or line breaks are quoted per RFC 4180.
/// Rows end in `\n`. Empty input produces the header line alone.
///
/// # Errors
///
/// Returns `DashboardError::Csv` if the writer fails.
pub fn to_csv<R, Tz>(records: &[R], tz: &Tz) -> Result<Vec<u8>, DashboardError>
where
    R: Borrow<Feedback>,
    Tz: TimeZone,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for record in records.iter().map(Borrow::<Feedback>::borrow) {
        let date = record
            .created_at
            .with_timezone(tz)
            .naive_local()
            .format(DATE_FORMAT)
            .to_string();
        writer.write_record([
            date.as_str(),
            record.user_name.as_str(),
            record.email.as_str(),
            record.category.as_str(),
            record.feedback_text.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| DashboardError::Csv(e.into_error().into()))
}

/// Build the complete export for `records`, named after `now`'s local date.
///
/// # Errors
///
/// Returns `DashboardError::Csv` if serialization fails.
pub fn export<R, Tz>(records: &[R], now: &DateTime<Tz>) -> Result<CsvExport, DashboardError>
where
    R: Borrow<Feedback>,
    Tz: TimeZone,
{
    Ok(CsvExport {
        file_name: export_file_name(now),
        rows: records.len(),
        bytes: to_csv(records, &now.timezone())?,
    })
}
