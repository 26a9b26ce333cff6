//! Feedback repository: create, fetch, and cursor-based insert discovery.

use fb_core::entities::Feedback;
use fb_core::enums::Category;
use fb_core::ids::PREFIX_FEEDBACK;
use fb_core::submission::NewFeedback;
use tracing::{debug, warn};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::service::FeedbackService;

const COLUMNS: &str = "id, user_name, email, feedback_text, category, created_at";

/// Position in insertion order. Rows with a larger `rowid` were written later.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct InsertCursor(i64);

impl InsertCursor {
    #[must_use]
    pub const fn start() -> Self {
        Self(0)
    }
}

fn row_to_feedback(row: &libsql::Row) -> Result<Feedback, DatabaseError> {
    Ok(Feedback {
        id: row.get::<String>(0)?,
        user_name: get_opt_string(row, 1)?.unwrap_or_default(),
        email: get_opt_string(row, 2)?.unwrap_or_default(),
        feedback_text: get_opt_string(row, 3)?.unwrap_or_default(),
        category: get_opt_string(row, 4)?
            .map_or_else(|| Category::Other(String::new()), |raw| Category::parse(&raw)),
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

/// Rows written outside the service may not decode; those are logged and
/// left out of bulk reads.
fn decode_or_skip(row: &libsql::Row) -> Option<Feedback> {
    match row_to_feedback(row) {
        Ok(feedback) => Some(feedback),
        Err(e) => {
            let id = row.get::<String>(0).unwrap_or_default();
            warn!(error = %e, id = %id, "skipping undecodable feedback row");
            None
        }
    }
}

async fn collect(mut rows: libsql::Rows) -> Result<Vec<Feedback>, DatabaseError> {
    let mut records = Vec::new();
    while let Some(row) = rows.next().await? {
        records.extend(decode_or_skip(&row));
    }
    Ok(records)
}

impl FeedbackService {
    /// Validate and store a submission, then publish the stored record.
    ///
    /// `created_at` is assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` with every failed field when the
    /// submission is invalid (nothing is written), or a storage error.
    pub async fn create_feedback(&self, submission: &NewFeedback) -> Result<Feedback, DatabaseError> {
        submission.validate()?;

        let id = self.db().generate_id(PREFIX_FEEDBACK).await?;
        let category = submission.category_or_default();
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "INSERT INTO feedback (id, user_name, email, feedback_text, category)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     RETURNING {COLUMNS}"
                ),
                libsql::params![
                    id.as_str(),
                    submission.user_name.as_str(),
                    submission.email.as_str(),
                    submission.feedback_text.as_str(),
                    category.as_str()
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let feedback = row_to_feedback(&row)?;

        debug!(id = %feedback.id, category = %feedback.category, "feedback stored");
        self.feed().publish(feedback.clone());
        Ok(feedback)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no record has this id.
    pub async fn get_feedback(&self, id: &str) -> Result<Feedback, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {COLUMNS} FROM feedback WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_feedback(&row)
    }

    /// Every stored record, newest first.
    ///
    /// Ties on `created_at` fall back to reverse insertion order. Rows that
    /// fail to decode are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    pub async fn fetch_all(&self) -> Result<Vec<Feedback>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {COLUMNS} FROM feedback ORDER BY created_at DESC, rowid DESC"),
                (),
            )
            .await?;
        let records = collect(rows).await?;
        debug!(count = records.len(), "fetched all feedback");
        Ok(records)
    }

    /// Cursor positioned after the most recently inserted row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn latest_cursor(&self) -> Result<InsertCursor, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT COALESCE(MAX(rowid), 0) FROM feedback", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(InsertCursor(row.get::<i64>(0)?))
    }

    /// Records inserted after `cursor`, in insertion order, plus the cursor
    /// to use next time.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    pub async fn fetch_inserted_after(
        &self,
        cursor: InsertCursor,
    ) -> Result<(Vec<Feedback>, InsertCursor), DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {COLUMNS}, rowid FROM feedback WHERE rowid > ?1 ORDER BY rowid ASC"),
                [cursor.0],
            )
            .await?;

        let mut records = Vec::new();
        let mut next = cursor;
        while let Some(row) = rows.next().await? {
            records.extend(decode_or_skip(&row));
            next = InsertCursor(row.get::<i64>(6)?);
        }
        Ok((records, next))
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_feedback(&self) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM feedback", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        u64::try_from(row.get::<i64>(0)?)
            .map_err(|e| DatabaseError::InvalidState(format!("negative row count: {e}")))
    }
}
