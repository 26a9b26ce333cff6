//! Database error types for fb-db.

use fb_core::errors::CoreError;
use thiserror::Error;

/// Errors from feedback storage operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned a row that could not be decoded.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Domain rule violated before touching the store (e.g., submission validation).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// True when the error came from submission validation rather than the store.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Core(CoreError::InvalidSubmission(_) | CoreError::Validation(_))
        )
    }
}
