//! Shared test utilities for fb-db unit tests.

use chrono::{DateTime, Utc};

use crate::FeedbackDb;
use crate::helpers::format_datetime;
use crate::service::FeedbackService;

/// Create an in-memory `FeedbackService`.
pub async fn test_service() -> FeedbackService {
    let db = FeedbackDb::open_local(":memory:").await.unwrap();
    FeedbackService::from_db(db)
}

/// Insert a row directly, bypassing validation and the insert feed, the way
/// another writer (or a hand-edited database) would.
pub async fn insert_raw(
    svc: &FeedbackService,
    id: &str,
    email: &str,
    category: Option<&str>,
    created_at: DateTime<Utc>,
) {
    svc.db()
        .conn()
        .execute(
            "INSERT INTO feedback (id, user_name, email, feedback_text, category, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            libsql::params![
                id,
                "Raw Writer",
                email,
                "Inserted outside the service",
                category,
                format_datetime(&created_at)
            ],
        )
        .await
        .unwrap();
}
