//! Record builders for pipeline unit tests.

use std::borrow::Borrow;

use chrono::{DateTime, TimeZone, Utc};
use fb_core::entities::Feedback;
use fb_core::enums::Category;

/// Fixed evaluation instant: 2026-10-17 15:00:00 UTC.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 15, 0, 0).unwrap()
}

pub fn record(id: &str, category: Category, created_at: DateTime<Utc>) -> Feedback {
    Feedback {
        id: id.to_string(),
        user_name: format!("User {id}"),
        email: format!("{id}@example.com"),
        feedback_text: format!("Feedback body for {id}"),
        category,
        created_at,
    }
}

pub fn by(id: &str, name: &str, email: &str, created_at: DateTime<Utc>) -> Feedback {
    Feedback {
        user_name: name.to_string(),
        email: email.to_string(),
        ..record(id, Category::Suggestion, created_at)
    }
}

pub fn ids<R: Borrow<Feedback>>(records: &[R]) -> Vec<&str> {
    records
        .iter()
        .map(|r| Borrow::<Feedback>::borrow(r).id.as_str())
        .collect()
}
