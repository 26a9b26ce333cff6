use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Category;

/// A single feedback submission.
///
/// Created exactly once by the record source and never mutated afterwards.
/// `created_at` is assigned by the database, not by the submitting client.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Feedback {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub feedback_text: String,
    #[schemars(with = "String")]
    pub category: Category,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    /// Case-insensitive substring match against name, email, and body.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.user_name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.feedback_text.to_lowercase().contains(needle)
    }
}
