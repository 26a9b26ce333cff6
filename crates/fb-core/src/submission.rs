//! New feedback submissions and their field validation.
//!
//! Validation collects every failing field rather than stopping at the first,
//! so a form can show all messages at once.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Category;
use crate::errors::CoreError;

/// Minimum length of a submitter name.
pub const MIN_NAME_LEN: usize = 2;

/// Minimum length of the feedback body.
pub const MIN_FEEDBACK_LEN: usize = 10;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// A submission field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    UserName,
    Email,
    FeedbackText,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserName => "user_name",
            Self::Email => "email",
            Self::FeedbackText => "feedback_text",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failed check on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Fields supplied by a submitter. The record source assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NewFeedback {
    pub user_name: String,
    pub email: String,
    pub feedback_text: String,
    #[serde(default)]
    #[schemars(with = "Option<String>")]
    pub category: Option<Category>,
}

impl NewFeedback {
    /// Category to persist; unset means `suggestion`.
    #[must_use]
    pub fn category_or_default(&self) -> Category {
        self.category.clone().unwrap_or_default()
    }

    /// Run every field check and return the failures, in field order.
    #[must_use]
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.user_name.trim().is_empty() {
            errors.push(FieldError::new(Field::UserName, "Name is required"));
        } else if self.user_name.chars().count() < MIN_NAME_LEN {
            errors.push(FieldError::new(
                Field::UserName,
                "Name must be at least 2 characters",
            ));
        }

        if self.email.trim().is_empty() {
            errors.push(FieldError::new(Field::Email, "Email is required"));
        } else if !EMAIL_SHAPE.is_match(&self.email) {
            errors.push(FieldError::new(
                Field::Email,
                "Please enter a valid email address",
            ));
        }

        if self.feedback_text.trim().is_empty() {
            errors.push(FieldError::new(Field::FeedbackText, "Feedback is required"));
        } else if self.feedback_text.chars().count() < MIN_FEEDBACK_LEN {
            errors.push(FieldError::new(
                Field::FeedbackText,
                "Feedback must be at least 10 characters",
            ));
        }

        errors
    }

    /// Validate the submission.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSubmission` listing every failed field.
    pub fn validate(&self) -> Result<(), CoreError> {
        let errors = self.field_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidSubmission(errors))
        }
    }
}
