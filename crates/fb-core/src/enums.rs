//! Category model for feedback records.
//!
//! Submission only ever produces the three canonical categories, but the
//! record source does not enforce that (rows can be inserted by hand), so any
//! other stored value is kept verbatim in [`Category::Other`]. Aggregations
//! bucket `Other` as `uncategorized`.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Label used by aggregations for any non-canonical category.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Category of a feedback record.
///
/// Serialized as its stored text: `suggestion`, `bug_report`,
/// `feature_request`, or the raw value for `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    Suggestion,
    BugReport,
    FeatureRequest,
    /// Anything outside the canonical set. An empty string means the stored
    /// value was missing.
    Other(String),
}

impl Category {
    /// The three canonical categories, in the order forms present them.
    pub const CANONICAL: [Self; 3] = [Self::Suggestion, Self::BugReport, Self::FeatureRequest];

    /// Parse stored text. Never fails: unknown values become `Other`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "suggestion" => Self::Suggestion,
            "bug_report" => Self::BugReport,
            "feature_request" => Self::FeatureRequest,
            other => Self::Other(other.to_string()),
        }
    }

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Suggestion => "suggestion",
            Self::BugReport => "bug_report",
            Self::FeatureRequest => "feature_request",
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub const fn is_canonical(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Key used by category distributions.
    #[must_use]
    pub fn bucket(&self) -> &str {
        match self {
            Self::Other(_) => UNCATEGORIZED,
            known => known.as_str(),
        }
    }

    /// Plural display name used by analytics views.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Suggestion => "Suggestions",
            Self::BugReport => "Bug Reports",
            Self::FeatureRequest => "Feature Requests",
            Self::Other(_) => "Uncategorized",
        }
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
