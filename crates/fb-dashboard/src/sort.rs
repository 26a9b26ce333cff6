//! Sort stage: order by `created_at`.

use std::borrow::Borrow;
use std::cmp::Ordering;

use fb_core::entities::Feedback;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Asc => "Oldest First",
            Self::Desc => "Newest First",
        }
    }

    fn compare(self, a: &Feedback, b: &Feedback) -> Ordering {
        match self {
            Self::Asc => a.created_at.cmp(&b.created_at),
            Self::Desc => b.created_at.cmp(&a.created_at),
        }
    }
}

/// Sort in place. Stable: equal timestamps keep their relative order.
pub fn sort<R: Borrow<Feedback>>(records: &mut [R], order: SortOrder) {
    records.sort_by(|a, b| order.compare(a.borrow(), b.borrow()));
}
