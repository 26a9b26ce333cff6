//! Filter engine: search, category, and date-range predicates.
//!
//! Active predicates combine with AND. The result keeps input order.

use std::borrow::Borrow;

use chrono::{DateTime, Days, TimeZone, Utc};
use fb_core::entities::Feedback;
use fb_core::enums::Category;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Category selector. `All` disables the predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Suggestion,
    BugReport,
    FeatureRequest,
}

impl CategoryFilter {
    pub const VALUES: [Self; 4] = [
        Self::All,
        Self::Suggestion,
        Self::BugReport,
        Self::FeatureRequest,
    ];

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::VALUES.into_iter().find(|value| value.as_str() == raw)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Suggestion => "suggestion",
            Self::BugReport => "bug_report",
            Self::FeatureRequest => "feature_request",
        }
    }

    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::All)
    }

    /// Exact match on the canonical category. `Other` never matches a
    /// concrete selector.
    #[must_use]
    pub const fn matches(self, category: &Category) -> bool {
        matches!(
            (self, category),
            (Self::All, _)
                | (Self::Suggestion, Category::Suggestion)
                | (Self::BugReport, Category::BugReport)
                | (Self::FeatureRequest, Category::FeatureRequest)
        )
    }
}

/// Inclusive instant range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The last `days` days: from `now - days` to the end of `now`'s local day.
    ///
    /// The end is pushed to the close of the local day so records arriving
    /// later today still fall inside a range built at startup.
    #[must_use]
    pub fn trailing_days<Tz: TimeZone>(now: &DateTime<Tz>, days: u32) -> Self {
        let start = now
            .clone()
            .checked_sub_days(Days::new(u64::from(days)))
            .map_or(DateTime::<Utc>::MIN_UTC, |start| start.with_timezone(&Utc));
        Self {
            start,
            end: end_of_local_day(now),
        }
    }

    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.start <= self.end
    }

    #[must_use]
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        self.start <= *at && *at <= self.end
    }
}

/// Last representable instant of `now`'s local calendar day.
///
/// Falls back to `now` itself when the local time does not exist (DST gap).
pub(crate) fn end_of_local_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .and_then(|naive| now.timezone().from_local_datetime(&naive).latest())
        .map_or_else(|| now.with_timezone(&Utc), |end| end.with_timezone(&Utc))
}

/// A complete filter specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterSpec {
    /// Free-text search. Inactive when blank after trimming.
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

impl FilterSpec {
    /// Lowercased search needle, or `None` when the predicate is inactive.
    ///
    /// Only blankness is judged on the trimmed term; the needle itself keeps
    /// surrounding whitespace.
    fn needle(&self) -> Option<String> {
        if self.search.trim().is_empty() {
            None
        } else {
            Some(self.search.to_lowercase())
        }
    }

    /// The date range, if supplied and well-formed.
    fn active_range(&self) -> Option<&DateRange> {
        match &self.date_range {
            Some(range) if range.is_well_formed() => Some(range),
            Some(range) => {
                debug!(start = %range.start, end = %range.end, "date range start is after end; ignoring");
                None
            }
            None => None,
        }
    }

    /// True when no predicate is active.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.needle().is_none() && !self.category.is_active() && self.active_range().is_none()
    }
}

/// Records satisfying every active predicate of `spec`, in input order.
#[must_use]
pub fn filter<'a, R: Borrow<Feedback>>(records: &'a [R], spec: &FilterSpec) -> Vec<&'a Feedback> {
    let needle = spec.needle();
    let range = spec.active_range();

    records
        .iter()
        .map(Borrow::<Feedback>::borrow)
        .filter(|record| spec.category.matches(&record.category))
        .filter(|record| range.is_none_or(|range| range.contains(&record.created_at)))
        .filter(|record| needle.as_deref().is_none_or(|needle| record.mentions(needle)))
        .collect()
}
