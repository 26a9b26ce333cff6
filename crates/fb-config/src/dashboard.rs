//! Dashboard pipeline constants.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Longest trailing trend, one leap year of days.
pub const MAX_TREND_DAYS: u32 = 366;

/// Widest recency window, one year of hours.
pub const MAX_RECENCY_HOURS: u32 = 8_760;

const fn default_page_size() -> u32 {
    5
}

const fn default_trend_days() -> u32 {
    7
}

const fn default_top_contributors() -> u32 {
    3
}

const fn default_recency_hours() -> u32 {
    24
}

const fn default_range_days() -> u32 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    /// Records per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Length of the trailing daily trend, in calendar days (today included).
    #[serde(default = "default_trend_days")]
    pub trend_days: u32,

    /// How many contributors the leaderboard keeps.
    #[serde(default = "default_top_contributors")]
    pub top_contributors: u32,

    /// Width of the "recent" window, in hours.
    #[serde(default = "default_recency_hours")]
    pub recency_hours: u32,

    /// Default date-range filter, in days back from now. `0` disables it.
    #[serde(default = "default_range_days")]
    pub default_range_days: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            trend_days: default_trend_days(),
            top_contributors: default_top_contributors(),
            recency_hours: default_recency_hours(),
            default_range_days: default_range_days(),
        }
    }
}

impl DashboardConfig {
    /// Every count except `default_range_days` must be at least 1.
    /// `trend_days` and `recency_hours` are also capped at
    /// [`MAX_TREND_DAYS`] and [`MAX_RECENCY_HOURS`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first field out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("dashboard.page_size", self.page_size, u32::MAX),
            ("dashboard.trend_days", self.trend_days, MAX_TREND_DAYS),
            ("dashboard.top_contributors", self.top_contributors, u32::MAX),
            ("dashboard.recency_hours", self.recency_hours, MAX_RECENCY_HOURS),
        ];
        for (field, value, max) in fields {
            if value == 0 {
                return Err(ConfigError::must_be_positive(field));
            }
            if value > max {
                return Err(ConfigError::must_not_exceed(field, max));
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn has_default_range(&self) -> bool {
        self.default_range_days > 0
    }
}
