//! Runtime form of the `[dashboard]` configuration section.

use chrono::Duration;
use fb_config::DashboardConfig;

/// Tunables for the aggregation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsSettings {
    /// Days in the trailing trend, today included.
    pub trend_days: u32,
    /// Leaderboard length.
    pub top_contributors: usize,
    /// Width of the "recent" window ending at `now`.
    pub recency: Duration,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        DashboardSettings::default().analytics
    }
}

/// Everything the dashboard controller needs from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    pub page_size: usize,
    /// Default date-range filter in days back from now; `0` means no default range.
    pub default_range_days: u32,
    pub analytics: AnalyticsSettings,
}

impl DashboardSettings {
    #[must_use]
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            page_size: config.page_size as usize,
            default_range_days: config.default_range_days,
            analytics: AnalyticsSettings {
                trend_days: config.trend_days,
                top_contributors: config.top_contributors as usize,
                recency: Duration::hours(i64::from(config.recency_hours)),
            },
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_follow_config_defaults() {
        let settings = DashboardSettings::default();
        assert_eq!(settings.page_size, 5);
        assert_eq!(settings.default_range_days, 30);
        assert_eq!(
            settings.analytics,
            AnalyticsSettings {
                trend_days: 7,
                top_contributors: 3,
                recency: Duration::hours(24),
            }
        );
    }

    #[test]
    fn converts_configured_values() {
        let config = DashboardConfig {
            page_size: 12,
            trend_days: 14,
            top_contributors: 5,
            recency_hours: 6,
            default_range_days: 0,
        };
        let settings = DashboardSettings::from_config(&config);
        assert_eq!(settings.page_size, 12);
        assert_eq!(settings.analytics.trend_days, 14);
        assert_eq!(settings.analytics.top_contributors, 5);
        assert_eq!(settings.analytics.recency, Duration::hours(6));
        assert_eq!(settings.default_range_days, 0);
    }
}
