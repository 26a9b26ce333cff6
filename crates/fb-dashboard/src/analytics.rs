//! Aggregation engine.
//!
//! Every function takes a borrowed collection (the full set or a filtered
//! view) and an explicit `now`, so results are reproducible. Calendar-day
//! and hour-of-day logic happens in the time zone carried by `now`.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Days, NaiveDate, TimeZone, Timelike, Utc};
use fb_core::entities::Feedback;
use fb_core::enums::Category;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::settings::AnalyticsSettings;

/// One slice of the category distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryCount {
    /// Stored category name, or `uncategorized`.
    pub category: String,
    pub display_name: String,
    pub count: usize,
    /// Share of the input, 0–100. Zero for empty input.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Contributor {
    pub email: String,
    /// `user_name` of the first record by this email, or the email when blank.
    pub name: String,
    pub count: usize,
}

/// One calendar day of the trailing trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// Short label, e.g. `Oct 17`.
    pub label: String,
    /// Every record that day, whatever its category.
    pub total: usize,
    pub bug_reports: usize,
    pub feature_requests: usize,
    pub suggestions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HourBucket {
    pub hour: u32,
    pub count: usize,
}

/// Header numbers shown above the record list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuickStats {
    pub total: usize,
    pub recent: usize,
    pub unique_users: usize,
    /// Distinct stored category values.
    pub categories: usize,
}

/// Full analytics panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Analytics {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub recent: usize,
    pub unique_users: usize,
    pub categories: Vec<CategoryCount>,
    pub top_contributors: Vec<Contributor>,
    pub trend: Vec<TrendPoint>,
    pub hourly: Vec<HourBucket>,
}

impl Analytics {
    #[must_use]
    pub fn compute<R, Tz>(records: &[R], now: &DateTime<Tz>, settings: &AnalyticsSettings) -> Self
    where
        R: Borrow<Feedback>,
        Tz: TimeZone,
    {
        let now_utc = now.with_timezone(&Utc);
        Self {
            generated_at: now_utc,
            total: records.len(),
            recent: recent_count(records, &now_utc, settings.recency),
            unique_users: unique_submitters(records),
            categories: category_distribution(records),
            top_contributors: top_contributors(records, settings.top_contributors),
            trend: daily_trend(records, now, settings.trend_days),
            hourly: hourly_distribution(records, &now.timezone()),
        }
    }
}

fn each<R: Borrow<Feedback>>(records: &[R]) -> impl Iterator<Item = &Feedback> {
    records.iter().map(Borrow::<Feedback>::borrow)
}

/// Records created in `(now - window, now]`. A window reaching past the
/// earliest representable instant covers everything up to `now`.
#[must_use]
pub fn recent_count<R: Borrow<Feedback>>(
    records: &[R],
    now: &DateTime<Utc>,
    window: chrono::Duration,
) -> usize {
    let since = now.checked_sub_signed(window).unwrap_or(DateTime::<Utc>::MIN_UTC);
    each(records)
        .filter(|record| record.created_at > since && record.created_at <= *now)
        .count()
}

/// Distinct `email` values.
#[must_use]
pub fn unique_submitters<R: Borrow<Feedback>>(records: &[R]) -> usize {
    each(records)
        .map(|record| record.email.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Count per category bucket, in order of first occurrence.
#[must_use]
pub fn category_distribution<R: Borrow<Feedback>>(records: &[R]) -> Vec<CategoryCount> {
    let mut order: Vec<(&str, &Category, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in each(records) {
        let bucket = record.category.bucket();
        match index.get(bucket) {
            Some(&at) => order[at].2 += 1,
            None => {
                index.insert(bucket, order.len());
                order.push((bucket, &record.category, 1));
            }
        }
    }

    let total = records.len();
    order
        .into_iter()
        .map(|(bucket, category, count)| CategoryCount {
            category: bucket.to_string(),
            display_name: category.display_name().to_string(),
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

/// The `limit` most active emails, by descending count. Ties keep the order
/// in which the emails were first seen.
#[must_use]
pub fn top_contributors<R: Borrow<Feedback>>(records: &[R], limit: usize) -> Vec<Contributor> {
    let mut tallies: Vec<(&Feedback, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in each(records) {
        match index.get(record.email.as_str()) {
            Some(&at) => tallies[at].1 += 1,
            None => {
                index.insert(record.email.as_str(), tallies.len());
                tallies.push((record, 1));
            }
        }
    }

    tallies.sort_by(|a, b| b.1.cmp(&a.1));
    tallies
        .into_iter()
        .take(limit)
        .map(|(first, count)| Contributor {
            email: first.email.clone(),
            name: if first.user_name.trim().is_empty() {
                first.email.clone()
            } else {
                first.user_name.clone()
            },
            count,
        })
        .collect()
}

/// Per-day counts for the last `days` local calendar days, oldest first,
/// today included. The range never starts before `NaiveDate::MIN`.
#[must_use]
pub fn daily_trend<R, Tz>(records: &[R], now: &DateTime<Tz>, days: u32) -> Vec<TrendPoint>
where
    R: Borrow<Feedback>,
    Tz: TimeZone,
{
    let today = now.date_naive();
    let Some(back) = days.checked_sub(1) else {
        return Vec::new();
    };
    let first_day = today
        .checked_sub_days(Days::new(u64::from(back)))
        .unwrap_or(NaiveDate::MIN);

    let mut points: Vec<TrendPoint> = first_day
        .iter_days()
        .take_while(|date| *date <= today)
        .take(days as usize)
        .map(|date| TrendPoint {
            date,
            label: date.format("%b %-d").to_string(),
            total: 0,
            bug_reports: 0,
            feature_requests: 0,
            suggestions: 0,
        })
        .collect();

    let tz = now.timezone();
    for record in each(records) {
        let local_day = record.created_at.with_timezone(&tz).date_naive();
        let Ok(offset) = usize::try_from((local_day - first_day).num_days()) else {
            continue;
        };
        let Some(point) = points.get_mut(offset) else {
            continue;
        };
        point.total += 1;
        match record.category {
            Category::BugReport => point.bug_reports += 1,
            Category::FeatureRequest => point.feature_requests += 1,
            Category::Suggestion => point.suggestions += 1,
            Category::Other(_) => {}
        }
    }
    points
}

/// 24 buckets keyed by local hour of `created_at`, across all dates.
#[must_use]
pub fn hourly_distribution<R, Tz>(records: &[R], tz: &Tz) -> Vec<HourBucket>
where
    R: Borrow<Feedback>,
    Tz: TimeZone,
{
    let mut counts = [0usize; 24];
    for record in each(records) {
        let hour = record.created_at.with_timezone(tz).hour() as usize;
        counts[hour] += 1;
    }
    (0u32..)
        .zip(counts)
        .map(|(hour, count)| HourBucket { hour, count })
        .collect()
}

/// Header stats over the whole collection.
#[must_use]
pub fn quick_stats<R: Borrow<Feedback>>(
    records: &[R],
    now: &DateTime<Utc>,
    window: chrono::Duration,
) -> QuickStats {
    QuickStats {
        total: records.len(),
        recent: recent_count(records, now, window),
        unique_users: unique_submitters(records),
        categories: each(records)
            .map(|record| record.category.as_str())
            .collect::<HashSet<_>>()
            .len(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{by, now, record};

    fn scenario() -> Vec<Feedback> {
        vec![
            record("a", Category::BugReport, now() - Duration::hours(1)),
            record("b", Category::BugReport, now() - Duration::hours(3)),
            record("c", Category::Suggestion, now() - Duration::hours(26)),
        ]
    }

    #[test]
    fn distribution_total_and_recency() {
        let records = scenario();

        let dist = category_distribution(&records);
        let pairs: Vec<(&str, usize)> = dist.iter().map(|c| (c.category.as_str(), c.count)).collect();
        assert_eq!(pairs, vec![("bug_report", 2), ("suggestion", 1)]);
        assert_eq!(dist[0].display_name, "Bug Reports");

        let stats = quick_stats(&records, &now(), Duration::hours(24));
        assert_eq!(stats.total, 3);
        assert_eq!(stats.recent, 2);
    }

    #[test]
    fn recency_window_is_half_open() {
        let records = vec![
            record("edge-out", Category::Suggestion, now() - Duration::hours(24)),
            record("edge-in", Category::Suggestion, now()),
            record("future", Category::Suggestion, now() + Duration::seconds(1)),
        ];
        assert_eq!(recent_count(&records, &now(), Duration::hours(24)), 1);
    }

    #[test]
    fn recency_window_past_calendar_start_counts_everything() {
        let records = scenario();
        let window = Duration::hours(i64::from(u32::MAX));

        assert_eq!(recent_count(&records, &now(), window), 3);

        let settings = AnalyticsSettings {
            recency: window,
            ..AnalyticsSettings::default()
        };
        let analytics = Analytics::compute(&records, &now(), &settings);
        assert_eq!(analytics.recent, 3);
    }

    #[test]
    fn other_categories_share_uncategorized_bucket() {
        let records = vec![
            record("1", Category::Other("praise".into()), now()),
            record("2", Category::Suggestion, now()),
            record("3", Category::Other(String::new()), now()),
            record("4", Category::Suggestion, now()),
        ];

        let dist = category_distribution(&records);

        assert_eq!(
            dist,
            vec![
                CategoryCount {
                    category: "uncategorized".into(),
                    display_name: "Uncategorized".into(),
                    count: 2,
                    percentage: 50.0,
                },
                CategoryCount {
                    category: "suggestion".into(),
                    display_name: "Suggestions".into(),
                    count: 2,
                    percentage: 50.0,
                },
            ]
        );
        assert_eq!(quick_stats(&records, &now(), Duration::hours(1)).categories, 3);
    }

    #[test]
    fn top_contributors_ties_keep_first_seen_order() {
        let records = vec![
            by("1", "Zed", "zed@example.com", now()),
            by("2", "Amy", "amy@example.com", now()),
            by("3", "Amy Again", "amy@example.com", now()),
            by("4", "Kim", "kim@example.com", now()),
            by("5", "Zed", "zed@example.com", now()),
            by("6", "Lee", "lee@example.com", now()),
            by("7", "Kim", "kim@example.com", now()),
            by("8", "Amy", "amy@example.com", now()),
        ];

        let top = top_contributors(&records, 3);

        assert_eq!(
            top,
            vec![
                Contributor { email: "amy@example.com".into(), name: "Amy".into(), count: 3 },
                Contributor { email: "zed@example.com".into(), name: "Zed".into(), count: 2 },
                Contributor { email: "kim@example.com".into(), name: "Kim".into(), count: 2 },
            ]
        );
    }

    #[test]
    fn blank_name_falls_back_to_email() {
        let records = vec![by("1", "  ", "anon@example.com", now())];
        assert_eq!(top_contributors(&records, 3)[0].name, "anon@example.com");
    }

    #[test]
    fn trend_buckets_by_local_day() {
        // 15:00 UTC is 00:30 on Oct 18 at +09:30.
        let tz = FixedOffset::east_opt(9 * 3600 + 1800).unwrap();
        let local_now = now().with_timezone(&tz);
        let records = vec![
            record("today-bug", Category::BugReport, now()),
            record("today-other", Category::Other("praise".into()), now() - Duration::minutes(10)),
            // 14:00 UTC is 23:30 on Oct 17 locally: yesterday.
            record("yesterday", Category::FeatureRequest, now() - Duration::hours(1)),
            record("too-old", Category::Suggestion, now() - Duration::days(9)),
        ];

        let trend = daily_trend(&records, &local_now, 7);

        assert_eq!(trend.len(), 7);
        assert_eq!(trend[0].label, "Oct 12");
        let today = &trend[6];
        assert_eq!(today.label, "Oct 18");
        assert_eq!((today.total, today.bug_reports, today.feature_requests, today.suggestions), (2, 1, 0, 0));
        let yesterday = &trend[5];
        assert_eq!((yesterday.total, yesterday.feature_requests), (1, 1));
        assert_eq!(trend.iter().map(|p| p.total).sum::<usize>(), 3);
    }

    #[test]
    fn trend_is_clamped_at_calendar_start() {
        let early = DateTime::<Utc>::MIN_UTC + Duration::days(2);

        let trend = daily_trend::<Feedback, _>(&[], &early, 10);

        assert_eq!(trend.len(), 3);
        assert_eq!(trend[0].date, NaiveDate::MIN);
        assert_eq!(trend[2].date, early.date_naive());
    }

    #[test]
    fn zero_day_trend_is_empty() {
        assert!(daily_trend(&scenario(), &now(), 0).is_empty());
    }

    #[test]
    fn hourly_uses_local_hour() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let records = vec![
            record("1", Category::Suggestion, now()),
            record("2", Category::Suggestion, now() - Duration::days(3)),
            record("3", Category::Suggestion, now() - Duration::hours(11)),
        ];

        let hourly = hourly_distribution(&records, &tz);

        assert_eq!(hourly.len(), 24);
        assert_eq!(hourly[10], HourBucket { hour: 10, count: 2 });
        assert_eq!(hourly[23], HourBucket { hour: 23, count: 1 });
        assert_eq!(hourly.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn empty_input_yields_zeros() {
        let records: Vec<Feedback> = Vec::new();
        let analytics = Analytics::compute(&records, &now(), &AnalyticsSettings::default());

        assert_eq!(analytics.total, 0);
        assert_eq!(analytics.recent, 0);
        assert_eq!(analytics.unique_users, 0);
        assert!(analytics.categories.is_empty());
        assert!(analytics.top_contributors.is_empty());
        assert_eq!(analytics.trend.len(), 7);
        assert!(analytics.trend.iter().all(|p| p.total == 0));
        assert!(analytics.hourly.iter().all(|b| b.count == 0));
        assert_eq!(quick_stats(&records, &now(), Duration::hours(24)), QuickStats::default());
        assert_eq!(percentage(0, 0), 0.0);
    }
}
