//! Properties of the filter → sort → paginate → aggregate → export pipeline,
//! checked over generated collections, plus the worked scenarios.

use chrono::{DateTime, Duration, TimeZone, Utc};
use fb_core::entities::Feedback;
use fb_core::enums::Category;
use fb_dashboard::analytics::{self, Analytics};
use fb_dashboard::export;
use fb_dashboard::filter::{self, CategoryFilter, DateRange, FilterSpec};
use fb_dashboard::paginate::Paginator;
use fb_dashboard::sort::{self, SortOrder};
use fb_dashboard::{AnalyticsSettings, Dashboard, DashboardSettings, RefreshOutcome, ViewAction};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 15, 0, 0).unwrap()
}

fn ids(records: &[&Feedback]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}

// -- Strategy helpers --

fn arb_category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Suggestion),
        Just(Category::BugReport),
        Just(Category::FeatureRequest),
        Just(Category::Other(String::new())),
        "[a-z]{3,8}".prop_map(Category::Other),
    ]
}

fn arb_category_filter() -> impl Strategy<Value = CategoryFilter> {
    prop::sample::select(CategoryFilter::VALUES.to_vec())
}

/// Records with unique ids, spread over the 40 days before `now()`, drawn
/// from a small pool of submitters so emails repeat.
fn arb_records(max: usize) -> impl Strategy<Value = Vec<Feedback>> {
    prop::collection::vec(
        (
            0i64..40 * 24 * 60,
            0usize..6,
            arb_category(),
            "[a-zA-Z ]{0,24}",
        ),
        0..max,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (minutes_ago, who, category, text))| Feedback {
                id: format!("fdb-{i:04}"),
                user_name: format!("User {who}"),
                email: format!("user{who}@example.com"),
                feedback_text: text,
                category,
                created_at: now() - Duration::minutes(minutes_ago),
            })
            .collect()
    })
}

fn arb_spec() -> impl Strategy<Value = FilterSpec> {
    (
        prop_oneof![Just(String::new()), Just("user 1".to_string()), "[a-z]{1,3}"],
        arb_category_filter(),
        prop::option::of((0i64..40, 0i64..40)),
    )
        .prop_map(|(search, category, days)| FilterSpec {
            search,
            category,
            date_range: days.map(|(a, b)| {
                DateRange::new(now() - Duration::days(a), now() - Duration::days(b))
            }),
        })
}

proptest! {
    #[test]
    fn filter_is_an_ordered_idempotent_subset(records in arb_records(40), spec in arb_spec()) {
        let once = filter::filter(&records, &spec);
        let twice = filter::filter(&once, &spec);
        prop_assert_eq!(ids(&once), ids(&twice));

        // Subsequence of the input, in input order.
        let mut input = records.iter().map(|r| r.id.as_str());
        for kept in &once {
            prop_assert!(input.any(|id| id == kept.id));
        }
    }

    #[test]
    fn sort_is_idempotent_and_directions_mirror(records in arb_records(40)) {
        let mut desc: Vec<&Feedback> = records.iter().collect();
        sort::sort(&mut desc, SortOrder::Desc);
        let mut again = desc.clone();
        sort::sort(&mut again, SortOrder::Desc);
        prop_assert_eq!(ids(&desc), ids(&again));

        let mut asc: Vec<&Feedback> = records.iter().collect();
        sort::sort(&mut asc, SortOrder::Asc);
        prop_assert!(asc.windows(2).all(|w| w[0].created_at <= w[1].created_at));

        let mut instants: Vec<_> = records.iter().map(|r| r.created_at).collect();
        instants.sort();
        instants.dedup();
        if instants.len() == records.len() {
            asc.reverse();
            prop_assert_eq!(ids(&asc), ids(&desc));
        }
    }

    #[test]
    fn pages_reconstruct_the_view(records in arb_records(40), size in 1usize..8) {
        let view: Vec<&Feedback> = records.iter().collect();
        let paginator = Paginator::new(size);
        let total = paginator.total_pages(view.len());

        let mut rebuilt = Vec::new();
        for page in 1..=total {
            let slice = paginator.slice(&view, page);
            prop_assert!(!slice.is_empty() && slice.len() <= size);
            rebuilt.extend_from_slice(slice);
        }
        prop_assert_eq!(ids(&rebuilt), ids(&view));
        prop_assert!(paginator.slice(&view, total + 1).is_empty());
        prop_assert!(paginator.slice(&view, 0).is_empty());
    }

    #[test]
    fn distribution_counts_every_record_once(records in arb_records(40)) {
        let dist = analytics::category_distribution(&records);
        prop_assert_eq!(dist.iter().map(|c| c.count).sum::<usize>(), records.len());

        let mut labels: Vec<&str> = dist.iter().map(|c| c.category.as_str()).collect();
        let before = labels.len();
        labels.sort_unstable();
        labels.dedup();
        prop_assert_eq!(labels.len(), before);

        if !records.is_empty() {
            let total_pct: f64 = dist.iter().map(|c| c.percentage).sum();
            prop_assert!((total_pct - 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn top_contributors_are_bounded_sorted_and_real(records in arb_records(40)) {
        let top = analytics::top_contributors(&records, 3);
        prop_assert!(top.len() <= 3);
        prop_assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        for contributor in &top {
            let authored = records.iter().filter(|r| r.email == contributor.email).count();
            prop_assert_eq!(authored, contributor.count);
        }
    }

    #[test]
    fn export_has_one_line_per_record_plus_header(records in arb_records(40)) {
        // Generated bodies contain no line breaks.
        let bytes = export::to_csv(&records, &Utc).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        prop_assert_eq!(text.lines().count(), records.len() + 1);
    }

    #[test]
    fn trend_and_hourly_cover_their_windows(records in arb_records(40)) {
        let analytics = Analytics::compute(&records, &now(), &AnalyticsSettings::default());
        prop_assert_eq!(analytics.trend.len(), 7);
        prop_assert_eq!(analytics.hourly.iter().map(|b| b.count).sum::<usize>(), records.len());
        for point in &analytics.trend {
            prop_assert!(point.bug_reports + point.feature_requests + point.suggestions <= point.total);
        }
    }
}

// -- Scenarios --

#[test]
fn category_and_recency_scenario() {
    let today = now() - Duration::hours(2);
    let yesterday = now() - Duration::days(1) - Duration::hours(2);
    let records = vec![
        Feedback {
            id: "fdb-1".into(),
            user_name: "A".into(),
            email: "a@example.com".into(),
            feedback_text: "Crash on save".into(),
            category: Category::BugReport,
            created_at: today,
        },
        Feedback {
            id: "fdb-2".into(),
            user_name: "B".into(),
            email: "b@example.com".into(),
            feedback_text: "Crash on load".into(),
            category: Category::BugReport,
            created_at: today,
        },
        Feedback {
            id: "fdb-3".into(),
            user_name: "C".into(),
            email: "c@example.com".into(),
            feedback_text: "Dark mode please".into(),
            category: Category::Suggestion,
            created_at: yesterday,
        },
    ];

    let analytics = Analytics::compute(&records, &now(), &AnalyticsSettings::default());

    let dist: Vec<(String, usize)> = analytics
        .categories
        .iter()
        .map(|c| (c.category.clone(), c.count))
        .collect();
    assert_eq!(dist, vec![("bug_report".to_string(), 2), ("suggestion".to_string(), 1)]);
    assert_eq!(analytics.total, 3);
    assert_eq!(analytics.recent, 2);
}

#[test]
fn search_scenario() {
    let base = Feedback {
        id: "fdb-1".into(),
        user_name: "Jane Doe".into(),
        email: "jd@example.com".into(),
        feedback_text: "Love it".into(),
        category: Category::Suggestion,
        created_at: now(),
    };
    let other = Feedback {
        id: "fdb-2".into(),
        user_name: "John Roe".into(),
        email: "jr@example.com".into(),
        ..base.clone()
    };
    let records = vec![base, other];
    let spec = FilterSpec {
        search: "jane".into(),
        ..Default::default()
    };

    assert_eq!(ids(&filter::filter(&records, &spec)), vec!["fdb-1"]);
}

#[test]
fn dashboard_end_to_end() {
    let records: Vec<Feedback> = (0..12)
        .map(|i| Feedback {
            id: format!("fdb-{i:02}"),
            user_name: format!("User {}", i % 4),
            email: format!("user{}@example.com", i % 4),
            feedback_text: "Something worth saying".into(),
            category: if i % 3 == 0 { Category::BugReport } else { Category::Suggestion },
            created_at: now() - Duration::hours(i),
        })
        .collect();

    let mut dash = Dashboard::new(DashboardSettings::default(), Utc, now());
    let ticket = dash.begin_refresh();
    assert_eq!(
        dash.complete_refresh::<String>(ticket, Ok(records)),
        RefreshOutcome::Applied { records: 12 }
    );

    dash.apply(ViewAction::GoToPage(3));
    let page = dash.page();
    assert_eq!((page.page, page.total_pages, page.items.len()), (3, 3, 2));
    assert_eq!(page.items[0].id, "fdb-10");

    dash.apply(ViewAction::SetCategory(CategoryFilter::BugReport));
    let page = dash.page();
    assert_eq!((page.page, page.total_items), (1, 4));

    let stats = dash.quick_stats(now());
    assert_eq!((stats.total, stats.recent, stats.unique_users, stats.categories), (12, 12, 4, 2));

    let json = serde_json::to_value(dash.analytics(now(), fb_dashboard::Scope::Filtered)).unwrap();
    assert_eq!(json["total"], 4);
    assert_eq!(json["categories"][0]["category"], "bug_report");
    assert_eq!(json["hourly"].as_array().unwrap().len(), 24);
}
