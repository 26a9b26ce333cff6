//! Turning filter flags into a loaded [`Dashboard`].

use std::convert::Infallible;

use anyhow::{Context, bail};
use chrono::{DateTime, TimeZone, Utc};
use fb_dashboard::{CategoryFilter, Dashboard, DashboardSettings, DateRange, SortOrder, ViewState};

use super::parse::{DayEdge, parse_enum, parse_time_bound};
use crate::cli::root_commands::FilterArgs;
use crate::context::AppContext;

/// Build the view described by the flags.
///
/// Explicit `--since`/`--until` replace the configured default range; a
/// missing side is left open. `--all-dates` removes the range entirely.
pub fn build_view<Tz: TimeZone>(
    filter: &FilterArgs,
    order: &str,
    now: &DateTime<Tz>,
    default_range_days: u32,
) -> anyhow::Result<ViewState> {
    let range_days = if filter.all_dates { 0 } else { default_range_days };
    let mut view = ViewState::with_default_range(now, range_days);

    view.filter.search = filter.search.clone().unwrap_or_default();
    view.filter.category = parse_enum::<CategoryFilter>(&filter.category, "category")?;
    view.sort = parse_enum::<SortOrder>(order, "order")?;

    if filter.since.is_some() || filter.until.is_some() {
        let tz = now.timezone();
        let start = filter
            .since
            .as_deref()
            .map(|raw| parse_time_bound(raw, DayEdge::Start, &tz, "since"))
            .transpose()?
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let end = filter
            .until
            .as_deref()
            .map(|raw| parse_time_bound(raw, DayEdge::End, &tz, "until"))
            .transpose()?
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        if start > end {
            bail!("--since must not be later than --until");
        }
        view.filter.date_range = Some(DateRange::new(start, end));
    }

    Ok(view)
}

/// Fetch every record into a dashboard showing `view`.
pub async fn load_dashboard<Tz: TimeZone>(
    ctx: &AppContext,
    tz: Tz,
    now: DateTime<Utc>,
    view: ViewState,
) -> anyhow::Result<Dashboard<Tz>> {
    let settings = DashboardSettings::from_config(&ctx.config.dashboard);
    let mut dashboard = Dashboard::new(settings, tz, now).with_view(view);

    let ticket = dashboard.begin_refresh();
    let records = ctx
        .service
        .fetch_all()
        .await
        .context("failed to fetch feedback")?;
    dashboard.complete_refresh::<Infallible>(ticket, Ok(records));

    Ok(dashboard)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use fb_dashboard::{CategoryFilter, SortOrder};
    use pretty_assertions::assert_eq;

    use super::build_view;
    use crate::cli::root_commands::FilterArgs;

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 15, 0, 0).unwrap()
    }

    fn args() -> FilterArgs {
        FilterArgs {
            category: "all".to_string(),
            ..FilterArgs::default()
        }
    }

    #[test]
    fn defaults_apply_configured_range() {
        let view = build_view(&args(), "desc", &now(), 30).unwrap();

        let range = view.filter.date_range.expect("default range");
        assert_eq!(range.start, now() - Duration::days(30));
        assert_eq!(view.filter.category, CategoryFilter::All);
        assert_eq!(view.sort, SortOrder::Desc);
        assert_eq!(view.page, 1);
    }

    #[test]
    fn all_dates_drops_the_range() {
        let filter = FilterArgs {
            all_dates: true,
            ..args()
        };
        assert_eq!(build_view(&filter, "desc", &now(), 30).unwrap().filter.date_range, None);
    }

    #[test]
    fn explicit_bounds_replace_default_and_leave_open_sides() {
        let filter = FilterArgs {
            since: Some("2026-10-01".to_string()),
            ..args()
        };
        let range = build_view(&filter, "asc", &now(), 30)
            .unwrap()
            .filter
            .date_range
            .expect("explicit range");

        assert_eq!(range.start, Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap());
        assert_eq!(range.end, chrono::DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let filter = FilterArgs {
            since: Some("2026-10-10".to_string()),
            until: Some("2026-10-01".to_string()),
            ..args()
        };
        assert!(build_view(&filter, "desc", &now(), 0).is_err());
    }

    #[test]
    fn search_category_and_order_are_parsed() {
        let filter = FilterArgs {
            search: Some("Jane".to_string()),
            category: "bug-report".to_string(),
            ..args()
        };
        let view = build_view(&filter, "asc", &now(), 0).unwrap();

        assert_eq!(view.filter.search, "Jane");
        assert_eq!(view.filter.category, CategoryFilter::BugReport);
        assert_eq!(view.sort, SortOrder::Asc);
        assert_eq!(view.filter.date_range, None);
    }

    #[test]
    fn bad_order_is_an_error() {
        let err = build_view(&args(), "sideways", &now(), 0).unwrap_err();
        assert!(err.to_string().contains("invalid order 'sideways'"));
    }
}
