use chrono::{DateTime, Local, TimeZone, Utc};
use fb_dashboard::Scope;
use fb_dashboard::analytics::{Analytics, QuickStats};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cli::root_commands::StatsArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::view::{build_view, load_dashboard};
use crate::context::AppContext;
use crate::output::{output, rows_table};

/// Output of `fbk stats`.
///
/// `quick_stats` always covers every record; `analytics` covers `scope`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatsResponse {
    pub scope: Scope,
    pub quick_stats: QuickStats,
    pub analytics: Analytics,
}

/// Handle `fbk stats`.
pub async fn handle(args: &StatsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = build_stats(args, ctx, Local, Utc::now()).await?;
    if flags.format == OutputFormat::Table {
        println!("{}", stats_tables(&response, ctx.config.dashboard.recency_hours));
        return Ok(());
    }
    output(&response, flags.format)
}

async fn build_stats<Tz: TimeZone>(
    args: &StatsArgs,
    ctx: &AppContext,
    tz: Tz,
    now: DateTime<Utc>,
) -> anyhow::Result<StatsResponse> {
    let scope = parse_enum::<Scope>(&args.scope, "scope")?;
    let view = build_view(
        &args.filter,
        "desc",
        &now.with_timezone(&tz),
        ctx.config.dashboard.default_range_days,
    )?;
    let dashboard = load_dashboard(ctx, tz, now, view).await?;

    Ok(StatsResponse {
        scope,
        quick_stats: dashboard.quick_stats(now),
        analytics: dashboard.analytics(now, scope),
    })
}

/// Row label for the recent-submissions count.
#[must_use]
pub fn recency_label(recency_hours: u32) -> String {
    format!("last {recency_hours}h")
}

fn stats_tables(response: &StatsResponse, recency_hours: u32) -> String {
    let stats = &response.quick_stats;
    let analytics = &response.analytics;

    let summary = rows_table(
        &["metric", "value"],
        &[
            vec!["total".into(), stats.total.to_string()],
            vec![recency_label(recency_hours), stats.recent.to_string()],
            vec!["unique users".into(), stats.unique_users.to_string()],
            vec!["categories".into(), stats.categories.to_string()],
        ],
    );

    let categories = rows_table(
        &["category", "count", "share"],
        &analytics
            .categories
            .iter()
            .map(|c| vec![c.category.clone(), c.count.to_string(), format!("{:.1}%", c.percentage)])
            .collect::<Vec<_>>(),
    );

    let contributors = rows_table(
        &["name", "email", "count"],
        &analytics
            .top_contributors
            .iter()
            .map(|c| vec![c.name.clone(), c.email.clone(), c.count.to_string()])
            .collect::<Vec<_>>(),
    );

    let trend = rows_table(
        &["day", "total", "bugs", "features", "suggestions"],
        &analytics
            .trend
            .iter()
            .map(|p| {
                vec![
                    p.label.clone(),
                    p.total.to_string(),
                    p.bug_reports.to_string(),
                    p.feature_requests.to_string(),
                    p.suggestions.to_string(),
                ]
            })
            .collect::<Vec<_>>(),
    );

    let hourly = rows_table(
        &["hour", "count"],
        &analytics
            .hourly
            .iter()
            .filter(|bucket| bucket.count > 0)
            .map(|bucket| vec![format!("{:02}:00", bucket.hour), bucket.count.to_string()])
            .collect::<Vec<_>>(),
    );

    let scope = match response.scope {
        Scope::All => "all records",
        Scope::Filtered => "filtered view",
    };

    [
        summary,
        format!("Categories ({scope})\n{categories}"),
        format!("Top contributors\n{contributors}"),
        format!("Daily trend\n{trend}"),
        format!("Busiest hours\n{hourly}"),
    ]
    .join("\n\n")
}
