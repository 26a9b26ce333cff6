use chrono::{DateTime, Local, TimeZone, Utc};
use fb_dashboard::{PageView, ViewAction};

use crate::cli::root_commands::ListArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::view::{build_view, load_dashboard};
use crate::context::AppContext;
use crate::output::{output, rows_table};

pub const TABLE_HEADERS: [&str; 6] = ["date", "name", "email", "category", "feedback", "id"];

/// Handle `fbk list`.
pub async fn handle(args: &ListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let page = build_page(args, ctx, Local, Utc::now()).await?;
    if flags.format == OutputFormat::Table {
        println!("{}", page_table(&page, &Local));
        if !flags.quiet {
            println!("{}", page_footer(&page));
        }
        return Ok(());
    }
    output(&page, flags.format)
}

async fn build_page<Tz: TimeZone>(
    args: &ListArgs,
    ctx: &AppContext,
    tz: Tz,
    now: DateTime<Utc>,
) -> anyhow::Result<PageView> {
    let view = build_view(
        &args.filter,
        &args.order,
        &now.with_timezone(&tz),
        ctx.config.dashboard.default_range_days,
    )?;
    let mut dashboard = load_dashboard(ctx, tz, now, view).await?;
    dashboard.apply(ViewAction::GoToPage(args.page));
    Ok(dashboard.page())
}

/// One row per record, dated in `tz`.
pub fn page_table<Tz: TimeZone>(page: &PageView, tz: &Tz) -> String {
    let rows = page
        .items
        .iter()
        .map(|record| {
            vec![
                record
                    .created_at
                    .with_timezone(tz)
                    .naive_local()
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
                record.user_name.clone(),
                record.email.clone(),
                record.category.bucket().to_string(),
                record.feedback_text.clone(),
                record.id.clone(),
            ]
        })
        .collect::<Vec<_>>();
    rows_table(&TABLE_HEADERS, &rows)
}

pub fn page_footer(page: &PageView) -> String {
    format!(
        "page {} of {} ({} matching)",
        page.page,
        page.total_pages.max(1),
        page.total_items
    )
}
