use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Local, TimeZone, Utc};
use fb_core::responses::ExportResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::commands::shared::view::{build_view, load_dashboard};
use crate::context::AppContext;
use crate::output::output;

/// Handle `fbk export`.
pub async fn handle(args: &ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = export(args, ctx, Local, Utc::now()).await?;
    output(&response, flags.format)
}

/// Write the filtered, sorted view as CSV and report where it went.
async fn export<Tz: TimeZone>(
    args: &ExportArgs,
    ctx: &AppContext,
    tz: Tz,
    now: DateTime<Utc>,
) -> anyhow::Result<ExportResponse> {
    let view = build_view(
        &args.filter,
        &args.order,
        &now.with_timezone(&tz),
        ctx.config.dashboard.default_range_days,
    )?;
    let dashboard = load_dashboard(ctx, tz, now, view).await?;
    let csv = dashboard.export(now).context("failed to build CSV export")?;

    let path: PathBuf = args
        .output
        .clone()
        .unwrap_or_else(|| ctx.config.export.path_for(&csv.file_name));
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create export directory {}", parent.display()))?;
    }
    std::fs::write(&path, &csv.bytes)
        .with_context(|| format!("failed to write export to {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = csv.rows, "feedback exported");

    Ok(ExportResponse {
        path: path.display().to_string(),
        rows: u32::try_from(csv.rows).context("export row count exceeds u32")?,
        bytes: u64::try_from(csv.bytes.len()).context("export size exceeds u64")?,
    })
}
