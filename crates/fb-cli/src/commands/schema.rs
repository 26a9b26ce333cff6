use fb_core::entities::Feedback;
use fb_core::responses::{ExportResponse, FeedbackCreateResponse};
use fb_core::submission::NewFeedback;
use fb_dashboard::PageView;
use schemars::{Schema, schema_for};

use crate::cli::root_commands::{SchemaArgs, SchemaTarget};
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::stats::StatsResponse;
use crate::commands::watch::WatchUpdate;
use crate::output::output;

/// Handle `fbk schema`. Schemas are always JSON; `--format table` prints them pretty.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let format = match flags.format {
        OutputFormat::Raw => OutputFormat::Raw,
        OutputFormat::Json | OutputFormat::Table => OutputFormat::Json,
    };
    output(&schema(args.target), format)
}

fn schema(target: SchemaTarget) -> Schema {
    match target {
        SchemaTarget::Feedback => schema_for!(Feedback),
        SchemaTarget::NewFeedback => schema_for!(NewFeedback),
        SchemaTarget::Submit => schema_for!(FeedbackCreateResponse),
        SchemaTarget::Page => schema_for!(PageView),
        SchemaTarget::Stats => schema_for!(StatsResponse),
        SchemaTarget::Export => schema_for!(ExportResponse),
        SchemaTarget::Watch => schema_for!(WatchUpdate),
    }
}
