use anyhow::Context;
use fb_core::responses::FeedbackCreateResponse;
use fb_core::submission::NewFeedback;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SubmitArgs;
use crate::commands::shared::parse::parse_category;
use crate::context::AppContext;
use crate::output::output;

/// Handle `fbk submit`.
pub async fn handle(args: &SubmitArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = submit(args, ctx).await?;
    output(&response, flags.format)
}

async fn submit(args: &SubmitArgs, ctx: &AppContext) -> anyhow::Result<FeedbackCreateResponse> {
    let category = args.category.as_deref().map(parse_category).transpose()?;
    let submission = NewFeedback {
        user_name: args.name.clone(),
        email: args.email.clone(),
        feedback_text: args.text.clone(),
        category,
    };

    let feedback = ctx
        .service
        .create_feedback(&submission)
        .await
        .context("feedback was not submitted")?;
    tracing::info!(id = %feedback.id, "feedback submitted");

    Ok(FeedbackCreateResponse { feedback })
}
