use fb_config::FbConfig;
use fb_core::entities::Feedback;
use fb_core::enums::Category;
use fb_core::submission::NewFeedback;
use fb_db::service::FeedbackService;

use crate::cli::root_commands::FilterArgs;
use crate::context::AppContext;

/// Context over an in-memory store with default settings.
pub async fn memory_context() -> AppContext {
    memory_context_with(FbConfig::default()).await
}

pub async fn memory_context_with(config: FbConfig) -> AppContext {
    let service = FeedbackService::new_local(":memory:")
        .await
        .expect("in-memory store should open");
    AppContext::new(service, config)
}

pub async fn seed(ctx: &AppContext, name: &str, email: &str, category: Category) -> Feedback {
    ctx.service
        .create_feedback(&NewFeedback {
            user_name: name.to_string(),
            email: email.to_string(),
            feedback_text: format!("Feedback from {name} about the product"),
            category: Some(category),
        })
        .await
        .expect("seed submission should be valid")
}

pub fn all_dates() -> FilterArgs {
    FilterArgs {
        category: "all".to_string(),
        all_dates: true,
        ..FilterArgs::default()
    }
}
