use std::sync::Arc;

use anyhow::Context;
use fb_config::FbConfig;
use fb_db::service::FeedbackService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: Arc<FeedbackService>,
    pub config: FbConfig,
}

impl AppContext {
    /// Open the configured store. A Turso store that cannot be reached falls
    /// back to the local database file.
    pub async fn init(config: FbConfig) -> anyhow::Result<Self> {
        let service = if config.turso.is_configured() {
            match FeedbackService::open(&config).await {
                Ok(service) => service,
                Err(error) => {
                    tracing::warn!(
                        %error,
                        host = config.turso.host(),
                        "failed to open Turso feedback store; falling back to local"
                    );
                    open_local(&config).await?
                }
            }
        } else {
            open_local(&config).await?
        };

        Ok(Self::new(service, config))
    }

    #[must_use]
    pub fn new(service: FeedbackService, config: FbConfig) -> Self {
        Self {
            service: Arc::new(service),
            config,
        }
    }
}

async fn open_local(config: &FbConfig) -> anyhow::Result<FeedbackService> {
    FeedbackService::new_local(&config.database.local_path)
        .await
        .with_context(|| {
            format!(
                "failed to open local feedback database at {}",
                config.database.local_path
            )
        })
}
