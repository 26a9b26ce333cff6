//! # fb-config
//!
//! Layered configuration loading for fbdesk using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FBDESK_*` prefix, `__` as separator)
//! 2. An explicit config file, or project-level `.fbdesk/config.toml`
//! 3. User-level `~/.config/fbdesk/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FBDESK_TURSO__URL` -> `turso.url`,
//! `FBDESK_DASHBOARD__PAGE_SIZE` -> `dashboard.page_size`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use fb_config::FbConfig;
//!
//! let config = FbConfig::load_with_dotenv(None).expect("config");
//!
//! if config.turso.is_configured() {
//!     println!("Turso URL: {}", config.turso.url);
//! }
//! println!("page size: {}", config.dashboard.page_size);
//! ```

mod dashboard;
mod database;
mod error;
mod export;
mod turso;
mod watch;

pub use dashboard::{DashboardConfig, MAX_RECENCY_HOURS, MAX_TREND_DAYS};
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use export::ExportConfig;
pub use turso::TursoConfig;
pub use watch::WatchConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "FBDESK_";

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".fbdesk/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FbConfig {
    #[serde(default)]
    pub turso: TursoConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl FbConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    /// `explicit` replaces the project-local file when given.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if extraction fails, or
    /// `ConfigError::InvalidValue` if a dashboard constant is out of range.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(explicit).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` on the current directory's `.env` before building the
    /// figment. This is the typical entry point for the CLI.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(explicit)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Explicit or project-local config
        match explicit {
            Some(path) => figment = figment.merge(Toml::file(path)),
            None => {
                let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
                if local_path.exists() {
                    figment = figment.merge(Toml::file(local_path));
                }
            }
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject settings the pipeline cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dashboard.validate()?;
        self.watch.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fbdesk").join("config.toml"))
    }
}
