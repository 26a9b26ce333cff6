//! Live-update settings for `fbk watch`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_poll_interval_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchConfig {
    /// How often the insert poller checks the store for rows written by
    /// other processes, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl WatchConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when the interval is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::must_be_positive("watch.poll_interval_ms"));
        }
        Ok(())
    }
}
