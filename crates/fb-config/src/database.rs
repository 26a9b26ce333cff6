//! Local database configuration.

use serde::{Deserialize, Serialize};

fn default_local_path() -> String {
    ".fbdesk/feedback.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path of the local libSQL file used when Turso is not configured.
    /// `:memory:` opens a throwaway database.
    #[serde(default = "default_local_path")]
    pub local_path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            local_path: default_local_path(),
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.local_path == ":memory:"
    }
}
