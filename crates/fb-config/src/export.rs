//! CSV export settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Directory export files are written to. Empty means the current directory.
    #[serde(default)]
    pub directory: String,
}

impl ExportConfig {
    /// Resolve `file_name` inside the configured directory.
    #[must_use]
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        if self.directory.is_empty() {
            PathBuf::from(file_name)
        } else {
            PathBuf::from(&self.directory).join(file_name)
        }
    }
}
