//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A required configuration section is not configured.
    #[error("Configuration section '{section}' is not configured (missing required fields)")]
    NotConfigured { section: String },

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    pub(crate) fn must_be_positive(field: &str) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: "must be at least 1".to_string(),
        }
    }

    pub(crate) fn must_not_exceed(field: &str, max: u32) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: format!("must be at most {max}"),
        }
    }
}
