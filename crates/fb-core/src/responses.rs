//! CLI response types returned as JSON by `fbk` commands.
//!
//! Dashboard views (pages, analytics) live in `fb-dashboard`; these are the
//! shapes for commands that only touch the record source or the filesystem.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Feedback;

/// Response from `fbk submit`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FeedbackCreateResponse {
    pub feedback: Feedback,
}

/// Response from `fbk export`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExportResponse {
    pub path: String,
    pub rows: u32,
    pub bytes: u64,
}
