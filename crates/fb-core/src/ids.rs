//! ID prefix constants.
//!
//! IDs are generated by the database as `{prefix}-{16 hex chars}`.

/// Prefix for feedback records.
pub const PREFIX_FEEDBACK: &str = "fdb";

/// Every prefix in use, for exhaustive generation tests.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_FEEDBACK];

/// Check whether `id` carries `prefix` followed by a dash.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('-') && rest.len() > 1)
}
