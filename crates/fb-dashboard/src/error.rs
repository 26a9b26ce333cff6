//! Error types for fb-dashboard.

use thiserror::Error;

/// Errors from the dashboard pipeline.
///
/// Filtering, sorting, pagination, and aggregation cannot fail; only
/// serialization can.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// CSV serialization failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}
