//! # fb-dashboard
//!
//! The feedback review pipeline:
//!
//! ```text
//! records ─► filter ─► sort ─► paginate ─► page
//!    │          │
//!    │          └────► export (CSV)
//!    └──(all or filtered)──► analytics
//! ```
//!
//! Every stage is synchronous and pure. [`dashboard::Dashboard`] holds the
//! collection and the [`view::ViewState`], and sequences refreshes so a slow
//! fetch can never overwrite a newer one.
//!
//! Local-calendar logic (trend days, hourly buckets, export timestamps) is
//! generic over `chrono::TimeZone`; the CLI passes `chrono::Local`.

pub mod analytics;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod filter;
pub mod paginate;
pub mod settings;
pub mod sort;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use dashboard::{Dashboard, RefreshOutcome, RefreshTicket, Scope};
pub use error::DashboardError;
pub use filter::{CategoryFilter, DateRange, FilterSpec};
pub use paginate::{PageView, Paginator};
pub use settings::{AnalyticsSettings, DashboardSettings};
pub use sort::SortOrder;
pub use view::{ViewAction, ViewState};
