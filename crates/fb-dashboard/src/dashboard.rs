//! Dashboard controller.
//!
//! Owns the fetched collection and the [`ViewState`], and sequences
//! refreshes: every fetch is started with [`Dashboard::begin_refresh`], which
//! issues a numbered [`RefreshTicket`], and only the response carrying the
//! latest ticket may replace the collection. Out-of-order responses are
//! discarded.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use fb_core::entities::Feedback;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analytics::{self, Analytics, QuickStats};
use crate::error::DashboardError;
use crate::export::{self, CsvExport};
use crate::filter;
use crate::paginate::{PageView, Paginator};
use crate::settings::DashboardSettings;
use crate::sort;
use crate::view::{ViewAction, ViewState};

pub const NEW_FEEDBACK_NOTICE: &str = "New feedback received";

/// Proof that a fetch was requested. Compared by sequence number only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    #[must_use]
    pub const fn seq(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The collection was replaced with `records` records.
    Applied { records: usize },
    /// A newer refresh had been issued; the response was dropped.
    Stale { ticket: u64, latest: u64 },
    /// The fetch failed; the previous collection is kept.
    Failed,
}

/// Which records an analytics query covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Every fetched record, ignoring filters.
    #[default]
    All,
    /// The current filtered view.
    Filtered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Info,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Feedback review state for one session.
#[derive(Debug, Clone)]
pub struct Dashboard<Tz: TimeZone> {
    records: Vec<Feedback>,
    view: ViewState,
    settings: DashboardSettings,
    paginator: Paginator,
    tz: Tz,
    issued: u64,
    loaded: bool,
    notices: Vec<Notice>,
}

impl<Tz: TimeZone> Dashboard<Tz> {
    /// Empty dashboard whose default view is built at `now`.
    #[must_use]
    pub fn new(settings: DashboardSettings, tz: Tz, now: DateTime<Utc>) -> Self {
        let local_now = now.with_timezone(&tz);
        let view = ViewState::with_default_range(&local_now, settings.default_range_days);
        Self {
            records: Vec::new(),
            view,
            paginator: Paginator::new(settings.page_size),
            settings,
            tz,
            issued: 0,
            loaded: false,
            notices: Vec::new(),
        }
    }

    /// Replace the view wholesale, e.g. with one built from CLI flags.
    #[must_use]
    pub fn with_view(mut self, view: ViewState) -> Self {
        self.view = view;
        self
    }

    // -- refresh sequencing ------------------------------------------------

    /// Start a fetch. Any ticket issued earlier becomes stale.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        debug!(seq = self.issued, "refresh issued");
        RefreshTicket(self.issued)
    }

    /// Deliver the response for `ticket`.
    pub fn complete_refresh<E: fmt::Display>(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<Feedback>, E>,
    ) -> RefreshOutcome {
        if ticket.0 != self.issued {
            debug!(ticket = ticket.0, latest = self.issued, "discarding stale refresh");
            return RefreshOutcome::Stale {
                ticket: ticket.0,
                latest: self.issued,
            };
        }
        match result {
            Ok(records) => {
                let count = records.len();
                self.records = records;
                self.loaded = true;
                self.view.page = 1;
                debug!(count, "refresh applied");
                RefreshOutcome::Applied { records: count }
            }
            Err(e) => {
                warn!(error = %e, "feedback fetch failed; keeping previous records");
                self.push_notice(NoticeKind::Error, format!("Failed to load feedback: {e}"));
                RefreshOutcome::Failed
            }
        }
    }

    /// React to a pushed insert: note it and request a full refetch.
    pub fn on_insert(&mut self, record: &Feedback) -> RefreshTicket {
        info!(id = %record.id, "new feedback received");
        self.push_notice(NoticeKind::Info, NEW_FEEDBACK_NOTICE.to_string());
        self.begin_refresh()
    }

    /// Incremental alternative to [`on_insert`](Self::on_insert): prepend the
    /// record unless its id is already present. Returns whether it was added.
    pub fn merge_insert(&mut self, record: Feedback) -> bool {
        if self.records.iter().any(|existing| existing.id == record.id) {
            debug!(id = %record.id, "insert already present; not merging");
            return false;
        }
        self.push_notice(NoticeKind::Info, NEW_FEEDBACK_NOTICE.to_string());
        self.records.insert(0, record);
        self.view.page = 1;
        true
    }

    fn push_notice(&mut self, kind: NoticeKind, message: String) {
        self.notices.insert(
            0,
            Notice {
                kind,
                message,
                at: Utc::now(),
            },
        );
    }

    // -- view --------------------------------------------------------------

    /// Apply a user action, bounding page moves by the current view.
    pub fn apply(&mut self, action: ViewAction) {
        let total_pages = self.paginator.total_pages(self.visible().len());
        self.view.apply(action, total_pages);
    }

    /// Filtered and sorted records.
    #[must_use]
    pub fn visible(&self) -> Vec<&Feedback> {
        let mut view = filter::filter(&self.records, &self.view.filter);
        sort::sort(&mut view, self.view.sort);
        view
    }

    /// The current page of the visible records.
    #[must_use]
    pub fn page(&self) -> PageView {
        let visible = self.visible();
        PageView {
            page: self.view.page,
            total_pages: self.paginator.total_pages(visible.len()),
            page_size: self.paginator.page_size(),
            total_items: visible.len(),
            items: self
                .paginator
                .slice(&visible, self.view.page)
                .iter()
                .map(|record| (*record).clone())
                .collect(),
        }
    }

    // -- derived data ------------------------------------------------------

    /// Header stats over every fetched record.
    #[must_use]
    pub fn quick_stats(&self, now: DateTime<Utc>) -> QuickStats {
        analytics::quick_stats(&self.records, &now, self.settings.analytics.recency)
    }

    #[must_use]
    pub fn analytics(&self, now: DateTime<Utc>, scope: Scope) -> Analytics {
        let local_now = now.with_timezone(&self.tz);
        match scope {
            Scope::All => Analytics::compute(&self.records, &local_now, &self.settings.analytics),
            Scope::Filtered => {
                Analytics::compute(&self.visible(), &local_now, &self.settings.analytics)
            }
        }
    }

    /// CSV of the visible records in view order.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Csv` if serialization fails.
    pub fn export(&self, now: DateTime<Utc>) -> Result<CsvExport, DashboardError> {
        export::export(&self.visible(), &now.with_timezone(&self.tz))
    }

    // -- accessors ---------------------------------------------------------

    #[must_use]
    pub fn records(&self) -> &[Feedback] {
        &self.records
    }

    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub const fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// True once any refresh has been applied.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Notices, newest first.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Remove and return pending notices, newest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
