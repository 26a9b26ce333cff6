//! View state: filter, sort, and page, changed together.
//!
//! All user actions go through [`ViewState::apply`], so a filter or sort
//! change and the accompanying reset to page 1 happen in one step.

use chrono::{DateTime, TimeZone};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::filter::{CategoryFilter, DateRange, FilterSpec};
use crate::paginate::Paginator;
use crate::sort::SortOrder;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ViewState {
    pub filter: FilterSpec,
    pub sort: SortOrder,
    /// 1-based.
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filter: FilterSpec::default(),
            sort: SortOrder::default(),
            page: 1,
        }
    }
}

/// A single user action on the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    SetSearch(String),
    SetCategory(CategoryFilter),
    SetDateRange(DateRange),
    ClearDateRange,
    SetSort(SortOrder),
    ToggleSort,
    GoToPage(usize),
    NextPage,
    PreviousPage,
}

impl ViewState {
    /// Default view, optionally restricted to the last `default_range_days` days.
    #[must_use]
    pub fn with_default_range<Tz: TimeZone>(now: &DateTime<Tz>, default_range_days: u32) -> Self {
        let date_range =
            (default_range_days > 0).then(|| DateRange::trailing_days(now, default_range_days));
        Self {
            filter: FilterSpec {
                date_range,
                ..FilterSpec::default()
            },
            ..Self::default()
        }
    }

    /// Apply one action. `total_pages` is the page count of the current view
    /// and bounds page moves; filter and sort changes always land on page 1.
    pub fn apply(&mut self, action: ViewAction, total_pages: usize) {
        match action {
            ViewAction::SetSearch(search) => {
                self.filter.search = search;
                self.page = 1;
            }
            ViewAction::SetCategory(category) => {
                self.filter.category = category;
                self.page = 1;
            }
            ViewAction::SetDateRange(range) => {
                self.filter.date_range = Some(range);
                self.page = 1;
            }
            ViewAction::ClearDateRange => {
                self.filter.date_range = None;
                self.page = 1;
            }
            ViewAction::SetSort(sort) => {
                self.sort = sort;
                self.page = 1;
            }
            ViewAction::ToggleSort => {
                self.sort = self.sort.toggled();
                self.page = 1;
            }
            ViewAction::GoToPage(page) => self.page = Paginator::clamp_page(page, total_pages),
            ViewAction::NextPage => {
                self.page = Paginator::clamp_page(self.page.saturating_add(1), total_pages);
            }
            ViewAction::PreviousPage => {
                self.page = Paginator::clamp_page(self.page.saturating_sub(1), total_pages);
            }
        }
    }
}
