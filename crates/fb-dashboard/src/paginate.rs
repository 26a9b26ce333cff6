//! Pagination stage: fixed-size, 1-based pages.

use fb_core::entities::Feedback;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    /// A page size of 0 is raised to 1.
    #[must_use]
    pub const fn new(page_size: usize) -> Self {
        Self {
            page_size: if page_size == 0 { 1 } else { page_size },
        }
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(len / page_size)`; 0 for an empty collection.
    #[must_use]
    pub const fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Items `[(page-1)*size, page*size)` clamped to bounds. Page 0 or a
    /// page past the end yields an empty slice.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let Some(start) = page
            .checked_sub(1)
            .and_then(|index| index.checked_mul(self.page_size))
        else {
            return &[];
        };
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    /// Clamp `page` into `[1, max(total_pages, 1)]`.
    #[must_use]
    pub fn clamp_page(page: usize, total_pages: usize) -> usize {
        page.clamp(1, total_pages.max(1))
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// One rendered page of the current view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PageView {
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    /// Size of the filtered view, across all pages.
    pub total_items: usize,
    pub items: Vec<Feedback>,
}

impl PageView {
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
