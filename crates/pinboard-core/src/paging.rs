#![forbid(unsafe_code)]

//! Page windows over the catalog and over the slot board.
//!
//! Pages are 1-based. A window with zero items has zero pages; `page` is then
//! kept at 1.

use std::ops::Range;

/// A 1-based page cursor over `total_items` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: usize,
    per_page: usize,
    total_items: usize,
}

impl PageWindow {
    /// Create a window on page 1. `per_page` is clamped to at least 1.
    #[must_use]
    pub fn new(per_page: usize, total_items: usize) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            total_items,
        }
    }

    #[inline]
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[inline]
    #[must_use]
    pub const fn per_page(&self) -> usize {
        self.per_page
    }

    #[inline]
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Number of pages (`ceil(total / per_page)`).
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.total_items.div_ceil(self.per_page)
    }

    /// Item index range shown on the current page.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        let start = (self.page - 1)
            .saturating_mul(self.per_page)
            .min(self.total_items);
        let end = start.saturating_add(self.per_page).min(self.total_items);
        start..end
    }

    /// Global item index of position `local` on the current page.
    #[must_use]
    pub fn global_index(&self, local: usize) -> usize {
        (self.page - 1)
            .saturating_mul(self.per_page)
            .saturating_add(local)
    }

    /// Update the item count and pull the page back into range.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.clamp();
    }

    /// Keep `page` within `1..=page_count` (page 1 when there are none).
    pub fn clamp(&mut self) {
        let count = self.page_count();
        if count > 0 && self.page > count {
            self.page = count;
        }
        if self.page == 0 {
            self.page = 1;
        }
    }

    /// Jump to `page`, clamped into range.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
        self.clamp();
    }

    /// Go to the next page if there is one. Returns whether the page changed.
    pub fn next(&mut self) -> bool {
        if self.page < self.page_count() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go to the previous page if there is one. Returns whether the page changed.
    pub fn prev(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Up to `window_len` page numbers centered on the current page.
    ///
    /// Shows every page when they fit; otherwise starts at
    /// `max(1, min(page - window_len / 2, page_count - window_len + 1))`.
    #[must_use]
    pub fn visible_pages(&self, window_len: usize) -> Range<usize> {
        let count = self.page_count();
        if count <= window_len {
            return 1..count + 1;
        }
        let centered = self.page.saturating_sub(window_len / 2);
        let last_start = count - window_len + 1;
        let start = centered.min(last_start).max(1);
        start..start + window_len
    }

    /// The first `window_len` page numbers (or fewer when there are fewer pages).
    #[must_use]
    pub fn leading_pages(&self, window_len: usize) -> Range<usize> {
        1..self.page_count().min(window_len) + 1
    }
}
