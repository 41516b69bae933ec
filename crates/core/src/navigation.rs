//! Answer-card pagination model.
//!
//! Pure arithmetic over (question count, page capacity, position). The
//! capacity is an opaque configuration value the presenter derives from
//! its layout; rendering of the page strip also stays with the
//! presenter.

use std::ops::Range;

use crate::model::DEFAULT_PAGE_CAPACITY;

/// 1-based page containing the question at `index`.
#[must_use]
pub fn page_of(index: usize, capacity: usize) -> usize {
    index / capacity.max(1) + 1
}

/// Number of pages needed for `len` questions (0 when empty).
#[must_use]
pub fn total_pages(len: usize, capacity: usize) -> usize {
    len.div_ceil(capacity.max(1))
}

/// Half-open question-index range covered by the 1-based `page`.
#[must_use]
pub fn page_range(page: usize, len: usize, capacity: usize) -> Range<usize> {
    let capacity = capacity.max(1);
    let start = page.saturating_sub(1).saturating_mul(capacity).min(len);
    let end = start.saturating_add(capacity).min(len);
    start..end
}

//
// ─── PAGE WINDOW ───────────────────────────────────────────────────────────────
//

/// Contiguous run of page numbers centered on the current page.
///
/// Empty (`last < first`) when there are no pages at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub first: usize,
    pub last: usize,
}

impl PageWindow {
    #[must_use]
    pub fn pages(&self) -> std::ops::RangeInclusive<usize> {
        self.first..=self.last
    }

    #[must_use]
    pub fn contains(&self, page: usize) -> bool {
        (self.first..=self.last).contains(&page)
    }
}

/// Run of at most `max_buttons` page numbers around `current`.
#[must_use]
pub fn page_window(current: usize, total: usize, max_buttons: usize) -> PageWindow {
    if total == 0 {
        return PageWindow { first: 1, last: 0 };
    }
    let max_buttons = max_buttons.max(1);
    let first = current.saturating_sub(max_buttons / 2).max(1);
    let last = first.saturating_add(max_buttons - 1).min(total);
    let first = last.saturating_sub(max_buttons - 1).max(1);
    PageWindow { first, last }
}

//
// ─── PAGER ─────────────────────────────────────────────────────────────────────
//

/// Capacity plus the current-page pointer for the answer card.
///
/// The pointer is re-clamped into `[1, total_pages]` whenever the
/// question count or the capacity changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerCardPager {
    capacity: usize,
    page: usize,
}

impl Default for AnswerCardPager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_CAPACITY)
    }
}

impl AnswerCardPager {
    /// Capacity below 1 is clamped to 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            page: 1,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current 1-based page.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn total_pages(&self, len: usize) -> usize {
        total_pages(len, self.capacity)
    }

    /// Question-index range of the current page.
    #[must_use]
    pub fn page_range(&self, len: usize) -> Range<usize> {
        page_range(self.page, len, self.capacity)
    }

    #[must_use]
    pub fn window(&self, len: usize, max_buttons: usize) -> PageWindow {
        page_window(self.page, self.total_pages(len), max_buttons)
    }

    /// Clamp the pointer for a paper of `len` questions.
    pub fn clamp_to(&mut self, len: usize) {
        let total = self.total_pages(len).max(1);
        self.page = self.page.clamp(1, total);
    }

    /// Jump to the page containing the question at `index`.
    pub fn sync_to(&mut self, index: usize, len: usize) {
        self.page = page_of(index, self.capacity);
        self.clamp_to(len);
    }

    /// Clamped 1-based page navigation.
    pub fn go_to_page(&mut self, page: usize, len: usize) {
        self.page = page.max(1);
        self.clamp_to(len);
    }

    /// Replace the capacity (layout change) and re-clamp.
    pub fn set_capacity(&mut self, capacity: usize, len: usize) {
        self.capacity = capacity.max(1);
        self.clamp_to(len);
    }

    /// Back to the first page (fresh paper).
    pub fn reset(&mut self) {
        self.page = 1;
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
