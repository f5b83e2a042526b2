//! Paginator
//!
//! Zero-based page slicing with clamped navigation and a sliding window of
//! page-number buttons.

use std::ops::Range;

/// Number of page buttons shown at once
pub const PAGE_WINDOW: usize = 4;

/// Page sizes offered by the size selector
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [10, 25, 50];

/// Slice `[page*size, page*size+size)` of `items`, empty when out of range
pub fn page_slice<T>(items: &[T], page: usize, size: usize) -> &[T] {
    let start = page.saturating_mul(size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

/// Page numbers to render as buttons
pub fn page_window(page: usize, page_count: usize) -> Range<usize> {
    if page_count <= PAGE_WINDOW {
        0..page_count
    } else if page <= 2 {
        0..PAGE_WINDOW
    } else if page + 3 >= page_count {
        page_count - PAGE_WINDOW..page_count
    } else {
        page - 2..page + 2
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    page_size: usize,
    total: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PAGE_SIZE_OPTIONS[0])
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
            total: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    /// Update the row count, pulling the page back if it fell off the end
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        let last = self.page_count().saturating_sub(1);
        if self.page > last {
            self.page = last;
        }
    }

    /// Changing the size always restarts at the first page
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }

    pub fn go_to(&mut self, page: usize) {
        self.page = page.min(self.page_count().saturating_sub(1));
    }

    pub fn first(&mut self) {
        self.page = 0;
    }

    pub fn previous(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn next(&mut self) {
        if self.can_next() {
            self.page += 1;
        }
    }

    pub fn last(&mut self) {
        self.page = self.page_count().saturating_sub(1);
    }

    pub fn can_previous(&self) -> bool {
        self.page > 0
    }

    pub fn can_next(&self) -> bool {
        self.page + 1 < self.page_count()
    }

    /// Index range of the current page within the full row set
    pub fn range(&self) -> Range<usize> {
        let start = (self.page * self.page_size).min(self.total);
        let end = (start + self.page_size).min(self.total);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        page_slice(items, self.page, self.page_size)
    }

    pub fn window(&self) -> Range<usize> {
        page_window(self.page, self.page_count())
    }

    /// "Menampilkan 11-12 dari 12" style summary numbers (1-based, inclusive)
    pub fn showing(&self) -> (usize, usize) {
        let range = self.range();
        if range.is_empty() {
            (0, 0)
        } else {
            (range.start + 1, range.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_items_page_size_ten() {
        let items: Vec<u32> = (0..12).collect();
        let mut pager = Paginator::new(10);
        pager.set_total(items.len());

        assert_eq!(pager.slice(&items), &items[0..10]);
        assert!(pager.can_next());
        assert!(!pager.can_previous());

        pager.next();
        assert_eq!(pager.slice(&items), &[10, 11]);
        assert!(!pager.can_next());
        assert!(pager.can_previous());

        pager.next();
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_slice_length_formula() {
        let items: Vec<u32> = (0..23).collect();
        for size in 1..30 {
            for page in 0..30 {
                let expected = if page * size < items.len() {
                    size.min(items.len() - page * size)
                } else {
                    0
                };
                assert_eq!(page_slice(&items, page, size).len(), expected);
            }
        }
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut pager = Paginator::new(10);
        pager.set_total(100);
        pager.go_to(5);
        pager.set_page_size(25);
        assert_eq!(pager.page(), 0);
        assert_eq!(pager.page_count(), 4);
    }

    #[test]
    fn test_shrinking_total_clamps_page() {
        let mut pager = Paginator::new(10);
        pager.set_total(95);
        pager.last();
        assert_eq!(pager.page(), 9);
        pager.set_total(15);
        assert_eq!(pager.page(), 1);
        pager.set_total(0);
        assert_eq!(pager.page(), 0);
        assert!(!pager.can_next());
        assert!(!pager.can_previous());
        assert_eq!(pager.showing(), (0, 0));
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(0, 3), 0..3);
        assert_eq!(page_window(0, 10), 0..4);
        assert_eq!(page_window(2, 10), 0..4);
        assert_eq!(page_window(3, 10), 1..5);
        assert_eq!(page_window(6, 10), 4..8);
        assert_eq!(page_window(7, 10), 6..10);
        assert_eq!(page_window(9, 10), 6..10);
    }

    #[test]
    fn test_showing_is_one_based() {
        let mut pager = Paginator::new(10);
        pager.set_total(12);
        pager.next();
        assert_eq!(pager.showing(), (11, 12));
    }
}
