//! Pagination cursor.

/// Rows per page shown by default.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Position within the remote collection.
///
/// Derived from the most recent page fetch. `page` is 1-based, matching the
/// API's `page` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    pub page: usize,
    pub page_size: usize,
    /// Total records across all pages, as last reported by the API.
    pub total: usize,
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total: 0,
        }
    }
}

impl PaginationCursor {
    /// Creates a cursor. A zero page index is treated as the first page.
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        Self {
            page: page.max(1),
            page_size,
            total,
        }
    }

    /// Converts a paginator offset event (0-based first row, rows per page)
    /// into a cursor pointing at the page containing `first`.
    pub fn from_first(first: usize, rows: usize, total: usize) -> Self {
        let rows = rows.max(1);
        Self::new(first / rows + 1, rows, total)
    }

    /// Returns a copy with a different total.
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = total;
        self
    }

    /// Returns the 0-based offset of the first row on this page.
    pub fn first(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Returns the number of pages in the collection.
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }

    /// Returns `true` if a page follows this one.
    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    /// Returns `true` if a page precedes this one.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Clamps a requested row count to `[0, total]`.
    pub fn clamp_count(&self, count: usize) -> usize {
        count.min(self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_offset() {
        assert_eq!(PaginationCursor::new(1, 12, 100).first(), 0);
        assert_eq!(PaginationCursor::new(3, 12, 100).first(), 24);
    }

    #[test]
    fn test_first_offset_saturates() {
        assert_eq!(PaginationCursor::new(usize::MAX, 12, 100).first(), usize::MAX);
    }

    #[test]
    fn test_from_first() {
        let cursor = PaginationCursor::from_first(24, 12, 100);
        assert_eq!(cursor.page, 3);
        assert_eq!(cursor.first(), 24);

        let cursor = PaginationCursor::from_first(30, 12, 100);
        assert_eq!(cursor.page, 3);

        let cursor = PaginationCursor::from_first(5, 0, 100);
        assert_eq!(cursor.page, 6);
        assert_eq!(cursor.page_size, 1);
    }

    #[test]
    fn test_page_count_and_navigation() {
        let cursor = PaginationCursor::new(1, 12, 20);
        assert_eq!(cursor.page_count(), 2);
        assert!(cursor.has_next());
        assert!(!cursor.has_previous());

        let last = PaginationCursor::new(2, 12, 20);
        assert!(!last.has_next());
        assert!(last.has_previous());

        assert_eq!(PaginationCursor::new(1, 0, 20).page_count(), 0);
    }

    #[test]
    fn test_zero_page_is_first_page() {
        assert_eq!(PaginationCursor::new(0, 12, 20).page, 1);
    }

    #[test]
    fn test_clamp_count() {
        let cursor = PaginationCursor::new(1, 12, 20);
        assert_eq!(cursor.clamp_count(50), 20);
        assert_eq!(cursor.clamp_count(5), 5);
    }
}
