//! Page type for paginated results.

use crate::model::Artwork;
use crate::model::PaginationCursor;

/// One fetched batch of artworks.
///
/// Carries the request it answers (`page`, `page_size`) so callers can tell a
/// short page, which marks the end of the collection, from a full one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    records: Vec<Artwork>,
    /// Total record count across all pages.
    total: usize,
    page: usize,
    page_size: usize,
}

impl Page {
    /// Creates a page answering a request for `page` with `page_size` rows.
    pub fn new(records: Vec<Artwork>, total: usize, page: usize, page_size: usize) -> Self {
        Self {
            records,
            total,
            page,
            page_size,
        }
    }

    /// Returns a reference to the records in this page.
    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    /// Consumes the page and returns the records.
    pub fn into_records(self) -> Vec<Artwork> {
        self.records
    }

    /// Returns the total record count across the whole collection.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns the 1-based index this page was requested with.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size this page was requested with.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if fewer records came back than were requested.
    ///
    /// A short page is the last page of the collection.
    pub fn is_short(&self) -> bool {
        self.records.len() < self.page_size
    }

    /// Returns the cursor describing this page.
    pub fn cursor(&self) -> PaginationCursor {
        PaginationCursor::new(self.page, self.page_size, self.total)
    }
}
