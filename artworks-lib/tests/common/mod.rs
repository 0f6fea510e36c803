//! In-memory page source shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use artworks_lib::api::Page;
use artworks_lib::api::PageFetcher;
use artworks_lib::error::ApiError;
use artworks_lib::error::Error;
use artworks_lib::model::Artwork;
use artworks_lib::model::PaginationCursor;
use async_trait::async_trait;

/// Serves pages out of a fixed list of records and records every request.
pub struct MemoryFetcher {
    records: Vec<Artwork>,
    failing: HashSet<usize>,
    stalled: HashSet<usize>,
    calls: Mutex<Vec<usize>>,
}

impl MemoryFetcher {
    /// Records with ids `1..=count`.
    pub fn with_ids(count: u64) -> Self {
        Self {
            records: (1..=count)
                .map(|id| Artwork::new(id).with_title(format!("Artwork {id}")))
                .collect(),
            failing: HashSet::new(),
            stalled: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Requests for `page` fail with HTTP 500.
    pub fn fail_on(mut self, page: usize) -> Self {
        self.failing.insert(page);
        self
    }

    /// Requests for `page` never complete.
    pub fn stall_on(mut self, page: usize) -> Self {
        self.stalled.insert(page);
        self
    }

    /// Page indices requested so far, in order.
    pub fn calls(&self) -> Vec<usize> {
        self.calls.lock().unwrap().clone()
    }

    /// Records that page `page` holds for the given page size.
    pub fn page_records(&self, page: usize, page_size: usize) -> Vec<Artwork> {
        self.records
            .iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect()
    }

    /// Cursor for `page` as if it had just been fetched.
    pub fn cursor(&self, page: usize, page_size: usize) -> PaginationCursor {
        PaginationCursor::new(page, page_size, self.records.len())
    }
}

#[async_trait]
impl PageFetcher for MemoryFetcher {
    async fn fetch_page(&self, page: usize, page_size: usize) -> Result<Page, Error> {
        self.calls.lock().unwrap().push(page);

        if self.stalled.contains(&page) {
            std::future::pending::<()>().await;
        }
        if self.failing.contains(&page) {
            return Err(Error::Api(ApiError::http(500, "Internal Server Error")));
        }

        Ok(Page::new(
            self.page_records(page, page_size),
            self.records.len(),
            page,
            page_size,
        ))
    }
}

pub fn ids(records: &[Artwork]) -> Vec<u64> {
    records.iter().map(|r| r.id).collect()
}
