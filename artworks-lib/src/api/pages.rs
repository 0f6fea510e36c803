//! Async iterator over consecutive pages.

use crate::api::Page;
use crate::api::PageFetcher;
use crate::error::Error;

/// Async iterator that yields consecutive pages from a start index.
///
/// Stops after a short page (fewer records than the page size) or after the
/// first error, which is yielded once.
///
/// # Example
///
/// ```ignore
/// let mut pages = ArtworkPages::new(&client, 2, 12);
///
/// while let Some(page) = pages.next().await {
///     let page = page?;
///     for artwork in page.records() {
///         println!("{}", artwork.id);
///     }
/// }
/// ```
pub struct ArtworkPages<'a, F: PageFetcher + ?Sized> {
    fetcher: &'a F,
    /// The next page index to request.
    next_page: usize,
    page_size: usize,
    /// Number of requests issued so far.
    fetched: usize,
    /// Whether we've exhausted all pages.
    done: bool,
}

impl<'a, F: PageFetcher + ?Sized> ArtworkPages<'a, F> {
    /// Creates an iterator starting at `start_page` (1-based).
    pub fn new(fetcher: &'a F, start_page: usize, page_size: usize) -> Self {
        Self {
            fetcher,
            next_page: start_page.max(1),
            page_size,
            fetched: 0,
            done: page_size == 0,
        }
    }

    /// Returns the index of the page the next call will request.
    pub fn next_page_index(&self) -> usize {
        self.next_page
    }

    /// Returns how many fetches have been issued.
    pub fn fetched(&self) -> usize {
        self.fetched
    }

    /// Fetches the next page of results.
    ///
    /// Returns `None` when all pages have been consumed.
    pub async fn next(&mut self) -> Option<Result<Page, Error>> {
        if self.done {
            return None;
        }

        let index = self.next_page;
        self.fetched += 1;

        let page = match self.fetcher.fetch_page(index, self.page_size).await {
            Ok(page) => page,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        if page.is_short() {
            self.done = true;
        } else {
            self.next_page += 1;
        }

        Some(Ok(page))
    }
}
