//! PageFetcher trait and its HTTP implementation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::Page;
use crate::api::parse_page;
use crate::error::Error;
use crate::ArtworksClient;

/// Source of artwork pages.
///
/// Given a 1-based page index and a page size, returns the records on that
/// page together with the total record count. [`ArtworksClient`] implements
/// this over HTTP; tests and offline front ends can supply their own.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use artworks_lib::api::{Page, PageFetcher};
/// use artworks_lib::error::Error;
///
/// struct Fixed(Vec<Artwork>);
///
/// #[async_trait]
/// impl PageFetcher for Fixed {
///     async fn fetch_page(&self, page: usize, page_size: usize) -> Result<Page, Error> {
///         let start = (page - 1) * page_size;
///         let records = self.0.iter().skip(start).take(page_size).cloned().collect();
///         Ok(Page::new(records, self.0.len(), page, page_size))
///     }
/// }
/// ```
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches one page of records.
    async fn fetch_page(&self, page: usize, page_size: usize) -> Result<Page, Error>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch_page(&self, page: usize, page_size: usize) -> Result<Page, Error> {
        (**self).fetch_page(page, page_size).await
    }
}

#[async_trait]
impl PageFetcher for ArtworksClient {
    async fn fetch_page(&self, page: usize, page_size: usize) -> Result<Page, Error> {
        let url = self.page_url(page, page_size)?;
        log::debug!("GET {url}");

        let body = self.get_text(url).await?;
        let page = parse_page(&body, page, page_size)?;

        log::debug!(
            "page {} returned {} of {} records",
            page.page(),
            page.len(),
            page.total()
        );
        Ok(page)
    }
}
