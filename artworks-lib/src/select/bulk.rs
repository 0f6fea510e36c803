//! Bulk row selector.
//!
//! Grows a selection by a requested number of unique rows, taking rows from
//! the page already on screen first and then walking forward through the
//! following pages one fetch at a time.

use tokio_util::sync::CancellationToken;

use crate::api::ArtworkPages;
use crate::api::PageFetcher;
use crate::error::Error;
use crate::model::Artwork;
use crate::model::PaginationCursor;
use crate::model::SelectionSet;

/// How a bulk selection run ended.
#[derive(Debug)]
pub enum BulkOutcome {
    /// The requested number of rows was added.
    Completed,
    /// The collection ran out before the requested number was reached.
    Exhausted,
    /// A page fetch failed. Rows added before the failure are kept.
    Failed(Error),
    /// The run was superseded or cancelled.
    Cancelled,
}

impl BulkOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns the fetch error if the run failed.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Counters describing a finished run.
#[derive(Debug)]
pub struct BulkSummary {
    /// Row count asked for, after clamping to the collection total.
    pub requested: usize,
    /// Rows newly added to the selection.
    pub added: usize,
    /// Pages fetched beyond the loaded page.
    pub pages_fetched: usize,
    pub outcome: BulkOutcome,
}

/// Result of a bulk selection run: the grown selection plus its summary.
#[derive(Debug)]
pub struct BulkSelection {
    pub selection: SelectionSet,
    pub summary: BulkSummary,
}

impl BulkSelection {
    /// Splits into the selection and the summary.
    pub fn into_parts(self) -> (SelectionSet, BulkSummary) {
        (self.selection, self.summary)
    }
}

/// Selects rows across page boundaries.
///
/// # Example
///
/// ```ignore
/// let selector = BulkSelector::new(&client, &loaded_records, cursor)
///     .with_cancel(token.clone());
///
/// let result = selector.select(current_selection, 15).await;
/// if let Some(err) = result.summary.outcome.error() {
///     log::error!("bulk select stopped early: {err}");
/// }
/// ```
pub struct BulkSelector<'a, F: PageFetcher + ?Sized> {
    fetcher: &'a F,
    /// Records of the page currently on screen.
    loaded: &'a [Artwork],
    cursor: PaginationCursor,
    cancel: CancellationToken,
}

impl<'a, F: PageFetcher + ?Sized> BulkSelector<'a, F> {
    /// Creates a selector starting from the loaded page described by `cursor`.
    pub fn new(fetcher: &'a F, loaded: &'a [Artwork], cursor: PaginationCursor) -> Self {
        Self {
            fetcher,
            loaded,
            cursor,
            cancel: CancellationToken::new(),
        }
    }

    /// Sets the token checked before and during each fetch.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Adds up to `count` unselected rows to `selection`.
    ///
    /// `count` is clamped to the collection total. The loaded page is scanned
    /// first; further pages are fetched from `cursor.page + 1` until enough
    /// rows are found, a short page ends the collection, a fetch fails, or the
    /// token is cancelled. Rows added before a failure are kept.
    pub async fn select(&self, selection: SelectionSet, count: usize) -> BulkSelection {
        let requested = self.cursor.clamp_count(count);
        if requested < count {
            log::warn!(
                "bulk select of {count} rows clamped to collection total {}",
                self.cursor.total
            );
        }

        let mut run = Run {
            selected: selection,
            remaining: requested,
            added: 0,
        };

        if run.remaining == 0 {
            return run.finish(requested, 0, BulkOutcome::Completed);
        }
        if self.cancel.is_cancelled() {
            return run.finish(requested, 0, BulkOutcome::Cancelled);
        }

        run.take_from(self.loaded);
        if run.remaining == 0 {
            log::info!("bulk select satisfied from loaded page ({} rows)", run.added);
            return run.finish(requested, 0, BulkOutcome::Completed);
        }

        let mut pages = ArtworkPages::new(self.fetcher, self.cursor.page.saturating_add(1), self.cursor.page_size);

        loop {
            if self.cancel.is_cancelled() {
                log::debug!("bulk select cancelled before page {}", pages.next_page_index());
                return run.finish(requested, pages.fetched(), BulkOutcome::Cancelled);
            }

            let next = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    log::debug!("bulk select cancelled during page {}", pages.next_page_index());
                    return run.finish(requested, pages.fetched(), BulkOutcome::Cancelled);
                }
                next = pages.next() => next,
            };

            match next {
                Some(Ok(page)) => {
                    run.take_from(page.records());
                    log::info!(
                        "bulk select: page {} scanned, {} added, {} remaining",
                        page.page(),
                        run.added,
                        run.remaining
                    );
                    if run.remaining == 0 {
                        return run.finish(requested, pages.fetched(), BulkOutcome::Completed);
                    }
                }
                Some(Err(e)) => {
                    log::error!(
                        "bulk select: fetching page {} failed after {} rows: {e}",
                        pages.next_page_index(),
                        run.added
                    );
                    return run.finish(requested, pages.fetched(), BulkOutcome::Failed(e));
                }
                None => {
                    log::info!(
                        "bulk select: collection exhausted with {} rows still requested",
                        run.remaining
                    );
                    return run.finish(requested, pages.fetched(), BulkOutcome::Exhausted);
                }
            }
        }
    }
}

struct Run {
    selected: SelectionSet,
    remaining: usize,
    added: usize,
}

impl Run {
    /// Adds records in order until `remaining` reaches zero.
    fn take_from(&mut self, records: &[Artwork]) {
        for record in records {
            if self.remaining == 0 {
                break;
            }
            if self.selected.insert(record.clone()) {
                self.remaining -= 1;
                self.added += 1;
            }
        }
    }

    fn finish(self, requested: usize, pages_fetched: usize, outcome: BulkOutcome) -> BulkSelection {
        BulkSelection {
            selection: self.selected,
            summary: BulkSummary {
                requested,
                added: self.added,
                pages_fetched,
                outcome,
            },
        }
    }
}
