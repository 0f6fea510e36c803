//! Table controller.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::Notice;
use crate::api::PageFetcher;
use crate::error::Error;
use crate::model::Artwork;
use crate::model::ArtworkId;
use crate::model::PaginationCursor;
use crate::model::SelectionSet;
use crate::select::BulkOutcome;
use crate::select::BulkSelection;
use crate::select::BulkSelector;
use crate::select::BulkSummary;

/// Owns everything the table view displays: the loaded page, the cursor,
/// the selection, the bulk-select input and pending notices.
///
/// Page loads take `&mut self` and update state only once the fetch has
/// finished. Bulk selection is split into [`begin_bulk_select`],
/// [`BulkSelectTask::run`] and [`apply_bulk_select`] so the run can be
/// spawned; beginning a new run cancels the previous one and its result is
/// then ignored.
///
/// [`begin_bulk_select`]: TableController::begin_bulk_select
/// [`apply_bulk_select`]: TableController::apply_bulk_select
pub struct TableController {
    fetcher: Arc<dyn PageFetcher>,
    records: Vec<Artwork>,
    cursor: PaginationCursor,
    selection: SelectionSet,
    rows_to_select: usize,
    bulk_input_open: bool,
    notices: VecDeque<Notice>,
    /// Incremented for every bulk task; only the latest may apply.
    bulk_generation: u64,
    bulk_cancel: Option<CancellationToken>,
}

impl TableController {
    /// Creates a controller with nothing loaded yet.
    pub fn new<F: PageFetcher + 'static>(fetcher: F, page_size: usize) -> Self {
        Self::with_shared(Arc::new(fetcher), page_size)
    }

    /// Creates a controller around an already shared fetcher.
    pub fn with_shared(fetcher: Arc<dyn PageFetcher>, page_size: usize) -> Self {
        Self {
            fetcher,
            records: Vec::new(),
            cursor: PaginationCursor::new(1, page_size, 0),
            selection: SelectionSet::new(),
            rows_to_select: 0,
            bulk_input_open: false,
            notices: VecDeque::new(),
            bulk_generation: 0,
            bulk_cancel: None,
        }
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Loads `page` with the current page size.
    ///
    /// On failure the previously loaded page stays displayed.
    pub async fn load_page(&mut self, page: usize) -> Result<(), Error> {
        self.load(page, self.cursor.page_size).await
    }

    /// Handles a paginator event: `first` is the 0-based index of the first
    /// row to show and `rows` the number of rows per page.
    pub async fn change_page(&mut self, first: usize, rows: usize) -> Result<(), Error> {
        let target = PaginationCursor::from_first(first, rows, self.cursor.total);
        self.load(target.page, target.page_size).await
    }

    /// Loads the following page. Returns `false` if already on the last page.
    pub async fn next_page(&mut self) -> Result<bool, Error> {
        if !self.cursor.has_next() {
            return Ok(false);
        }
        self.load_page(self.cursor.page + 1).await?;
        Ok(true)
    }

    /// Loads the preceding page. Returns `false` if already on the first page.
    pub async fn previous_page(&mut self) -> Result<bool, Error> {
        if !self.cursor.has_previous() {
            return Ok(false);
        }
        self.load_page(self.cursor.page - 1).await?;
        Ok(true)
    }

    async fn load(&mut self, page: usize, page_size: usize) -> Result<(), Error> {
        match self.fetcher.fetch_page(page, page_size).await {
            Ok(fetched) => {
                self.cursor = fetched.cursor();
                self.records = fetched.into_records();
                // Keep the input within the (possibly changed) total.
                self.rows_to_select = self.cursor.clamp_count(self.rows_to_select);
                Ok(())
            }
            Err(e) => {
                log::error!("Error fetching page {page}: {e}");
                Err(e)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Manual selection
    // -------------------------------------------------------------------------

    /// Handles the view's selection-changed event carrying the full new
    /// selection. Duplicate ids are dropped.
    pub fn set_selection(&mut self, records: impl IntoIterator<Item = Artwork>) {
        self.selection.replace(records);
    }

    /// Toggles a row of the loaded page.
    ///
    /// Returns whether the row is selected afterwards, or `None` if no row
    /// with that id is on the current page.
    pub fn toggle(&mut self, id: ArtworkId) -> Option<bool> {
        let record = self.records.iter().find(|r| r.id == id)?;
        Some(self.selection.toggle(record))
    }

    /// Toggles every row of the loaded page: selects all of them unless all
    /// are already selected, in which case they are deselected.
    pub fn toggle_page(&mut self) {
        let all_selected = self.records.iter().all(|r| self.selection.contains(r.id));
        for record in &self.records {
            if all_selected {
                self.selection.remove(record.id);
            } else {
                self.selection.insert(record.clone());
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // -------------------------------------------------------------------------
    // Bulk selection
    // -------------------------------------------------------------------------

    /// Shows the bulk-select input.
    pub fn open_bulk_input(&mut self) {
        self.bulk_input_open = true;
    }

    /// Hides the bulk-select input.
    pub fn close_bulk_input(&mut self) {
        self.bulk_input_open = false;
    }

    /// Stores the bulk-select input, clamped to `[0, total]`.
    /// Returns the stored value.
    pub fn set_rows_to_select(&mut self, count: usize) -> usize {
        self.rows_to_select = self.cursor.clamp_count(count);
        self.rows_to_select
    }

    /// Snapshots the current state into a task selecting `rows_to_select`
    /// more rows. Any task begun earlier is cancelled.
    pub fn begin_bulk_select(&mut self) -> BulkSelectTask {
        self.cancel_bulk_select();

        self.bulk_generation += 1;
        let cancel = CancellationToken::new();
        self.bulk_cancel = Some(cancel.clone());

        log::info!(
            "bulk select #{}: {} rows from page {}",
            self.bulk_generation,
            self.rows_to_select,
            self.cursor.page
        );

        BulkSelectTask {
            fetcher: Arc::clone(&self.fetcher),
            loaded: self.records.clone(),
            cursor: self.cursor,
            selection: self.selection.clone(),
            count: self.rows_to_select,
            generation: self.bulk_generation,
            cancel,
        }
    }

    /// Cancels the in-flight bulk task, if any.
    pub fn cancel_bulk_select(&mut self) {
        if let Some(token) = self.bulk_cancel.take() {
            token.cancel();
        }
    }

    /// Returns `true` while a bulk task has begun but not been applied.
    pub fn bulk_select_pending(&self) -> bool {
        self.bulk_cancel.is_some()
    }

    /// Installs the result of a bulk task.
    ///
    /// Results of superseded tasks are discarded without touching state. A
    /// cancelled current task ends the pending run and closes the input but
    /// leaves the selection as it was. Both return `None`. Otherwise the
    /// selection is replaced, the input is closed and a notice describing the
    /// outcome is queued.
    pub fn apply_bulk_select(&mut self, report: BulkSelectReport) -> Option<BulkSummary> {
        if report.generation != self.bulk_generation {
            log::debug!(
                "discarding bulk select #{} (current #{})",
                report.generation,
                self.bulk_generation
            );
            return None;
        }

        self.bulk_cancel = None;
        self.close_bulk_input();

        if report.result.summary.outcome.is_cancelled() {
            let collected = report.result.summary.added;
            log::info!(
                "bulk select #{} cancelled, dropping {collected} collected rows",
                report.generation
            );
            self.notices.push_back(Notice::warning(format!(
                "Selection cancelled; {collected} collected rows were not applied"
            )));
            return None;
        }

        let (selection, summary) = report.result.into_parts();
        self.selection = selection;

        let notice = match &summary.outcome {
            BulkOutcome::Completed => Some(Notice::info(format!("Selected {} more rows", summary.added))),
            BulkOutcome::Exhausted => Some(Notice::warning(format!(
                "Only {} of {} rows were available to select",
                summary.added, summary.requested
            ))),
            BulkOutcome::Failed(e) => Some(Notice::error(format!(
                "Selection stopped after {} of {} rows: {e}",
                summary.added, summary.requested
            ))),
            BulkOutcome::Cancelled => None,
        };
        if let Some(notice) = notice {
            self.notices.push_back(notice);
        }

        Some(summary)
    }

    /// Runs a bulk selection of `count` rows to completion and applies it.
    pub async fn bulk_select(&mut self, count: usize) -> Option<BulkSummary> {
        self.set_rows_to_select(count);
        let task = self.begin_bulk_select();
        let report = task.run().await;
        self.apply_bulk_select(report)
    }

    // -------------------------------------------------------------------------
    // Notices
    // -------------------------------------------------------------------------

    /// Queues a notice for the view.
    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    /// Takes all queued notices, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Records of the loaded page.
    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    pub fn cursor(&self) -> PaginationCursor {
        self.cursor
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn rows_to_select(&self) -> usize {
        self.rows_to_select
    }

    pub fn bulk_input_open(&self) -> bool {
        self.bulk_input_open
    }

    /// Returns `true` if the row with this id is selected.
    pub fn is_selected(&self, id: ArtworkId) -> bool {
        self.selection.contains(id)
    }
}

/// A detached bulk selection run, produced by
/// [`TableController::begin_bulk_select`].
pub struct BulkSelectTask {
    fetcher: Arc<dyn PageFetcher>,
    loaded: Vec<Artwork>,
    cursor: PaginationCursor,
    selection: SelectionSet,
    count: usize,
    generation: u64,
    cancel: CancellationToken,
}

impl BulkSelectTask {
    /// Returns a token that cancels this task.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Runs the selection.
    pub async fn run(self) -> BulkSelectReport {
        let BulkSelectTask {
            fetcher,
            loaded,
            cursor,
            selection,
            count,
            generation,
            cancel,
        } = self;

        let selector = BulkSelector::new(&*fetcher, &loaded, cursor).with_cancel(cancel);
        let result = selector.select(selection, count).await;

        BulkSelectReport { generation, result }
    }
}

/// Output of [`BulkSelectTask::run`], handed back to
/// [`TableController::apply_bulk_select`].
#[derive(Debug)]
pub struct BulkSelectReport {
    generation: u64,
    pub result: BulkSelection,
}
