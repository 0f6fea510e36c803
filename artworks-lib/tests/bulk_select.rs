//! Bulk row selection across page boundaries.

mod common;

use artworks_lib::error::Error;
use artworks_lib::model::Artwork;
use artworks_lib::model::SelectionSet;
use artworks_lib::select::BulkSelector;
use tokio_util::sync::CancellationToken;

use common::MemoryFetcher;
use common::ids;

fn selection_of(ids: impl IntoIterator<Item = u64>) -> SelectionSet {
    ids.into_iter().map(Artwork::new).collect()
}

#[tokio::test]
async fn test_count_within_loaded_page_does_not_fetch() {
    let fetcher = MemoryFetcher::with_ids(100);
    let loaded = fetcher.page_records(1, 12);
    let selector = BulkSelector::new(&fetcher, &loaded, fetcher.cursor(1, 12));

    let result = selector.select(SelectionSet::new(), 5).await;

    assert!(result.summary.outcome.is_completed());
    assert_eq!(result.selection.ids(), vec![1, 2, 3, 4, 5]);
    assert_eq!(result.summary.added, 5);
    assert_eq!(result.summary.pages_fetched, 0);
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_spills_into_next_page() {
    let fetcher = MemoryFetcher::with_ids(100);
    let loaded = fetcher.page_records(1, 12);
    let selector = BulkSelector::new(&fetcher, &loaded, fetcher.cursor(1, 12));

    let result = selector.select(SelectionSet::new(), 15).await;

    assert!(result.summary.outcome.is_completed());
    assert_eq!(result.selection.ids(), (1..=15).collect::<Vec<_>>());
    assert_eq!(result.summary.pages_fetched, 1);
    assert_eq!(fetcher.calls(), vec![2]);
}

#[tokio::test]
async fn test_starts_after_current_page() {
    let fetcher = MemoryFetcher::with_ids(100);
    let loaded = fetcher.page_records(3, 10);
    let selector = BulkSelector::new(&fetcher, &loaded, fetcher.cursor(3, 10));

    let result = selector.select(SelectionSet::new(), 25).await;

    assert!(result.summary.outcome.is_completed());
    assert_eq!(ids(result.selection.records()), (21..=45).collect::<Vec<_>>());
    assert_eq!(fetcher.calls(), vec![4, 5]);
}

#[tokio::test]
async fn test_count_above_total_selects_everything() {
    let fetcher = MemoryFetcher::with_ids(20);
    let loaded = fetcher.page_records(1, 12);
    let selector = BulkSelector::new(&fetcher, &loaded, fetcher.cursor(1, 12));

    let result = selector.select(SelectionSet::new(), 50).await;

    assert_eq!(result.selection.len(), 20);
    assert_eq!(result.summary.requested, 20);
    assert_eq!(result.summary.added, 20);
    assert_eq!(fetcher.calls(), vec![2]);
    assert!(result.summary.outcome.error().is_none());
}

#[tokio::test]
async fn test_short_page_stops_fetching() {
    let fetcher = MemoryFetcher::with_ids(20);
    let loaded = fetcher.page_records(1, 12);
    let selector = BulkSelector::new(&fetcher, &loaded, fetcher.cursor(1, 12));

    // id 5 is already selected, so one requested row can never be found.
    let result = selector.select(selection_of([5]), 20).await;

    assert!(result.summary.outcome.is_exhausted());
    assert_eq!(result.summary.added, 19);
    assert_eq!(result.selection.len(), 20);
    assert_eq!(fetcher.calls(), vec![2]);
}

#[tokio::test]
async fn test_fetch_failure_keeps_partial_selection() {
    let fetcher = MemoryFetcher::with_ids(100).fail_on(2);
    let loaded = fetcher.page_records(1, 12);
    let selector = BulkSelector::new(&fetcher, &loaded, fetcher.cursor(1, 12));

    let result = selector.select(selection_of([1, 2]), 15).await;

    assert_eq!(result.summary.added, 10);
    assert_eq!(result.selection.ids(), (1..=12).collect::<Vec<_>>());
    assert_eq!(fetcher.calls(), vec![2]);
    match result.summary.outcome.error() {
        Some(Error::Api(api)) => assert_eq!(api.status_code(), Some(500)),
        other => panic!("expected HTTP failure, got {other:?}"),
    }
    // The loaded page is untouched.
    assert_eq!(ids(&loaded), (1..=12).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_zero_count_is_noop() {
    let fetcher = MemoryFetcher::with_ids(100);
    let loaded = fetcher.page_records(1, 12);
    let selector = BulkSelector::new(&fetcher, &loaded, fetcher.cursor(1, 12));
    let before = selection_of([40, 3]);

    let first = selector.select(before.clone(), 0).await;
    let second = selector.select(first.selection.clone(), 0).await;

    assert_eq!(first.selection, before);
    assert_eq!(second.selection, before);
    assert_eq!(second.summary.added, 0);
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_overlapping_manual_selection_is_not_duplicated() {
    let fetcher = MemoryFetcher::with_ids(100);
    let loaded = fetcher.page_records(1, 12);
    let selector = BulkSelector::new(&fetcher, &loaded, fetcher.cursor(1, 12));

    let result = selector.select(selection_of([13, 14, 3]), 15).await;

    let selected = result.selection.ids();
    let mut unique = selected.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), selected.len());

    assert_eq!(result.summary.added, 15);
    assert_eq!(result.selection.len(), 18);
    assert!(result.selection.contains(18));
    assert!(!result.selection.contains(19));
}

#[tokio::test]
async fn test_unloaded_cursor_selects_nothing() {
    let fetcher = MemoryFetcher::with_ids(100);
    let selector = BulkSelector::new(&fetcher, &[], fetcher.cursor(1, 12).with_total(0));

    let result = selector.select(SelectionSet::new(), 10).await;

    assert!(result.selection.is_empty());
    assert_eq!(result.summary.requested, 0);
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_cancelled_before_start() {
    let fetcher = MemoryFetcher::with_ids(100);
    let loaded = fetcher.page_records(1, 12);
    let token = CancellationToken::new();
    token.cancel();
    let selector = BulkSelector::new(&fetcher, &loaded, fetcher.cursor(1, 12)).with_cancel(token);

    let result = selector.select(SelectionSet::new(), 30).await;

    assert!(result.summary.outcome.is_cancelled());
    assert!(result.selection.is_empty());
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_cancel_interrupts_in_flight_fetch() {
    let fetcher = MemoryFetcher::with_ids(100).stall_on(3);
    let loaded = fetcher.page_records(1, 12);
    let token = CancellationToken::new();
    let selector =
        BulkSelector::new(&fetcher, &loaded, fetcher.cursor(1, 12)).with_cancel(token.clone());

    let (result, ()) = tokio::join!(selector.select(SelectionSet::new(), 40), async {
        while fetcher.calls().len() < 2 {
            tokio::task::yield_now().await;
        }
        token.cancel();
    });

    assert!(result.summary.outcome.is_cancelled());
    assert_eq!(fetcher.calls(), vec![2, 3]);
    assert_eq!(result.summary.pages_fetched, 2);
    assert_eq!(result.selection.len(), 24);
}
