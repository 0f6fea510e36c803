//! Selects rows across pages of the public artworks API.
//!
//! Usage: `cargo run -p artworks-lib --example bulk_select -- 30`

use std::env;

use artworks_lib::ArtworksClient;
use artworks_lib::api::PageFetcher;
use artworks_lib::model::SelectionSet;
use artworks_lib::select::BulkSelector;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let count: usize = env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(20);

    let client = ArtworksClient::public()?;
    let page = client.fetch_page(1, 12).await?;
    println!("Loaded page 1 of {} records", page.total());

    let selector = BulkSelector::new(&client, page.records(), page.cursor());
    let result = selector.select(SelectionSet::new(), count).await;

    for artwork in result.selection.iter() {
        println!("{:>8}  {}", artwork.id, artwork.title_or_default());
    }
    println!(
        "{} selected over {} extra pages ({:?})",
        result.summary.added, result.summary.pages_fetched, result.summary.outcome
    );

    Ok(())
}
