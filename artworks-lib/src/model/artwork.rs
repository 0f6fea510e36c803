//! Artwork record type

use serde::Serialize;

/// Identifier of an artwork, stable across pages.
pub type ArtworkId = u64;

/// A single artwork record.
///
/// Records are immutable once fetched. Every display attribute is optional
/// since the API returns `null` for unknown values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artwork {
    /// Unique identifier.
    pub id: ArtworkId,
    pub title: Option<String>,
    pub place_of_origin: Option<String>,
    pub artist_display: Option<String>,
    pub inscriptions: Option<String>,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
}

impl Artwork {
    /// Creates a record with only an identifier set.
    pub fn new(id: ArtworkId) -> Self {
        Self {
            id,
            title: None,
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the artist display line.
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist_display = Some(artist.into());
        self
    }

    /// Sets the place of origin.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.place_of_origin = Some(origin.into());
        self
    }

    /// Sets the start and end dates.
    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.date_start = Some(start.into());
        self.date_end = Some(end.into());
        self
    }

    /// Returns the title or an empty string.
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}
