//! Selection set keyed by artwork id.

use std::collections::HashSet;

use super::Artwork;
use super::ArtworkId;

/// The set of currently selected artworks.
///
/// Unique by [`Artwork::id`]. Insertion order is kept so the selection can be
/// listed in the order rows were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    records: Vec<Artwork>,
    ids: HashSet<ArtworkId>,
}

impl SelectionSet {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection from records, dropping later duplicates.
    pub fn from_records(records: impl IntoIterator<Item = Artwork>) -> Self {
        let mut set = Self::new();
        for record in records {
            set.insert(record);
        }
        set
    }

    /// Adds a record. Returns `false` if a record with the same id is present.
    pub fn insert(&mut self, record: Artwork) -> bool {
        if !self.ids.insert(record.id) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Removes the record with the given id, returning it.
    pub fn remove(&mut self, id: ArtworkId) -> Option<Artwork> {
        if !self.ids.remove(&id) {
            return None;
        }
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    /// Toggles a record. Returns `true` if it is selected afterwards.
    pub fn toggle(&mut self, record: &Artwork) -> bool {
        if self.remove(record.id).is_some() {
            false
        } else {
            self.insert(record.clone())
        }
    }

    /// Replaces the whole selection, dropping duplicates.
    pub fn replace(&mut self, records: impl IntoIterator<Item = Artwork>) {
        *self = Self::from_records(records);
    }

    /// Returns `true` if an artwork with this id is selected.
    pub fn contains(&self, id: ArtworkId) -> bool {
        self.ids.contains(&id)
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.records.clear();
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the selected records in insertion order.
    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    /// Iterates over selected records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Artwork> {
        self.records.iter()
    }

    /// Returns the selected ids in insertion order.
    pub fn ids(&self) -> Vec<ArtworkId> {
        self.records.iter().map(|r| r.id).collect()
    }

    /// Consumes the set and returns the records.
    pub fn into_records(self) -> Vec<Artwork> {
        self.records
    }
}

impl FromIterator<Artwork> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = Artwork>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}
