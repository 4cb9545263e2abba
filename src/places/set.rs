use crate::places::Place;
use std::collections::HashSet;

/// The accumulated, deduplicated collection of places for a whole run
///
/// Invariant: no two places in the set share the same `(name, address)`
/// pair. The set is single-writer; it is populated only after all concurrent
/// work has drained, so no locking is involved.
#[derive(Debug, Default)]
pub struct PlaceSet {
    places: Vec<Place>,
    seen: HashSet<(String, String)>,
}

impl PlaceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set by merging batches in the given order
    pub fn from_batches<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Vec<Place>>,
    {
        let mut set = Self::new();
        for batch in batches {
            set.merge(batch);
        }
        set
    }

    /// Inserts a place unless its `(name, address)` key is already present
    ///
    /// First-seen-wins: a later duplicate is dropped even if it carries more
    /// complete attributes. Duplicate detection is purely structural; no
    /// quality selection is attempted between duplicates.
    ///
    /// Returns `true` if the place was inserted.
    pub fn insert(&mut self, place: Place) -> bool {
        if self.seen.insert(place.dedup_key()) {
            self.places.push(place);
            true
        } else {
            false
        }
    }

    /// Folds a batch of places into the set, keeping first-seen duplicates
    pub fn merge<I>(&mut self, batch: I)
    where
        I: IntoIterator<Item = Place>,
    {
        for place in batch {
            self.insert(place);
        }
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Iterates places in insertion (first-seen) order
    pub fn iter(&self) -> impl Iterator<Item = &Place> {
        self.places.iter()
    }

    pub fn as_slice(&self) -> &[Place] {
        &self.places
    }
}

impl IntoIterator for PlaceSet {
    type Item = Place;
    type IntoIter = std::vec::IntoIter<Place>;

    fn into_iter(self) -> Self::IntoIter {
        self.places.into_iter()
    }
}
