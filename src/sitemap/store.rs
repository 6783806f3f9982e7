//! Append-only URL store.
//!
//! Entries keep insertion order, which only decides the chunk an entry lands
//! in. Storage grows by doubling; [`UrlStore::len`] always reports occupied
//! entries, [`UrlStore::capacity`] the allocated slots.

use super::entry::{NewUrl, UrlEntry};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct UrlStore {
    entries: Vec<UrlEntry>,
}

impl UrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append an entry, returning its position.
    ///
    /// The store is left untouched when validation fails.
    pub fn append(&mut self, raw: NewUrl) -> Result<usize> {
        let entry = UrlEntry::try_from(raw)?;
        if self.entries.len() == self.entries.capacity() {
            self.entries.reserve(self.entries.len().max(1));
        }
        self.entries.push(entry);
        Ok(self.entries.len() - 1)
    }

    /// Number of occupied entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Allocated slots, occupied or not. Always `>= len()`.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UrlEntry> {
        self.entries.iter()
    }

    /// Entries of chunk `index` when chunks hold `per_chunk` entries each.
    pub fn chunk(&self, index: usize, per_chunk: usize) -> &[UrlEntry] {
        let start = (index * per_chunk).min(self.entries.len());
        let end = ((index + 1) * per_chunk).min(self.entries.len());
        &self.entries[start..end]
    }
}

impl<'a> IntoIterator for &'a UrlStore {
    type Item = &'a UrlEntry;
    type IntoIter = std::slice::Iter<'a, UrlEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
