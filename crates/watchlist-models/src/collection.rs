use serde::{Deserialize, Serialize};

use crate::{WatchlistEntry, WatchlistStats};

/// Schema version written with every saved collection.
pub const SCHEMA_VERSION: u32 = 1;

/// The persisted blob: every entry in insertion order plus a schema tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistCollection {
    pub version: u32,
    #[serde(default)]
    pub items: Vec<WatchlistEntry>,
}

impl WatchlistCollection {
    pub fn new() -> Self {
        Self {
            version: SCHEMA_VERSION,
            items: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn find(&self, id: &str) -> Option<&WatchlistEntry> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut WatchlistEntry> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Append an entry unless its id is already taken.
    ///
    /// Returns `false` (and leaves the collection untouched) on a duplicate.
    pub fn insert(&mut self, entry: WatchlistEntry) -> bool {
        if self.contains(&entry.id) {
            return false;
        }
        self.items.push(entry);
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<WatchlistEntry> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn stats(&self) -> WatchlistStats {
        WatchlistStats::from_entries(&self.items)
    }
}

impl Default for WatchlistCollection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CatalogCard;
    use chrono::Utc;

    fn entry(id: u64) -> WatchlistEntry {
        WatchlistEntry::from_card(&CatalogCard::movie(id, format!("Movie {}", id)), Utc::now())
    }

    #[test]
    fn test_new_collection_is_empty_and_current() {
        let collection = WatchlistCollection::new();
        assert_eq!(collection.version, SCHEMA_VERSION);
        assert!(collection.is_empty());
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut collection = WatchlistCollection::new();
        assert!(collection.insert(entry(1)));
        assert!(collection.insert(entry(2)));

        let mut duplicate = entry(1);
        duplicate.title = "Other".to_string();
        assert!(!collection.insert(duplicate));

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.find("tmdb_movie_1").unwrap().title, "Movie 1");
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut collection = WatchlistCollection::new();
        collection.insert(entry(1));
        collection.insert(entry(2));
        collection.insert(entry(3));

        let removed = collection.remove("tmdb_movie_2").unwrap();
        assert_eq!(removed.id, "tmdb_movie_2");
        assert!(collection.remove("tmdb_movie_2").is_none());

        let ids: Vec<&str> = collection.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["tmdb_movie_1", "tmdb_movie_3"]);
    }

    #[test]
    fn test_missing_items_field_deserializes_empty() {
        let collection: WatchlistCollection = serde_json::from_str(r#"{"version": 1}"#).unwrap();
        assert!(collection.is_empty());
    }
}
