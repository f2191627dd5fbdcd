use serde::Deserialize;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};
use watchlist_config::{Config, PathManager, DEFAULT_STORAGE_KEY};
use watchlist_models::{
    compute_id, CatalogCard, ExternalId, Impression, MediaType, WatchlistCollection,
    WatchlistEntry, WatchlistStats, SCHEMA_VERSION,
};

use crate::{view, Clock, JsonFileStorage, KeyValueStorage, StorageError, SystemClock};

/// Stored blob before its entries are decoded one by one.
#[derive(Deserialize)]
struct RawCollection {
    version: u32,
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

/// Sole owner of the persisted watchlist.
///
/// Nothing is cached between calls: every operation reads the whole blob,
/// applies its change and writes it back while holding one lock, so no caller
/// can observe a collection halfway through another caller's update.
///
/// The boolean/`Option` API never fails. Storage errors are logged and
/// absorbed: reads fall back to an empty collection and failed writes are
/// dropped. Use [`WatchlistStore::try_load`] and [`WatchlistStore::try_save`]
/// to see them.
pub struct WatchlistStore<S: KeyValueStorage> {
    storage: Mutex<S>,
    key: String,
    clock: Box<dyn Clock>,
}

impl WatchlistStore<JsonFileStorage> {
    /// Store backed by the configured storage file.
    pub fn open(config: &Config, paths: &PathManager) -> anyhow::Result<Self> {
        config.validate()?;
        paths.ensure_directories()?;
        let file = config.storage_file(paths);
        info!("Opening watchlist storage at {:?} (key: {})", file, config.storage.key);
        Ok(Self::with_key(JsonFileStorage::new(file), config.storage.key.clone()))
    }
}

impl<S: KeyValueStorage> WatchlistStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage: Mutex::new(storage),
            key: key.into(),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Run `f` against the backend while holding the store lock.
    pub fn with_storage<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut storage = self.lock();
        f(&mut storage)
    }

    pub fn compute_id(external_id: &ExternalId, media_type: MediaType) -> String {
        compute_id(external_id, media_type)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    pub fn try_load(&self) -> Result<WatchlistCollection, StorageError> {
        let storage = self.lock();
        self.read(&*storage)
    }

    /// Current collection; empty when the blob is missing or unreadable.
    pub fn load(&self) -> WatchlistCollection {
        let storage = self.lock();
        self.read_or_empty(&*storage)
    }

    pub fn try_save(&self, collection: &WatchlistCollection) -> Result<(), StorageError> {
        let mut storage = self.lock();
        self.write(&mut *storage, collection)
    }

    /// Overwrite the stored collection. Failures are logged, not returned.
    pub fn save(&self, collection: &WatchlistCollection) {
        let mut storage = self.lock();
        self.write_or_log(&mut *storage, collection);
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        // A panic elsewhere cannot leave the blob half-written; the value is
        // only replaced by a complete `set`.
        self.storage.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read(&self, storage: &S) -> Result<WatchlistCollection, StorageError> {
        self.read_lenient(storage).map(|(collection, _)| collection)
    }

    /// Decode the blob entry by entry. Entries that fail to decode are logged
    /// and left out; their count is returned alongside the collection.
    fn read_lenient(&self, storage: &S) -> Result<(WatchlistCollection, usize), StorageError> {
        let default = serde_json::to_value(WatchlistCollection::new())?;
        let value = storage.get_or(&self.key, default)?;
        let raw: RawCollection =
            serde_json::from_value(value).map_err(|source| StorageError::Corrupt {
                key: self.key.clone(),
                source,
            })?;

        if raw.version != SCHEMA_VERSION {
            warn!(
                "Watchlist schema version {} differs from current version {}; using items as-is",
                raw.version, SCHEMA_VERSION
            );
        }

        let mut collection = WatchlistCollection {
            version: raw.version,
            items: Vec::with_capacity(raw.items.len()),
        };
        let mut skipped = 0;
        for (index, item) in raw.items.into_iter().enumerate() {
            match serde_json::from_value::<WatchlistEntry>(item) {
                Ok(entry) => {
                    if !collection.insert(entry) {
                        warn!("Skipping duplicate watchlist entry at index {}", index);
                        skipped += 1;
                    }
                }
                Err(e) => {
                    warn!("Skipping unreadable watchlist entry at index {}: {}", index, e);
                    skipped += 1;
                }
            }
        }

        debug!("Watchlist loaded: {} items", collection.len());
        Ok((collection, skipped))
    }

    fn read_or_empty(&self, storage: &S) -> WatchlistCollection {
        match self.read(storage) {
            Ok(collection) => collection,
            Err(e) => {
                warn!("Failed to load watchlist under '{}': {}. Using an empty list.", self.key, e);
                WatchlistCollection::new()
            }
        }
    }

    fn write(&self, storage: &mut S, collection: &WatchlistCollection) -> Result<(), StorageError> {
        let value = serde_json::to_value(collection)?;
        storage.set(&self.key, value)?;
        debug!("Watchlist saved: {} items", collection.len());
        Ok(())
    }

    fn write_or_log(&self, storage: &mut S, collection: &WatchlistCollection) {
        if let Err(e) = self.write(storage, collection) {
            warn!("Failed to save watchlist under '{}': {}", self.key, e);
        }
    }

    /// Copy an unreadable or partly unreadable blob aside before it gets
    /// overwritten.
    fn backup_corrupt(&self, storage: &mut S) {
        let backup_key = format!("{}_backup", self.key);
        match storage.get(&self.key) {
            Ok(Some(raw)) => match storage.set(&backup_key, raw) {
                Ok(()) => info!("Backed up unreadable watchlist to key '{}'", backup_key),
                Err(e) => warn!("Failed to back up unreadable watchlist: {}", e),
            },
            Ok(None) => {}
            Err(e) => warn!("Failed to read unreadable watchlist for backup: {}", e),
        }
    }

    /// Read-modify-write under the lock. `apply` reports whether it changed
    /// anything; only then is the collection written back.
    fn update<F>(&self, apply: F) -> bool
    where
        F: FnOnce(&mut WatchlistCollection) -> bool,
    {
        let mut storage = self.lock();
        let mut collection = match self.read_lenient(&*storage) {
            Ok((collection, 0)) => collection,
            Ok((collection, skipped)) => {
                warn!("{} watchlist entries could not be read", skipped);
                self.backup_corrupt(&mut *storage);
                collection
            }
            Err(StorageError::Corrupt { key, source }) => {
                warn!("Watchlist under '{}' is corrupt ({}); starting a new list", key, source);
                self.backup_corrupt(&mut *storage);
                WatchlistCollection::new()
            }
            Err(e) => {
                warn!("Failed to load watchlist under '{}': {}. Using an empty list.", self.key, e);
                WatchlistCollection::new()
            }
        };

        if !apply(&mut collection) {
            return false;
        }
        collection.version = SCHEMA_VERSION;
        self.write_or_log(&mut *storage, &collection);
        true
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a title from the catalog. Returns `false` if it is already listed.
    pub fn add(&self, card: &CatalogCard) -> bool {
        let now = self.clock.now();
        let entry = WatchlistEntry::from_card(card, now);
        let id = entry.id.clone();

        let added = self.update(|collection| collection.insert(entry));
        if added {
            debug!("Added {} to watchlist", id);
        } else {
            debug!("{} is already in the watchlist", id);
        }
        added
    }

    pub fn remove(&self, id: &str) -> bool {
        let removed = self.update(|collection| collection.remove(id).is_some());
        if removed {
            debug!("Removed {} from watchlist", id);
        }
        removed
    }

    pub fn mark_watched(&self, id: &str, impression: Impression) -> bool {
        let now = self.clock.now();
        let marked = self.update(|collection| match collection.find_mut(id) {
            Some(entry) => {
                entry.mark_watched(impression, now);
                true
            }
            None => false,
        });
        if marked {
            debug!("Marked {} as watched ({})", id, impression);
        }
        marked
    }

    /// Like [`mark_watched`](Self::mark_watched) for impressions that arrive
    /// as text. Anything outside liked/ok/disliked is rejected untouched.
    pub fn mark_watched_str(&self, id: &str, impression: &str) -> bool {
        match impression.parse::<Impression>() {
            Ok(impression) => self.mark_watched(id, impression),
            Err(e) => {
                warn!("Refusing to mark {} as watched: {}", id, e);
                false
            }
        }
    }

    pub fn mark_unwatched(&self, id: &str) -> bool {
        let reverted = self.update(|collection| match collection.find_mut(id) {
            Some(entry) => {
                entry.mark_unwatched();
                true
            }
            None => false,
        });
        if reverted {
            debug!("Returned {} to the to-watch list", id);
        }
        reverted
    }

    /// Drop every entry. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut removed = 0;
        self.update(|collection| {
            removed = collection.len();
            collection.items.clear();
            removed > 0
        });
        if removed > 0 {
            info!("Cleared {} watchlist entries", removed);
        }
        removed
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn find_by_id(&self, id: &str) -> Option<WatchlistEntry> {
        self.load().find(id).cloned()
    }

    pub fn find_by_external_id(
        &self,
        external_id: impl Into<ExternalId>,
        media_type: MediaType,
    ) -> Option<WatchlistEntry> {
        self.find_by_id(&compute_id(&external_id.into(), media_type))
    }

    pub fn exists(&self, external_id: impl Into<ExternalId>, media_type: MediaType) -> bool {
        self.find_by_external_id(external_id, media_type).is_some()
    }

    pub fn list_to_watch(&self) -> Vec<WatchlistEntry> {
        view::to_watch(&self.load().items)
    }

    pub fn list_watched(&self) -> Vec<WatchlistEntry> {
        view::watched(&self.load().items)
    }

    pub fn list_by_impression(&self, impression: Impression) -> Vec<WatchlistEntry> {
        view::by_impression(&self.load().items, impression)
    }

    pub fn stats(&self) -> WatchlistStats {
        self.load().stats()
    }
}
