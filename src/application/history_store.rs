//! Bounded, deduplicated clipboard history

use std::sync::Arc;

use crate::domain::error::InvalidCapacityError;
use crate::domain::history::HistoryEntry;

use super::ports::{CacheStore, SharedLogger};

const COMPONENT: &str = "history";

/// Ordered history, most recent first.
///
/// Holds at most `capacity` entries, never two with the same content.
/// Entries leaving the store release their cache files; deletion failures
/// are logged and never undo the in-memory change.
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    capacity: usize,
    cache: Arc<dyn CacheStore>,
    logger: SharedLogger,
}

impl HistoryStore {
    /// Create an empty store. Capacity must be positive.
    pub fn new(
        capacity: usize,
        cache: Arc<dyn CacheStore>,
        logger: SharedLogger,
    ) -> Result<Self, InvalidCapacityError> {
        if capacity == 0 {
            return Err(InvalidCapacityError(capacity));
        }
        Ok(Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            cache,
            logger,
        })
    }

    /// Insert an entry at the front.
    ///
    /// An existing entry with the same content is removed first. Its cache
    /// file is released unless the new entry reuses the same file. Oldest
    /// entries are then evicted until the store is within capacity.
    pub fn capture(&mut self, entry: HistoryEntry) {
        if let Some(pos) = self.entries.iter().position(|e| e.same_content(&entry)) {
            let previous = self.entries.remove(pos);
            if previous.cache_file() != entry.cache_file() {
                self.release(&previous);
            }
            self.logger.debug(
                COMPONENT,
                &format!("Moved {} entry to front", entry.content_type()),
            );
        } else {
            self.logger.debug(
                COMPONENT,
                &format!("Captured {} entry: {}", entry.content_type(), entry.preview()),
            );
        }

        self.entries.insert(0, entry);

        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop() {
                self.logger.debug(
                    COMPONENT,
                    &format!("Evicted {} entry: {}", evicted.content_type(), evicted.preview()),
                );
                self.release(&evicted);
            }
        }
    }

    /// Read-only view, most recent first
    pub fn get_all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Remove the entry at `index`. Returns false when out of bounds.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        let removed = self.entries.remove(index);
        self.release(&removed);
        true
    }

    /// Delete every cache file, then empty the history
    pub fn clear(&mut self) {
        for entry in &self.entries {
            self.release(entry);
        }
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn release(&self, entry: &HistoryEntry) {
        if let Some(path) = entry.cache_file() {
            if let Err(e) = self.cache.delete(path) {
                self.logger.warn(COMPONENT, &e.to_string());
            }
        }
    }
}
