//! JSON file-based storage backend.
//!
//! This module provides a simple, human-readable storage implementation using
//! JSON serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - the bounded history is loaded into memory once
//! - **Write**: O(n) - serializes and writes the whole history
//! - **Best for**: a handful of entries, infrequent writes

use crate::domain::error::{KejaError, Result};
use crate::storage::backend::RecentsStore;
use crate::storage::models::RecentSearch;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Maximum number of recent searches kept in the history.
pub const MAX_RECENT_SEARCHES: usize = 5;

/// JSON storage container format.
///
/// This is the top-level structure serialized to disk. Wraps the history in
/// a single object for better JSON structure and future extensibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Recent searches, most recent first.
    #[serde(default)]
    searches: Vec<RecentSearch>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            searches: Vec::new(),
        }
    }
}

/// JSON file recents store.
///
/// Keeps the bounded history in a human-readable JSON file with atomic
/// writes. The whole history is held in memory and persisted on
/// modifications.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "searches": [
///     {
///       "query": "westlands 2br",
///       "searched_at": 1234567890
///     }
///   ]
/// }
/// ```
#[derive(Debug)]
pub struct JsonRecentsStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory history, loaded on creation.
    data: StorageData,

    /// Tracks if data has been modified since last save.
    dirty: bool,
}

impl JsonRecentsStore {
    /// Creates or opens a JSON recents store.
    ///
    /// If the file exists, loads existing data. Otherwise starts with an
    /// empty history. Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use keja::storage::JsonRecentsStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonRecentsStore::new(PathBuf::from("/tmp/recents.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON recents store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            tracing::debug!("loading existing history");
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty history");
            StorageData::default()
        };

        tracing::debug!(search_count = data.searches.len(), "recents store initialized");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Loads storage data from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    fn load_from_file(path: &PathBuf) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| KejaError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            searches = data.searches.len(),
            "loaded recents history"
        );

        Ok(data)
    }

    /// Saves storage data to disk using atomic write.
    ///
    /// Writes to a temporary file first, then atomically renames it to the
    /// target path. The file is never left half-written even if the process
    /// crashes mid-save.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - JSON serialization fails (should never happen with valid data)
    /// - Temporary file cannot be written
    /// - Rename operation fails (rare on POSIX systems)
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        tracing::debug!(path = ?self.file_path, "saving recents history");

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| KejaError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!("recents history saved");
        Ok(())
    }
}

impl RecentsStore for JsonRecentsStore {
    fn record(&mut self, query: &str) -> Result<()> {
        let _span = tracing::debug_span!("recents_record", query = %query).entered();

        // Re-committing an existing query moves it to the front.
        self.data
            .searches
            .retain(|entry| !entry.query.eq_ignore_ascii_case(query));
        self.data.searches.insert(0, RecentSearch::new(query));
        self.data.searches.truncate(MAX_RECENT_SEARCHES);

        self.dirty = true;
        self.save_to_file()?;

        tracing::debug!(count = self.data.searches.len(), "search recorded");
        Ok(())
    }

    fn recent(&self) -> Result<Vec<RecentSearch>> {
        let _span = tracing::debug_span!("recents_list").entered();

        let searches = self.data.searches.clone();

        tracing::debug!(count = searches.len(), "retrieved recent searches");
        Ok(searches)
    }

    fn clear(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("recents_clear").entered();

        self.data.searches.clear();
        self.dirty = true;
        self.save_to_file()?;

        tracing::debug!("recents history cleared");
        Ok(())
    }
}

impl Drop for JsonRecentsStore {
    /// Ensures data is saved on drop, even if the caller forgot an explicit save.
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty history on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> JsonRecentsStore {
        JsonRecentsStore::new(dir.path().join("recents.json")).unwrap()
    }

    #[test]
    fn records_are_returned_most_recent_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.record("first").unwrap();
        store.record("second").unwrap();

        let queries: Vec<String> = store
            .recent()
            .unwrap()
            .into_iter()
            .map(|r| r.query)
            .collect();
        assert_eq!(queries, vec!["second", "first"]);
    }

    #[test]
    fn recommitting_moves_to_front_without_duplicating() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.record("karen").unwrap();
        store.record("kilimani").unwrap();
        store.record("Karen").unwrap();

        let queries: Vec<String> = store
            .recent()
            .unwrap()
            .into_iter()
            .map(|r| r.query)
            .collect();
        assert_eq!(queries, vec!["Karen", "kilimani"]);
    }

    #[test]
    fn history_is_bounded_and_evicts_the_oldest() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        for i in 0..7 {
            store.record(&format!("query {i}")).unwrap();
        }

        let searches = store.recent().unwrap();
        assert_eq!(searches.len(), MAX_RECENT_SEARCHES);
        assert_eq!(searches[0].query, "query 6");
        assert_eq!(searches.last().unwrap().query, "query 2");
    }

    #[test]
    fn history_survives_reopening_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recents.json");

        {
            let mut store = JsonRecentsStore::new(path.clone()).unwrap();
            store.record("persisted").unwrap();
        }

        let reopened = JsonRecentsStore::new(path).unwrap();
        let searches = reopened.recent().unwrap();
        assert_eq!(searches.len(), 1);
        assert_eq!(searches[0].query, "persisted");
    }

    #[test]
    fn clear_empties_the_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.record("gone").unwrap();
        store.clear().unwrap();

        assert!(store.recent().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recents.json");
        std::fs::write(&path, "not json").unwrap();

        let err = JsonRecentsStore::new(path).unwrap_err();
        assert!(matches!(err, KejaError::Storage(_)));
    }
}
