//! Storage record models for the persistence layer.
//!
//! This module defines the raw storage record types used for persistence
//! operations. These types are separate from the filter criteria to keep a
//! clear boundary between what is persisted and what the engine computes.

use serde::{Deserialize, Serialize};

/// A committed search query in the recent-searches history.
///
/// Only explicitly committed queries are recorded; keystroke-level criteria
/// changes never reach storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSearch {
    /// The query text as the user committed it.
    pub query: String,

    /// Unix timestamp when the query was committed.
    pub searched_at: i64,
}

impl RecentSearch {
    /// Creates a recent-search record stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use keja::storage::RecentSearch;
    ///
    /// let record = RecentSearch::new("westlands 2br");
    /// assert_eq!(record.query, "westlands 2br");
    /// assert!(record.searched_at > 0);
    /// ```
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            searched_at: chrono::Utc::now().timestamp(),
        }
    }
}
