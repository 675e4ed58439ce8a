//! Storage backend abstraction.
//!
//! This module defines the [`RecentsStore`] trait that abstracts over how the
//! recent-searches history is persisted. The engine records and reads history
//! through the trait and never touches files directly.
//!
//! # Design Philosophy
//!
//! The trait is minimal and focused on the operations the engine actually
//! performs, not a generic key-value API. Each method maps directly to one
//! use case in the event loop.

use crate::domain::error::Result;
use crate::storage::models::RecentSearch;

/// Abstraction over recent-search persistence backends.
///
/// # Implementations
///
/// - [`JsonRecentsStore`](crate::storage::JsonRecentsStore): JSON file with
///   atomic writes (default)
pub trait RecentsStore: Send {
    /// Records a committed search query.
    ///
    /// Re-committing a query already in the history moves it to the front
    /// rather than duplicating it. The history is bounded; recording beyond
    /// the cap evicts the oldest entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn record(&mut self, query: &str) -> Result<()>;

    /// Returns the history, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn recent(&self) -> Result<Vec<RecentSearch>>;

    /// Removes all history entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn clear(&mut self) -> Result<()>;
}
