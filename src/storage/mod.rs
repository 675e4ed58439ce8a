//! Storage layer for the recent-searches history.
//!
//! This module provides the persistence abstraction for the bounded
//! recent-searches history. Committed queries are kept in a JSON file with
//! atomic writes; everything else the engine computes is ephemeral and never
//! stored.
//!
//! # Modules
//!
//! - `backend`: Recents-store trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `models`: Storage record types separate from engine state

pub mod backend;
pub mod json;
pub mod models;

pub use backend::RecentsStore;
pub use json::{JsonRecentsStore, MAX_RECENT_SEARCHES};
pub use models::RecentSearch;
