//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module provides the path utilities the rest of the crate uses to
//! locate its data directory and to normalize user-supplied file paths.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
