//! User interface rendering layer.
//!
//! This module turns application state into display output for the CLI
//! driver: a view model computation step followed by a plain-text renderer
//! targeting any [`std::io::Write`].
//!
//! # Architecture
//!
//! The UI layer follows a declarative rendering model:
//!
//! ```text
//! AppState → compute_viewmodel → BrowseViewModel → render → Text Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable browse state
//! - [`renderer`]: Plain-text frame writer

pub mod renderer;
pub mod viewmodel;

pub use renderer::render;
pub use viewmodel::{compute_viewmodel, BrowseViewModel, EmptyState, ErrorBanner, HeaderInfo, ListingRow};
