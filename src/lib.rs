//! Keja: a search/filter/sort engine for browsing property and BNB listings.
//!
//! Keja implements the client-side pipeline shared by the Properties and
//! BNBs browse screens of a rental marketplace:
//! - Typed filter criteria with single-field mutation and reset
//! - A pure, deterministic filter/sort engine over the raw listing set
//! - Debounced recompute with a generation-counted quiet-period gate
//! - Two-way hover/click selection sync between the list and the map
//! - Marker projection feeding a pluggable map surface
//! - Catalog fetching over REST or from a static JSON file
//! - Persistent recent-search history backed by JSON storage

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI Driver (main.rs)                               │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Filter engine
//! │  - Debounce gate                                    │
//! │  - Selection sync                                   │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog Layer │   │ Map Layer     │
//! │ (ui/)         │   │ (catalog/)    │   │ (map/)        │
//! │ - View model  │   │ - REST/file   │   │ - Markers     │
//! │ - Rendering   │   │ - Envelope    │   │ - Surface API │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage, Infrastructure & Domain Layers            │
//! │  - Recent searches (storage/)                       │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Listing model and errors (domain/)               │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`catalog`]: Catalog sources, envelope decoding, record validation
//! - [`domain`]: Core domain types (Listing, errors)
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`map`]: Marker projection and the mapping-SDK seam
//! - [`storage`]: JSON file persistence for recent searches
//! - [`ui`]: View model computation and plain-text rendering
//! - `observability`: OpenTelemetry tracing (internal)
//!
//! # Configuration
//!
//! The driver is configured via a TOML file:
//!
//! ```toml
//! # ~/.config/keja/config.toml
//! catalog_url = "https://api.keja.example"
//! family = "bnbs"
//! city = "Nairobi"
//! limit = 100
//! trace_level = "info"
//! ```
//!
//! All fields are optional; [`Config::default`] yields a file-less catalog
//! with no prefilter and the default trace level.
//!
//! # Event Flow
//!
//! 1. **Startup** (`main.rs`): load config, initialize tracing, create
//!    `AppState`, issue the initial `LoadCatalog` event.
//! 2. **Criteria edit**: `CriteriaChanged` arms the debounce gate; the
//!    driver schedules the returned ticket and feeds back `DebounceTick`.
//! 3. **Recompute**: the accepted tick re-runs the filter engine; the
//!    handler emits `ShowMarkers` with a fresh projection.
//! 4. **Selection**: hover and click events flow both ways between the list
//!    and the map; a marker click emits `ScrollListTo`.
//!
//! # Examples
//!
//! ```rust
//! use keja::app::{handle_event, AppState, Event};
//! use keja::catalog::CatalogRequest;
//!
//! let mut state = AppState::new();
//!
//! let (_, actions) = handle_event(
//!     &mut state,
//!     &Event::LoadCatalog { request: CatalogRequest::default() },
//! )?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), keja::KejaError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Full Recompute Over Incremental Updates
//!
//! Every criteria change re-filters the entire raw set:
//! - The raw set is bounded by the server-side prefilter
//! - Derived state can never drift from its inputs
//! - The debounce gate absorbs rapid edit bursts
//!
//! ## Generation Counters Over Cancellation Handles
//!
//! Both the debounce gate and the catalog fetch path discard stale work by
//! comparing generations instead of cancelling in-flight tasks:
//! - A slow early fetch can never overwrite a newer one
//! - No recompute from a stale pending timer is ever applied
//!
//! ## Immutable View Models
//!
//! UI rendering uses computed view models:
//! - Clear separation between state and display
//! - Enables easier testing and validation
//! - Pre-computes display labels and query highlight ranges

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod map;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, ViewMode};
pub use domain::{KejaError, Listing, Result};

use std::path::Path;

use serde::Deserialize;

use crate::catalog::{CatalogRequest, ListingFamily};

/// Driver configuration loaded from a TOML file.
///
/// All fields are optional; unset fields fall back to defaults. The catalog
/// source is chosen from `catalog_url`/`catalog_file`, the prefilter from
/// `family`/`city`/`limit`, and the ambient stack from `trace_level` and
/// `data_dir`.
///
/// # Example
///
/// ```toml
/// catalog_file = "~/listings.json"
/// family = "properties"
/// limit = 50
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the REST catalog backend.
    ///
    /// Takes precedence over `catalog_file` when both are set.
    pub catalog_url: Option<String>,

    /// Path to a static JSON catalog file.
    pub catalog_file: Option<String>,

    /// Listing family to prefetch: `"properties"` or `"bnbs"`.
    ///
    /// Unrecognized values are ignored and the fetch spans both families.
    pub family: Option<String>,

    /// City prefilter for the fetch.
    pub city: Option<String>,

    /// Cap on the number of fetched records.
    pub limit: Option<u32>,

    /// Directory for traces and the recents file.
    ///
    /// Supports `~` expansion. Default: `~/.local/share/keja`.
    pub data_dir: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`KejaError::Io`] when the file cannot be read and
    /// [`KejaError::Config`] when it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| KejaError::Config(e.to_string()))
    }

    /// Builds the initial catalog request from the prefilter fields.
    ///
    /// An unrecognized `family` value is dropped with a warning rather than
    /// failing startup.
    #[must_use]
    pub fn catalog_request(&self) -> CatalogRequest {
        let family = self.family.as_deref().and_then(|f| match f {
            "properties" | "property" => Some(ListingFamily::Properties),
            "bnbs" | "bnb" => Some(ListingFamily::Bnbs),
            other => {
                tracing::warn!(family = %other, "unrecognized listing family in config");
                None
            }
        });

        CatalogRequest {
            family,
            city: self.city.clone(),
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn config_parses_a_full_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "catalog_url = \"https://api.keja.example\"\nfamily = \"bnbs\"\ncity = \"Nairobi\"\nlimit = 100\ntrace_level = \"debug\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.catalog_url.as_deref(), Some("https://api.keja.example"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));

        let request = config.catalog_request();
        assert_eq!(request.family, Some(ListingFamily::Bnbs));
        assert_eq!(request.city.as_deref(), Some("Nairobi"));
        assert_eq!(request.limit, Some(100));
    }

    #[test]
    fn config_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "limit = \"not a number\"").unwrap();

        assert!(matches!(
            Config::load(file.path()),
            Err(KejaError::Config(_))
        ));
    }

    #[test]
    fn unknown_family_is_dropped_from_the_request() {
        let config = Config {
            family: Some("boats".to_string()),
            ..Config::default()
        };
        assert_eq!(config.catalog_request().family, None);
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let err = Config::load(Path::new("/nonexistent/keja.toml")).unwrap_err();
        assert!(matches!(err, KejaError::Io(_)));
    }
}
