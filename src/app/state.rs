//! Application state management.
//!
//! This module defines [`AppState`], the central state container for one
//! browse screen, along with the recompute method that keeps the filtered set
//! and selection consistent. It is the single source of truth for all
//! transient browse state.
//!
//! # Architecture
//!
//! `AppState` separates core data (the raw listing set) from derived state
//! (the filtered set) to keep state transitions simple: events mutate the
//! criteria or the raw set, and [`AppState::recompute`] re-derives everything
//! downstream from scratch.
//!
//! # State Components
//!
//! - **Listings**: Raw listing set from the most recent catalog fetch
//! - **Filtered**: Subset after the filter engine runs, in display order
//! - **Criteria**: Current filter/sort configuration
//! - **Selection**: Hover/click selection linking the list and map surfaces
//! - **View Mode**: Which panes are visible (split, list-only, map-only)
//! - **Debounce**: Generation-counted gate collapsing criteria bursts
//! - **Phase**: Catalog load lifecycle (loading, ready, failed)

use super::criteria::FilterCriteria;
use super::debounce::DebounceGate;
use super::filter::filter_listings;
use super::modes::ViewMode;
use super::selection::Selection;
use crate::catalog::source::CatalogRequest;
use crate::domain::listing::Listing;

/// Catalog load lifecycle for the browse screen.
///
/// The screen mounts in `Loading`, moves to `Ready` when the raw set arrives,
/// and to `Failed` when the fetch errors. A retry returns to `Loading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogPhase {
    /// A fetch is in flight; the UI shows a loading indicator.
    Loading,

    /// The raw set is loaded and the pipeline is live.
    Ready,

    /// The most recent fetch failed.
    Failed {
        /// Human-readable failure reason shown with the retry affordance.
        message: String,
    },
}

/// Central state container for one browse screen.
///
/// Holds the raw and filtered listing sets, the criteria, the selection, and
/// the debounce gate. Mutated by the event handler in response to user input
/// and fetch results; never mutated from anywhere else.
#[derive(Debug)]
pub struct AppState {
    /// Raw listing set from the most recent completed fetch.
    ///
    /// Replaced wholesale when a fetch completes; the filter engine never
    /// mutates it.
    pub listings: Vec<Listing>,

    /// Listings matching the current criteria, in display order.
    ///
    /// Recomputed from scratch by [`recompute`](Self::recompute); both the
    /// list view and the marker projection read from it.
    pub filtered: Vec<Listing>,

    /// Current filter/sort configuration.
    ///
    /// Mutated exclusively through criteria-change events; discarded when
    /// the screen unmounts.
    pub criteria: FilterCriteria,

    /// Hover/click selection shared by the list and map surfaces.
    pub selection: Selection,

    /// Which panes are visible.
    pub view_mode: ViewMode,

    /// Debounce gate between criteria mutations and the recompute.
    pub debounce: DebounceGate,

    /// Catalog load lifecycle.
    pub phase: CatalogPhase,

    /// Prefilter parameters of the most recent fetch, kept for retry.
    pub last_request: CatalogRequest,

    /// Generation of the most recently issued fetch.
    ///
    /// Responses carrying an older generation are discarded, so a slow early
    /// fetch can never overwrite a newer one.
    fetch_generation: u64,
}

impl AppState {
    /// Creates the state for a freshly mounted browse screen.
    ///
    /// Everything starts at its default: empty listing sets, default
    /// criteria, no selection, split view, and the `Loading` phase (the
    /// driver issues the initial fetch immediately after mount).
    #[must_use]
    pub fn new() -> Self {
        Self {
            listings: vec![],
            filtered: vec![],
            criteria: FilterCriteria::default(),
            selection: Selection::default(),
            view_mode: ViewMode::default(),
            debounce: DebounceGate::default(),
            phase: CatalogPhase::Loading,
            last_request: CatalogRequest::default(),
            fetch_generation: 0,
        }
    }

    /// Registers a new fetch and returns its generation.
    ///
    /// Bumps the generation so any in-flight response becomes stale, stores
    /// the request for retry, and enters the `Loading` phase.
    pub fn begin_fetch(&mut self, request: CatalogRequest) -> u64 {
        self.fetch_generation += 1;
        self.last_request = request;
        self.phase = CatalogPhase::Loading;

        tracing::debug!(generation = self.fetch_generation, "catalog fetch issued");

        self.fetch_generation
    }

    /// Returns true when the given generation is the most recently issued one.
    #[must_use]
    pub const fn is_current_fetch(&self, generation: u64) -> bool {
        generation == self.fetch_generation
    }

    /// Re-derives the filtered set and prunes the selection.
    ///
    /// Runs the filter engine over the raw set and then drops the selection
    /// if its listing fell out of the result. Called after every accepted
    /// debounce fire and every completed fetch.
    pub fn recompute(&mut self) {
        self.filtered = filter_listings(&self.criteria, &self.listings);
        self.selection.prune(&self.filtered);
    }

    /// Returns the listing the selection points at, if it is in the
    /// filtered set.
    #[must_use]
    pub fn selected_listing(&self) -> Option<&Listing> {
        let id = self.selection.active_id()?;
        self.filtered.iter().find(|listing| &listing.id == id)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
