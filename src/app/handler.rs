//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! timer ticks, and fetch results, translating them into state changes and
//! action sequences. It serves as the primary control flow coordinator for
//! the browse screens.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the driver runtime
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Criteria**: `CriteriaChanged`, `DebounceTick`, `CommitSearch`,
//!   `ResetFilters`
//! - **Catalog**: `LoadCatalog`, `CatalogLoaded`, `CatalogFailed`,
//!   `RetryLoad`
//! - **Selection**: `ListingHovered`, `HoverEnded`, `MarkerClicked`,
//!   `ClearSelection`
//! - **Layout**: `SetViewMode`
//!
//! # Example
//!
//! ```
//! use keja::app::{handle_event, AppState, Event};
//! use keja::app::modes::ViewMode;
//!
//! let mut state = AppState::new();
//! let (render, actions) = handle_event(&mut state, &Event::SetViewMode(ViewMode::Map))?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), keja::domain::error::KejaError>(())
//! ```

use crate::app::criteria::CriteriaField;
use crate::app::modes::ViewMode;
use crate::app::selection::SelectionSource;
use crate::app::state::CatalogPhase;
use crate::app::{Action, AppState};
use crate::catalog::source::CatalogRequest;
use crate::domain::error::Result;
use crate::domain::listing::{Listing, ListingId};
use crate::map::marker::project_markers;

/// Events triggered by user input, timers, or fetch results.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Mutates one criteria field and arms the debounce gate.
    ///
    /// The recompute does not run yet; it runs when the issued ticket's
    /// `DebounceTick` survives the quiet period.
    CriteriaChanged(CriteriaField),

    /// Delivers an elapsed debounce timer.
    ///
    /// Only the newest generation fires the recompute; stale ticks are
    /// discarded without touching state.
    DebounceTick {
        /// Generation echoed from the scheduled ticket.
        generation: u64,
    },

    /// Commits the current text query explicitly.
    ///
    /// Cancels any pending debounce, recomputes immediately, and records a
    /// non-empty query in the recents history.
    CommitSearch,

    /// Restores every criteria field to its default and recomputes.
    ResetFilters,

    /// Issues a catalog fetch for the given prefilter request.
    LoadCatalog {
        /// Prefilter parameters for the fetch.
        request: CatalogRequest,
    },

    /// Delivers a completed catalog fetch.
    ///
    /// Discarded when the generation is stale, so a slow early response can
    /// never overwrite the raw set of a newer fetch.
    CatalogLoaded {
        /// Generation echoed from the issued fetch.
        generation: u64,
        /// Decoded raw listing set.
        listings: Vec<Listing>,
    },

    /// Delivers a failed catalog fetch.
    CatalogFailed {
        /// Generation echoed from the issued fetch.
        generation: u64,
        /// Human-readable failure reason.
        message: String,
    },

    /// Re-issues the most recent fetch after a failure.
    RetryLoad,

    /// Reports a hover gesture from either surface.
    ListingHovered {
        /// Hovered listing id.
        id: ListingId,
        /// Surface that produced the hover.
        source: SelectionSource,
    },

    /// Reports that the pointer left a surface's hovered element.
    HoverEnded {
        /// Surface that reported the leave.
        source: SelectionSource,
    },

    /// Reports a map marker click.
    ///
    /// Click-selects the listing and scrolls the list view to its row.
    MarkerClicked {
        /// Clicked listing id.
        id: ListingId,
    },

    /// Clears any selection unconditionally.
    ClearSelection,

    /// Switches which panes are visible.
    SetViewMode(ViewMode),
}

/// Processes an event, mutates state, and returns actions to execute.
///
/// This is the primary event handler coordinating all state transitions and
/// side effects. It pattern-matches on event types, calls state mutation
/// methods, and collects actions for the driver to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to the browse screen state
/// * `event` - Event to process
///
/// # Returns
///
/// A tuple of `(render, actions)`: `render` is true when the UI should be
/// redrawn, and `actions` are side effects to execute in sequence.
///
/// # Errors
///
/// The current event set never fails; the `Result` keeps the driver's event
/// loop uniform with the fallible fetch and storage paths it also drives.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::CriteriaChanged(field) => {
            state.criteria.apply(field.clone());
            let ticket = state.debounce.arm();

            tracing::debug!(
                active_filters = state.criteria.active_filter_count(),
                generation = ticket.generation,
                "criteria changed, recompute scheduled"
            );

            Ok((true, vec![Action::ScheduleDebounce(ticket)]))
        }
        Event::DebounceTick { generation } => {
            if !state.debounce.try_fire(*generation) {
                return Ok((false, vec![]));
            }

            state.recompute();

            Ok((
                true,
                vec![Action::ShowMarkers(project_markers(&state.filtered))],
            ))
        }
        Event::CommitSearch => {
            // A pending tick would recompute the same criteria again.
            state.debounce.cancel();
            state.recompute();

            let mut actions = vec![Action::ShowMarkers(project_markers(&state.filtered))];

            if !state.criteria.query.is_empty() {
                tracing::debug!(query = %state.criteria.query, "search committed");
                actions.push(Action::PersistRecent {
                    query: state.criteria.query.clone(),
                });
            }

            Ok((true, actions))
        }
        Event::ResetFilters => {
            tracing::debug!("resetting all filters");
            state.criteria.reset();
            state.debounce.cancel();
            state.recompute();

            Ok((
                true,
                vec![Action::ShowMarkers(project_markers(&state.filtered))],
            ))
        }
        Event::LoadCatalog { request } => {
            let generation = state.begin_fetch(request.clone());

            Ok((
                true,
                vec![Action::FetchCatalog {
                    generation,
                    request: request.clone(),
                }],
            ))
        }
        Event::CatalogLoaded {
            generation,
            listings,
        } => {
            if !state.is_current_fetch(*generation) {
                tracing::debug!(generation, "stale catalog response discarded");
                return Ok((false, vec![]));
            }

            tracing::debug!(count = listings.len(), "catalog loaded");

            state.listings.clone_from(listings);
            state.phase = CatalogPhase::Ready;
            state.recompute();

            Ok((
                true,
                vec![Action::ShowMarkers(project_markers(&state.filtered))],
            ))
        }
        Event::CatalogFailed {
            generation,
            message,
        } => {
            if !state.is_current_fetch(*generation) {
                tracing::debug!(generation, "stale catalog failure discarded");
                return Ok((false, vec![]));
            }

            tracing::warn!(error = %message, "catalog fetch failed");
            state.phase = CatalogPhase::Failed {
                message: message.clone(),
            };

            Ok((true, vec![]))
        }
        Event::RetryLoad => {
            let request = state.last_request.clone();
            let generation = state.begin_fetch(request.clone());

            tracing::debug!(generation, "retrying catalog fetch");

            Ok((
                true,
                vec![Action::FetchCatalog {
                    generation,
                    request,
                }],
            ))
        }
        Event::ListingHovered { id, source } => {
            state.selection.hover(id.clone(), *source);
            Ok((true, vec![]))
        }
        Event::HoverEnded { source } => {
            let before = state.selection.clone();
            state.selection.leave(*source);
            Ok((before != state.selection, vec![]))
        }
        Event::MarkerClicked { id } => {
            state.selection.click(id.clone());
            Ok((true, vec![Action::ScrollListTo(id.clone())]))
        }
        Event::ClearSelection => {
            let before = state.selection.clone();
            state.selection.clear();
            Ok((before != state.selection, vec![]))
        }
        Event::SetViewMode(mode) => {
            if state.view_mode == *mode {
                return Ok((false, vec![]));
            }

            tracing::debug!(mode = ?mode, "view mode switched");
            state.view_mode = *mode;
            Ok((true, vec![]))
        }
    }
}
