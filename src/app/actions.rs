//! Actions representing side effects to be executed by the driver runtime.
//!
//! This module defines the [`Action`] type, which represents imperative
//! commands produced by the event handler after processing an event. Actions
//! bridge pure state transformations and effectful operations like scheduling
//! timers, fetching the catalog, or pushing markers to the map surface.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event,
//! allowing multiple side effects to be queued atomically. The driver
//! executes these actions in sequence.

use crate::app::debounce::DebounceTicket;
use crate::catalog::source::CatalogRequest;
use crate::domain::listing::ListingId;
use crate::map::marker::Marker;

/// Commands representing side effects to be executed by the driver runtime.
///
/// Actions are produced by the event handler and executed by the driver. They
/// represent the boundary between pure state transformations and effectful
/// operations like timers, network fetches, and surface updates.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Schedules a debounce timer for the carried ticket.
    ///
    /// The driver waits `ticket.delay` and then delivers an
    /// [`Event::DebounceTick`](crate::app::Event::DebounceTick) echoing
    /// `ticket.generation`.
    ScheduleDebounce(DebounceTicket),

    /// Starts a catalog fetch for the given request.
    ///
    /// The driver performs the fetch asynchronously and delivers either
    /// [`Event::CatalogLoaded`](crate::app::Event::CatalogLoaded) or
    /// [`Event::CatalogFailed`](crate::app::Event::CatalogFailed), echoing
    /// the generation so stale responses can be discarded.
    FetchCatalog {
        /// Generation identifying this fetch.
        generation: u64,
        /// Prefilter parameters for the fetch.
        request: CatalogRequest,
    },

    /// Replaces the map surface's markers with a fresh projection.
    ///
    /// Emitted after every filter recompute; the projection is complete, not
    /// a diff.
    ShowMarkers(Vec<Marker>),

    /// Scrolls the list view to the given listing's row.
    ///
    /// Emitted when a map marker click selects a listing so the list follows.
    ScrollListTo(ListingId),

    /// Persists a committed search query to the recents history.
    PersistRecent {
        /// The committed query text.
        query: String,
    },
}
