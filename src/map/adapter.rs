//! Map surface abstraction.
//!
//! This module defines the [`MapSurface`] trait that keeps the core
//! independent of any concrete mapping SDK. The engine pushes marker
//! descriptors through the trait and polls it for click-selected ids; no
//! provider-specific API shape leaks past this seam.

use crate::domain::listing::ListingId;
use crate::map::marker::Marker;

/// Availability of the mapping provider.
///
/// When the provider fails to load, the map pane degrades to an unavailable
/// notice while list browsing continues to work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapStatus {
    /// Provider loaded; markers can be shown.
    Ready,

    /// Provider failed to load.
    Unavailable {
        /// Human-readable reason shown in the degraded map pane.
        reason: String,
    },
}

/// Abstraction over a concrete mapping SDK.
///
/// Implementations receive the current marker projection after every
/// recompute and surface marker clicks back to the event loop. The trait is
/// deliberately minimal: it covers exactly the operations the browse screens
/// need, not a general mapping API.
pub trait MapSurface {
    /// Reports whether the provider is usable.
    fn status(&self) -> MapStatus;

    /// Replaces the displayed markers with a fresh projection.
    ///
    /// Called after every filter recompute. Implementations should drop any
    /// previously shown markers; the projection is complete, not a diff.
    fn show_markers(&mut self, markers: &[Marker]);

    /// Takes the most recent marker click, if one happened since the last poll.
    fn take_clicked(&mut self) -> Option<ListingId>;
}
