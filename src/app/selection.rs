//! Selection sync between the list and map surfaces.
//!
//! This module defines [`Selection`], the centralized state linking hover and
//! click gestures across the two browse surfaces. Hovering a list row
//! highlights the matching map marker; hovering or clicking a marker
//! highlights (and scrolls to) the matching list row. Both surfaces write
//! through the same API, so neither can drift out of sync with the other.
//!
//! # Semantics
//!
//! The coordinator is last-writer-wins: there is no surface priority and no
//! mutual-exclusion lock. A click survives subsequent renders until another
//! gesture replaces it; a hover is cleared when the originating surface
//! reports a leave. When a recompute removes the selected listing from the
//! filtered set, the selection is pruned eagerly.

use crate::domain::listing::{Listing, ListingId};

/// Which surface produced a hover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    /// The scrollable listing list.
    List,
    /// The map pane.
    Map,
}

/// Active selection linking the list and map surfaces.
///
/// At most one listing is selected at a time. `Hovered` remembers the surface
/// that produced it so a leave from the other surface cannot clear it;
/// `Clicked` persists until another gesture or an explicit clear.
///
/// # Examples
///
/// ```
/// use keja::app::selection::{Selection, SelectionSource};
/// use keja::domain::listing::ListingId;
///
/// let mut selection = Selection::default();
/// selection.hover(ListingId::new("L-7"), SelectionSource::List);
/// assert!(selection.is_active(&ListingId::new("L-7")));
///
/// selection.leave(SelectionSource::Map);
/// assert!(selection.is_active(&ListingId::new("L-7")));
///
/// selection.leave(SelectionSource::List);
/// assert!(selection.active_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing selected.
    #[default]
    None,

    /// A listing is hovered on one surface.
    Hovered {
        /// Selected listing id.
        id: ListingId,
        /// Surface that produced the hover.
        source: SelectionSource,
    },

    /// A listing was click-selected (map marker click).
    Clicked {
        /// Selected listing id.
        id: ListingId,
    },
}

impl Selection {
    /// Records a hover from either surface, replacing any prior selection.
    pub fn hover(&mut self, id: ListingId, source: SelectionSource) {
        tracing::trace!(listing_id = %id, source = ?source, "hover selection");
        *self = Self::Hovered { id, source };
    }

    /// Records a click selection, replacing any prior selection.
    pub fn click(&mut self, id: ListingId) {
        tracing::trace!(listing_id = %id, "click selection");
        *self = Self::Clicked { id };
    }

    /// Clears a hover owned by the given surface.
    ///
    /// A leave from the other surface, or a leave while a click selection is
    /// active, is a no-op.
    pub fn leave(&mut self, source: SelectionSource) {
        if let Self::Hovered { source: owner, .. } = self {
            if *owner == source {
                tracing::trace!(source = ?source, "hover cleared");
                *self = Self::None;
            }
        }
    }

    /// Clears any selection unconditionally.
    pub fn clear(&mut self) {
        *self = Self::None;
    }

    /// Drops the selection when the filtered set no longer contains its id.
    ///
    /// Called right after every filter recompute so neither surface ever
    /// highlights a listing that is no longer visible.
    pub fn prune(&mut self, filtered: &[Listing]) {
        let Some(active) = self.active_id() else {
            return;
        };

        if !filtered.iter().any(|listing| &listing.id == active) {
            tracing::debug!(listing_id = %active, "pruning selection for filtered-out listing");
            *self = Self::None;
        }
    }

    /// Returns the selected listing id, if any.
    #[must_use]
    pub const fn active_id(&self) -> Option<&ListingId> {
        match self {
            Self::None => None,
            Self::Hovered { id, .. } | Self::Clicked { id } => Some(id),
        }
    }

    /// Returns true when the given listing is the active selection.
    #[must_use]
    pub fn is_active(&self, id: &ListingId) -> bool {
        self.active_id() == Some(id)
    }

    /// Returns true when the selection is a persisted click.
    #[must_use]
    pub const fn is_clicked(&self) -> bool {
        matches!(self, Self::Clicked { .. })
    }
}
