//! View model types representing renderable browse state.
//!
//! This module defines immutable view models computed from application state,
//! following the MVVM pattern. View models are optimized for rendering and
//! contain pre-computed display information like price labels, highlight
//! ranges, and selection state.
//!
//! # Architecture
//!
//! View models are created via [`compute_viewmodel`] and consumed by the
//! renderer. They contain no business logic, only display-ready data. The
//! driver may append recent-search echoes before rendering; everything else
//! is derived from [`AppState`].

use crate::app::state::CatalogPhase;
use crate::app::{AppState, ViewMode};
use crate::domain::listing::ListingId;

/// Complete browse view model for rendering.
///
/// Contains all display information needed to render one frame of the browse
/// screen: the header summary, listing rows, pane visibility, and the
/// loading/failure/empty states that replace the row area.
#[derive(Debug, Clone)]
pub struct BrowseViewModel {
    /// Header summary (view mode, result counts, active filter count).
    pub header: HeaderInfo,

    /// Rows for the list pane, in display order.
    pub rows: Vec<ListingRow>,

    /// Whether the list pane is visible.
    pub show_list: bool,

    /// Whether the map pane is visible.
    pub show_map: bool,

    /// Number of markers the map pane would show (listings with coordinates).
    pub marker_count: usize,

    /// True while a catalog fetch is in flight.
    pub loading: bool,

    /// Failure banner shown when the most recent fetch errored.
    pub error_banner: Option<ErrorBanner>,

    /// Empty state shown when the catalog is ready but nothing matches.
    pub empty_state: Option<EmptyState>,

    /// Recent search queries, newest first. Filled in by the driver.
    pub recents: Vec<String>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Short label for the active view mode ("split", "list", "map").
    pub mode_label: &'static str,

    /// Number of listings after filtering.
    pub shown: usize,

    /// Number of listings in the raw set.
    pub total: usize,

    /// Number of active filter criteria, for the badge.
    pub active_filters: usize,
}

/// Display information for a single listing row.
#[derive(Debug, Clone)]
pub struct ListingRow {
    /// Listing identifier, for selection lookups.
    pub id: ListingId,

    /// Headline text.
    pub title: String,

    /// Pre-formatted price (e.g. "KES 7,500").
    pub price_label: String,

    /// Pre-formatted location (address and city).
    pub location_label: String,

    /// Capacity summary (beds, baths, guests).
    pub meta_label: String,

    /// Rating summary, or "unrated" when there are no reviews.
    pub rating_label: String,

    /// Whether the selection points at this row (hover or click).
    pub is_selected: bool,

    /// Whether the selection is a click (pinned) rather than a hover.
    pub is_clicked: bool,

    /// Character ranges of the title matching the text query.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Failure banner display information.
#[derive(Debug, Clone)]
pub struct ErrorBanner {
    /// Human-readable failure reason from the fetch.
    pub message: String,
}

/// Empty state message display information.
///
/// Shown when the catalog is ready but the row area has nothing to display.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g. "No listings match your filters").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Computes the browse view model from application state.
///
/// Derives everything the renderer needs: pane visibility from the view mode,
/// rows from the filtered set with selection marks and query highlights, the
/// marker count from coordinate-bearing listings, and the loading, failure,
/// and empty states from the catalog phase.
#[must_use]
pub fn compute_viewmodel(state: &AppState) -> BrowseViewModel {
    let mode_label = match state.view_mode {
        ViewMode::Split => "split",
        ViewMode::List => "list",
        ViewMode::Map => "map",
    };

    let rows = state
        .filtered
        .iter()
        .map(|listing| {
            let is_selected = state.selection.is_active(&listing.id);
            ListingRow {
                id: listing.id.clone(),
                title: listing.title.clone(),
                price_label: listing.price_label(),
                location_label: listing.location.label(),
                meta_label: format!(
                    "{} bd / {} ba / sleeps {}",
                    listing.beds, listing.baths, listing.guests
                ),
                rating_label: if listing.reviews == 0 {
                    "unrated".to_string()
                } else {
                    format!("{:.1} ({} reviews)", listing.rating, listing.reviews)
                },
                is_selected,
                is_clicked: is_selected && state.selection.is_clicked(),
                highlight_ranges: query_ranges(&listing.title, &state.criteria.query),
            }
        })
        .collect();

    let marker_count = state
        .filtered
        .iter()
        .filter(|listing| listing.location.coords.is_some())
        .count();

    let error_banner = match &state.phase {
        CatalogPhase::Failed { message } => Some(ErrorBanner {
            message: message.clone(),
        }),
        CatalogPhase::Loading | CatalogPhase::Ready => None,
    };

    let empty_state = if state.phase == CatalogPhase::Ready && state.filtered.is_empty() {
        Some(if state.listings.is_empty() {
            EmptyState {
                message: "No listings available".to_string(),
                subtitle: "The catalog returned nothing for this request".to_string(),
            }
        } else {
            EmptyState {
                message: "No listings match your filters".to_string(),
                subtitle: "Adjust or reset your filters to see more".to_string(),
            }
        })
    } else {
        None
    };

    BrowseViewModel {
        header: HeaderInfo {
            mode_label,
            shown: state.filtered.len(),
            total: state.listings.len(),
            active_filters: state.criteria.active_filter_count(),
        },
        rows,
        show_list: state.view_mode.shows_list(),
        show_map: state.view_mode.shows_map(),
        marker_count,
        loading: state.phase == CatalogPhase::Loading,
        error_banner,
        empty_state,
        recents: vec![],
    }
}

/// Finds every occurrence of `query` in `text`, ASCII case-insensitively.
///
/// Returns `(start, end)` character ranges, end exclusive, left to right and
/// non-overlapping. An empty query yields no ranges.
fn query_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    if query.is_empty() {
        return vec![];
    }

    let haystack: Vec<char> = text.chars().map(|c| c.to_ascii_lowercase()).collect();
    let needle: Vec<char> = query.chars().map(|c| c.to_ascii_lowercase()).collect();

    let mut ranges = vec![];
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if haystack[i..i + needle.len()] == needle[..] {
            ranges.push((i, i + needle.len()));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::criteria::CriteriaField;
    use crate::app::selection::SelectionSource;
    use crate::domain::listing::{
        Coordinates, Host, Listing, ListingKind, Location, StayType,
    };

    fn listing(id: &str, title: &str, with_coords: bool) -> Listing {
        Listing {
            id: ListingId::new(id),
            title: title.to_string(),
            location: Location {
                address: "12 Riverside Dr".to_string(),
                city: "Nairobi".to_string(),
                county: "Nairobi County".to_string(),
                coords: with_coords.then_some(Coordinates { lat: -1.28, lng: 36.82 }),
            },
            price: 7500,
            kind: ListingKind::Bnb { stay: StayType::Studio },
            beds: 1,
            baths: 1,
            guests: 2,
            amenities: vec![],
            rating: 4.6,
            reviews: 31,
            image_url: None,
            host: Host {
                name: String::new(),
                contact: String::new(),
                verified: false,
            },
            listed_at: 0,
            instant_book: false,
            featured: false,
        }
    }

    fn ready_state(listings: Vec<Listing>) -> AppState {
        let mut state = AppState::new();
        state.listings = listings;
        state.phase = CatalogPhase::Ready;
        state.recompute();
        state
    }

    #[test]
    fn header_counts_and_mode_label() {
        let mut state = ready_state(vec![
            listing("a", "Sunny loft", true),
            listing("b", "Garden cottage", false),
        ]);
        state.criteria.apply(CriteriaField::Query("loft".to_string()));
        state.recompute();

        let vm = compute_viewmodel(&state);
        assert_eq!(vm.header.mode_label, "split");
        assert_eq!(vm.header.shown, 1);
        assert_eq!(vm.header.total, 2);
        assert_eq!(vm.header.active_filters, 1);
        assert!(vm.show_list);
        assert!(vm.show_map);
    }

    #[test]
    fn rows_carry_labels_and_query_highlights() {
        let mut state = ready_state(vec![listing("a", "Sunny Loft in Karen", true)]);
        state.criteria.apply(CriteriaField::Query("loft".to_string()));
        state.recompute();

        let vm = compute_viewmodel(&state);
        let row = &vm.rows[0];
        assert_eq!(row.price_label, "KES 7,500");
        assert_eq!(row.location_label, "12 Riverside Dr, Nairobi");
        assert_eq!(row.meta_label, "1 bd / 1 ba / sleeps 2");
        assert_eq!(row.rating_label, "4.6 (31 reviews)");
        assert_eq!(row.highlight_ranges, vec![(6, 10)]);
    }

    #[test]
    fn selection_marks_distinguish_hover_from_click() {
        let mut state = ready_state(vec![
            listing("a", "First", true),
            listing("b", "Second", true),
        ]);
        state.selection.hover(ListingId::new("a"), SelectionSource::List);

        let vm = compute_viewmodel(&state);
        assert!(vm.rows[0].is_selected);
        assert!(!vm.rows[0].is_clicked);
        assert!(!vm.rows[1].is_selected);

        state.selection.click(ListingId::new("b"));
        let vm = compute_viewmodel(&state);
        assert!(vm.rows[1].is_clicked);
    }

    #[test]
    fn marker_count_skips_listings_without_coordinates() {
        let state = ready_state(vec![
            listing("a", "Mapped", true),
            listing("b", "Unmapped", false),
        ]);
        assert_eq!(compute_viewmodel(&state).marker_count, 1);
    }

    #[test]
    fn empty_state_tells_no_matches_apart_from_no_catalog() {
        let mut state = ready_state(vec![listing("a", "Loft", true)]);
        state.criteria.apply(CriteriaField::Query("zzz".to_string()));
        state.recompute();
        let vm = compute_viewmodel(&state);
        assert_eq!(
            vm.empty_state.map(|e| e.message),
            Some("No listings match your filters".to_string())
        );

        let vm = compute_viewmodel(&ready_state(vec![]));
        assert_eq!(
            vm.empty_state.map(|e| e.message),
            Some("No listings available".to_string())
        );
    }

    #[test]
    fn loading_and_failure_phases_surface_in_the_viewmodel() {
        let state = AppState::new();
        assert!(compute_viewmodel(&state).loading);

        let mut state = AppState::new();
        state.phase = CatalogPhase::Failed {
            message: "connection refused".to_string(),
        };
        let vm = compute_viewmodel(&state);
        assert_eq!(
            vm.error_banner.map(|b| b.message),
            Some("connection refused".to_string())
        );
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn query_ranges_finds_repeated_matches_case_insensitively() {
        assert_eq!(query_ranges("Loft loft LOFT", "loft"), vec![(0, 4), (5, 9), (10, 14)]);
        assert_eq!(query_ranges("Sunny loft", ""), Vec::<(usize, usize)>::new());
        assert_eq!(query_ranges("abc", "abcd"), Vec::<(usize, usize)>::new());
    }
}
