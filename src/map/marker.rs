//! Marker projection from the filtered listing set.
//!
//! This module projects the filtered listings into the marker descriptors the
//! map surface consumes. Markers are derived, ephemeral values: they are
//! recomputed from scratch whenever the filtered set changes and are never
//! cached or diffed against a previous projection.
//!
//! Listings without coordinates are silently excluded from the projection;
//! they still appear in the list view.

use crate::domain::listing::{Coordinates, Listing, ListingId};

/// Denormalized payload for a marker's info window.
///
/// Built fresh on every projection so the info card always reflects the
/// current listing data. Nothing here is looked up lazily at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoCard {
    /// Primary image URL, if the listing has one.
    pub image_url: Option<String>,

    /// Listing headline.
    pub title: String,

    /// Combined address/city label.
    pub location_label: String,

    /// Average review rating.
    pub rating: f32,

    /// Number of reviews behind the rating.
    pub reviews: u32,

    /// Formatted price label (e.g. "KES 7,500").
    pub price_label: String,
}

/// A map marker for one filtered listing.
///
/// Keyed by listing id so the selection coordinator can link marker gestures
/// back to list rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Id of the listing this marker represents.
    pub id: ListingId,

    /// Geographic position.
    pub position: Coordinates,

    /// Listing headline (marker tooltip).
    pub title: String,

    /// Info-window payload.
    pub info: InfoCard,
}

/// Projects the filtered listing set into marker descriptors.
///
/// Listings without coordinates are skipped, so the returned vector is never
/// longer than the input. Order follows the filtered set.
///
/// # Tracing
///
/// Logs the projected and skipped counts at debug level.
///
/// # Example
///
/// ```
/// use keja::map::marker::project_markers;
///
/// let markers = project_markers(&[]);
/// assert!(markers.is_empty());
/// ```
#[must_use]
pub fn project_markers(filtered: &[Listing]) -> Vec<Marker> {
    let _span = tracing::debug_span!("project_markers", filtered_count = filtered.len()).entered();

    let markers: Vec<Marker> = filtered
        .iter()
        .filter_map(|listing| {
            let position = listing.location.coords?;

            Some(Marker {
                id: listing.id.clone(),
                position,
                title: listing.title.clone(),
                info: InfoCard {
                    image_url: listing.image_url.clone(),
                    title: listing.title.clone(),
                    location_label: listing.location.label(),
                    rating: listing.rating,
                    reviews: listing.reviews,
                    price_label: listing.price_label(),
                },
            })
        })
        .collect();

    tracing::debug!(
        marker_count = markers.len(),
        skipped = filtered.len() - markers.len(),
        "markers projected"
    );

    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::{Host, ListingKind, Location, StayType};

    fn listing(id: &str, coords: Option<Coordinates>) -> Listing {
        Listing {
            id: ListingId::new(id),
            title: format!("Listing {id}"),
            location: Location {
                address: "8 Ridge Rd".to_string(),
                city: "Mombasa".to_string(),
                county: "Mombasa County".to_string(),
                coords,
            },
            price: 7500,
            kind: ListingKind::Bnb { stay: StayType::Villa },
            beds: 2,
            baths: 2,
            guests: 4,
            amenities: vec![],
            rating: 4.4,
            reviews: 12,
            image_url: Some("https://img.example/1.jpg".to_string()),
            host: Host {
                name: "Juma".to_string(),
                contact: "juma@example.com".to_string(),
                verified: true,
            },
            listed_at: 0,
            instant_book: false,
            featured: false,
        }
    }

    #[test]
    fn coordinate_less_listings_never_project() {
        let filtered = vec![
            listing("a", Some(Coordinates { lat: -4.05, lng: 39.67 })),
            listing("b", None),
            listing("c", Some(Coordinates { lat: -4.06, lng: 39.66 })),
        ];

        let markers = project_markers(&filtered);
        assert_eq!(markers.len(), 2);
        assert!(markers.len() <= filtered.len());

        let ids: Vec<&str> = markers.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn info_card_is_denormalized_from_the_listing() {
        let filtered = vec![listing("a", Some(Coordinates { lat: -4.05, lng: 39.67 }))];
        let markers = project_markers(&filtered);

        let info = &markers[0].info;
        assert_eq!(info.title, "Listing a");
        assert_eq!(info.location_label, "8 Ridge Rd, Mombasa");
        assert_eq!(info.price_label, "KES 7,500");
        assert_eq!(info.reviews, 12);
        assert_eq!(info.image_url.as_deref(), Some("https://img.example/1.jpg"));
    }

    #[test]
    fn projection_is_rebuilt_fresh_each_time() {
        let mut filtered = vec![listing("a", Some(Coordinates { lat: 0.0, lng: 0.0 }))];
        let first = project_markers(&filtered);
        assert_eq!(first[0].info.price_label, "KES 7,500");

        filtered[0].price = 9000;
        let second = project_markers(&filtered);
        assert_eq!(second[0].info.price_label, "KES 9,000");
    }
}
