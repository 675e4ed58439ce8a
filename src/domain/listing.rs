//! Listing domain model and operations.
//!
//! This module defines the core `Listing` type representing a property or BNB
//! record in the browse catalog. Listings carry everything the filter engine,
//! list view, and map projection need: location with optional coordinates,
//! price, capacity, rating, and host details.

use serde::{Deserialize, Serialize};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Stable listing identifier, unique within one catalog.
///
/// Wraps the backend's string id. Identifiers are opaque; nothing in the
/// engine parses or orders them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub String);

impl ListingId {
    /// Creates a listing id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ListingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Geographic position of a listing.
///
/// Both components are always present. Records arriving with only one
/// coordinate are treated as having none at the decode boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

/// Where a listing is located.
///
/// Coordinates are optional: listings without them still appear in the list
/// view but are excluded from the map projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Street address line.
    pub address: String,

    /// City or town name.
    pub city: String,

    /// County or region name.
    pub county: String,

    /// Geographic position, if the catalog provided one.
    pub coords: Option<Coordinates>,
}

impl Location {
    /// Returns a single display label combining address and city.
    ///
    /// # Examples
    ///
    /// ```
    /// use keja::domain::listing::Location;
    ///
    /// let loc = Location {
    ///     address: "12 Riverside Dr".to_string(),
    ///     city: "Nakuru".to_string(),
    ///     county: "Nakuru County".to_string(),
    ///     coords: None,
    /// };
    /// assert_eq!(loc.label(), "12 Riverside Dr, Nakuru");
    /// ```
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}, {}", self.address, self.city)
    }
}

/// Whether a property listing is for sale or for rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleMode {
    /// Listed for purchase.
    Buy,
    /// Listed for rental.
    Rent,
}

/// Property category for long-term listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    House,
    Apartment,
    Land,
    Commercial,
}

/// Stay type for short-term BNB listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StayType {
    Studio,
    Apartment,
    Villa,
    Cottage,
    Loft,
}

/// Discriminates the two listing families carried by the catalog.
///
/// Properties are long-term sale/rental records with a category; BNBs are
/// short-term stays with a stay type. The two browsing screens share the same
/// pipeline and differ only in which kinds their criteria admit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListingKind {
    /// Long-term property listing.
    Property {
        /// Sale or rental.
        mode: SaleMode,
        /// Property category.
        category: PropertyCategory,
    },

    /// Short-term BNB listing.
    Bnb {
        /// Stay type.
        stay: StayType,
    },
}

/// Host details attached to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    /// Display name of the host.
    pub name: String,

    /// Contact handle (phone or email, backend-formatted).
    pub contact: String,

    /// Whether the host passed identity verification.
    pub verified: bool,
}

/// A property or BNB record in the browse catalog.
///
/// Listings are immutable once decoded; the filter engine clones them into
/// result vectors and the map projection derives markers from them. All
/// validation happens at the catalog decode boundary, so a constructed
/// `Listing` always has an id, a title, and a price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Stable identifier, unique within one catalog.
    pub id: ListingId,

    /// Headline shown in list rows and marker info cards.
    pub title: String,

    /// Address, city, county, and optional coordinates.
    pub location: Location,

    /// Price in the catalog's consistent unit (KES for sale price or
    /// nightly/monthly rate depending on kind).
    pub price: u64,

    /// Property-vs-BNB discriminator with per-family detail.
    pub kind: ListingKind,

    /// Number of bedrooms.
    pub beds: u32,

    /// Number of bathrooms.
    pub baths: u32,

    /// Maximum guest capacity (meaningful for BNBs, 0 allowed elsewhere).
    pub guests: u32,

    /// Free-text amenity labels (e.g. "wifi", "parking").
    pub amenities: Vec<String>,

    /// Average review rating, 0.0 when unrated.
    pub rating: f32,

    /// Number of reviews behind the rating.
    pub reviews: u32,

    /// Primary image URL for the info card.
    pub image_url: Option<String>,

    /// Host details.
    pub host: Host,

    /// Unix timestamp when the listing was published.
    pub listed_at: i64,

    /// Whether the listing can be booked without host confirmation.
    pub instant_book: bool,

    /// Whether the backend flagged the listing as featured.
    pub featured: bool,
}

impl Listing {
    /// Returns a human-readable string describing how long ago the listing
    /// was published.
    ///
    /// The format varies based on the time elapsed:
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago" (e.g., "5m ago")
    /// - Less than 1 day: "Xh ago" (e.g., "3h ago")
    /// - 1 day or more: "Xd ago" (e.g., "7d ago")
    #[must_use]
    pub fn listed_ago(&self) -> String {
        let now = chrono::Utc::now().timestamp();
        let diff = now - self.listed_at;

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            let mins = diff / SECONDS_PER_MINUTE;
            format!("{mins}m ago")
        } else if diff < SECONDS_PER_DAY {
            let hours = diff / SECONDS_PER_HOUR;
            format!("{hours}h ago")
        } else {
            let days = diff / SECONDS_PER_DAY;
            format!("{days}d ago")
        }
    }

    /// Returns the price formatted for display, with thousands separators.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keja::domain::listing::*;
    /// # let mut listing = Listing {
    /// #     id: ListingId::new("x"), title: String::new(),
    /// #     location: Location { address: String::new(), city: String::new(), county: String::new(), coords: None },
    /// #     price: 1250000, kind: ListingKind::Bnb { stay: StayType::Studio },
    /// #     beds: 0, baths: 0, guests: 0, amenities: vec![], rating: 0.0, reviews: 0,
    /// #     image_url: None, host: Host { name: String::new(), contact: String::new(), verified: false },
    /// #     listed_at: 0, instant_book: false, featured: false,
    /// # };
    /// assert_eq!(listing.price_label(), "KES 1,250,000");
    /// ```
    #[must_use]
    pub fn price_label(&self) -> String {
        let digits = self.price.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        format!("KES {grouped}")
    }

    /// Returns true when the listing belongs to the long-term property family.
    #[must_use]
    pub const fn is_property(&self) -> bool {
        matches!(self.kind, ListingKind::Property { .. })
    }

    /// Returns true when the listing belongs to the short-term BNB family.
    #[must_use]
    pub const fn is_bnb(&self) -> bool {
        matches!(self.kind, ListingKind::Bnb { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_listing() -> Listing {
        Listing {
            id: ListingId::new("L-1"),
            title: "Sunny loft".to_string(),
            location: Location {
                address: "5 Moi Ave".to_string(),
                city: "Nairobi".to_string(),
                county: "Nairobi County".to_string(),
                coords: Some(Coordinates { lat: -1.28, lng: 36.82 }),
            },
            price: 7500,
            kind: ListingKind::Bnb { stay: StayType::Loft },
            beds: 1,
            baths: 1,
            guests: 2,
            amenities: vec!["wifi".to_string()],
            rating: 4.6,
            reviews: 31,
            image_url: None,
            host: Host {
                name: "Amina".to_string(),
                contact: "amina@example.com".to_string(),
                verified: true,
            },
            listed_at: chrono::Utc::now().timestamp(),
            instant_book: true,
            featured: false,
        }
    }

    #[test]
    fn listed_ago_formats_recent_and_old() {
        let mut listing = sample_listing();
        assert_eq!(listing.listed_ago(), "just now");

        listing.listed_at = chrono::Utc::now().timestamp() - 5 * SECONDS_PER_MINUTE;
        assert_eq!(listing.listed_ago(), "5m ago");

        listing.listed_at = chrono::Utc::now().timestamp() - 3 * SECONDS_PER_HOUR;
        assert_eq!(listing.listed_ago(), "3h ago");

        listing.listed_at = chrono::Utc::now().timestamp() - 7 * SECONDS_PER_DAY;
        assert_eq!(listing.listed_ago(), "7d ago");
    }

    #[test]
    fn kind_predicates_distinguish_families() {
        let bnb = sample_listing();
        assert!(bnb.is_bnb());
        assert!(!bnb.is_property());

        let mut property = sample_listing();
        property.kind = ListingKind::Property {
            mode: SaleMode::Rent,
            category: PropertyCategory::Apartment,
        };
        assert!(property.is_property());
    }

    #[test]
    fn price_label_groups_thousands() {
        let mut listing = sample_listing();
        listing.price = 850;
        assert_eq!(listing.price_label(), "KES 850");

        listing.price = 7500;
        assert_eq!(listing.price_label(), "KES 7,500");

        listing.price = 1_250_000;
        assert_eq!(listing.price_label(), "KES 1,250,000");
    }

    #[test]
    fn listing_id_is_transparent_in_json() {
        let id = ListingId::new("L-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"L-42\"");

        let back: ListingId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
