//! Catalog wire format and lenient record decoding.
//!
//! The backend wraps listing payloads in a `{ success, data, message }`
//! envelope; static catalog files may carry either the envelope or a bare
//! array. Individual records are decoded leniently: a record missing its id,
//! title, or price is malformed and dropped with a warning, while every other
//! field falls back to a sensible default. One bad record never poisons the
//! rest of the batch.

use crate::domain::error::{KejaError, Result};
use crate::domain::listing::{
    Coordinates, Host, Listing, ListingId, ListingKind, Location, PropertyCategory, SaleMode,
    StayType,
};
use serde::Deserialize;

/// Response envelope returned by the REST backend.
#[derive(Debug, Deserialize)]
pub struct CatalogEnvelope {
    /// Whether the backend considers the request successful.
    pub success: bool,

    /// Raw listing records. Absent on failure responses.
    #[serde(default)]
    pub data: Vec<RawListing>,

    /// Backend-provided failure detail.
    #[serde(default)]
    pub message: Option<String>,
}

/// Either wire shape a catalog document may take.
///
/// HTTP responses always use the envelope; static files are allowed to be a
/// bare array of records.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CatalogDocument {
    /// Full `{ success, data, message }` envelope.
    Envelope(CatalogEnvelope),

    /// Bare array of records.
    Bare(Vec<RawListing>),
}

/// A listing record as it appears on the wire, before validation.
///
/// Every field is optional or defaulted so that decoding a batch never fails
/// on a single sloppy record. [`RawListing::validate`] decides which records
/// survive.
#[derive(Debug, Deserialize)]
pub struct RawListing {
    pub id: Option<String>,
    pub title: Option<String>,
    pub price: Option<u64>,

    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub county: String,

    pub lat: Option<f64>,
    pub lng: Option<f64>,

    /// Family discriminator: "property" or "bnb".
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Sale mode for property records.
    pub mode: Option<SaleMode>,

    /// Category for property records.
    pub category: Option<PropertyCategory>,

    /// Stay type for BNB records.
    pub stay: Option<StayType>,

    #[serde(default)]
    pub beds: u32,
    #[serde(default)]
    pub baths: u32,
    #[serde(default)]
    pub guests: u32,

    #[serde(default)]
    pub amenities: Vec<String>,

    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub reviews: u32,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub host_name: String,
    #[serde(default)]
    pub host_contact: String,
    #[serde(default)]
    pub host_verified: bool,

    #[serde(default)]
    pub listed_at: i64,

    #[serde(default)]
    pub instant_book: bool,
    #[serde(default)]
    pub featured: bool,
}

impl RawListing {
    /// Validates the record into a domain [`Listing`].
    ///
    /// Returns `None` when the record lacks an id, a title, or a price, or
    /// when its family cannot be determined. Coordinates are kept only when
    /// both components are present.
    fn validate(self) -> Option<Listing> {
        let kind = self.resolve_kind()?;

        let id = self.id?;
        let title = self.title?;
        let price = self.price?;

        let coords = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        };

        Some(Listing {
            id: ListingId::new(id),
            title,
            location: Location {
                address: self.address,
                city: self.city,
                county: self.county,
                coords,
            },
            price,
            kind,
            beds: self.beds,
            baths: self.baths,
            guests: self.guests,
            amenities: self.amenities,
            rating: self.rating,
            reviews: self.reviews,
            image_url: self.image_url,
            host: Host {
                name: self.host_name,
                contact: self.host_contact,
                verified: self.host_verified,
            },
            listed_at: self.listed_at,
            instant_book: self.instant_book,
            featured: self.featured,
        })
    }

    /// Resolves the family discriminator into a [`ListingKind`].
    ///
    /// A missing `type` field is inferred from the presence of a stay type;
    /// an unrecognized `type` value makes the record malformed.
    fn resolve_kind(&self) -> Option<ListingKind> {
        match self.kind.as_deref() {
            Some("property") => Some(ListingKind::Property {
                mode: self.mode.unwrap_or(SaleMode::Rent),
                category: self.category.unwrap_or(PropertyCategory::Apartment),
            }),
            Some("bnb") => Some(ListingKind::Bnb {
                stay: self.stay.unwrap_or(StayType::Apartment),
            }),
            Some(_) => None,
            None if self.stay.is_some() => Some(ListingKind::Bnb {
                stay: self.stay.unwrap_or(StayType::Apartment),
            }),
            None => Some(ListingKind::Property {
                mode: self.mode.unwrap_or(SaleMode::Rent),
                category: self.category.unwrap_or(PropertyCategory::Apartment),
            }),
        }
    }
}

/// Decodes an envelope into validated listings.
///
/// # Errors
///
/// Returns [`KejaError::Catalog`] when the envelope reports failure. The
/// backend's message is passed through when present.
pub fn decode_envelope(envelope: CatalogEnvelope) -> Result<Vec<Listing>> {
    if !envelope.success {
        let message = envelope
            .message
            .unwrap_or_else(|| "backend reported failure".to_string());
        return Err(KejaError::Catalog(message));
    }

    Ok(validate_records(envelope.data))
}

/// Decodes either wire shape into validated listings.
///
/// # Errors
///
/// Returns [`KejaError::Catalog`] when an envelope reports failure. A bare
/// array has no failure channel and always decodes.
pub fn decode_document(document: CatalogDocument) -> Result<Vec<Listing>> {
    match document {
        CatalogDocument::Envelope(envelope) => decode_envelope(envelope),
        CatalogDocument::Bare(records) => Ok(validate_records(records)),
    }
}

/// Runs record validation over a batch, dropping malformed entries.
fn validate_records(records: Vec<RawListing>) -> Vec<Listing> {
    let total = records.len();
    let listings: Vec<Listing> = records.into_iter().filter_map(RawListing::validate).collect();

    let dropped = total - listings.len();
    if dropped > 0 {
        tracing::warn!(dropped, kept = listings.len(), "malformed catalog records dropped");
    }

    listings
}
