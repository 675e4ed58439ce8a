//! Static file catalog backend.
//!
//! [`FileCatalog`] reads listings from a JSON file on disk. It accepts both
//! the backend envelope shape and a bare record array, so a captured API
//! response and a hand-written fixture both work unmodified. Prefilter fields
//! on the request are applied in memory after decoding.

use crate::catalog::envelope::{decode_document, CatalogDocument};
use crate::catalog::source::{CatalogRequest, CatalogSource, ListingFamily};
use crate::domain::error::{KejaError, Result};
use crate::domain::listing::Listing;
use async_trait::async_trait;
use std::path::PathBuf;

/// Catalog source backed by a static JSON file.
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    /// Creates a catalog over the given JSON file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Applies the request's prefilter fields to a decoded batch.
    ///
    /// The HTTP backend narrows server-side; the file backend mirrors that
    /// narrowing here so both sources honor the same request contract.
    fn apply_request(request: &CatalogRequest, listings: Vec<Listing>) -> Vec<Listing> {
        let mut listings: Vec<Listing> = listings
            .into_iter()
            .filter(|listing| {
                let family_ok = match request.family {
                    Some(ListingFamily::Properties) => listing.is_property(),
                    Some(ListingFamily::Bnbs) => listing.is_bnb(),
                    None => true,
                };

                let city_ok = request
                    .city
                    .as_ref()
                    .is_none_or(|city| listing.location.city.eq_ignore_ascii_case(city));

                family_ok && city_ok
            })
            .collect();

        if let Some(limit) = request.limit {
            listings.truncate(limit as usize);
        }

        listings
    }
}

#[async_trait]
impl CatalogSource for FileCatalog {
    async fn fetch(&self, request: &CatalogRequest) -> Result<Vec<Listing>> {
        tracing::debug!(path = %self.path.display(), "reading catalog file");

        let raw = tokio::fs::read_to_string(&self.path).await?;
        let document: CatalogDocument =
            serde_json::from_str(&raw).map_err(|e| KejaError::Catalog(e.to_string()))?;

        let listings = Self::apply_request(request, decode_document(document)?);
        tracing::debug!(count = listings.len(), "catalog file decoded");

        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "file"
    }
}
