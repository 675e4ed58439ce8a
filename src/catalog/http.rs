//! REST catalog backend.
//!
//! [`HttpCatalog`] fetches raw listings from the marketplace REST API. The
//! request's prefilter fields become query parameters; the response is the
//! standard `{ success, data, message }` envelope decoded by the envelope
//! layer.

use crate::catalog::envelope::{decode_envelope, CatalogEnvelope};
use crate::catalog::source::{CatalogRequest, CatalogSource, ListingFamily};
use crate::domain::error::Result;
use crate::domain::listing::Listing;
use async_trait::async_trait;

/// Catalog source backed by the marketplace REST API.
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Creates a catalog client against the given base URL.
    ///
    /// The base URL should not end with a slash; the listings path is
    /// appended verbatim.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Builds the query pairs for a request, omitting unset fields.
    fn query_pairs(request: &CatalogRequest) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(family) = request.family {
            let value = match family {
                ListingFamily::Properties => "property",
                ListingFamily::Bnbs => "bnb",
            };
            pairs.push(("type", value.to_string()));
        }

        if let Some(city) = &request.city {
            pairs.push(("city", city.clone()));
        }

        if let Some(limit) = request.limit {
            pairs.push(("limit", limit.to_string()));
        }

        pairs
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch(&self, request: &CatalogRequest) -> Result<Vec<Listing>> {
        let url = format!("{}/api/listings", self.base_url);
        let pairs = Self::query_pairs(request);

        tracing::debug!(%url, params = pairs.len(), "fetching catalog");

        let envelope: CatalogEnvelope = self
            .client
            .get(&url)
            .query(&pairs)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let listings = decode_envelope(envelope)?;
        tracing::debug!(count = listings.len(), "catalog fetched");

        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
