//! Catalog source abstraction.
//!
//! This module defines the [`CatalogSource`] trait that abstracts over where
//! raw listings come from. The browse core only ever sees a fetched
//! `Vec<Listing>`; whether it arrived over HTTP or from a static JSON file is
//! a driver concern.

use crate::domain::error::Result;
use crate::domain::listing::Listing;
use async_trait::async_trait;

/// Which listing family a fetch targets.
///
/// The Properties and BNBs screens share the pipeline but fetch their own
/// family so the raw set stays small.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFamily {
    /// Long-term property listings.
    Properties,
    /// Short-term BNB listings.
    Bnbs,
}

/// Server-side prefilter parameters for a catalog fetch.
///
/// These narrow the raw set before the client-side filter engine runs; the
/// engine itself never depends on them. All fields are optional and omitted
/// from the query string when unset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogRequest {
    /// Restrict the fetch to one listing family.
    pub family: Option<ListingFamily>,

    /// Restrict the fetch to one city.
    pub city: Option<String>,

    /// Cap the number of returned records.
    pub limit: Option<u32>,
}

/// Abstraction over raw-listing providers.
///
/// # Implementations
///
/// - [`HttpCatalog`](crate::catalog::HttpCatalog): REST backend over reqwest
/// - [`FileCatalog`](crate::catalog::FileCatalog): static JSON catalog file
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches raw listings matching the request.
    ///
    /// Malformed records are excluded by the decode layer; the returned
    /// vector contains only fully valid listings.
    ///
    /// # Errors
    ///
    /// Returns an error when the transport fails or the backend reports
    /// failure in its response envelope.
    async fn fetch(&self, request: &CatalogRequest) -> Result<Vec<Listing>>;

    /// Short name identifying the source in logs.
    fn source_name(&self) -> &'static str;
}
