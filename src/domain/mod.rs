//! Domain layer for the keja browsing engine.
//!
//! This module contains the core domain types and business rules, independent
//! of transport and infrastructure concerns. It follows domain-driven design
//! principles by keeping the listing model isolated from external dependencies.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`listing`]: Listing domain model and operations
//!
//! # Examples
//!
//! ```
//! use keja::domain::{Listing, Result};
//!
//! fn first_featured(listings: &[Listing]) -> Option<&Listing> {
//!     listings.iter().find(|l| l.featured)
//! }
//! ```

pub mod error;
pub mod listing;

pub use error::{KejaError, Result};
pub use listing::{
    Coordinates, Host, Listing, ListingId, ListingKind, Location, PropertyCategory, SaleMode,
    StayType,
};
