//! Filter criteria state for the browse screens.
//!
//! This module defines [`FilterCriteria`], the single source of truth for the
//! current search/filter/sort configuration shared by the list and map panes.
//! Criteria are created with defaults on screen mount, mutated exclusively
//! through [`FilterCriteria::apply`], and discarded when the screen unmounts;
//! only the committed text query survives the session via the recents store.
//!
//! # Design
//!
//! Every widget on the filter bar maps to exactly one [`CriteriaField`]
//! variant. The event handler applies field updates and arms the debounce
//! gate; nothing else mutates criteria, so the filter engine always sees a
//! consistent snapshot.

use crate::domain::listing::{PropertyCategory, SaleMode, StayType};
use std::collections::HashSet;

/// Bedroom/bathroom count filter with an "N+" sentinel.
///
/// The filter bar offers discrete counts plus a trailing "N+" option meaning
/// "N or more". `Any` is the unselected state and passes everything.
///
/// # Examples
///
/// ```
/// use keja::app::criteria::CountFilter;
///
/// assert!(CountFilter::Any.matches(0));
/// assert!(CountFilter::Exact(3).matches(3));
/// assert!(!CountFilter::Exact(3).matches(4));
/// assert!(CountFilter::AtLeast(5).matches(6));
/// assert!(!CountFilter::AtLeast(5).matches(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountFilter {
    /// No constraint; every count passes.
    #[default]
    Any,

    /// Exactly this many.
    Exact(u32),

    /// This many or more (the "N+" option).
    AtLeast(u32),
}

impl CountFilter {
    /// Returns true when `count` satisfies the filter.
    #[must_use]
    pub const fn matches(self, count: u32) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

/// Result ordering applied after filtering.
///
/// `Recommended` is the default and preserves catalog order; the engine never
/// reorders under it. All other keys use a stable sort so ties keep their
/// relative catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Backend-recommended order (catalog order, no reordering).
    #[default]
    Recommended,

    /// Cheapest first.
    PriceLow,

    /// Most expensive first.
    PriceHigh,

    /// Highest rating first.
    Rating,

    /// Most reviewed first.
    Reviews,
}

/// Single-field mutation applied to [`FilterCriteria`].
///
/// Each variant replaces one criteria field and leaves all others untouched.
/// Widgets construct the variant for their field; the event handler routes it
/// through [`FilterCriteria::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum CriteriaField {
    /// Free-text query matched against title, address, city, and county.
    Query(String),
    /// Inclusive lower price bound, `None` to clear.
    PriceMin(Option<u64>),
    /// Inclusive upper price bound, `None` to clear.
    PriceMax(Option<u64>),
    /// Selected property categories; empty set passes all.
    Categories(HashSet<PropertyCategory>),
    /// Selected BNB stay types; empty set passes all.
    Stays(HashSet<StayType>),
    /// Buy/rent selection, `None` for both.
    Mode(Option<SaleMode>),
    /// Minimum average rating, `None` to clear.
    MinRating(Option<f32>),
    /// Bedroom count filter.
    Beds(CountFilter),
    /// Bathroom count filter.
    Baths(CountFilter),
    /// Minimum guest capacity, `None` to clear.
    MinGuests(Option<u32>),
    /// Restrict to instant-bookable listings.
    InstantBook(bool),
    /// Restrict to featured listings.
    Featured(bool),
    /// Result ordering.
    Sort(SortKey),
}

/// Complete filter/sort configuration for one browse screen.
///
/// Holds every dimension the filter bar exposes. The struct is a plain value
/// object: no validation happens here (numeric widgets clamp structurally)
/// and no field is persisted beyond the session.
///
/// # Examples
///
/// ```
/// use keja::app::criteria::{CriteriaField, FilterCriteria, SortKey};
///
/// let mut criteria = FilterCriteria::default();
/// criteria.apply(CriteriaField::Query("karen".to_string()));
/// criteria.apply(CriteriaField::Sort(SortKey::PriceLow));
/// assert_eq!(criteria.active_filter_count(), 2);
///
/// criteria.reset();
/// assert_eq!(criteria, FilterCriteria::default());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    /// Free-text query, empty when inactive.
    pub query: String,

    /// Inclusive lower price bound.
    pub price_min: Option<u64>,

    /// Inclusive upper price bound.
    pub price_max: Option<u64>,

    /// Selected property categories (OR within the set, empty passes all).
    pub categories: HashSet<PropertyCategory>,

    /// Selected stay types (OR within the set, empty passes all).
    pub stays: HashSet<StayType>,

    /// Buy/rent selection, `None` admits both.
    pub mode: Option<SaleMode>,

    /// Minimum average rating (inclusive).
    pub min_rating: Option<f32>,

    /// Bedroom count filter.
    pub beds: CountFilter,

    /// Bathroom count filter.
    pub baths: CountFilter,

    /// Minimum guest capacity (inclusive).
    pub min_guests: Option<u32>,

    /// Only instant-bookable listings when set.
    pub instant_book: bool,

    /// Only featured listings when set.
    pub featured: bool,

    /// Result ordering.
    pub sort: SortKey,
}

impl FilterCriteria {
    /// Replaces a single field, leaving all others untouched.
    pub fn apply(&mut self, field: CriteriaField) {
        match field {
            CriteriaField::Query(query) => self.query = query,
            CriteriaField::PriceMin(min) => self.price_min = min,
            CriteriaField::PriceMax(max) => self.price_max = max,
            CriteriaField::Categories(categories) => self.categories = categories,
            CriteriaField::Stays(stays) => self.stays = stays,
            CriteriaField::Mode(mode) => self.mode = mode,
            CriteriaField::MinRating(rating) => self.min_rating = rating,
            CriteriaField::Beds(beds) => self.beds = beds,
            CriteriaField::Baths(baths) => self.baths = baths,
            CriteriaField::MinGuests(guests) => self.min_guests = guests,
            CriteriaField::InstantBook(flag) => self.instant_book = flag,
            CriteriaField::Featured(flag) => self.featured = flag,
            CriteriaField::Sort(sort) => self.sort = sort,
        }
    }

    /// Restores every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Counts fields differing from their defaults.
    ///
    /// Used for the "N filters active" badge. The text query and the sort key
    /// both count; a cleared query or `Recommended` sort does not.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        let mut count = 0;

        if !self.query.is_empty() {
            count += 1;
        }
        if self.price_min.is_some() {
            count += 1;
        }
        if self.price_max.is_some() {
            count += 1;
        }
        if !self.categories.is_empty() {
            count += 1;
        }
        if !self.stays.is_empty() {
            count += 1;
        }
        if self.mode.is_some() {
            count += 1;
        }
        if self.min_rating.is_some() {
            count += 1;
        }
        if self.beds != CountFilter::Any {
            count += 1;
        }
        if self.baths != CountFilter::Any {
            count += 1;
        }
        if self.min_guests.is_some() {
            count += 1;
        }
        if self.instant_book {
            count += 1;
        }
        if self.featured {
            count += 1;
        }
        if self.sort != SortKey::Recommended {
            count += 1;
        }

        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_all_inactive() {
        let criteria = FilterCriteria::default();
        assert_eq!(criteria.active_filter_count(), 0);
        assert_eq!(criteria.sort, SortKey::Recommended);
        assert_eq!(criteria.beds, CountFilter::Any);
    }

    #[test]
    fn apply_replaces_only_the_named_field() {
        let mut criteria = FilterCriteria::default();
        criteria.apply(CriteriaField::PriceMin(Some(5000)));

        assert_eq!(criteria.price_min, Some(5000));
        assert_eq!(criteria.price_max, None);
        assert!(criteria.query.is_empty());
        assert_eq!(criteria.active_filter_count(), 1);

        criteria.apply(CriteriaField::PriceMin(None));
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut criteria = FilterCriteria::default();
        criteria.apply(CriteriaField::Query("westlands".to_string()));
        criteria.apply(CriteriaField::Beds(CountFilter::AtLeast(5)));
        criteria.apply(CriteriaField::InstantBook(true));
        assert_eq!(criteria.active_filter_count(), 3);

        criteria.reset();
        assert_eq!(criteria, FilterCriteria::default());
        assert_eq!(criteria.active_filter_count(), 0);
    }

    #[test]
    fn count_filter_sentinel_semantics() {
        assert!(CountFilter::AtLeast(5).matches(5));
        assert!(CountFilter::AtLeast(5).matches(9));
        assert!(!CountFilter::AtLeast(5).matches(4));
        assert!(CountFilter::Exact(2).matches(2));
        assert!(!CountFilter::Exact(2).matches(3));
        assert!(CountFilter::Any.matches(u32::MAX));
    }
}
