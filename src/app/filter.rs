//! Filter predicate engine over the raw listing set.
//!
//! This module implements the pure recompute at the heart of the browse
//! pipeline: given the current [`FilterCriteria`] and the full raw listing
//! vector, produce the filtered, sorted result vector. It is deterministic
//! and side-effect free, so the same inputs always yield the same output.
//!
//! # Filtering Algorithm
//!
//! 1. **Text query**: lowercase substring match against title, address, city,
//!    and county; the listing passes if ANY of them contains the query
//! 2. **Range dimensions**: price, rating, and guest capacity use inclusive
//!    bounds; failing any active dimension excludes the listing
//! 3. **Flag sets**: category and stay selections are OR within the
//!    dimension, AND across dimensions; an empty set passes everything
//! 4. **Counts**: bedroom/bathroom filters apply [`CountFilter`] semantics
//! 5. **Sort**: stable ordering per [`SortKey`]; `Recommended` keeps catalog
//!    order untouched

use crate::app::criteria::{CountFilter, FilterCriteria, SortKey};
use crate::domain::listing::{Listing, ListingKind};

/// Filters and sorts the raw listing set against the given criteria.
///
/// Returns a fresh vector; the input slice is never mutated. An empty input
/// or an all-excluded input yields an empty vector, not an error.
///
/// # Parameters
///
/// * `criteria` - Current filter/sort configuration
/// * `listings` - Full raw listing set from the catalog
///
/// # Tracing
///
/// Creates a debug-level span with the input size and query length, and logs
/// the result count when the recompute finishes.
///
/// # Example
///
/// ```
/// use keja::app::criteria::FilterCriteria;
/// use keja::app::filter::filter_listings;
///
/// let results = filter_listings(&FilterCriteria::default(), &[]);
/// assert!(results.is_empty());
/// ```
#[must_use]
pub fn filter_listings(criteria: &FilterCriteria, listings: &[Listing]) -> Vec<Listing> {
    let _span = tracing::debug_span!(
        "filter_listings",
        total_listings = listings.len(),
        query_len = criteria.query.len(),
        sort = ?criteria.sort
    )
    .entered();

    let query_lower = criteria.query.to_lowercase();

    let mut results: Vec<Listing> = listings
        .iter()
        .filter(|listing| matches_criteria(criteria, &query_lower, listing))
        .cloned()
        .collect();

    sort_results(criteria.sort, &mut results);

    tracing::debug!(filtered_count = results.len(), "filter recompute applied");

    results
}

/// Evaluates every active dimension against one listing.
///
/// Dimensions combine with AND: the listing must pass each active dimension
/// to be included. Inactive dimensions (defaults) pass everything.
fn matches_criteria(criteria: &FilterCriteria, query_lower: &str, listing: &Listing) -> bool {
    if !query_lower.is_empty() && !matches_query(query_lower, listing) {
        return false;
    }

    if criteria.price_min.is_some_and(|min| listing.price < min) {
        return false;
    }
    if criteria.price_max.is_some_and(|max| listing.price > max) {
        return false;
    }

    match listing.kind {
        ListingKind::Property { mode, category } => {
            if !criteria.categories.is_empty() && !criteria.categories.contains(&category) {
                return false;
            }
            if criteria.mode.is_some_and(|wanted| wanted != mode) {
                return false;
            }
            // A stay-type selection admits BNBs only.
            if !criteria.stays.is_empty() {
                return false;
            }
        }
        ListingKind::Bnb { stay } => {
            if !criteria.stays.is_empty() && !criteria.stays.contains(&stay) {
                return false;
            }
            // Category and buy/rent selections admit properties only.
            if !criteria.categories.is_empty() || criteria.mode.is_some() {
                return false;
            }
        }
    }

    if criteria
        .min_rating
        .is_some_and(|min| listing.rating < min)
    {
        return false;
    }

    if !criteria.beds.matches(listing.beds) {
        return false;
    }
    if !criteria.baths.matches(listing.baths) {
        return false;
    }

    if criteria
        .min_guests
        .is_some_and(|min| listing.guests < min)
    {
        return false;
    }

    if criteria.instant_book && !listing.instant_book {
        return false;
    }
    if criteria.featured && !listing.featured {
        return false;
    }

    true
}

/// Case-insensitive substring match over the searchable text fields.
///
/// The listing passes if the query appears in ANY of title, address, city,
/// or county. `query_lower` must already be lowercased.
fn matches_query(query_lower: &str, listing: &Listing) -> bool {
    listing.title.to_lowercase().contains(query_lower)
        || listing.location.address.to_lowercase().contains(query_lower)
        || listing.location.city.to_lowercase().contains(query_lower)
        || listing.location.county.to_lowercase().contains(query_lower)
}

/// Applies the sort key to the filtered results in place.
///
/// All orderings use a stable sort so ties keep their relative catalog
/// order. `Recommended` is a no-op: the catalog's own order stands.
fn sort_results(sort: SortKey, results: &mut [Listing]) {
    match sort {
        SortKey::Recommended => {}
        SortKey::PriceLow => results.sort_by_key(|listing| listing.price),
        SortKey::PriceHigh => results.sort_by_key(|listing| std::cmp::Reverse(listing.price)),
        SortKey::Rating => results.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortKey::Reviews => results.sort_by_key(|listing| std::cmp::Reverse(listing.reviews)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::criteria::CriteriaField;
    use crate::domain::listing::{
        Coordinates, Host, ListingId, Location, PropertyCategory, SaleMode, StayType,
    };
    use std::collections::HashSet;

    fn listing(id: &str) -> Listing {
        Listing {
            id: ListingId::new(id),
            title: format!("Listing {id}"),
            location: Location {
                address: "1 Test Lane".to_string(),
                city: "Nairobi".to_string(),
                county: "Nairobi County".to_string(),
                coords: Some(Coordinates { lat: -1.29, lng: 36.82 }),
            },
            price: 5000,
            kind: ListingKind::Bnb { stay: StayType::Apartment },
            beds: 2,
            baths: 1,
            guests: 4,
            amenities: vec![],
            rating: 4.0,
            reviews: 10,
            image_url: None,
            host: Host {
                name: "Host".to_string(),
                contact: "host@example.com".to_string(),
                verified: false,
            },
            listed_at: 0,
            instant_book: false,
            featured: false,
        }
    }

    fn priced(id: &str, price: u64) -> Listing {
        let mut l = listing(id);
        l.price = price;
        l
    }

    #[test]
    fn identity_with_default_criteria() {
        let listings = vec![priced("a", 3000), priced("b", 9000)];
        let results = filter_listings(&FilterCriteria::default(), &listings);
        assert_eq!(results, listings);
    }

    #[test]
    fn idempotent_under_repeated_application() {
        let listings = vec![priced("a", 3000), priced("b", 6000), priced("c", 9000)];
        let mut criteria = FilterCriteria::default();
        criteria.apply(CriteriaField::PriceMin(Some(4000)));

        let once = filter_listings(&criteria, &listings);
        let twice = filter_listings(&criteria, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn price_range_keeps_exactly_the_in_range_listings() {
        let listings = vec![
            priced("a", 3000),
            priced("b", 6000),
            priced("c", 8000),
            priced("d", 11000),
            priced("e", 9000),
        ];

        let mut criteria = FilterCriteria::default();
        criteria.apply(CriteriaField::PriceMin(Some(5000)));
        criteria.apply(CriteriaField::PriceMax(Some(10000)));

        let results = filter_listings(&criteria, &listings);
        let prices: Vec<u64> = results.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![6000, 8000, 9000]);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let listings = vec![priced("a", 5000), priced("b", 10000)];
        let mut criteria = FilterCriteria::default();
        criteria.apply(CriteriaField::PriceMin(Some(5000)));
        criteria.apply(CriteriaField::PriceMax(Some(10000)));

        assert_eq!(filter_listings(&criteria, &listings).len(), 2);
    }

    #[test]
    fn text_query_matches_any_searchable_field_case_insensitively() {
        let mut in_title = listing("a");
        in_title.title = "Karen Garden Cottage".to_string();

        let mut in_county = listing("b");
        in_county.location.county = "Karen".to_string();

        let mut elsewhere = listing("c");
        elsewhere.title = "Westlands Studio".to_string();
        elsewhere.location.city = "Westlands".to_string();
        elsewhere.location.county = "Nairobi West".to_string();

        let listings = vec![in_title, in_county, elsewhere];

        let mut criteria = FilterCriteria::default();
        criteria.apply(CriteriaField::Query("karen".to_string()));

        let results = filter_listings(&criteria, &listings);
        let ids: Vec<&str> = results.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn bedrooms_at_least_five_keeps_five_and_up() {
        let mut listings = vec![listing("a"), listing("b"), listing("c"), listing("d")];
        listings[0].beds = 3;
        listings[1].beds = 5;
        listings[2].beds = 6;
        listings[3].beds = 4;

        let mut criteria = FilterCriteria::default();
        criteria.apply(CriteriaField::Beds(CountFilter::AtLeast(5)));

        let results = filter_listings(&criteria, &listings);
        let beds: Vec<u32> = results.iter().map(|l| l.beds).collect();
        assert_eq!(beds, vec![5, 6]);
    }

    #[test]
    fn rating_sort_orders_descending() {
        let mut listings = vec![listing("a"), listing("b"), listing("c")];
        listings[0].rating = 4.2;
        listings[1].rating = 4.9;
        listings[2].rating = 4.5;

        let mut criteria = FilterCriteria::default();
        criteria.apply(CriteriaField::Sort(SortKey::Rating));

        let results = filter_listings(&criteria, &listings);
        let ratings: Vec<f32> = results.iter().map(|l| l.rating).collect();
        assert_eq!(ratings, vec![4.9, 4.5, 4.2]);
    }

    #[test]
    fn price_sorts_order_both_directions() {
        let listings = vec![priced("a", 8000), priced("b", 3000), priced("c", 5000)];

        let mut low = FilterCriteria::default();
        low.apply(CriteriaField::Sort(SortKey::PriceLow));
        let ascending: Vec<u64> = filter_listings(&low, &listings)
            .iter()
            .map(|l| l.price)
            .collect();
        assert_eq!(ascending, vec![3000, 5000, 8000]);

        let mut high = FilterCriteria::default();
        high.apply(CriteriaField::Sort(SortKey::PriceHigh));
        let descending: Vec<u64> = filter_listings(&high, &listings)
            .iter()
            .map(|l| l.price)
            .collect();
        assert_eq!(descending, vec![8000, 5000, 3000]);
    }

    #[test]
    fn reviews_sort_orders_descending() {
        let mut listings = vec![listing("a"), listing("b"), listing("c")];
        listings[0].reviews = 12;
        listings[1].reviews = 80;
        listings[2].reviews = 34;

        let mut criteria = FilterCriteria::default();
        criteria.apply(CriteriaField::Sort(SortKey::Reviews));

        let results = filter_listings(&criteria, &listings);
        let reviews: Vec<u32> = results.iter().map(|l| l.reviews).collect();
        assert_eq!(reviews, vec![80, 34, 12]);
    }

    #[test]
    fn recommended_preserves_catalog_order() {
        let listings = vec![priced("a", 9000), priced("b", 1000), priced("c", 5000)];
        let results = filter_listings(&FilterCriteria::default(), &listings);
        let ids: Vec<&str> = results.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn category_selection_is_or_within_the_dimension() {
        let mut house = listing("a");
        house.kind = ListingKind::Property {
            mode: SaleMode::Buy,
            category: PropertyCategory::House,
        };
        let mut land = listing("b");
        land.kind = ListingKind::Property {
            mode: SaleMode::Buy,
            category: PropertyCategory::Land,
        };
        let mut commercial = listing("c");
        commercial.kind = ListingKind::Property {
            mode: SaleMode::Buy,
            category: PropertyCategory::Commercial,
        };

        let listings = vec![house, land, commercial];

        let mut selected = HashSet::new();
        selected.insert(PropertyCategory::House);
        selected.insert(PropertyCategory::Land);

        let mut criteria = FilterCriteria::default();
        criteria.apply(CriteriaField::Categories(selected));

        let results = filter_listings(&criteria, &listings);
        let ids: Vec<&str> = results.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn dimensions_combine_with_and() {
        let mut cheap_low_rated = priced("a", 4000);
        cheap_low_rated.rating = 3.0;
        let mut cheap_high_rated = priced("b", 4500);
        cheap_high_rated.rating = 4.8;
        let mut pricey_high_rated = priced("c", 9000);
        pricey_high_rated.rating = 4.9;

        let listings = vec![cheap_low_rated, cheap_high_rated, pricey_high_rated];

        let mut criteria = FilterCriteria::default();
        criteria.apply(CriteriaField::PriceMax(Some(5000)));
        criteria.apply(CriteriaField::MinRating(Some(4.5)));

        let results = filter_listings(&criteria, &listings);
        let ids: Vec<&str> = results.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn stay_selection_excludes_properties() {
        let mut villa = listing("a");
        villa.kind = ListingKind::Bnb { stay: StayType::Villa };
        let mut house = listing("b");
        house.kind = ListingKind::Property {
            mode: SaleMode::Rent,
            category: PropertyCategory::House,
        };

        let listings = vec![villa, house];

        let mut stays = HashSet::new();
        stays.insert(StayType::Villa);

        let mut criteria = FilterCriteria::default();
        criteria.apply(CriteriaField::Stays(stays));

        let results = filter_listings(&criteria, &listings);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id.as_str(), "a");
    }

    #[test]
    fn empty_and_fully_excluded_inputs_yield_empty_results() {
        let criteria = FilterCriteria::default();
        assert!(filter_listings(&criteria, &[]).is_empty());

        let listings = vec![priced("a", 1000)];
        let mut strict = FilterCriteria::default();
        strict.apply(CriteriaField::PriceMin(Some(99_999)));
        assert!(filter_listings(&strict, &listings).is_empty());
    }

    #[test]
    fn boolean_flags_restrict_when_set() {
        let mut instant = listing("a");
        instant.instant_book = true;
        let normal = listing("b");

        let listings = vec![instant, normal];

        let mut criteria = FilterCriteria::default();
        criteria.apply(CriteriaField::InstantBook(true));

        let results = filter_listings(&criteria, &listings);
        assert_eq!(results.len(), 1);
        assert!(results[0].instant_book);
    }
}
