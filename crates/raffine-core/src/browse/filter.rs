//! Filter/sort engine over the catalog.
//!
//! Pure functions: no I/O, no pagination. Predicates compose with AND; the
//! service-type and rating predicates are OR across their selected sets.

use std::collections::BTreeSet;
use strum::{Display, EnumIter, EnumString};

use crate::listing::ServiceListing;

/// Inclusive numeric price bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Accepts every listing, including ones with no numeric price.
    pub fn unbounded() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Transient query state owned by one browsing session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    /// Case-insensitive substring over name, description and category.
    pub search: String,
    /// Exact category match; `None` disables the predicate.
    pub category: Option<String>,
    pub price: PriceRange,
    /// Empty means every service type passes.
    pub service_types: BTreeSet<String>,
    /// A listing passes if its rating meets any threshold; empty passes all.
    pub min_ratings: Vec<f64>,
}

impl FilterState {
    /// The sidebar preset the storefront opens with.
    pub fn storefront() -> Self {
        Self {
            search: String::new(),
            category: None,
            price: PriceRange::new(50.0, 500.0),
            service_types: BTreeSet::from(["Spa & Massage".to_string()]),
            min_ratings: vec![4.0],
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price(mut self, min: f64, max: f64) -> Self {
        self.price = PriceRange::new(min, max);
        self
    }

    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_types.insert(service_type.into());
        self
    }

    pub fn with_min_rating(mut self, threshold: f64) -> Self {
        self.min_ratings.push(threshold);
        self
    }

    /// Whether `listing` satisfies every active predicate.
    pub fn matches(&self, listing: &ServiceListing) -> bool {
        self.matches_search(listing)
            && self.matches_category(listing)
            && self.matches_service_type(listing)
            && self.price.contains(listing.price_key())
            && self.matches_rating(listing)
    }

    fn matches_search(&self, listing: &ServiceListing) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        [&listing.name, &listing.description, &listing.category]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_category(&self, listing: &ServiceListing) -> bool {
        self.category
            .as_deref()
            .is_none_or(|category| listing.category == category)
    }

    fn matches_service_type(&self, listing: &ServiceListing) -> bool {
        self.service_types.is_empty() || self.service_types.contains(&listing.service_type)
    }

    fn matches_rating(&self, listing: &ServiceListing) -> bool {
        let rating = listing.rating_key();
        self.min_ratings.is_empty() || self.min_ratings.iter().any(|min| rating >= *min)
    }
}

/// Result ordering. Every order is a stable sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum SortOrder {
    /// Catalog order, untouched
    #[default]
    #[strum(to_string = "Recommended", serialize = "recommended")]
    Recommended,
    #[strum(to_string = "Price: Low to High", serialize = "price-asc")]
    PriceAsc,
    #[strum(to_string = "Price: High to Low", serialize = "price-desc")]
    PriceDesc,
    #[strum(to_string = "Top Rated", serialize = "rating-desc", serialize = "top-rated")]
    RatingDesc,
}

/// Keeps the listings that satisfy `filters`, in catalog order.
pub fn filter_listings<'a>(
    catalog: &'a [ServiceListing],
    filters: &FilterState,
) -> Vec<&'a ServiceListing> {
    catalog.iter().filter(|listing| filters.matches(listing)).collect()
}

/// Stable in-place sort; equal keys keep their relative order.
pub fn sort_listings(listings: &mut [&ServiceListing], order: SortOrder) {
    match order {
        SortOrder::Recommended => {}
        SortOrder::PriceAsc => listings.sort_by(|a, b| a.price_key().total_cmp(&b.price_key())),
        SortOrder::PriceDesc => listings.sort_by(|a, b| b.price_key().total_cmp(&a.price_key())),
        SortOrder::RatingDesc => {
            listings.sort_by(|a, b| b.rating_key().total_cmp(&a.rating_key()))
        }
    }
}

/// Filters then sorts. The caller slices the result for display.
pub fn apply<'a>(
    catalog: &'a [ServiceListing],
    filters: &FilterState,
    order: SortOrder,
) -> Vec<&'a ServiceListing> {
    let mut results = filter_listings(catalog, filters);
    sort_listings(&mut results, order);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn listing(id: &str, name: &str, category: &str, service_type: &str) -> ServiceListing {
        ServiceListing::new(id, name)
            .with_category(category)
            .with_service_type(service_type)
    }

    fn catalog() -> Vec<ServiceListing> {
        vec![
            listing("1", "Swedish Massage", "Spa", "Spa & Massage")
                .with_description("Relaxing full body treatment")
                .with_price(120.0)
                .with_rating(4.8, 210),
            listing("2", "Classic Haircut", "Hair", "Hair Styling")
                .with_description("Cut and style")
                .with_price(45.0)
                .with_rating(4.2, 88),
            listing("3", "Hot Stone Therapy", "Spa", "Spa & Massage")
                .with_description("Heated basalt stones")
                .with_price(180.0)
                .with_rating(3.9, 41),
            listing("4", "Gel Manicure", "Nails", "Nail Care")
                .with_description("Long lasting polish")
                .with_price(60.0)
                .with_rating(4.5, 120),
            listing("5", "Aromatherapy", "Spa", "Spa & Massage")
                .with_description("Essential oils massage")
                .with_price(120.0)
                .with_rating(4.5, 64),
        ]
    }

    fn ids(results: &[&ServiceListing]) -> Vec<String> {
        results.iter().map(|l| l.id.to_string()).collect()
    }

    #[test]
    fn test_default_filters_pass_everything() {
        let catalog = catalog();
        let results = apply(&catalog, &FilterState::default(), SortOrder::Recommended);
        assert_eq!(ids(&results), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_search_matches_name_description_or_category() {
        let catalog = catalog();

        let by_name = FilterState::default().with_search("HAIRCUT");
        assert_eq!(ids(&filter_listings(&catalog, &by_name)), vec!["2"]);

        let by_description = FilterState::default().with_search("basalt");
        assert_eq!(ids(&filter_listings(&catalog, &by_description)), vec!["3"]);

        let by_category = FilterState::default().with_search("nails");
        assert_eq!(ids(&filter_listings(&catalog, &by_category)), vec!["4"]);

        let nothing = FilterState::default().with_search("sauna");
        assert!(filter_listings(&catalog, &nothing).is_empty());
    }

    #[test]
    fn test_category_is_exact() {
        let catalog = catalog();
        let filters = FilterState::default().with_category("Spa");
        assert_eq!(ids(&filter_listings(&catalog, &filters)), vec!["1", "3", "5"]);

        let filters = FilterState::default().with_category("spa");
        assert!(filter_listings(&catalog, &filters).is_empty());
    }

    #[test]
    fn test_empty_service_types_pass_all() {
        let catalog = catalog();
        let filters = FilterState::default();
        assert!(filters.service_types.is_empty());
        assert_eq!(filter_listings(&catalog, &filters).len(), catalog.len());
    }

    #[test]
    fn test_service_types_are_or() {
        let catalog = catalog();
        let filters = FilterState::default()
            .with_service_type("Nail Care")
            .with_service_type("Hair Styling");
        assert_eq!(ids(&filter_listings(&catalog, &filters)), vec!["2", "4"]);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let catalog = catalog();
        let filters = FilterState::default().with_price(60.0, 120.0);
        assert_eq!(ids(&filter_listings(&catalog, &filters)), vec!["1", "4", "5"]);
    }

    #[test]
    fn test_ratings_are_or_across_thresholds() {
        let catalog = catalog();
        let filters = FilterState::default().with_min_rating(4.5);
        assert_eq!(ids(&filter_listings(&catalog, &filters)), vec!["1", "4", "5"]);

        let filters = FilterState::default().with_min_rating(4.5).with_min_rating(4.0);
        assert_eq!(ids(&filter_listings(&catalog, &filters)), vec!["1", "2", "4", "5"]);
    }

    #[test]
    fn test_storefront_preset() {
        let catalog = catalog();
        let results = filter_listings(&catalog, &FilterState::storefront());
        // Hot stone is rated 3.9, below the 4.0 threshold
        assert_eq!(ids(&results), vec!["1", "5"]);
    }

    #[test]
    fn test_results_are_exactly_the_matching_listings() {
        let catalog = catalog();
        let filters = FilterState::default()
            .with_search("massage")
            .with_price(100.0, 200.0)
            .with_min_rating(4.0);
        let results = filter_listings(&catalog, &filters);
        for listing in &catalog {
            let included = results.iter().any(|r| r.id == listing.id);
            assert_eq!(included, filters.matches(listing), "listing {}", listing.id);
        }
        assert_eq!(ids(&results), vec!["1", "5"]);
    }

    #[test]
    fn test_missing_numbers_filter_to_low_end() {
        let mut catalog = catalog();
        catalog.push(listing("6", "Mystery Treatment", "Spa", "Spa & Massage"));

        let priced = FilterState::default().with_price(0.0, 1000.0);
        assert!(!ids(&filter_listings(&catalog, &priced)).contains(&"6".to_string()));

        let rated = FilterState::default().with_min_rating(0.0);
        assert!(!ids(&filter_listings(&catalog, &rated)).contains(&"6".to_string()));

        let unbounded = FilterState::default();
        assert!(ids(&filter_listings(&catalog, &unbounded)).contains(&"6".to_string()));
    }

    #[test]
    fn test_sort_orders() {
        let catalog = catalog();
        let filters = FilterState::default();

        let asc = apply(&catalog, &filters, SortOrder::PriceAsc);
        assert_eq!(ids(&asc), vec!["2", "4", "1", "5", "3"]);

        let desc = apply(&catalog, &filters, SortOrder::PriceDesc);
        assert_eq!(ids(&desc), vec!["3", "1", "5", "4", "2"]);

        let rated = apply(&catalog, &filters, SortOrder::RatingDesc);
        assert_eq!(ids(&rated), vec!["1", "4", "5", "2", "3"]);
    }

    #[test]
    fn test_sort_is_stable_on_already_sorted_input() {
        let catalog = catalog();
        let mut once = apply(&catalog, &FilterState::default(), SortOrder::PriceAsc);
        let before = ids(&once);
        sort_listings(&mut once, SortOrder::PriceAsc);
        assert_eq!(ids(&once), before);
        // 1 and 5 share a price and keep catalog order
        let pos_1 = before.iter().position(|id| id == "1").unwrap();
        let pos_5 = before.iter().position(|id| id == "5").unwrap();
        assert!(pos_1 < pos_5);
    }

    #[test]
    fn test_missing_price_sorts_low() {
        let mut catalog = catalog();
        catalog.insert(0, listing("6", "Mystery Treatment", "Spa", "Spa & Massage"));
        let asc = apply(&catalog, &FilterState::default(), SortOrder::PriceAsc);
        assert_eq!(asc.first().unwrap().id.as_str(), "6");
        let desc = apply(&catalog, &FilterState::default(), SortOrder::PriceDesc);
        assert_eq!(desc.last().unwrap().id.as_str(), "6");
    }

    #[test]
    fn test_sort_order_strings() {
        assert_eq!(SortOrder::PriceAsc.to_string(), "Price: Low to High");
        assert_eq!(SortOrder::from_str("Top Rated").unwrap(), SortOrder::RatingDesc);
        assert_eq!(SortOrder::from_str("price-desc").unwrap(), SortOrder::PriceDesc);
        assert_eq!(SortOrder::from_str("RECOMMENDED").unwrap(), SortOrder::Recommended);
        assert!(SortOrder::from_str("cheapest").is_err());
    }
}
