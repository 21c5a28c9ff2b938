//! Browsing state of one storefront view.

use std::collections::BTreeSet;

use crate::browse::filter::{self, FilterState, PriceRange, SortOrder};
use crate::browse::reveal::RevealController;
use crate::listing::ServiceListing;

/// Catalog snapshot plus the query and reveal state applied to it.
///
/// Only search text and category changes rewind the reveal counter. Sidebar
/// filters (price, service types, ratings) and the sort order keep the
/// current counter, so a user who loaded three pages still sees up to three
/// pages after narrowing the price range.
#[derive(Debug, Clone, Default)]
pub struct BrowseSession {
    catalog: Vec<ServiceListing>,
    filters: FilterState,
    sort: SortOrder,
    reveal: RevealController,
}

impl BrowseSession {
    pub fn new(catalog: Vec<ServiceListing>) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn catalog(&self) -> &[ServiceListing] {
        &self.catalog
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn reveal(&self) -> &RevealController {
        &self.reveal
    }

    /// Swaps in a freshly fetched catalog. The reveal counter is kept.
    pub fn replace_catalog(&mut self, catalog: Vec<ServiceListing>) {
        self.catalog = catalog;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
        self.reveal.reset();
    }

    /// Selects `category`, or clears the selection if it is already selected.
    pub fn select_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        if self.filters.category.as_deref() == Some(category.as_str()) {
            self.filters.category = None;
        } else {
            self.filters.category = Some(category);
        }
        self.reveal.reset();
    }

    /// Replaces the whole filter state. The reveal counter rewinds only if
    /// the search text or category changed.
    pub fn set_filters(&mut self, filters: FilterState) {
        let rewind = filters.search != self.filters.search || filters.category != self.filters.category;
        self.filters = filters;
        if rewind {
            self.reveal.reset();
        }
    }

    pub fn set_price_range(&mut self, price: PriceRange) {
        self.filters.price = price;
    }

    pub fn set_service_types(&mut self, service_types: BTreeSet<String>) {
        self.filters.service_types = service_types;
    }

    pub fn set_min_ratings(&mut self, min_ratings: Vec<f64>) {
        self.filters.min_ratings = min_ratings;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    /// Every listing passing the filters, in the selected order.
    pub fn results(&self) -> Vec<&ServiceListing> {
        filter::apply(&self.catalog, &self.filters, self.sort)
    }

    /// The revealed prefix of [`results`](Self::results).
    pub fn visible(&self) -> Vec<&ServiceListing> {
        let mut results = self.results();
        let shown = self.reveal.visible(results.len());
        results.truncate(shown);
        results
    }

    pub fn has_more(&self) -> bool {
        self.reveal.has_more(self.results().len())
    }

    /// Reveals the next page. Returns the number of visible results.
    pub fn load_more(&mut self) -> usize {
        let total = self.results().len();
        self.reveal.advance(total)
    }

    /// Results header, e.g. `Showing 6 of 14 results for "massage" in Spa`.
    pub fn summary(&self) -> String {
        let total = self.results().len();
        let mut summary = format!(
            "Showing {} of {} results",
            self.reveal.visible(total),
            total
        );
        if !self.filters.search.is_empty() {
            summary.push_str(&format!(" for \"{}\"", self.filters.search));
        }
        if let Some(category) = &self.filters.category {
            summary.push_str(&format!(" in {}", category));
        }
        summary
    }
}
