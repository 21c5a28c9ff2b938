//! Storefront use case: fetch the catalog and browse it locally.

use std::sync::Arc;

use raffine_core::browse::{BrowseSession, FilterState, SortOrder};
use raffine_core::error::Result;
use raffine_core::listing::{CatalogService, ListingId, ListingQuery, ServiceListing};

pub struct Marketplace {
    catalog: Arc<dyn CatalogService>,
}

impl Marketplace {
    pub fn new(catalog: Arc<dyn CatalogService>) -> Self {
        Self { catalog }
    }

    /// Fetches the full catalog and opens a browse session over it.
    ///
    /// Filtering and sorting happen client-side, so the fetch is unscoped.
    pub async fn open(&self, filters: FilterState, sort: SortOrder) -> Result<BrowseSession> {
        let catalog = self.catalog.list(&ListingQuery::all()).await?;
        tracing::debug!(listings = catalog.len(), "Opened storefront");
        Ok(BrowseSession::new(catalog).with_filters(filters).with_sort(sort))
    }

    /// Re-fetches the catalog into an existing session, keeping its state.
    pub async fn refresh(&self, session: &mut BrowseSession) -> Result<()> {
        let catalog = self.catalog.list(&ListingQuery::all()).await?;
        session.replace_catalog(catalog);
        Ok(())
    }

    pub async fn listing(&self, id: &ListingId) -> Result<ServiceListing> {
        self.catalog.get_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use raffine_core::RaffineError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedCatalog {
        listings: Vec<ServiceListing>,
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl CatalogService for FixedCatalog {
        async fn list(&self, _query: &ListingQuery) -> Result<Vec<ServiceListing>> {
            Ok(self.listings.clone())
        }

        async fn get_by_id(&self, id: &ListingId) -> Result<ServiceListing> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.listings
                .iter()
                .find(|l| &l.id == id)
                .cloned()
                .ok_or_else(|| RaffineError::not_found("ServiceListing", id.as_str()))
        }
    }

    fn marketplace(n: usize) -> (Marketplace, Arc<FixedCatalog>) {
        let catalog = Arc::new(FixedCatalog {
            listings: (0..n)
                .map(|i| ServiceListing::new(format!("s{}", i), format!("Service {}", i)).with_price(100.0))
                .collect(),
            lookups: AtomicUsize::new(0),
        });
        (Marketplace::new(catalog.clone()), catalog)
    }

    #[tokio::test]
    async fn test_open_reveals_first_page() {
        let (market, _) = marketplace(9);
        let session = market.open(FilterState::default(), SortOrder::Recommended).await.unwrap();
        assert_eq!(session.visible().len(), 6);
        assert!(session.has_more());
    }

    #[tokio::test]
    async fn test_listing_lookup() {
        let (market, catalog) = marketplace(3);
        let found = market.listing(&"s1".into()).await.unwrap();
        assert_eq!(found.name, "Service 1");

        let missing = market.listing(&"nope".into()).await.unwrap_err();
        assert!(missing.is_not_found());
        assert_eq!(catalog.lookups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refresh_keeps_browse_state() {
        let (market, _) = marketplace(20);
        let mut session = market
            .open(FilterState::default().with_search("service"), SortOrder::PriceAsc)
            .await
            .unwrap();
        session.load_more();
        market.refresh(&mut session).await.unwrap();
        assert_eq!(session.reveal().count(), 12);
        assert_eq!(session.sort(), SortOrder::PriceAsc);
    }
}
