//! Catalog collaborator trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::listing::{ListingId, ServiceListing};

/// Server-side narrowing applied before the catalog reaches the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ListingQuery {
    pub fn all() -> Self {
        Self::default()
    }
}

/// Read-only access to the catalog of bookable services.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Lists listings, optionally narrowed by category and search text.
    async fn list(&self, query: &ListingQuery) -> Result<Vec<ServiceListing>>;

    /// Fetches one listing, or `RaffineError::NotFound`.
    async fn get_by_id(&self, id: &ListingId) -> Result<ServiceListing>;
}
