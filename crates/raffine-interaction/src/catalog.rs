//! HTTP catalog.

use async_trait::async_trait;
use raffine_core::error::{RaffineError, Result};
use raffine_core::listing::{CatalogService, ListingId, ListingQuery, ServiceListing};

use crate::client::ApiClient;
use crate::dto::{self, ListingDto};

pub struct HttpCatalogService {
    api: ApiClient,
}

impl HttpCatalogService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

/// Query pairs for `GET /services`. Blank values are omitted.
fn query_pairs(query: &ListingQuery) -> Vec<(&'static str, &str)> {
    [("category", query.category.as_deref()), ("search", query.search.as_deref())]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        })
        .collect()
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    async fn list(&self, query: &ListingQuery) -> Result<Vec<ServiceListing>> {
        let request = self.api.get("services").query(&query_pairs(query));
        let docs: Vec<ListingDto> = self.api.send_json(request, "Failed to fetch services").await?;
        let listings = dto::into_listings(docs);
        tracing::info!(count = listings.len(), ?query, "Fetched catalog");
        Ok(listings)
    }

    async fn get_by_id(&self, id: &ListingId) -> Result<ServiceListing> {
        let request = self.api.get(&format!("services/{}", id));
        let doc: ListingDto = match self.api.send_json(request, "Service not found").await {
            Ok(doc) => doc,
            Err(RaffineError::Collaborator {
                status: Some(404), ..
            }) => return Err(RaffineError::not_found("ServiceListing", id.as_str())),
            Err(e) => return Err(e),
        };
        doc.into_listing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_skip_blank_values() {
        assert!(query_pairs(&ListingQuery::all()).is_empty());

        let query = ListingQuery {
            category: Some("Beauty".to_string()),
            search: Some("  ".to_string()),
        };
        assert_eq!(query_pairs(&query), vec![("category", "Beauty")]);

        let query = ListingQuery {
            category: None,
            search: Some(" massage ".to_string()),
        };
        assert_eq!(query_pairs(&query), vec![("search", "massage")]);
    }
}
