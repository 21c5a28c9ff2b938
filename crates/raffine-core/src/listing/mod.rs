//! Catalog listing domain module.
//!
//! # Module Structure
//!
//! - `model`: `ServiceListing` and its identifier
//! - `service`: the catalog collaborator trait

mod model;
mod service;

pub use model::{Badge, ListingId, ServiceListing};
pub use service::{CatalogService, ListingQuery};
