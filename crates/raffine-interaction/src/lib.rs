//! REST implementations of the catalog, auth and profile collaborators.

pub mod auth;
pub mod catalog;
pub mod client;
mod dto;
pub mod profile;

pub use auth::HttpAuthService;
pub use catalog::HttpCatalogService;
pub use client::ApiClient;
pub use profile::HttpProfileService;
