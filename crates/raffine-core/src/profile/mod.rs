//! Remote user profile: the server-side copy of favorites and cart.

use async_trait::async_trait;

use crate::auth::{AuthToken, Identity};
use crate::cart::CartLine;
use crate::error::Result;
use crate::listing::{ListingId, ServiceListing};

/// A cart line as stored remotely: a reference plus a quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    pub listing: ListingId,
    pub quantity: u32,
}

/// Profile as returned by the backend, already normalized to canonical listings.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteProfile {
    pub identity: Identity,
    pub favorites: Vec<ServiceListing>,
    pub cart: Vec<CartLine>,
}

/// Per-user storage on the backend. Every call carries the bearer token.
///
/// Writes replace the stored value wholesale; there is no patching.
#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn get_profile(&self, token: &AuthToken) -> Result<RemoteProfile>;

    async fn put_favorites(&self, token: &AuthToken, favorites: Vec<ListingId>) -> Result<()>;

    async fn put_cart(&self, token: &AuthToken, cart: Vec<CartEntry>) -> Result<()>;
}
