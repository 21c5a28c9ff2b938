//! HTTP user profile: remote favorites and cart.

use async_trait::async_trait;
use raffine_core::auth::AuthToken;
use raffine_core::error::Result;
use raffine_core::listing::ListingId;
use raffine_core::profile::{CartEntry, ProfileService, RemoteProfile};

use crate::client::ApiClient;
use crate::dto::{CartUpdate, FavoritesUpdate, ProfileDto};

pub struct HttpProfileService {
    api: ApiClient,
}

impl HttpProfileService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ProfileService for HttpProfileService {
    async fn get_profile(&self, token: &AuthToken) -> Result<RemoteProfile> {
        let request = self.api.auth_request(self.api.get("users/profile"), token);
        let dto: ProfileDto = self.api.send_json(request, "Failed to fetch profile").await?;
        let profile = dto.into_profile();
        tracing::debug!(
            favorites = profile.favorites.len(),
            cart_lines = profile.cart.len(),
            "Fetched profile"
        );
        Ok(profile)
    }

    async fn put_favorites(&self, token: &AuthToken, favorites: Vec<ListingId>) -> Result<()> {
        let count = favorites.len();
        let request = self
            .api
            .auth_request(self.api.put("users/favorites"), token)
            .json(&FavoritesUpdate { favorites });
        self.api.send(request, "Failed to update favorites").await?;
        tracing::debug!(count, "Wrote favorites");
        Ok(())
    }

    async fn put_cart(&self, token: &AuthToken, cart: Vec<CartEntry>) -> Result<()> {
        let lines = cart.len();
        let request = self
            .api
            .auth_request(self.api.put("users/cart"), token)
            .json(&CartUpdate::from(cart));
        self.api.send(request, "Failed to update cart").await?;
        tracing::debug!(lines, "Wrote cart");
        Ok(())
    }
}
