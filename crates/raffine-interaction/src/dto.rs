//! Wire shapes of the REST backend and their normalization into domain types.
//!
//! Listings arrive as database documents keyed by `_id`, sometimes with a
//! legacy numeric `id` as well, and with numbers that may be strings or
//! missing. Everything is converted to [`ServiceListing`] here.

use raffine_core::auth::{AuthToken, Identity, Session};
use raffine_core::cart::CartLine;
use raffine_core::error::{RaffineError, Result};
use raffine_core::listing::{Badge, ListingId, ServiceListing};
use raffine_core::profile::{CartEntry, RemoteProfile};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListingDto {
    #[serde(rename = "_id", default)]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    rating: Option<Value>,
    #[serde(default)]
    reviews: Option<Value>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    service_type: Option<String>,
    #[serde(default)]
    price: Option<Value>,
    #[serde(default)]
    price_value: Option<Value>,
    #[serde(default)]
    original_price: Option<Value>,
    #[serde(default)]
    badge: Option<BadgeDto>,
    #[serde(default)]
    price_range: Option<String>,
    #[serde(default)]
    price_label: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    alt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BadgeDto {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    color: Option<String>,
}

impl ListingDto {
    /// The document id is preferred: it is what profile references point at.
    fn listing_id(&self) -> Option<ListingId> {
        if let Some(id) = self.mongo_id.as_deref().filter(|id| !id.is_empty()) {
            return Some(ListingId::new(id));
        }
        match &self.id {
            Some(Value::String(id)) if !id.is_empty() => Some(ListingId::new(id.clone())),
            Some(Value::Number(n)) => Some(ListingId::new(n.to_string())),
            _ => None,
        }
    }

    pub(crate) fn into_listing(self) -> Result<ServiceListing> {
        let id = self.listing_id().ok_or_else(|| RaffineError::Serialization {
            format: "json".to_string(),
            message: format!(
                "listing '{}' has no usable id",
                self.name.as_deref().unwrap_or("<unnamed>")
            ),
        })?;

        let price_value = lenient_f64(self.price_value.as_ref());
        let price = match self.price.as_ref() {
            Some(Value::String(display)) => display.clone(),
            Some(Value::Number(n)) => format!("${}", n),
            _ => price_value.map(|v| format!("${}", v)).unwrap_or_default(),
        };
        let badge = self.badge.and_then(|b| match (b.text, b.color) {
            (Some(text), color) if !text.is_empty() => Some(Badge {
                text,
                color: color.unwrap_or_default(),
            }),
            _ => None,
        });

        Ok(ServiceListing {
            id,
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            rating: lenient_f64(self.rating.as_ref()),
            reviews: lenient_f64(self.reviews.as_ref())
                .filter(|r| *r >= 0.0)
                .map(|r| r.min(u32::MAX as f64) as u32)
                .unwrap_or(0),
            category: self.category.unwrap_or_default(),
            service_type: self.service_type.unwrap_or_default(),
            price,
            price_value,
            original_price: match self.original_price {
                Some(Value::String(s)) if !s.is_empty() => Some(s),
                Some(Value::Number(n)) => Some(format!("${}", n)),
                _ => None,
            },
            badge,
            price_range: self.price_range,
            price_label: self.price_label,
            image: self.image,
            alt: self.alt,
        })
    }
}

/// Accepts JSON numbers and numeric strings. Anything else, or a
/// non-finite value, is treated as missing.
fn lenient_f64(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_start_matches('$').parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Converts a list of documents, skipping the ones that cannot be identified.
pub(crate) fn into_listings(docs: Vec<ListingDto>) -> Vec<ServiceListing> {
    docs.into_iter()
        .filter_map(|doc| match doc.into_listing() {
            Ok(listing) => Some(listing),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping catalog entry");
                None
            }
        })
        .collect()
}

/// A profile reference that may or may not have been populated server-side.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListingRef {
    Populated(Box<ListingDto>),
    Id(String),
}

#[derive(Debug, Deserialize)]
struct CartItemDto {
    #[serde(default)]
    service: Option<ListingRef>,
    #[serde(default)]
    quantity: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    favorites: Vec<Option<ListingRef>>,
    #[serde(default)]
    cart: Vec<CartItemDto>,
}

impl ProfileDto {
    /// Normalizes the profile. References whose listing was deleted or not
    /// populated carry no listing data and are dropped.
    pub(crate) fn into_profile(self) -> RemoteProfile {
        let favorites = self
            .favorites
            .into_iter()
            .filter_map(populated)
            .collect();

        let cart = self
            .cart
            .into_iter()
            .filter_map(|item| {
                let quantity = lenient_f64(item.quantity.as_ref())
                    .map(|q| q.max(0.0).min(u32::MAX as f64) as u32)
                    .unwrap_or(1);
                populated(item.service).map(|listing| CartLine::new(listing, quantity))
            })
            .collect();

        RemoteProfile {
            identity: Identity {
                id: self.id,
                name: self.name,
                email: self.email,
            },
            favorites,
            cart,
        }
    }
}

fn populated(reference: Option<ListingRef>) -> Option<ServiceListing> {
    match reference? {
        ListingRef::Populated(doc) => match doc.into_listing() {
            Ok(listing) => Some(listing),
            Err(e) => {
                tracing::warn!(error = %e, "Dropping profile reference");
                None
            }
        },
        ListingRef::Id(id) => {
            tracing::warn!(listing = %id, "Dropping unpopulated profile reference");
            None
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponseDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    token: String,
}

impl AuthResponseDto {
    pub(crate) fn into_session(self) -> Session {
        Session::new(
            Identity {
                id: self.id,
                name: self.name,
                email: self.email,
            },
            AuthToken::new(self.token),
        )
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct FavoritesUpdate {
    pub favorites: Vec<ListingId>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CartItemUpdate {
    pub service: ListingId,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct CartUpdate {
    pub cart: Vec<CartItemUpdate>,
}

impl From<Vec<CartEntry>> for CartUpdate {
    fn from(entries: Vec<CartEntry>) -> Self {
        Self {
            cart: entries
                .into_iter()
                .map(|entry| CartItemUpdate {
                    service: entry.listing,
                    quantity: entry.quantity,
                })
                .collect(),
        }
    }
}

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}
