//! ServiceListing domain model.
//!
//! The one canonical shape of a catalog entry. Remote document shapes are
//! normalized into it at the HTTP boundary and never travel further.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, unique identifier of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(String);

impl ListingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListingId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ListingId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Highlight shown on a listing card, e.g. "Popular" in a color token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub text: String,
    pub color: String,
}

/// A bookable service offering in the catalog.
///
/// Listings are read-only for the client. `rating` and `price_value` are
/// optional because the backend does not guarantee numeric values; missing
/// numbers rank at the low end for filtering and sorting (see
/// [`ServiceListing::rating_key`] and [`ServiceListing::price_key`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceListing {
    pub id: ListingId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// 0 to 5, one decimal of precision
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub category: String,
    /// Finer-grained than `category`, e.g. "Spa & Massage"
    #[serde(default)]
    pub service_type: String,
    /// Price as displayed, e.g. "$120"
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub price_value: Option<f64>,
    /// Present only when the listing is discounted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl ServiceListing {
    /// Creates a listing with the given id and name and every other field empty.
    pub fn new(id: impl Into<ListingId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            rating: None,
            reviews: 0,
            category: String::new(),
            service_type: String::new(),
            price: String::new(),
            price_value: None,
            original_price: None,
            badge: None,
            price_range: None,
            price_label: None,
            image: None,
            alt: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = service_type.into();
        self
    }

    /// Sets both the numeric price and a "$N" display string.
    pub fn with_price(mut self, value: f64) -> Self {
        self.price_value = Some(value);
        self.price = format!("${}", value);
        self
    }

    pub fn with_rating(mut self, rating: f64, reviews: u32) -> Self {
        self.rating = Some(rating);
        self.reviews = reviews;
        self
    }

    pub fn with_badge(mut self, text: impl Into<String>, color: impl Into<String>) -> Self {
        self.badge = Some(Badge {
            text: text.into(),
            color: color.into(),
        });
        self
    }

    /// True when an original price is present, which the storefront renders
    /// as a struck-through price next to the current one.
    pub fn has_discount(&self) -> bool {
        self.original_price.is_some()
    }

    /// Numeric price used for filtering and sorting; missing or NaN is -inf.
    pub fn price_key(&self) -> f64 {
        low_end(self.price_value)
    }

    /// Numeric rating used for filtering and sorting; missing or NaN is -inf.
    pub fn rating_key(&self) -> f64 {
        low_end(self.rating)
    }

    /// Number of full stars and whether a half star follows.
    pub fn stars(&self) -> (u8, bool) {
        match self.rating {
            Some(rating) if rating.is_finite() && rating > 0.0 => {
                let clamped = rating.min(5.0);
                (clamped.floor() as u8, clamped.fract() != 0.0)
            }
            _ => (0, false),
        }
    }
}

fn low_end(value: Option<f64>) -> f64 {
    match value {
        Some(v) if !v.is_nan() => v,
        _ => f64::NEG_INFINITY,
    }
}
