use serde::{Deserialize, Serialize};

use crate::listing::ServiceListing;
use crate::profile::CartEntry;

/// One listing in the cart and how many of it. `quantity` is at least 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub listing: ServiceListing,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(listing: ServiceListing, quantity: u32) -> Self {
        Self { listing, quantity }
    }

    /// The reference-only form written to the remote profile.
    pub fn entry(&self) -> CartEntry {
        CartEntry {
            listing: self.listing.id.clone(),
            quantity: self.quantity,
        }
    }
}
