//! Application layer for Raffine.
//!
//! Coordinates the core stores with their collaborators: the storefront
//! browse flow and the signed-in user context.

pub mod marketplace;
pub mod user_context;

pub use marketplace::Marketplace;
pub use user_context::{SyncOutcome, UserContext};
