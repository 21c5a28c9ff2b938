//! Domain core of the Raffine marketplace client.
//!
//! Holds the canonical listing type, the filter/sort engine and reveal
//! counter, the three locally persisted stores (session, cart, favorites),
//! and the collaborator traits they talk to. Nothing here performs network
//! I/O itself; HTTP lives in `raffine-interaction`.

pub mod auth;
pub mod browse;
pub mod cart;
pub mod error;
pub mod favorites;
pub mod listing;
pub mod profile;
pub mod storage;
pub mod sync;
pub mod validation;

// Re-export common error type
pub use error::{RaffineError, Result};
