//! Storefront browsing: filtering, sorting and incremental reveal.
//!
//! - `filter`: the pure filter/sort engine
//! - `reveal`: the "load more" counter
//! - `session`: `BrowseSession`, which ties both to a catalog snapshot

pub mod filter;
pub mod reveal;
pub mod session;

pub use filter::{FilterState, PriceRange, SortOrder};
pub use reveal::{PAGE_SIZE, RevealController};
pub use session::BrowseSession;
