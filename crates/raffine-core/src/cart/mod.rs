//! Shopping cart domain module.
//!
//! - `model`: `CartLine`
//! - `store`: `CartStore`, persisted locally and mirrored to the remote profile

mod model;
mod store;

pub use model::CartLine;
pub use store::CartStore;
