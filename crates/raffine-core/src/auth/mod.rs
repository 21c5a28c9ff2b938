//! Authentication domain module.
//!
//! - `model`: `Session`, `Identity`, `AuthToken`
//! - `service`: the auth collaborator trait
//! - `store`: `SessionStore`, the persisted session state machine

mod model;
mod service;
mod store;

pub use model::{AuthToken, Identity, Session, SessionState};
pub use service::AuthService;
pub use store::SessionStore;
