//! Auth collaborator trait.

use async_trait::async_trait;

use crate::auth::model::Session;
use crate::error::Result;

/// Token-issuing backend.
///
/// Rejections come back as `RaffineError::Collaborator` carrying the
/// backend's message, which callers show to the user as-is.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<Session>;

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<Session>;
}
