//! Session domain model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque bearer token issued by the auth backend.
///
/// The client never parses or validates it; it is only stored and forwarded.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Who is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// An authenticated identity together with its bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub identity: Identity,
    pub token: AuthToken,
}

impl Session {
    pub fn new(identity: Identity, token: AuthToken) -> Self {
        Self { identity, token }
    }
}

/// Authentication state of the client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            Self::Anonymous => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_redacted_in_debug() {
        let token = AuthToken::new("eyJhbGciOi.secret");
        assert_eq!(format!("{:?}", token), "AuthToken(***)");
        assert_eq!(token.as_str(), "eyJhbGciOi.secret");
    }

    #[test]
    fn test_session_persisted_shape() {
        let session = Session::new(
            Identity {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
            AuthToken::new("t0k3n"),
        );
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["token"], "t0k3n");
        assert_eq!(json["identity"]["email"], "ada@example.com");
    }
}
