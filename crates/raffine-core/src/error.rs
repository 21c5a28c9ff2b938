//! Error types for the Raffine client.

use crate::validation::ValidationErrors;
use thiserror::Error;

/// A shared error type for the entire Raffine client.
///
/// Every failure in the client degrades to "operate on local state only";
/// the variants exist so callers can decide how loudly to report it.
#[derive(Error, Debug, Clone)]
pub enum RaffineError {
    /// Client-side form input rejected before reaching any collaborator
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Non-2xx response from a collaborator, carrying its message
    #[error("{message}")]
    Collaborator { status: Option<u16>, message: String },

    /// No response at all (network failure, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Login or registration attempted while a session is active
    #[error("Already signed in as {email}; sign out first")]
    AlreadyAuthenticated { email: String },

    /// A persisted local-storage value could not be parsed
    #[error("Malformed persisted state in '{key}': {message}")]
    MalformedPersistedState { key: String, message: String },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RaffineError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Collaborator error
    pub fn collaborator(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Collaborator {
            status,
            message: message.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a MalformedPersistedState error
    pub fn malformed(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedPersistedState {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_collaborator(&self) -> bool {
        matches!(self, Self::Collaborator { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_already_authenticated(&self) -> bool {
        matches!(self, Self::AlreadyAuthenticated { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Message suitable for a single form-level error line.
    ///
    /// Collaborator messages are passed through unmodified.
    pub fn user_message(&self) -> String {
        match self {
            Self::Collaborator { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RaffineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RaffineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RaffineError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<ValidationErrors> for RaffineError {
    fn from(err: ValidationErrors) -> Self {
        Self::Validation(err)
    }
}

/// A type alias for `Result<T, RaffineError>`.
pub type Result<T> = std::result::Result<T, RaffineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collaborator_message_is_passed_through() {
        let err = RaffineError::collaborator(Some(401), "Invalid email or password");
        assert!(err.is_collaborator());
        assert_eq!(err.user_message(), "Invalid email or password");
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: RaffineError = io.into();
        assert!(err.to_string().contains("PermissionDenied"));
    }

    #[test]
    fn test_json_conversion() {
        let parse = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: RaffineError = parse.into();
        assert!(matches!(err, RaffineError::Serialization { ref format, .. } if format == "JSON"));
    }
}
