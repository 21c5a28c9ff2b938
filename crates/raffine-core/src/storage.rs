//! Durable local key/value storage.
//!
//! The stores mirror their state into a string-valued storage scoped to one
//! client installation. Reads and writes are synchronous so persisted state
//! always matches in-memory state once a mutating call returns.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{RaffineError, Result};

/// Storage keys used by the client.
pub mod keys {
    pub const SESSION: &str = "raffine_user";
    pub const CART: &str = "raffine_cart";
    pub const FAVORITES: &str = "raffine_favorites";
    pub const REMEMBERED_EMAIL: &str = "raffine_remember_email";
}

/// String key/value storage that survives process restarts.
pub trait LocalStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Volatile storage, for tests and throwaway guest sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| RaffineError::internal(format!("memory storage poisoned: {}", e)))
    }
}

impl LocalStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Reads a JSON value from `key`.
///
/// A value that does not parse is purged and reported as absent; read
/// failures are logged and also reported as absent.
pub fn load_json<T: DeserializeOwned>(storage: &dyn LocalStorage, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read persisted state");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            let err = RaffineError::malformed(key, e.to_string());
            tracing::warn!(key, error = %err, "Purging malformed persisted state");
            if let Err(e) = storage.remove(key) {
                tracing::warn!(key, error = %e, "Failed to purge persisted state");
            }
            None
        }
    }
}

/// Serializes `value` as JSON under `key`.
pub fn save_json<T: Serialize + ?Sized>(
    storage: &dyn LocalStorage,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn test_load_json_purges_malformed_value() {
        let storage = MemoryStorage::new();
        storage.set(keys::CART, "{not json").unwrap();

        let loaded: Option<Vec<u32>> = load_json(&storage, keys::CART);
        assert!(loaded.is_none());
        assert_eq!(storage.get(keys::CART).unwrap(), None);
    }

    #[test]
    fn test_load_json_wrong_shape_is_malformed() {
        let storage = MemoryStorage::new();
        storage.set(keys::FAVORITES, "{\"a\": 1}").unwrap();

        let loaded: Option<Vec<u32>> = load_json(&storage, keys::FAVORITES);
        assert!(loaded.is_none());
        assert_eq!(storage.get(keys::FAVORITES).unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStorage::new();
        save_json(&storage, "numbers", &vec![1, 2, 3]).unwrap();
        let loaded: Option<Vec<u32>> = load_json(&storage, "numbers");
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }
}
