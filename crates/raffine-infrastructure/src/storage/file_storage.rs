//! File-backed [`LocalStorage`].

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use raffine_core::error::{RaffineError, Result};
use raffine_core::storage::LocalStorage;

use super::atomic_json::{AtomicJsonError, AtomicJsonFile};

type Entries = BTreeMap<String, String>;

/// Local storage kept in a single JSON document.
///
/// Reads are served from memory. Each write is a locked read-modify-write of
/// the whole document, so concurrent processes never lose each other's keys.
pub struct FileStorage {
    file: AtomicJsonFile<Entries>,
    cache: Mutex<Entries>,
}

impl FileStorage {
    /// Opens (or lazily creates) the document at `path`.
    ///
    /// An unreadable document is discarded and replaced with an empty one.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let file = AtomicJsonFile::new(path.into());
        let entries = match file.load() {
            Ok(entries) => entries.unwrap_or_default(),
            Err(AtomicJsonError::JsonError(e)) => {
                tracing::warn!(
                    path = %file.path().display(),
                    error = %e,
                    "Local storage document is corrupt, starting empty"
                );
                file.save(&Entries::new())?;
                Entries::new()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %file.path().display(), keys = entries.len(), "Opened local storage");
        Ok(Self {
            file,
            cache: Mutex::new(entries),
        })
    }

    fn cache(&self) -> Result<MutexGuard<'_, Entries>> {
        self.cache
            .lock()
            .map_err(|e| RaffineError::internal(format!("file storage poisoned: {}", e)))
    }

    fn write<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Entries),
    {
        let mut cache = self.cache()?;
        *cache = self.file.update(Entries::new(), f)?;
        Ok(())
    }
}

impl LocalStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cache()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.write(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    /// Removes under the file lock even when the cached copy lacks the key,
    /// since another handle may have written it since.
    fn remove(&self, key: &str) -> Result<()> {
        self.write(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raffine_core::storage::keys;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("local_storage.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set(keys::CART, "[]").unwrap();
        storage.set(keys::REMEMBERED_EMAIL, "ana@example.com").unwrap();
        storage.remove(keys::CART).unwrap();
        drop(storage);

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get(keys::CART).unwrap(), None);
        assert_eq!(
            reopened.get(keys::REMEMBERED_EMAIL).unwrap().as_deref(),
            Some("ana@example.com")
        );
    }

    #[test]
    fn test_two_handles_do_not_lose_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("local_storage.json");

        let first = FileStorage::open(&path).unwrap();
        let second = FileStorage::open(&path).unwrap();
        first.set(keys::CART, "[]").unwrap();
        second.set(keys::FAVORITES, "[]").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert!(reopened.get(keys::CART).unwrap().is_some());
        assert!(reopened.get(keys::FAVORITES).unwrap().is_some());
    }

    #[test]
    fn test_corrupt_document_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("local_storage.json");
        std::fs::write(&path, "garbage").unwrap();

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get(keys::SESSION).unwrap(), None);
        storage.set(keys::SESSION, "{}").unwrap();
        assert_eq!(storage.get(keys::SESSION).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_removing_missing_key_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path().join("s.json")).unwrap();
        storage.remove("nothing").unwrap();
        assert_eq!(storage.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_remove_reaches_key_written_by_another_handle() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("local_storage.json");

        let first = FileStorage::open(&path).unwrap();
        let second = FileStorage::open(&path).unwrap();
        first.set(keys::SESSION, "{}").unwrap();
        assert_eq!(second.get(keys::SESSION).unwrap(), None);

        second.remove(keys::SESSION).unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get(keys::SESSION).unwrap(), None);
    }
}
