//! Favorites reconciliation store.
//!
//! Same persistence and sync protocol as the cart, over a set of listings.

use std::sync::Arc;

use crate::listing::{ListingId, ServiceListing};
use crate::storage::{self, LocalStorage, keys};
use crate::sync::{Reconciliation, WriteThrough};

/// Favorited listings, unique by id, in the order they were added.
pub struct FavoritesStore {
    items: Vec<ServiceListing>,
    storage: Arc<dyn LocalStorage>,
    remote: Option<WriteThrough<Vec<ListingId>>>,
}

impl FavoritesStore {
    /// Loads the persisted favorites. A corrupt record is purged and ignored.
    pub fn restore(storage: Arc<dyn LocalStorage>) -> Self {
        let items = storage::load_json::<Vec<ServiceListing>>(storage.as_ref(), keys::FAVORITES)
            .map(dedup)
            .unwrap_or_default();
        Self {
            items,
            storage,
            remote: None,
        }
    }

    pub fn items(&self) -> &[ServiceListing] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_favorite(&self, id: &ListingId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    /// Reference-only snapshot, as written to the remote profile.
    pub fn ids(&self) -> Vec<ListingId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    /// Adds `listing` if absent, removes it if present.
    ///
    /// Returns whether the listing is a favorite afterwards.
    pub fn toggle(&mut self, listing: &ServiceListing) -> bool {
        let now_favorite = match self.items.iter().position(|item| item.id == listing.id) {
            Some(idx) => {
                self.items.remove(idx);
                false
            }
            None => {
                self.items.push(listing.clone());
                true
            }
        };
        self.persist();
        self.publish();
        now_favorite
    }

    /// Applies the remote favorites read at sign-in.
    ///
    /// A non-empty remote set replaces the local one; an empty one keeps it.
    pub fn reconcile(&mut self, remote: Vec<ServiceListing>) -> Reconciliation {
        if remote.is_empty() {
            tracing::debug!(local = self.items.len(), "Remote favorites empty, keeping local");
            return Reconciliation::KeptLocal;
        }

        let discarded = self.items.len();
        self.items = dedup(remote);
        self.persist();
        tracing::info!(favorites = self.items.len(), discarded, "Adopted remote favorites");
        Reconciliation::AdoptedRemote
    }

    pub fn attach_remote(&mut self, writer: WriteThrough<Vec<ListingId>>) {
        self.remote = Some(writer);
    }

    pub fn detach_remote(&mut self) -> bool {
        self.remote.take().is_some()
    }

    pub fn is_mirrored(&self) -> bool {
        self.remote.is_some()
    }

    /// Queues the current set for write-through without changing it.
    pub fn publish(&mut self) {
        let ids = self.ids();
        if let Some(remote) = self.remote.as_mut() {
            remote.push(ids);
        }
    }

    pub async fn settle(&self) {
        if let Some(remote) = &self.remote {
            remote.settle().await;
        }
    }

    fn persist(&self) {
        if let Err(e) = storage::save_json(self.storage.as_ref(), keys::FAVORITES, &self.items) {
            tracing::warn!(error = %e, "Failed to persist favorites");
        }
    }
}

fn dedup(items: Vec<ServiceListing>) -> Vec<ServiceListing> {
    let mut unique: Vec<ServiceListing> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.iter().any(|u| u.id == item.id) {
            unique.push(item);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RaffineError;
    use crate::storage::MemoryStorage;
    use futures::FutureExt;
    use std::sync::Mutex;

    fn listing(id: &str) -> ServiceListing {
        ServiceListing::new(id, format!("Service {}", id))
    }

    fn store() -> (FavoritesStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (FavoritesStore::restore(storage.clone()), storage)
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let (mut favorites, _) = store();
        favorites.toggle(&listing("a"));

        assert!(favorites.toggle(&listing("x")));
        assert!(favorites.is_favorite(&"x".into()));
        assert!(!favorites.toggle(&listing("x")));
        assert!(!favorites.is_favorite(&"x".into()));
        assert_eq!(favorites.ids(), vec![ListingId::from("a")]);
    }

    #[test]
    fn test_toggle_persists() {
        let (mut favorites, storage) = store();
        favorites.toggle(&listing("a"));
        favorites.toggle(&listing("b"));

        let restored = FavoritesStore::restore(storage);
        assert_eq!(restored.ids(), vec![ListingId::from("a"), ListingId::from("b")]);
    }

    #[test]
    fn test_corrupt_record_is_purged() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(keys::FAVORITES, "favorites!").unwrap();
        let favorites = FavoritesStore::restore(storage.clone());
        assert!(favorites.is_empty());
        assert_eq!(storage.get(keys::FAVORITES).unwrap(), None);
    }

    #[test]
    fn test_reconcile() {
        let (mut favorites, _) = store();
        favorites.toggle(&listing("guest"));
        assert_eq!(favorites.reconcile(Vec::new()), Reconciliation::KeptLocal);
        assert_eq!(favorites.len(), 1);

        let remote = vec![listing("r1"), listing("r2"), listing("r1")];
        assert_eq!(favorites.reconcile(remote), Reconciliation::AdoptedRemote);
        assert_eq!(favorites.ids(), vec![ListingId::from("r1"), ListingId::from("r2")]);
    }

    #[tokio::test]
    async fn test_toggle_writes_through_ids() {
        let pushed = Arc::new(Mutex::new(Vec::new()));
        let sink = pushed.clone();
        let writer = WriteThrough::spawn("favorites", move |ids: Vec<ListingId>| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(ids);
                Ok::<(), RaffineError>(())
            }
            .boxed()
        });

        let (mut favorites, _) = store();
        favorites.attach_remote(writer);
        favorites.toggle(&listing("a"));
        favorites.settle().await;
        favorites.toggle(&listing("b"));
        favorites.toggle(&listing("a"));
        favorites.settle().await;

        let pushed = pushed.lock().unwrap();
        assert_eq!(pushed.last().unwrap(), &vec![ListingId::from("b")]);
    }
}
