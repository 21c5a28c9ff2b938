//! Cart reconciliation store.

use std::sync::Arc;

use crate::cart::model::CartLine;
use crate::listing::{ListingId, ServiceListing};
use crate::profile::CartEntry;
use crate::storage::{self, LocalStorage, keys};
use crate::sync::{Reconciliation, WriteThrough};

/// The cart, in insertion order, with at most one line per listing.
///
/// Every change is persisted locally before the mutating call returns,
/// whether or not anyone is signed in. While a remote writer is attached,
/// each change also queues a full-cart write-through. Calls that change
/// nothing (removing an absent line, for instance) neither persist nor push.
pub struct CartStore {
    lines: Vec<CartLine>,
    storage: Arc<dyn LocalStorage>,
    remote: Option<WriteThrough<Vec<CartEntry>>>,
}

impl CartStore {
    /// Loads the persisted cart. A corrupt record is purged and ignored.
    pub fn restore(storage: Arc<dyn LocalStorage>) -> Self {
        let lines = storage::load_json::<Vec<CartLine>>(storage.as_ref(), keys::CART)
            .map(normalize)
            .unwrap_or_default();
        Self {
            lines,
            storage,
            remote: None,
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn quantity_of(&self, id: &ListingId) -> Option<u32> {
        self.position(id).map(|idx| self.lines[idx].quantity)
    }

    /// Reference-only snapshot, as written to the remote profile.
    pub fn entries(&self) -> Vec<CartEntry> {
        self.lines.iter().map(CartLine::entry).collect()
    }

    /// Adds one of `listing`, appending a new line if it is not in the cart.
    pub fn add(&mut self, listing: &ServiceListing) {
        match self.position(&listing.id) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                if line.quantity == u32::MAX {
                    return;
                }
                line.quantity += 1;
            }
            None => self.lines.push(CartLine::new(listing.clone(), 1)),
        }
        self.commit();
    }

    pub fn remove(&mut self, id: &ListingId) {
        if let Some(idx) = self.position(id) {
            self.lines.remove(idx);
            self.commit();
        }
    }

    /// Sets the quantity of an existing line; `quantity <= 0` removes it.
    ///
    /// Never creates a line: setting the quantity of an absent listing is a no-op.
    pub fn set_quantity(&mut self, id: &ListingId, quantity: i64) {
        if quantity <= 0 {
            self.remove(id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(idx) = self.position(id) {
            if self.lines[idx].quantity != quantity {
                self.lines[idx].quantity = quantity;
                self.commit();
            }
        }
    }

    pub fn clear(&mut self) {
        if !self.lines.is_empty() {
            self.lines.clear();
            self.commit();
        }
    }

    /// Applies the remote cart read at sign-in.
    ///
    /// A non-empty remote cart replaces the local one entirely, discarding
    /// anything added as a guest. An empty remote cart leaves local state as is.
    /// Does not push; attach a writer afterwards.
    pub fn reconcile(&mut self, remote: Vec<CartLine>) -> Reconciliation {
        if remote.is_empty() {
            tracing::debug!(local_lines = self.lines.len(), "Remote cart empty, keeping local cart");
            return Reconciliation::KeptLocal;
        }

        let discarded = self.lines.len();
        self.lines = normalize(remote);
        self.persist();
        tracing::info!(
            lines = self.lines.len(),
            discarded,
            "Adopted remote cart"
        );
        Reconciliation::AdoptedRemote
    }

    /// Starts mirroring every subsequent change to `writer`.
    pub fn attach_remote(&mut self, writer: WriteThrough<Vec<CartEntry>>) {
        self.remote = Some(writer);
    }

    /// Stops mirroring. Pending writes still complete in the background.
    pub fn detach_remote(&mut self) -> bool {
        self.remote.take().is_some()
    }

    pub fn is_mirrored(&self) -> bool {
        self.remote.is_some()
    }

    /// Queues the current cart for write-through without changing it.
    pub fn publish(&mut self) {
        let entries = self.entries();
        if let Some(remote) = self.remote.as_mut() {
            remote.push(entries);
        }
    }

    /// Waits for every queued write-through to be attempted.
    pub async fn settle(&self) {
        if let Some(remote) = &self.remote {
            remote.settle().await;
        }
    }

    fn position(&self, id: &ListingId) -> Option<usize> {
        self.lines.iter().position(|line| &line.listing.id == id)
    }

    fn commit(&mut self) {
        self.persist();
        self.publish();
    }

    fn persist(&self) {
        if let Err(e) = storage::save_json(self.storage.as_ref(), keys::CART, &self.lines) {
            tracing::warn!(error = %e, "Failed to persist cart");
        }
    }
}

/// Merges duplicate listings and drops empty lines, keeping first-seen order.
fn normalize(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut merged: Vec<CartLine> = Vec::with_capacity(lines.len());
    for line in lines.into_iter().filter(|line| line.quantity > 0) {
        match merged.iter_mut().find(|m| m.listing.id == line.listing.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => merged.push(line),
        }
    }
    merged
}
