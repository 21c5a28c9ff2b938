//! Write-through of store snapshots to a remote collaborator.
//!
//! Each store that mirrors itself remotely owns one [`WriteThrough`]. Every
//! local mutation hands the worker a full snapshot; the worker pushes
//! snapshots one at a time, always the newest one available. Snapshots that
//! arrive while a push is in flight are coalesced, so the last snapshot
//! handed over is always the last one written and the remote copy converges
//! to the local one once the worker is idle.

use futures::future::BoxFuture;
use tokio::sync::watch;

use crate::error::Result;

/// Outcome of reconciling a store with the remote profile at sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The remote copy was non-empty and replaced local state
    AdoptedRemote,
    /// The remote copy was empty; local (guest) state was kept
    KeptLocal,
}

/// Background writer that replaces the remote copy of a store.
///
/// Dropping the handle lets the worker finish the pending snapshot, then
/// stop. Push failures are logged and never reported back to the store.
pub struct WriteThrough<T> {
    label: &'static str,
    version: u64,
    snapshots: watch::Sender<Option<(u64, T)>>,
    settled: watch::Receiver<u64>,
}

impl<T> WriteThrough<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawns the worker on the current Tokio runtime.
    ///
    /// `push` performs one full replace of the remote value.
    pub fn spawn<F>(label: &'static str, push: F) -> Self
    where
        F: Fn(T) -> BoxFuture<'static, Result<()>> + Send + Sync + 'static,
    {
        let (snapshots, mut pending) = watch::channel::<Option<(u64, T)>>(None);
        let (settled_tx, settled) = watch::channel(0u64);

        tokio::spawn(async move {
            while pending.changed().await.is_ok() {
                let Some((version, snapshot)) = pending.borrow_and_update().clone() else {
                    continue;
                };
                match push(snapshot).await {
                    Ok(()) => tracing::debug!(store = label, version, "Write-through complete"),
                    Err(e) => {
                        tracing::warn!(store = label, version, error = %e, "Write-through failed")
                    }
                }
                settled_tx.send_replace(version);
            }
            tracing::debug!(store = label, "Write-through worker stopped");
        });

        Self {
            label,
            version: 0,
            snapshots,
            settled,
        }
    }

    /// Queues `snapshot` as the next value to write. Never blocks.
    pub fn push(&mut self, snapshot: T) {
        self.version += 1;
        self.snapshots.send_replace(Some((self.version, snapshot)));
    }

    /// Number of snapshots queued so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Waits until the newest queued snapshot has been attempted.
    pub async fn settle(&self) {
        let target = self.version;
        let mut settled = self.settled.clone();
        if settled.wait_for(|done| *done >= target).await.is_err() {
            tracing::warn!(store = self.label, "Write-through worker exited before settling");
        }
    }
}
