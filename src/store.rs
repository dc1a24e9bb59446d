//! In-memory holder for the current market snapshot.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};

use crate::market::MarketSnapshot;

const CHANNEL_CAPACITY: usize = 16;

/// Holds exactly one snapshot. Readers get a shared handle; writers swap in a
/// whole new snapshot and subscribers are notified.
#[derive(Clone)]
pub struct SnapshotStore {
    current: Arc<RwLock<Arc<MarketSnapshot>>>,
    revision: Arc<AtomicU64>,
    updates: broadcast::Sender<Arc<MarketSnapshot>>,
}

impl SnapshotStore {
    pub fn new(initial: MarketSnapshot) -> Self {
        let (updates, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            current: Arc::new(RwLock::new(Arc::new(initial))),
            revision: Arc::new(AtomicU64::new(0)),
            updates,
        }
    }

    /// Current snapshot.
    pub async fn get(&self) -> Arc<MarketSnapshot> {
        self.current.read().await.clone()
    }

    /// Swap in `next` as the current snapshot.
    pub async fn replace(&self, next: MarketSnapshot) {
        let next = Arc::new(next);
        *self.current.write().await = next.clone();
        let rev = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        metrics::gauge!("snapshot_revision", rev as f64);
        // no subscribers is fine
        let _ = self.updates.send(next);
    }

    /// Number of replacements since construction.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    /// Receive every snapshot passed to `replace` from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<MarketSnapshot>> {
        self.updates.subscribe()
    }
}
