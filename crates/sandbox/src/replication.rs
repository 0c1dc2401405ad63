//! Edit replication: collects player edits from the world and ships them to
//! subscribers in periodic batches.
//!
//! The world only sees [`ReplicationQueue`] as a [`BlockObserver`]. Edits to
//! the same tile between two flushes collapse into the latest value; the
//! flush task turns the queue into [`WorldChangeBatch`]es on the event bus.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use indexmap::IndexMap;
use tileworld_engine::world::block::BlockId;
use tileworld_engine::world::position::TilePos;
use tileworld_engine::world::{BlockObserver, World};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::event_bus::WorldChangeBatch;

/// Default flush period for [`start`].
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_millis(400);

#[derive(Default)]
pub struct ReplicationQueue {
    pending: Mutex<IndexMap<TilePos, BlockId>>,
    next_seq: AtomicU64,
}

impl ReplicationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().expect("replication queue poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Is a local edit for `pos` still waiting to be flushed?
    pub fn is_pending(&self, pos: TilePos) -> bool {
        self.pending
            .lock()
            .expect("replication queue poisoned")
            .contains_key(&pos)
    }

    /// Drain everything queued so far into one batch, or `None` if idle.
    pub fn flush(&self) -> Option<WorldChangeBatch> {
        let drained: Vec<(TilePos, BlockId)> = {
            let mut pending = self.pending.lock().expect("replication queue poisoned");
            pending.drain(..).collect()
        };
        if drained.is_empty() {
            return None;
        }
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        Some(WorldChangeBatch::from_changes(seq, drained))
    }
}

impl BlockObserver for ReplicationQueue {
    fn block_changed(&self, pos: TilePos, block: BlockId) {
        self.pending
            .lock()
            .expect("replication queue poisoned")
            .insert(pos, block);
    }
}

/// Spawn the flush loop: every `every`, publish whatever the queue holds.
pub fn start(
    queue: Arc<ReplicationQueue>,
    bus: broadcast::Sender<WorldChangeBatch>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // The first tick fires immediately; nothing can be queued yet.
        interval.tick().await;
        tracing::info!("Replication flush started (interval {:?})", every);

        loop {
            interval.tick().await;
            let Some(batch) = queue.flush() else {
                continue;
            };
            tracing::debug!(
                "Replication batch #{}: {} upserts, {} deletes",
                batch.seq,
                batch.upserts.len(),
                batch.deletes.len()
            );
            // Ignore send errors (no subscribers = no problem).
            let _ = bus.send(batch);
        }
    })
}

/// Mirror a batch that arrived from the shared store into `world`.
///
/// Tiles with a local edit still queued in `local` are skipped: the local
/// value is newer and will overwrite the store on the next flush. Gravity is
/// scheduled around every applied tile the same way the action helpers do
/// locally, since falls are never replicated. Returns the number of tiles
/// applied.
pub fn apply_remote_batch(world: &World, batch: &WorldChangeBatch, local: &ReplicationQueue) -> usize {
    let mut applied = 0;
    for (pos, block) in batch.changes() {
        if local.is_pending(pos) {
            continue;
        }
        world.apply_remote(pos, block);
        world.schedule_gravity(pos);
        world.schedule_gravity(pos.above());
        applied += 1;
    }
    applied
}
