//! Change batches published by the replication queue.
//!
//! Every flush of player edits becomes one [`WorldChangeBatch`] on a shared
//! `tokio::sync::broadcast` channel. Subscribers (a remote store, a mirror
//! world, a logger) each get their own copy.

use std::sync::Arc;

use tileworld_engine::world::block::BlockId;
use tileworld_engine::world::position::TilePos;

/// Recommended capacity for the broadcast channel.
pub const BUS_CAPACITY: usize = 256;

/// A coalesced set of edits from one flush.
///
/// Uses `Arc<[...]>` so cloning per broadcast subscriber is just a refcount bump.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldChangeBatch {
    /// Monotonic per-queue flush counter.
    pub seq: u64,
    /// Tiles that now hold a block.
    pub upserts: Arc<[(TilePos, BlockId)]>,
    /// Tiles that were cleared to air.
    pub deletes: Arc<[TilePos]>,
}

impl WorldChangeBatch {
    /// Split `(position, block)` edits into upserts and deletes, keeping order.
    pub fn from_changes(seq: u64, changes: impl IntoIterator<Item = (TilePos, BlockId)>) -> Self {
        let (cleared, placed): (Vec<_>, Vec<_>) =
            changes.into_iter().partition(|(_, block)| block.is_air());
        Self {
            seq,
            upserts: placed.into(),
            deletes: cleared.into_iter().map(|(pos, _)| pos).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.upserts.len() + self.deletes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every edit as `(position, block)`, deletes reported as `AIR`.
    pub fn changes(&self) -> impl Iterator<Item = (TilePos, BlockId)> + '_ {
        self.upserts
            .iter()
            .copied()
            .chain(self.deletes.iter().map(|pos| (*pos, BlockId::AIR)))
    }
}
