//! Granular-block settling (sand, gravel).
//!
//! A cellular automaton over a pending set: each tick takes a snapshot of
//! the pending coordinates, lets every still-granular block with air below
//! drop exactly one row, and re-schedules whatever moved. A block resting on
//! anything non-air (or on the bottom row) drops out of the set, so a world
//! with no further edits always goes quiet.

use dashmap::DashSet;

use super::World;
use super::block::BlockId;
use super::position::TilePos;

/// Coordinates whose support was disturbed and must be re-checked next tick.
#[derive(Default)]
pub struct GravityQueue {
    pending: DashSet<TilePos>,
}

impl GravityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, pos: TilePos) {
        self.pending.insert(pos);
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        self.pending.contains(&pos)
    }

    /// Drain and return the pending set, lowest rows first.
    ///
    /// A block only ever falls to `y + 1`, a row that sorts ahead of it, so
    /// no block is visited again after it moves.
    pub fn take(&self) -> Vec<TilePos> {
        let mut batch: Vec<TilePos> = self.pending.iter().map(|p| *p).collect();
        for pos in &batch {
            self.pending.remove(pos);
        }
        batch.sort_by(|a, b| b.y.cmp(&a.y).then(a.x.cmp(&b.x)));
        batch
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl World {
    /// Queue `pos` for settling if it currently holds a granular block.
    /// Returns whether it was queued.
    pub fn schedule_gravity(&self, pos: TilePos) -> bool {
        if !pos.in_bounds() || !self.catalog.falls(self.get(pos)) {
            return false;
        }
        self.gravity.insert(pos);
        true
    }

    /// Run one settling step. Returns the number of blocks that moved.
    ///
    /// A moved block is re-queued at its new position, together with any
    /// granular block it was holding up, so stacks collapse one row per tick.
    pub fn tick_gravity(&self) -> usize {
        let batch = self.gravity.take();
        if batch.is_empty() {
            return 0;
        }

        let mut moved = 0;
        for pos in batch {
            let block = self.get(pos);
            if !self.catalog.falls(block) {
                continue;
            }
            let below = pos.below();
            if !below.in_bounds() || !self.get(below).is_air() {
                continue;
            }

            self.set(below, block);
            self.set(pos, BlockId::AIR);
            self.gravity.insert(below);
            self.schedule_gravity(pos.above());
            moved += 1;
        }

        if moved > 0 {
            tracing::trace!("Gravity tick: {} blocks fell, {} pending", moved, self.gravity.len());
        }
        moved
    }

    pub fn pending_len(&self) -> usize {
        self.gravity.len()
    }

    pub fn is_pending(&self, pos: TilePos) -> bool {
        self.gravity.contains(pos)
    }
}
