use dashmap::DashMap;

use super::block::BlockId;
use super::position::{ChunkIndex, TilePos};

/// Sparse record of every tile written through the world façade.
///
/// Entries are authoritative for reads and are never removed: clearing a
/// tile records an explicit `AIR` entry. Chunk data is kept in sync on every
/// write, so today the overlay acts as a read shortcut and audit trail; it is
/// also what would be re-merged if a chunk were ever rebuilt from the
/// generator.
#[derive(Default)]
pub struct EditOverlay {
    edits: DashMap<TilePos, BlockId>,
}

impl EditOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: TilePos) -> Option<BlockId> {
        self.edits.get(&pos).map(|e| *e)
    }

    pub fn record(&self, pos: TilePos, block: BlockId) {
        self.edits.insert(pos, block);
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// All edits that fall inside one chunk, sorted by position.
    pub fn edits_in_chunk(&self, index: ChunkIndex) -> Vec<(TilePos, BlockId)> {
        let mut out: Vec<(TilePos, BlockId)> = self
            .edits
            .iter()
            .filter(|e| e.key().chunk() == index)
            .map(|e| (*e.key(), *e.value()))
            .collect();
        out.sort_by_key(|(pos, _)| *pos);
        out
    }
}
