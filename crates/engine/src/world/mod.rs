pub mod block;
pub mod catalog;
pub mod chunk;
pub mod generator;
pub mod gravity;
pub mod overlay;
pub mod position;
pub mod store;

use std::ops::RangeInclusive;
use std::sync::Arc;

use block::BlockId;
use catalog::BlockCatalog;
use chunk::WORLD_H;
use generator::TerrainGenerator;
use gravity::GravityQueue;
use overlay::EditOverlay;
use position::{ChunkIndex, TilePos};
use store::ChunkStore;

/// Chunks kept generated on each side of the focus chunk by [`World::ensure_loaded`].
pub const DEFAULT_STREAM_RADIUS: i64 = 3;

/// Fire-and-forget hook for edits made by players.
///
/// Called exactly once per successful [`World::mine`] or [`World::place`],
/// after the tile has been written, with its final value. The world knows
/// nothing about what the observer does with it (replication, audit, ...).
pub trait BlockObserver: Send + Sync {
    fn block_changed(&self, pos: TilePos, block: BlockId);
}

/// The entire tile world: generated chunks, the edit overlay and the gravity
/// pending set, behind coordinate-based reads and writes.
///
/// Every operation takes `&self`; the chunk store, overlay and pending set
/// are lock-sharded maps, so the world can be shared through an `Arc` with
/// background readers while one logical writer drives it each step.
///
/// Nothing here fails loudly: out-of-range reads return the catalog's
/// boundary block, out-of-range writes are dropped, and refused mining or
/// placement is reported through the return value.
pub struct World {
    catalog: Arc<BlockCatalog>,
    store: ChunkStore,
    overlay: EditOverlay,
    gravity: GravityQueue,
    observer: Option<Arc<dyn BlockObserver>>,
    stream_radius: i64,
}

pub struct WorldBuilder {
    generator: Arc<dyn TerrainGenerator>,
    catalog: Arc<BlockCatalog>,
    observer: Option<Arc<dyn BlockObserver>>,
    stream_radius: i64,
}

impl WorldBuilder {
    pub fn stream_radius(mut self, radius: i64) -> Self {
        self.stream_radius = radius.max(0);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn BlockObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn build(self) -> World {
        World {
            catalog: self.catalog,
            store: ChunkStore::new(self.generator),
            overlay: EditOverlay::new(),
            gravity: GravityQueue::new(),
            observer: self.observer,
            stream_radius: self.stream_radius,
        }
    }
}

impl World {
    pub fn new(generator: Arc<dyn TerrainGenerator>, catalog: Arc<BlockCatalog>) -> Self {
        Self::builder(generator, catalog).build()
    }

    pub fn builder(generator: Arc<dyn TerrainGenerator>, catalog: Arc<BlockCatalog>) -> WorldBuilder {
        WorldBuilder {
            generator,
            catalog,
            observer: None,
            stream_radius: DEFAULT_STREAM_RADIUS,
        }
    }

    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    /// Read a tile. Edits win over generated data; rows outside the world
    /// read as the boundary block.
    pub fn get(&self, pos: TilePos) -> BlockId {
        if !pos.in_bounds() {
            return self.catalog.boundary();
        }
        if let Some(edited) = self.overlay.get(pos) {
            return edited;
        }
        self.store.ensure(pos.chunk()).get(pos.local())
    }

    /// Write a tile, recording it in the overlay and the owning chunk.
    /// Rows outside the world are silently ignored.
    pub fn set(&self, pos: TilePos, block: BlockId) {
        if !pos.in_bounds() {
            return;
        }
        // Generate first: the chunk must exist before the edit lands in it,
        // otherwise a late generation could bury the edit.
        let mut chunk = self.store.ensure_mut(pos.chunk());
        self.overlay.record(pos, block);
        chunk.set(pos.local(), block);
    }

    /// Mirror an edit that originated elsewhere (e.g. a replication store).
    /// Same as [`set`](Self::set) but never reported to the observer.
    pub fn apply_remote(&self, pos: TilePos, block: BlockId) {
        self.set(pos, block);
    }

    pub fn is_solid(&self, pos: TilePos) -> bool {
        self.catalog.is_solid(self.get(pos))
    }

    /// Topmost solid row in column `x`, or the bottom row if there is none.
    pub fn surface_column(&self, x: i64) -> i64 {
        self.store.ensure(ChunkIndex::of_column(x));
        (0..WORLD_H as i64)
            .find(|&y| self.is_solid(TilePos::new(x, y)))
            .unwrap_or(WORLD_H as i64 - 1)
    }

    /// Break the tile at `pos` and return what it drops.
    ///
    /// Returns `None` (and leaves the world untouched) for air, the boundary
    /// block, unregistered ids and anything the catalog marks unbreakable.
    /// The drop itself may be `AIR` for kinds that yield nothing.
    pub fn mine(&self, pos: TilePos) -> Option<BlockId> {
        if !pos.in_bounds() {
            return None;
        }
        let block = self.get(pos);
        if block == self.catalog.boundary() {
            return None;
        }
        let drop = self.catalog.mined_drop(block)?;
        self.set(pos, BlockId::AIR);
        self.notify(pos, BlockId::AIR);
        tracing::debug!(
            "Mined {} at ({}, {}) -> {}",
            self.catalog.name(block),
            pos.x,
            pos.y,
            self.catalog.name(drop)
        );
        Some(drop)
    }

    /// Put `block` at `pos` if the tile is currently air.
    pub fn place(&self, pos: TilePos, block: BlockId) -> bool {
        if !pos.in_bounds() || block.is_air() || !self.get(pos).is_air() {
            return false;
        }
        self.set(pos, block);
        self.notify(pos, block);
        tracing::debug!("Placed {} at ({}, {})", self.catalog.name(block), pos.x, pos.y);
        true
    }

    fn notify(&self, pos: TilePos, block: BlockId) {
        if let Some(observer) = &self.observer {
            observer.block_changed(pos, block);
        }
    }

    /// Make sure every chunk within the streaming radius of `center_column`
    /// is generated. Returns how many chunks were generated by this call.
    pub fn ensure_loaded(&self, center_column: f64) -> usize {
        let center = ChunkIndex::of_column(center_column.floor() as i64);
        let mut generated = 0;
        for i in (center.0 - self.stream_radius)..=(center.0 + self.stream_radius) {
            let index = ChunkIndex(i);
            if !self.store.contains(index) {
                self.store.ensure(index);
                generated += 1;
            }
        }
        if generated > 0 {
            tracing::debug!(
                "Streamed {} chunks around chunk {} ({} loaded)",
                generated,
                center.0,
                self.store.len()
            );
        }
        generated
    }

    /// Generate every missing chunk in `range` in parallel. Chunks that
    /// already exist (and any edits in them) are left untouched.
    pub fn prewarm(&self, range: RangeInclusive<i64>) -> usize {
        self.store.prewarm(range)
    }

    pub fn is_chunk_loaded(&self, index: ChunkIndex) -> bool {
        self.store.contains(index)
    }

    pub fn chunk_count(&self) -> usize {
        self.store.len()
    }

    pub fn loaded_chunks(&self) -> Vec<ChunkIndex> {
        self.store.indices()
    }

    /// Copy of a chunk's raw tile data, generating it if necessary.
    pub fn chunk_tiles(&self, index: ChunkIndex) -> Vec<BlockId> {
        self.store.ensure(index).tiles().to_vec()
    }

    pub fn overlay_len(&self) -> usize {
        self.overlay.len()
    }

    /// Every edit recorded inside one chunk, sorted by position.
    pub fn edits_in_chunk(&self, index: ChunkIndex) -> Vec<(TilePos, BlockId)> {
        self.overlay.edits_in_chunk(index)
    }

    pub fn stream_radius(&self) -> i64 {
        self.stream_radius
    }
}
