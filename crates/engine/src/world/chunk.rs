use super::block::BlockId;
use super::position::{ChunkIndex, LocalTilePos};

/// Number of tile columns in one chunk.
pub const CHUNK_W: usize = 16;
/// Number of tile rows in the world (and therefore in every chunk).
pub const WORLD_H: usize = 64;
/// Total tile count in one chunk.
const CHUNK_AREA: usize = CHUNK_W * WORLD_H;

/// A `CHUNK_W` x `WORLD_H` vertical slice of the world.
///
/// Stored as a flat array in row-major order (`row * CHUNK_W + col`), so a
/// whole row of the chunk is contiguous. Chunks are generated once and kept
/// for the lifetime of the world.
#[derive(Clone, PartialEq, Eq)]
pub struct Chunk {
    index: ChunkIndex,
    tiles: Box<[BlockId; CHUNK_AREA]>,
}

impl Chunk {
    pub fn new_filled(index: ChunkIndex, block: BlockId) -> Self {
        Self {
            index,
            tiles: Box::new([block; CHUNK_AREA]),
        }
    }

    pub fn new_empty(index: ChunkIndex) -> Self {
        Self::new_filled(index, BlockId::AIR)
    }

    pub fn index(&self) -> ChunkIndex {
        self.index
    }

    #[inline]
    const fn offset(pos: LocalTilePos) -> usize {
        pos.row * CHUNK_W + pos.col
    }

    #[inline]
    pub fn get(&self, pos: LocalTilePos) -> BlockId {
        self.tiles[Self::offset(pos)]
    }

    #[inline]
    pub fn set(&mut self, pos: LocalTilePos, block: BlockId) {
        self.tiles[Self::offset(pos)] = block;
    }

    /// Bounds-checked variant of [`get`](Self::get) for signed local coordinates.
    pub fn try_get(&self, col: i64, row: i64) -> Option<BlockId> {
        Self::checked(col, row).map(|pos| self.get(pos))
    }

    /// Bounds-checked variant of [`set`](Self::set). Returns whether the write
    /// landed inside this chunk.
    pub fn try_set(&mut self, col: i64, row: i64, block: BlockId) -> bool {
        match Self::checked(col, row) {
            Some(pos) => {
                self.set(pos, block);
                true
            }
            None => false,
        }
    }

    fn checked(col: i64, row: i64) -> Option<LocalTilePos> {
        let in_range = (0..CHUNK_W as i64).contains(&col) && (0..WORLD_H as i64).contains(&row);
        in_range.then(|| LocalTilePos::new(col as usize, row as usize))
    }

    /// Raw tile data, row-major.
    pub fn tiles(&self) -> &[BlockId] {
        &self.tiles[..]
    }
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk").field("index", &self.index).finish_non_exhaustive()
    }
}
