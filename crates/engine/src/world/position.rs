use super::chunk::{CHUNK_W, WORLD_H};

/// Absolute tile position in the world. Row 0 is the top; `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TilePos {
    pub x: i64,
    pub y: i64,
}

impl TilePos {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The chunk this tile belongs to (floor division, so -1 lands in chunk -1).
    pub const fn chunk(&self) -> ChunkIndex {
        ChunkIndex::of_column(self.x)
    }

    /// Position within the owning chunk. Only meaningful when [`in_bounds`](Self::in_bounds).
    pub const fn local(&self) -> LocalTilePos {
        LocalTilePos {
            col: self.x.rem_euclid(CHUNK_W as i64) as usize,
            row: self.y as usize,
        }
    }

    /// Whether `y` lies inside the world's vertical extent.
    pub const fn in_bounds(&self) -> bool {
        self.y >= 0 && self.y < WORLD_H as i64
    }

    pub const fn above(&self) -> TilePos {
        Self::new(self.x, self.y - 1)
    }

    pub const fn below(&self) -> TilePos {
        Self::new(self.x, self.y + 1)
    }
}

/// Horizontal index of a chunk (each chunk is `CHUNK_W` columns wide).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkIndex(pub i64);

impl ChunkIndex {
    pub const fn of_column(x: i64) -> Self {
        Self(x.div_euclid(CHUNK_W as i64))
    }

    /// Absolute column of this chunk's local column 0.
    pub const fn first_column(&self) -> i64 {
        self.0 * CHUNK_W as i64
    }

    /// Absolute column for a local column inside this chunk.
    pub const fn column(&self, col: usize) -> i64 {
        self.first_column() + col as i64
    }
}

/// Tile position local to a chunk (`col` in `0..CHUNK_W`, `row` in `0..WORLD_H`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTilePos {
    pub col: usize,
    pub row: usize,
}

impl LocalTilePos {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}
