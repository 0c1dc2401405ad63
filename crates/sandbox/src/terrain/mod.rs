//! Overworld terrain: rolling hills, caves, ore bands, beaches, gravel
//! patches and trees, all derived from the world seed and absolute tile
//! coordinates.
//!
//! Nothing here reads another chunk's stored tiles, so chunks can be
//! generated in any order (or in parallel) and always come out identical.

pub mod features;
pub mod noise;

use tileworld_engine::world::block::BlockId;
use tileworld_engine::world::chunk::{CHUNK_W, Chunk, WORLD_H};
use tileworld_engine::world::generator::TerrainGenerator;
use tileworld_engine::world::position::{ChunkIndex, LocalTilePos};

use crate::block;

/// Row of the water line. Rows grow downward, so "above sea level" means a
/// smaller row number.
pub const SEA_LEVEL: i64 = 32;

/// Rows of dirt between the grass and the stone.
const DIRT_DEPTH: i64 = 3;

/// `(minimum depth below surface, chance, ore)`, rarest first so a rarer ore
/// wins when several bands match the same roll.
const ORE_BANDS: [(i64, f64, BlockId); 4] = [
    (25, 0.006, block::DIAMOND),
    (15, 0.015, block::GOLD),
    (6, 0.03, block::IRON),
    (0, 0.04, block::COAL),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overworld {
    seed: u32,
}

impl Overworld {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn surface_height(&self, x: i64) -> i64 {
        noise::surface_height(x, self.seed)
    }

    pub fn is_cave(&self, x: i64, y: i64) -> bool {
        noise::is_cave(x, y, self.seed)
    }

    pub fn tile_rand(&self, x: i64, y: i64) -> f64 {
        noise::tile_rand(x, y, self.seed)
    }

    /// Base terrain for one tile, before beaches, gravel and trees.
    fn base_block(&self, x: i64, y: i64, surface: i64) -> BlockId {
        if y >= WORLD_H as i64 - 1 {
            return block::BEDROCK;
        }
        if y < surface {
            return block::AIR;
        }
        if y == surface {
            return block::GRASS;
        }
        if self.is_cave(x, y) {
            return block::AIR;
        }
        if y <= surface + DIRT_DEPTH {
            return block::DIRT;
        }
        let depth = y - surface;
        let roll = self.tile_rand(x, y);
        ORE_BANDS
            .iter()
            .find(|&&(min_depth, chance, _)| depth > min_depth && roll < chance)
            .map_or(block::STONE, |&(_, _, ore)| ore)
    }
}

impl TerrainGenerator for Overworld {
    fn generate(&self, index: ChunkIndex) -> Chunk {
        let heights: [i64; CHUNK_W] = std::array::from_fn(|col| self.surface_height(index.column(col)));
        let mut chunk = Chunk::new_empty(index);

        for (col, &surface) in heights.iter().enumerate() {
            let x = index.column(col);
            for row in 0..WORLD_H {
                let id = self.base_block(x, row as i64, surface);
                chunk.set(LocalTilePos::new(col, row), id);
            }
            features::beach(&mut chunk, col, surface);
        }

        features::gravel_patches(&mut chunk, &heights, self.seed);
        features::trees(&mut chunk, &heights, self.seed);
        chunk
    }
}
