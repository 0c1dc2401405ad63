//! Decorations applied after the base columns are filled: beaches, gravel
//! patches and trees. All of them write strictly inside the chunk being
//! generated.

use tileworld_engine::world::chunk::{CHUNK_W, Chunk, WORLD_H};

use super::SEA_LEVEL;
use super::noise::tile_rand;
use crate::block;

/// Surface rows within this distance of sea level become beach.
const BEACH_BAND: i64 = 2;
/// Sand rows laid down from the surface on a beach column.
const BEACH_DEPTH: i64 = 4;

const GRAVEL_CHANCE: f64 = 0.04;
const GRAVEL_CELL_CHANCE: f64 = 0.6;

const TREE_CHANCE: f64 = 0.06;
/// Canopy half-width. Trees are only rooted this far from either chunk edge.
const CANOPY_RADIUS: i64 = 2;
const TRUNK_MIN: i64 = 4;
const TRUNK_VARIANCE: f64 = 3.0;

// Salt rows for the per-column rolls, far outside the world so they never
// collide with per-tile rolls.
const GRAVEL_SALT: i64 = 999;
const GRAVEL_DEPTH_SALT: i64 = 998;
const GRAVEL_CELL_SALT: i64 = 500;
const TREE_SALT: i64 = 777;
const TRUNK_SALT: i64 = 111;

pub fn beach(chunk: &mut Chunk, col: usize, surface: i64) {
    if (surface - SEA_LEVEL).abs() > BEACH_BAND {
        return;
    }
    let last = (surface + BEACH_DEPTH).min(WORLD_H as i64 - 2);
    for y in surface..=last {
        chunk.try_set(col as i64, y, block::SAND);
    }
}

pub fn gravel_patches(chunk: &mut Chunk, heights: &[i64; CHUNK_W], seed: u32) {
    let index = chunk.index();
    for col in 1..CHUNK_W - 1 {
        let x = index.column(col);
        if tile_rand(x, GRAVEL_SALT, seed) >= GRAVEL_CHANCE {
            continue;
        }
        let depth = (tile_rand(x, GRAVEL_DEPTH_SALT, seed) * 6.0).floor() as i64;
        let gy = heights[col] + 2 + depth;
        if chunk.try_get(col as i64, gy) != Some(block::STONE) {
            continue;
        }
        for dx in -1..=1 {
            for dy in -1..=1 {
                if tile_rand(x + dx, gy + dy + GRAVEL_CELL_SALT, seed) < GRAVEL_CELL_CHANCE {
                    chunk.try_set(col as i64 + dx, gy + dy, block::GRAVEL);
                }
            }
        }
    }
}

pub fn trees(chunk: &mut Chunk, heights: &[i64; CHUNK_W], seed: u32) {
    let index = chunk.index();
    let margin = CANOPY_RADIUS as usize;
    for col in margin..CHUNK_W - margin {
        let x = index.column(col);
        let surface = heights[col];
        // Nothing grows at or below the shoreline.
        if surface >= SEA_LEVEL - 2 || tile_rand(x, TREE_SALT, seed) >= TREE_CHANCE {
            continue;
        }
        let trunk = TRUNK_MIN + (tile_rand(x, TRUNK_SALT, seed) * TRUNK_VARIANCE).floor() as i64;
        plant_tree(chunk, col as i64, surface, trunk);
    }
}

fn plant_tree(chunk: &mut Chunk, col: i64, surface: i64, trunk: i64) {
    for i in 1..=trunk {
        chunk.try_set(col, surface - i, block::WOOD);
    }

    let top = surface - trunk;
    for dy in -2..=1i64 {
        // Rows above the trunk top flare out by one.
        let reach = CANOPY_RADIUS + i64::from(dy < 0);
        for dx in -CANOPY_RADIUS..=CANOPY_RADIUS {
            let on_trunk = dx == 0 && dy >= 0;
            if dx.abs() + dy.abs() > reach || on_trunk {
                continue;
            }
            let (c, r) = (col + dx, top + dy);
            if chunk.try_get(c, r) == Some(block::AIR) {
                chunk.try_set(c, r, block::LEAVES);
            }
        }
    }
}
