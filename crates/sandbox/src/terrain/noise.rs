//! Coordinate-only noise. Every function here depends on nothing but the
//! seed and absolute tile coordinates, never on which chunk asked.

use tileworld_engine::world::chunk::WORLD_H;

use super::SEA_LEVEL;

/// Shallowest and deepest rows the surface may sit on.
const SURFACE_MIN: i64 = 5;
const SURFACE_MAX: i64 = WORLD_H as i64 - 10;

/// `(frequency, seed factor, phase, amplitude)` for each surface octave.
const SURFACE_OCTAVES: [(f64, f64, f64, f64); 4] = [
    (0.04, 0.1, 1.3, 5.0),
    (0.09, 0.07, 2.7, 3.0),
    (0.22, 0.13, 0.9, 2.0),
    (0.5, 0.19, 5.1, 1.0),
];

const CAVE_THRESHOLD: f64 = 0.18;

/// Surface row of absolute column `x`.
pub fn surface_height(x: i64, seed: u32) -> i64 {
    let (x, s) = (x as f64, seed as f64);
    let offset: f64 = SURFACE_OCTAVES
        .iter()
        .map(|&(freq, seed_k, phase, amp)| (x * freq + s * seed_k + phase).sin() * amp)
        .sum();
    let raw = (SEA_LEVEL - 6) as f64 + offset;
    (raw.round() as i64).clamp(SURFACE_MIN, SURFACE_MAX)
}

/// Whether the tile at `(x, y)` is carved out as cave. The three rows above
/// the floor are never carved.
pub fn is_cave(x: i64, y: i64, seed: u32) -> bool {
    if y >= WORLD_H as i64 - 3 {
        return false;
    }
    let (x, y, s) = (x as f64, y as f64, seed as f64);
    let v1 = (x * 0.3 + y * 0.2 + s).sin() * (x * 0.1 - y * 0.35).cos();
    let v2 = (x * 0.15 - y * 0.1 + 3.0 + s * 0.5).sin() * (x * 0.25 + y * 0.18 + 1.0).cos();
    v1 * v2 > CAVE_THRESHOLD
}

/// Deterministic per-tile random value in `[0, 1)`.
///
/// Integer avalanche hash of the coordinates and seed; stateless, so any
/// chunk asking about the same tile gets the same answer.
pub fn tile_rand(x: i64, y: i64, seed: u32) -> f64 {
    let mut h = (x as u32)
        .wrapping_mul(374_761_393)
        .wrapping_add((y as u32).wrapping_mul(1_000_003))
        .wrapping_add(seed.wrapping_mul(2_246_822_519));
    h ^= h >> 15;
    h = h.wrapping_mul(2_246_822_519);
    h ^= h >> 13;
    h = h.wrapping_mul(3_266_489_917);
    h ^= h >> 16;
    h as f64 / 4_294_967_296.0
}
