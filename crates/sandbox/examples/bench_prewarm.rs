//! Benchmark: sequential vs parallel chunk generation.
//!
//! Generates the same span of chunks twice, once by walking the streaming
//! window across it and once with a single parallel prewarm, then checks the
//! two worlds came out identical.
//! Run with: `cargo run --release -p tileworld-sandbox --example bench_prewarm`

use std::sync::Arc;
use std::time::Instant;

use tileworld_engine::world::World;
use tileworld_engine::world::chunk::CHUNK_W;
use tileworld_engine::world::position::ChunkIndex;

use tileworld_sandbox::block;
use tileworld_sandbox::terrain::Overworld;

fn main() {
    let seed = 1234;
    let span: i64 = 2048;
    let radius = 3;

    println!("=== Tile world: chunk generation benchmark ===\n");
    println!("  {} chunks ({} columns), seed {}\n", 2 * span + 1, (2 * span + 1) * CHUNK_W as i64, seed);

    // --- Sequential (streaming window sweep) ---
    let world_seq = build_world(seed, radius);
    let t0 = Instant::now();
    let mut n_seq = 0;
    for i in (-span + radius..=span - radius).step_by(radius as usize) {
        n_seq += world_seq.ensure_loaded((i * CHUNK_W as i64) as f64);
    }
    let dt_seq = t0.elapsed();
    println!("  Sequential: {:>6} chunks in {:>8.2?}", n_seq, dt_seq);

    // --- Parallel ---
    let world_par = build_world(seed, radius);
    let t0 = Instant::now();
    let n_par = world_par.prewarm(-span..=span);
    let dt_par = t0.elapsed();
    println!("  Parallel:   {:>6} chunks in {:>8.2?}", n_par, dt_par);

    let speedup = dt_seq.as_secs_f64() / dt_par.as_secs_f64();
    println!("\n  Speedup: {:.2}x", speedup);

    // --- Verify identical ---
    let mismatches = (-span..=span)
        .map(ChunkIndex)
        .filter(|&i| world_seq.chunk_tiles(i) != world_par.chunk_tiles(i))
        .count();

    if mismatches == 0 {
        println!("  Verification: PASS (worlds identical)");
    } else {
        println!("  Verification: FAIL ({} mismatched chunks!)", mismatches);
    }
}

fn build_world(seed: u32, radius: i64) -> World {
    World::builder(Arc::new(Overworld::new(seed)), Arc::new(block::catalog()))
        .stream_radius(radius)
        .build()
}
