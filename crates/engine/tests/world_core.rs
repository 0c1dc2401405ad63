//! World-core tests using a tiny flat generator and an opaque test catalog.
//! No game-specific terrain is involved.

use std::sync::{Arc, Mutex};

use tileworld_engine::world::block::BlockId;
use tileworld_engine::world::catalog::{BlockCatalog, BlockProps};
use tileworld_engine::world::chunk::{CHUNK_W, Chunk, WORLD_H};
use tileworld_engine::world::generator::TerrainGenerator;
use tileworld_engine::world::position::{ChunkIndex, LocalTilePos, TilePos};
use tileworld_engine::world::{BlockObserver, World};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const AIR: BlockId = BlockId::AIR;
const ROCK: BlockId = BlockId(1);
const ORE: BlockId = BlockId(2);
const NUGGET: BlockId = BlockId(3);
const SAND: BlockId = BlockId(4);
const FLOOR: BlockId = BlockId(5);
const GLASS: BlockId = BlockId(6);

/// Air above row 40, rock from 40 down, floor on the last row.
const GROUND: usize = 40;

struct Flat;

impl TerrainGenerator for Flat {
    fn generate(&self, index: ChunkIndex) -> Chunk {
        let mut chunk = Chunk::new_empty(index);
        for col in 0..CHUNK_W {
            for row in GROUND..WORLD_H - 1 {
                chunk.set(LocalTilePos::new(col, row), ROCK);
            }
            chunk.set(LocalTilePos::new(col, WORLD_H - 1), FLOOR);
        }
        chunk
    }
}

fn catalog() -> Arc<BlockCatalog> {
    Arc::new(
        BlockCatalog::new(FLOOR)
            .with(AIR, BlockProps::new("air"))
            .with(ROCK, BlockProps::solid("rock", 1.5))
            .with(ORE, BlockProps::solid("ore", 3.0).drops(NUGGET))
            .with(NUGGET, BlockProps::new("nugget"))
            .with(SAND, BlockProps::solid("sand", 0.5).granular())
            .with(FLOOR, BlockProps::solid("floor", -1.0))
            .with(GLASS, BlockProps::solid("glass", 0.3).transparent(true).drops(AIR)),
    )
}

fn flat_world() -> World {
    World::new(Arc::new(Flat), catalog())
}

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<(TilePos, BlockId)>>,
}

impl BlockObserver for Recorder {
    fn block_changed(&self, pos: TilePos, block: BlockId) {
        self.seen.lock().unwrap().push((pos, block));
    }
}

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

#[test]
fn negative_columns_use_floor_division() {
    assert_eq!(TilePos::new(-1, 0).chunk(), ChunkIndex(-1));
    assert_eq!(TilePos::new(-1, 0).local().col, CHUNK_W - 1);
    assert_eq!(TilePos::new(-(CHUNK_W as i64), 0).chunk(), ChunkIndex(-1));
    assert_eq!(TilePos::new(-(CHUNK_W as i64), 0).local().col, 0);
    assert_eq!(TilePos::new(-(CHUNK_W as i64) - 1, 0).chunk(), ChunkIndex(-2));
    assert_eq!(TilePos::new(CHUNK_W as i64, 0).chunk(), ChunkIndex(1));
    assert_eq!(ChunkIndex(-2).column(3), -2 * CHUNK_W as i64 + 3);
}

#[test]
fn chunk_bounds_checked_access() {
    let mut chunk = Chunk::new_empty(ChunkIndex(0));
    assert!(chunk.try_set(0, 0, ROCK));
    assert!(!chunk.try_set(-1, 0, ROCK));
    assert!(!chunk.try_set(CHUNK_W as i64, 0, ROCK));
    assert!(!chunk.try_set(0, WORLD_H as i64, ROCK));
    assert_eq!(chunk.try_get(0, 0), Some(ROCK));
    assert_eq!(chunk.try_get(0, -1), None);
    // Row-major layout.
    chunk.set(LocalTilePos::new(3, 2), SAND);
    assert_eq!(chunk.tiles()[2 * CHUNK_W + 3], SAND);
}

// ---------------------------------------------------------------------------
// Reads, writes, streaming
// ---------------------------------------------------------------------------

#[test]
fn out_of_bounds_reads_return_boundary_and_writes_are_dropped() {
    let world = flat_world();
    assert_eq!(world.get(TilePos::new(0, -1)), FLOOR);
    assert_eq!(world.get(TilePos::new(0, WORLD_H as i64)), FLOOR);

    world.set(TilePos::new(0, -1), SAND);
    world.set(TilePos::new(0, WORLD_H as i64 + 5), SAND);
    assert_eq!(world.overlay_len(), 0);
    // Out-of-range reads never generate anything.
    assert_eq!(world.chunk_count(), 0);
}

#[test]
fn first_read_generates_chunk_once() {
    let world = flat_world();
    assert_eq!(world.get(TilePos::new(-5, GROUND as i64)), ROCK);
    assert_eq!(world.chunk_count(), 1);
    assert!(world.is_chunk_loaded(ChunkIndex(-1)));

    world.set(TilePos::new(-5, 0), SAND);
    // Re-reading the same chunk must not regenerate over the edit.
    assert_eq!(world.get(TilePos::new(-6, 0)), AIR);
    assert_eq!(world.get(TilePos::new(-5, 0)), SAND);
    assert_eq!(world.chunk_tiles(ChunkIndex(-1))[CHUNK_W - 5], SAND);
    assert_eq!(world.chunk_count(), 1);
}

#[test]
fn set_keeps_overlay_and_chunk_in_sync() {
    let world = flat_world();
    let pos = TilePos::new(20, 10);
    world.set(pos, ROCK);
    assert_eq!(world.get(pos), ROCK);
    assert_eq!(world.edits_in_chunk(ChunkIndex(1)), vec![(pos, ROCK)]);
    let local = pos.local();
    assert_eq!(world.chunk_tiles(ChunkIndex(1))[local.row * CHUNK_W + local.col], ROCK);

    // Clearing is itself a recorded edit.
    world.set(pos, AIR);
    assert_eq!(world.overlay_len(), 1);
    assert_eq!(world.edits_in_chunk(ChunkIndex(1)), vec![(pos, AIR)]);
}

#[test]
fn edits_survive_a_fresh_world_replaying_the_overlay() {
    let world = flat_world();
    let pos = TilePos::new(3, GROUND as i64 + 2);
    world.set(pos, ORE);
    let edits = world.edits_in_chunk(ChunkIndex(0));

    // A fresh store regenerates chunk 0 from scratch; the replayed edit wins.
    let reloaded = flat_world();
    for (p, b) in edits {
        reloaded.apply_remote(p, b);
    }
    assert_eq!(reloaded.get(pos), ORE);
    assert_eq!(reloaded.chunk_tiles(ChunkIndex(0)), world.chunk_tiles(ChunkIndex(0)));
}

#[test]
fn ensure_loaded_covers_streaming_window() {
    let world = World::builder(Arc::new(Flat), catalog()).stream_radius(2).build();
    let generated = world.ensure_loaded(-0.5);
    assert_eq!(generated, 5);
    assert_eq!(
        world.loaded_chunks(),
        (-3..=1).map(ChunkIndex).collect::<Vec<_>>()
    );
    // Moving within the same chunk streams nothing new.
    assert_eq!(world.ensure_loaded(-15.9), 0);
    // Chunk 2 with radius 2 needs 0..=4; 0 and 1 already exist.
    assert_eq!(world.ensure_loaded(CHUNK_W as f64 * 2.0), 3);
    assert_eq!(world.chunk_count(), 8);
}

#[test]
fn prewarm_never_replaces_existing_chunks() {
    let world = flat_world();
    let pos = TilePos::new(1, 1);
    world.set(pos, SAND);
    let inserted = world.prewarm(-4..=4);
    assert_eq!(inserted, 8);
    assert_eq!(world.chunk_count(), 9);
    assert_eq!(world.get(pos), SAND);
    assert_eq!(world.prewarm(-4..=4), 0);
}

#[test]
fn edits_racing_parallel_prewarm_are_never_buried() {
    for round in 0..32i64 {
        let world = flat_world();
        let pos = TilePos::new((round % 9 - 4) * CHUNK_W as i64 + round % CHUNK_W as i64, 5);
        rayon::join(|| world.set(pos, GLASS), || world.prewarm(-4..=4));

        assert_eq!(world.chunk_count(), 9);
        assert_eq!(world.get(pos), GLASS, "round {round}");
        let local = pos.local();
        assert_eq!(
            world.chunk_tiles(pos.chunk())[local.row * CHUNK_W + local.col],
            GLASS,
            "round {round}"
        );
    }
}

#[test]
fn surface_column_finds_first_solid_row() {
    let world = flat_world();
    assert_eq!(world.surface_column(7), GROUND as i64);
    world.set(TilePos::new(7, 12), ROCK);
    assert_eq!(world.surface_column(7), 12);
    // Non-solid kinds do not count as ground.
    world.set(TilePos::new(8, 12), NUGGET);
    assert_eq!(world.surface_column(8), GROUND as i64);
    assert!(world.is_solid(TilePos::new(7, 12)));
    assert!(!world.is_solid(TilePos::new(8, 12)));
}

#[test]
fn surface_column_falls_back_to_bottom_row() {
    struct Void;
    impl TerrainGenerator for Void {
        fn generate(&self, index: ChunkIndex) -> Chunk {
            Chunk::new_empty(index)
        }
    }
    let world = World::new(Arc::new(Void), catalog());
    assert_eq!(world.surface_column(0), WORLD_H as i64 - 1);
}

// ---------------------------------------------------------------------------
// Mining and placing
// ---------------------------------------------------------------------------

#[test]
fn mine_returns_configured_drop_or_self() {
    let world = flat_world();
    let rock = TilePos::new(0, GROUND as i64);
    assert_eq!(world.mine(rock), Some(ROCK));
    assert_eq!(world.get(rock), AIR);

    let ore = TilePos::new(1, GROUND as i64);
    world.set(ore, ORE);
    assert_eq!(world.mine(ore), Some(NUGGET));

    let glass = TilePos::new(2, 5);
    world.set(glass, GLASS);
    assert_eq!(world.mine(glass), Some(AIR));
    assert_eq!(world.get(glass), AIR);
}

#[test]
fn mine_refuses_air_floor_and_unknown_kinds() {
    let world = flat_world();
    assert_eq!(world.mine(TilePos::new(0, 0)), None);
    assert_eq!(world.mine(TilePos::new(0, WORLD_H as i64 - 1)), None);
    assert_eq!(world.get(TilePos::new(0, WORLD_H as i64 - 1)), FLOOR);
    assert_eq!(world.mine(TilePos::new(0, -3)), None);

    let odd = TilePos::new(4, 4);
    world.set(odd, BlockId(999));
    assert_eq!(world.mine(odd), None);
    assert_eq!(world.get(odd), BlockId(999));
}

#[test]
fn place_then_mine_round_trip() {
    let world = flat_world();
    let pos = TilePos::new(-9, 20);
    assert!(world.place(pos, ORE));
    assert_eq!(world.get(pos), ORE);
    assert_eq!(world.mine(pos), Some(NUGGET));
    assert_eq!(world.get(pos), AIR);
}

#[test]
fn place_rejects_occupied_tiles() {
    let world = flat_world();
    let pos = TilePos::new(0, GROUND as i64);
    assert!(!world.place(pos, SAND));
    assert_eq!(world.get(pos), ROCK);
    assert!(!world.place(TilePos::new(0, -1), SAND));
    assert!(!world.place(TilePos::new(0, 0), AIR));
    assert_eq!(world.overlay_len(), 0);
}

#[test]
fn observer_sees_each_player_edit_exactly_once() {
    let recorder = Arc::new(Recorder::default());
    let world = World::builder(Arc::new(Flat), catalog())
        .observer(recorder.clone())
        .build();

    let top = TilePos::new(0, GROUND as i64);
    world.mine(top);
    world.place(top, SAND);
    world.place(top, ROCK); // rejected
    world.mine(TilePos::new(0, 0)); // air, rejected
    world.set(TilePos::new(5, 5), ROCK); // raw writes are not player edits
    world.apply_remote(TilePos::new(6, 5), ROCK);

    let seen = recorder.seen.lock().unwrap().clone();
    assert_eq!(seen, vec![(top, AIR), (top, SAND)]);
}

// ---------------------------------------------------------------------------
// Gravity
// ---------------------------------------------------------------------------

#[test]
fn schedule_only_accepts_granular_blocks() {
    let world = flat_world();
    assert!(!world.schedule_gravity(TilePos::new(0, 0)));
    assert!(!world.schedule_gravity(TilePos::new(0, GROUND as i64)));
    assert!(!world.schedule_gravity(TilePos::new(0, -1)));
    world.set(TilePos::new(0, 10), SAND);
    assert!(world.schedule_gravity(TilePos::new(0, 10)));
    assert_eq!(world.pending_len(), 1);
}

#[test]
fn suspended_sand_falls_one_row_per_tick_then_settles() {
    let world = flat_world();
    let start = 30i64;
    world.set(TilePos::new(3, start), SAND);
    world.schedule_gravity(TilePos::new(3, start));

    let rest = GROUND as i64 - 1;
    for y in start..rest {
        assert_eq!(world.tick_gravity(), 1);
        assert_eq!(world.get(TilePos::new(3, y)), AIR);
        assert_eq!(world.get(TilePos::new(3, y + 1)), SAND);
        assert!(world.is_pending(TilePos::new(3, y + 1)));
    }

    // Landed: one more tick notices the support and drops it from pending.
    assert_eq!(world.tick_gravity(), 0);
    assert_eq!(world.pending_len(), 0);
    assert_eq!(world.tick_gravity(), 0);
    assert_eq!(world.get(TilePos::new(3, rest)), SAND);
}

#[test]
fn stacked_sand_collapses_without_gaps() {
    let world = flat_world();
    // Three sand blocks stacked at rows 20..=22, air under them down to GROUND.
    for y in 20..=22 {
        world.set(TilePos::new(9, y), SAND);
        world.schedule_gravity(TilePos::new(9, y));
    }

    let mut ticks = 0;
    while world.pending_len() > 0 {
        world.tick_gravity();
        ticks += 1;
        assert!(ticks < 100, "gravity never went quiet");
    }

    let ground = GROUND as i64;
    for y in ground - 3..ground {
        assert_eq!(world.get(TilePos::new(9, y)), SAND, "row {y}");
    }
    for y in 0..ground - 3 {
        assert_eq!(world.get(TilePos::new(9, y)), AIR, "row {y}");
    }
}

#[test]
fn every_block_in_a_falling_stack_moves_exactly_one_row_per_tick() {
    let world = flat_world();
    for y in 20..=22 {
        world.set(TilePos::new(5, y), SAND);
        world.schedule_gravity(TilePos::new(5, y));
    }

    assert_eq!(world.tick_gravity(), 3);
    assert_eq!(world.get(TilePos::new(5, 20)), AIR);
    for y in 21..=23 {
        assert_eq!(world.get(TilePos::new(5, y)), SAND, "row {y}");
    }
    assert_eq!(world.get(TilePos::new(5, 24)), AIR);
}

#[test]
fn mining_under_sand_lets_it_fall() {
    let world = flat_world();
    let top = TilePos::new(2, GROUND as i64);
    world.set(top.above(), SAND);
    world.mine(top);
    world.schedule_gravity(top.above());

    assert_eq!(world.tick_gravity(), 1);
    assert_eq!(world.get(top), SAND);
    assert_eq!(world.tick_gravity(), 0);
    assert_eq!(world.pending_len(), 0);
}

#[test]
fn sand_rests_on_bottom_row() {
    struct Void;
    impl TerrainGenerator for Void {
        fn generate(&self, index: ChunkIndex) -> Chunk {
            Chunk::new_empty(index)
        }
    }
    let world = World::new(Arc::new(Void), catalog());
    let bottom = WORLD_H as i64 - 1;
    world.set(TilePos::new(0, bottom - 1), SAND);
    world.schedule_gravity(TilePos::new(0, bottom - 1));
    assert_eq!(world.tick_gravity(), 1);
    assert_eq!(world.get(TilePos::new(0, bottom)), SAND);
    assert_eq!(world.tick_gravity(), 0);
    assert_eq!(world.pending_len(), 0);
}

#[test]
fn gravity_changes_are_not_reported_as_player_edits() {
    let recorder = Arc::new(Recorder::default());
    let world = World::builder(Arc::new(Flat), catalog())
        .observer(recorder.clone())
        .build();
    world.place(TilePos::new(0, 30), SAND);
    world.schedule_gravity(TilePos::new(0, 30));
    world.tick_gravity();
    assert_eq!(recorder.seen.lock().unwrap().len(), 1);
}
