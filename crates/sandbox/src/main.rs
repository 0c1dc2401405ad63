use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tileworld_engine::world::World;
use tileworld_engine::world::position::TilePos;
use tileworld_sandbox::block;
use tileworld_sandbox::config::{self, SandboxConfig};
use tileworld_sandbox::event_bus::{self, WorldChangeBatch};
use tileworld_sandbox::metrics::Metrics;
use tileworld_sandbox::replication::{self, ReplicationQueue};
use tileworld_sandbox::simulation::{Autopilot, Simulation};
use tileworld_sandbox::terrain::Overworld;
use tokio::sync::broadcast;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("Sandbox failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut config = match config::flag_value(&args, "--config") {
        Some(path) => SandboxConfig::load(Path::new(path))?,
        None => SandboxConfig::default(),
    };
    config.apply_args(&args)?;
    let seed = config.resolve_seed();

    if config::has_flag(&args, "--demo") {
        run_demo(seed);
        return Ok(());
    }

    tracing::info!("Tile world sandbox -- seed {}", seed);

    // ── World, with player edits feeding the replication queue ─────────
    let queue = Arc::new(ReplicationQueue::new());
    let world = Arc::new(
        World::builder(Arc::new(Overworld::new(seed)), Arc::new(block::catalog()))
            .stream_radius(config.stream_radius)
            .observer(queue.clone())
            .build(),
    );

    let started = Instant::now();
    let generated = world.prewarm(-config.spawn_radius..=config.spawn_radius);
    tracing::info!("Spawn area ready: {} chunks in {:.2?}", generated, started.elapsed());

    let spawn = TilePos::new(0, world.surface_column(0) - 1);
    tracing::info!("Spawn point: ({}, {})", spawn.x, spawn.y);

    // ── Replication: flush task + a mirror world standing in for the store ─
    let (bus_tx, _) = broadcast::channel::<WorldChangeBatch>(event_bus::BUS_CAPACITY);
    let flusher = replication::start(queue.clone(), bus_tx.clone(), config.replication_interval());

    let mirror = Arc::new(World::new(
        Arc::new(Overworld::new(seed)),
        Arc::new(block::catalog()),
    ));
    let mirror_ref = Arc::clone(&mirror);
    let mut bus_rx = bus_tx.subscribe();
    let mirror_task = tokio::spawn(async move {
        // The mirror has no local edits of its own.
        let idle = ReplicationQueue::new();
        loop {
            match bus_rx.recv().await {
                Ok(batch) => {
                    let applied = replication::apply_remote_batch(&mirror_ref, &batch, &idle);
                    tracing::debug!("Mirror applied batch #{} ({} tiles)", batch.seq, applied);
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("Mirror lagged, {} batches dropped", n);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // ── Step loop ──────────────────────────────────────────────────────
    let metrics = Arc::new(Metrics::new());
    let mut sim = Simulation::new(Arc::clone(&world), Arc::clone(&metrics));
    sim.add_layer(Box::new(Autopilot::new(
        spawn.x as f64,
        config.walk_speed,
        config.dig_every,
        config.drop_sand_every,
    )));

    let mut interval = tokio::time::interval(config.tick_interval());
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let report = sim.step();
                if report.fell > 0 || report.dug > 0 || report.built > 0 {
                    tracing::debug!("{:?}", report);
                }
                if config.metrics_every > 0 && sim.steps() % config.metrics_every == 0 {
                    log_metrics(&metrics, &world);
                }
                if config.ticks > 0 && sim.steps() >= config.ticks {
                    tracing::info!("Reached {} steps, stopping", config.ticks);
                    break;
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Ctrl+C received, shutting down...");
                break;
            }
        }
    }

    // ── Drain outstanding edits before exit ────────────────────────────
    flusher.abort();
    // Cancelled on purpose; awaiting it releases the bus sender it holds.
    let _ = flusher.await;
    if let Some(batch) = queue.flush() {
        let _ = bus_tx.send(batch);
    }
    drop(bus_tx);
    if let Err(e) = mirror_task.await {
        tracing::warn!("Mirror task ended abnormally: {}", e);
    }

    log_metrics(&metrics, &world);
    tracing::info!(
        "Done: {} chunks loaded, {} edits recorded, {} edits mirrored",
        world.chunk_count(),
        world.overlay_len(),
        mirror.overlay_len()
    );
    Ok(())
}

fn log_metrics(metrics: &Metrics, world: &World) {
    match serde_json::to_string(&metrics.snapshot(world)) {
        Ok(json) => tracing::info!("metrics {}", json),
        Err(e) => tracing::warn!("Failed to serialize metrics: {}", e),
    }
}

/// Scripted sand-drop demo: dig a hole, drop sand above it, watch it land.
fn run_demo(seed: u32) {
    use tileworld_sandbox::actions;

    tracing::info!("Tile world sandbox -- gravity demo (seed {})", seed);

    let world = Arc::new(World::new(
        Arc::new(Overworld::new(seed)),
        Arc::new(block::catalog()),
    ));
    world.prewarm(-1..=1);

    let x = 8;
    let surface = world.surface_column(x);
    let hole = TilePos::new(x, surface);
    match actions::dig(&world, hole) {
        Some(drop) => tracing::info!(
            "Dug {:?} -> drop {}",
            hole,
            world.catalog().name(drop)
        ),
        None => tracing::warn!("Could not dig at {:?}", hole),
    }

    let drop_at = TilePos::new(x, 0);
    if !actions::build(&world, drop_at, block::SAND) {
        tracing::warn!("Sky above column {} is blocked, nothing to drop", x);
        return;
    }
    tracing::info!("Dropped sand at {:?}", drop_at);

    let metrics = Arc::new(Metrics::new());
    let mut sim = Simulation::new(Arc::clone(&world), metrics);
    let steps = sim.run_until_settled(1000);
    tracing::info!("Quiescence after {} steps", steps);

    let landed = world.surface_column(x);
    tracing::info!(
        "Column {} surface is now row {}: {}",
        x,
        landed,
        world.catalog().name(world.get(TilePos::new(x, landed)))
    );
    if world.get(TilePos::new(x, landed)) == block::SAND {
        tracing::info!("Sand landed correctly.");
    } else {
        tracing::warn!("Unexpected block -- something is off.");
    }
}
