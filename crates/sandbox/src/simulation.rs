//! The cooperative step loop.
//!
//! One step is: stream chunks around every layer's focus column, settle one
//! row of gravity, then apply the edits each [`SimulationLayer`] asks for.
//! Nothing in a step blocks, so the caller can drive it from a timer.
//!
//! # Adding a new layer
//!
//! 1. Implement [`SimulationLayer`] for your struct.
//! 2. Pass it to [`Simulation::add_layer`].

use std::sync::Arc;
use std::time::Instant;

use tileworld_engine::world::World;
use tileworld_engine::world::position::TilePos;

use crate::actions::{self, Action, Outcome};
use crate::block;
use crate::metrics::Metrics;

/// A pluggable source of edits, polled once per step.
pub trait SimulationLayer: Send + 'static {
    /// Human-readable name (used for logging).
    fn name(&self) -> &'static str;

    /// Column the world should stay streamed around for this layer.
    fn focus(&self) -> f64;

    /// Inspect the world and return the edits to apply this step.
    ///
    /// Returning an empty vec is fine -- it just means "nothing to do this step."
    fn actions(&mut self, world: &World, step: u64) -> Vec<Action>;
}

/// Summary of one [`Simulation::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub step: u64,
    pub streamed: usize,
    pub fell: usize,
    pub dug: usize,
    pub built: usize,
    pub rejected: usize,
}

pub struct Simulation {
    world: Arc<World>,
    metrics: Arc<Metrics>,
    layers: Vec<Box<dyn SimulationLayer>>,
    step: u64,
}

impl Simulation {
    pub fn new(world: Arc<World>, metrics: Arc<Metrics>) -> Self {
        Self {
            world,
            metrics,
            layers: Vec::new(),
            step: 0,
        }
    }

    pub fn add_layer(&mut self, layer: Box<dyn SimulationLayer>) {
        tracing::info!("Simulation layer '{}' added", layer.name());
        self.layers.push(layer);
    }

    pub fn world(&self) -> &Arc<World> {
        &self.world
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn step(&mut self) -> StepReport {
        let started = Instant::now();
        let mut report = StepReport {
            step: self.step,
            ..StepReport::default()
        };

        for layer in &self.layers {
            report.streamed += self.world.ensure_loaded(layer.focus());
        }
        report.fell = self.world.tick_gravity();

        for layer in &mut self.layers {
            for action in layer.actions(&self.world, self.step) {
                let outcome = actions::apply(&self.world, action);
                self.metrics.record_outcome(outcome);
                match outcome {
                    Outcome::Dug { .. } => report.dug += 1,
                    Outcome::Built => report.built += 1,
                    Outcome::Rejected => {
                        tracing::debug!("Layer '{}': {:?} rejected", layer.name(), action);
                        report.rejected += 1;
                    }
                }
            }
        }

        self.metrics
            .record_step(report.streamed, report.fell, started.elapsed());
        self.step += 1;
        report
    }

    /// Step until nothing is waiting on gravity, or `max_steps` run out.
    /// Returns the number of steps taken.
    pub fn run_until_settled(&mut self, max_steps: usize) -> usize {
        for taken in 0..max_steps {
            if self.world.pending_len() == 0 {
                return taken;
            }
            self.step();
        }
        max_steps
    }
}

/// Scripted stand-in for a player: walks right, digs the ground under its
/// feet and now and then drops sand from the sky ahead of itself.
pub struct Autopilot {
    column: f64,
    speed: f64,
    dig_every: u64,
    drop_sand_every: u64,
}

impl Autopilot {
    pub fn new(column: f64, speed: f64, dig_every: u64, drop_sand_every: u64) -> Self {
        Self {
            column,
            speed,
            dig_every,
            drop_sand_every,
        }
    }

    pub fn column(&self) -> f64 {
        self.column
    }
}

fn every(period: u64, step: u64) -> bool {
    period > 0 && step % period == 0
}

impl SimulationLayer for Autopilot {
    fn name(&self) -> &'static str {
        "autopilot"
    }

    fn focus(&self) -> f64 {
        self.column
    }

    fn actions(&mut self, world: &World, step: u64) -> Vec<Action> {
        self.column += self.speed;
        let x = self.column.floor() as i64;

        let mut out = Vec::new();
        if every(self.dig_every, step) {
            out.push(Action::Dig(TilePos::new(x, world.surface_column(x))));
        }
        if every(self.drop_sand_every, step) {
            out.push(Action::Build(TilePos::new(x + 2, 0), block::SAND));
        }
        out
    }
}
