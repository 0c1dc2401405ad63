//! Sandbox configuration: an optional TOML file, then command-line overrides.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::Rng;
use serde::Deserialize;

/// Upper bound (exclusive) for randomly drawn world seeds.
const RANDOM_SEED_RANGE: u32 = 100_000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SandboxConfig {
    /// World seed. Drawn at random when absent.
    pub seed: Option<u32>,
    /// Chunks kept generated on each side of the focus column.
    pub stream_radius: i64,
    /// Chunks on each side of column 0 generated up front.
    pub spawn_radius: i64,
    pub tick_interval_ms: u64,
    /// Steps to run before exiting; 0 runs until Ctrl+C.
    pub ticks: u64,
    /// Columns the autopilot walks per step.
    pub walk_speed: f64,
    /// Autopilot digs the surface under it every this many steps (0 = never).
    pub dig_every: u64,
    /// Autopilot drops a sand block from the sky every this many steps (0 = never).
    pub drop_sand_every: u64,
    pub replication_flush_ms: u64,
    /// Log a metrics snapshot every this many steps (0 = only at exit).
    pub metrics_every: u64,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            seed: None,
            stream_radius: 3,
            spawn_radius: 4,
            tick_interval_ms: 50,
            ticks: 0,
            walk_speed: 0.25,
            dig_every: 8,
            drop_sand_every: 20,
            replication_flush_ms: 400,
            metrics_every: 200,
        }
    }
}

impl SandboxConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply `--seed`, `--ticks` and `--radius` overrides from the command line.
    pub fn apply_args(&mut self, args: &[String]) -> Result<()> {
        if let Some(seed) = flag_value(args, "--seed") {
            self.seed = Some(seed.parse().with_context(|| format!("invalid --seed {seed:?}"))?);
        }
        if let Some(ticks) = flag_value(args, "--ticks") {
            self.ticks = ticks.parse().with_context(|| format!("invalid --ticks {ticks:?}"))?;
        }
        if let Some(radius) = flag_value(args, "--radius") {
            self.stream_radius = radius
                .parse()
                .with_context(|| format!("invalid --radius {radius:?}"))?;
        }
        Ok(())
    }

    /// The configured seed, or a fresh random one.
    pub fn resolve_seed(&self) -> u32 {
        self.seed
            .unwrap_or_else(|| rand::thread_rng().gen_range(0..RANDOM_SEED_RANGE))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn replication_interval(&self) -> Duration {
        Duration::from_millis(self.replication_flush_ms.max(1))
    }
}

/// Value following `name` on the command line, if any.
pub fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .skip_while(|a| *a != name)
        .nth(1)
        .map(String::as_str)
}

pub fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}
