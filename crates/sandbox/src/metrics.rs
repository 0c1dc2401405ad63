//! Lock-free simulation counters.
//!
//! The step loop updates these via atomic operations; the reporter reads them
//! at its own pace and logs a serializable snapshot.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering::Relaxed};
use std::time::{Duration, Instant};

use tileworld_engine::world::World;

use crate::actions::Outcome;

pub struct Metrics {
    // Monotonic counters
    steps: AtomicU64,
    step_ns_sum: AtomicU64,
    chunks_streamed: AtomicU64,
    gravity_moves: AtomicU64,
    blocks_mined: AtomicU64,
    blocks_placed: AtomicU64,
    actions_rejected: AtomicU64,

    // Step latency histogram buckets
    hist_under_10us: AtomicU64,
    hist_10_100us: AtomicU64,
    hist_100us_1ms: AtomicU64,
    hist_1_10ms: AtomicU64,
    hist_over_10ms: AtomicU64,

    started_at: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            steps: AtomicU64::new(0),
            step_ns_sum: AtomicU64::new(0),
            chunks_streamed: AtomicU64::new(0),
            gravity_moves: AtomicU64::new(0),
            blocks_mined: AtomicU64::new(0),
            blocks_placed: AtomicU64::new(0),
            actions_rejected: AtomicU64::new(0),
            hist_under_10us: AtomicU64::new(0),
            hist_10_100us: AtomicU64::new(0),
            hist_100us_1ms: AtomicU64::new(0),
            hist_1_10ms: AtomicU64::new(0),
            hist_over_10ms: AtomicU64::new(0),
            started_at: Instant::now(),
        }
    }

    /// Called once per simulation step.
    pub fn record_step(&self, streamed: usize, fell: usize, duration: Duration) {
        self.steps.fetch_add(1, Relaxed);
        self.step_ns_sum.fetch_add(duration.as_nanos() as u64, Relaxed);
        self.chunks_streamed.fetch_add(streamed as u64, Relaxed);
        self.gravity_moves.fetch_add(fell as u64, Relaxed);

        let bucket = match duration.as_micros() {
            0..=9 => &self.hist_under_10us,
            10..=99 => &self.hist_10_100us,
            100..=999 => &self.hist_100us_1ms,
            1_000..=9_999 => &self.hist_1_10ms,
            _ => &self.hist_over_10ms,
        };
        bucket.fetch_add(1, Relaxed);
    }

    pub fn record_outcome(&self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Dug { .. } => &self.blocks_mined,
            Outcome::Built => &self.blocks_placed,
            Outcome::Rejected => &self.actions_rejected,
        };
        counter.fetch_add(1, Relaxed);
    }

    pub fn steps(&self) -> u64 {
        self.steps.load(Relaxed)
    }

    /// Read all counters (plus a few world gauges) into a serializable snapshot.
    pub fn snapshot(&self, world: &World) -> MetricsSnapshot {
        MetricsSnapshot {
            uptime_secs: self.started_at.elapsed().as_secs_f64(),
            steps: self.steps.load(Relaxed),
            step_ns_sum: self.step_ns_sum.load(Relaxed),
            chunks_streamed: self.chunks_streamed.load(Relaxed),
            gravity_moves: self.gravity_moves.load(Relaxed),
            blocks_mined: self.blocks_mined.load(Relaxed),
            blocks_placed: self.blocks_placed.load(Relaxed),
            actions_rejected: self.actions_rejected.load(Relaxed),
            chunks_loaded: world.chunk_count() as u64,
            overlay_edits: world.overlay_len() as u64,
            gravity_pending: world.pending_len() as u64,
            hist: [
                self.hist_under_10us.load(Relaxed),
                self.hist_10_100us.load(Relaxed),
                self.hist_100us_1ms.load(Relaxed),
                self.hist_1_10ms.load(Relaxed),
                self.hist_over_10ms.load(Relaxed),
            ],
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable snapshot of all metrics at a point in time.
#[derive(Clone, Debug, Serialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: f64,
    pub steps: u64,
    pub step_ns_sum: u64,
    pub chunks_streamed: u64,
    pub gravity_moves: u64,
    pub blocks_mined: u64,
    pub blocks_placed: u64,
    pub actions_rejected: u64,
    pub chunks_loaded: u64,
    pub overlay_edits: u64,
    pub gravity_pending: u64,
    /// `[<10μs, 10-100μs, 100μs-1ms, 1-10ms, >10ms]`
    pub hist: [u64; 5],
}
