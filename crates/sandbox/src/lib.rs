pub mod actions;
pub mod block;
pub mod config;
pub mod event_bus;
pub mod metrics;
pub mod replication;
pub mod simulation;
pub mod terrain;
