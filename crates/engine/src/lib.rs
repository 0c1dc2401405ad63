//! Game-agnostic core of a horizontally infinite 2D tile world.
//!
//! The engine owns the spatial substrate (chunks, the edit overlay and the
//! gravity pending set) but never interprets block identifiers on its own:
//! every per-kind decision is read from a [`world::catalog::BlockCatalog`],
//! and terrain comes from a caller-supplied [`world::generator::TerrainGenerator`].

pub mod world;
