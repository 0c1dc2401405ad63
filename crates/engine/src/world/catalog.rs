//! Per-kind block capabilities, supplied by the game layer.
//!
//! The world core never branches on specific block ids. Solidity, mining
//! drops, hardness and gravity all come from the [`BlockProps`] record the
//! game registered for that id.

use super::block::BlockId;

/// Static capability record for one block kind.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockProps {
    pub name: &'static str,
    /// Collides with entities and counts as ground for surface scans.
    pub solid: bool,
    /// Lets light and the background through (renderer hint only).
    pub transparent: bool,
    /// Mining cost factor. Negative means it cannot be mined by hand.
    pub hardness: f32,
    /// What mining yields. `None` means the block drops itself.
    pub drop: Option<BlockId>,
    /// Granular kinds (sand, gravel) settle under gravity.
    pub falls: bool,
}

impl BlockProps {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            solid: false,
            transparent: true,
            hardness: 0.0,
            drop: None,
            falls: false,
        }
    }

    /// An opaque, solid block with the given hardness.
    pub const fn solid(name: &'static str, hardness: f32) -> Self {
        Self {
            name,
            solid: true,
            transparent: false,
            hardness,
            drop: None,
            falls: false,
        }
    }

    pub const fn transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    pub const fn passable(mut self) -> Self {
        self.solid = false;
        self
    }

    pub const fn hardness(mut self, hardness: f32) -> Self {
        self.hardness = hardness;
        self
    }

    pub const fn drops(mut self, id: BlockId) -> Self {
        self.drop = Some(id);
        self
    }

    pub const fn granular(mut self) -> Self {
        self.falls = true;
        self
    }

    pub fn is_unbreakable(&self) -> bool {
        self.hardness < 0.0
    }
}

/// Table of [`BlockProps`] indexed by [`BlockId`].
///
/// Ids without a record are treated as inert: not solid, not granular and
/// not minable.
#[derive(Debug, Clone)]
pub struct BlockCatalog {
    entries: Vec<Option<BlockProps>>,
    boundary: BlockId,
}

impl BlockCatalog {
    /// `boundary` is the block reported for reads outside the vertical extent
    /// of the world (the indestructible floor).
    pub fn new(boundary: BlockId) -> Self {
        Self {
            entries: Vec::new(),
            boundary,
        }
    }

    pub fn register(&mut self, id: BlockId, props: BlockProps) {
        let slot = id.0 as usize;
        if self.entries.len() <= slot {
            self.entries.resize(slot + 1, None);
        }
        self.entries[slot] = Some(props);
    }

    pub fn with(mut self, id: BlockId, props: BlockProps) -> Self {
        self.register(id, props);
        self
    }

    pub fn get(&self, id: BlockId) -> Option<&BlockProps> {
        self.entries.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn boundary(&self) -> BlockId {
        self.boundary
    }

    pub fn is_solid(&self, id: BlockId) -> bool {
        self.get(id).is_some_and(|p| p.solid)
    }

    pub fn falls(&self, id: BlockId) -> bool {
        self.get(id).is_some_and(|p| p.falls)
    }

    /// What mining `id` yields, or `None` if it cannot be mined at all.
    pub fn mined_drop(&self, id: BlockId) -> Option<BlockId> {
        if id.is_air() {
            return None;
        }
        let props = self.get(id)?;
        if props.is_unbreakable() {
            return None;
        }
        Some(props.drop.unwrap_or(id))
    }

    pub fn name(&self, id: BlockId) -> &'static str {
        self.get(id).map_or("unknown", |p| p.name)
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
