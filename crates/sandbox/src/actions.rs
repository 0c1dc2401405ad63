//! Player-facing edits: the façade call plus the gravity bookkeeping every
//! caller would otherwise have to remember.

use tileworld_engine::world::World;
use tileworld_engine::world::block::BlockId;
use tileworld_engine::world::position::TilePos;

use crate::block;

/// One edit requested by a player or a scripted layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Dig(TilePos),
    Build(TilePos, BlockId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The tile was broken. `drop` may be `AIR` for kinds that yield nothing.
    Dug { drop: BlockId },
    Built,
    Rejected,
}

/// Mine `pos` and wake whatever granular block was resting on it.
pub fn dig(world: &World, pos: TilePos) -> Option<BlockId> {
    let drop = world.mine(pos)?;
    world.schedule_gravity(pos.above());
    Some(drop)
}

/// Place `id` at `pos` if it is a placeable kind and the tile is empty.
/// A granular block placed over air starts falling on the next tick.
pub fn build(world: &World, pos: TilePos, id: BlockId) -> bool {
    if !block::is_placeable(world.catalog(), id) {
        return false;
    }
    if !world.place(pos, id) {
        return false;
    }
    world.schedule_gravity(pos);
    true
}

pub fn apply(world: &World, action: Action) -> Outcome {
    match action {
        Action::Dig(pos) => match dig(world, pos) {
            Some(drop) => Outcome::Dug { drop },
            None => Outcome::Rejected,
        },
        Action::Build(pos, id) => {
            if build(world, pos, id) {
                Outcome::Built
            } else {
                Outcome::Rejected
            }
        }
    }
}
