//! Sandbox block kinds and their catalog records.
//!
//! Ids below 20 are world blocks; the rest are inventory items that share the
//! same id space so the crafting and inventory collaborators can store them
//! alongside blocks.

use tileworld_engine::world::block::BlockId;
use tileworld_engine::world::catalog::{BlockCatalog, BlockProps};

pub const AIR: BlockId = BlockId::AIR;
pub const GRASS: BlockId = BlockId(1);
pub const DIRT: BlockId = BlockId(2);
pub const STONE: BlockId = BlockId(3);
pub const COAL: BlockId = BlockId(4);
pub const IRON: BlockId = BlockId(5);
pub const GOLD: BlockId = BlockId(6);
pub const DIAMOND: BlockId = BlockId(7);
pub const WOOD: BlockId = BlockId(8);
pub const LEAVES: BlockId = BlockId(9);
pub const SAND: BlockId = BlockId(10);
pub const GRAVEL: BlockId = BlockId(11);
pub const WATER: BlockId = BlockId(12);
pub const LAVA: BlockId = BlockId(13);
pub const BEDROCK: BlockId = BlockId(14);
pub const PLANKS: BlockId = BlockId(15);
pub const GLASS: BlockId = BlockId(16);
pub const TORCH: BlockId = BlockId(17);
pub const CRAFTING_TABLE: BlockId = BlockId(18);
pub const FURNACE: BlockId = BlockId(19);

// Items
pub const STICK: BlockId = BlockId(20);
pub const COAL_ITEM: BlockId = BlockId(21);
pub const IRON_INGOT: BlockId = BlockId(22);
pub const GOLD_INGOT: BlockId = BlockId(23);
pub const DIAMOND_GEM: BlockId = BlockId(24);
pub const WOOD_PICK: BlockId = BlockId(25);
pub const STONE_PICK: BlockId = BlockId(26);
pub const IRON_PICK: BlockId = BlockId(27);
pub const WOOD_AXE: BlockId = BlockId(28);
pub const STONE_AXE: BlockId = BlockId(29);
pub const IRON_AXE: BlockId = BlockId(30);
pub const WOOD_SWORD: BlockId = BlockId(31);
pub const STONE_SWORD: BlockId = BlockId(32);
pub const IRON_SWORD: BlockId = BlockId(33);

/// The full sandbox catalog. Bedrock doubles as the out-of-world boundary.
pub fn catalog() -> BlockCatalog {
    let item = |name| BlockProps::new(name);
    BlockCatalog::new(BEDROCK)
        .with(AIR, BlockProps::new("air"))
        .with(GRASS, BlockProps::solid("grass", 0.6).drops(DIRT))
        .with(DIRT, BlockProps::solid("dirt", 0.5))
        .with(STONE, BlockProps::solid("stone", 1.5))
        .with(COAL, BlockProps::solid("coal ore", 3.0))
        .with(IRON, BlockProps::solid("iron ore", 3.0))
        .with(GOLD, BlockProps::solid("gold ore", 3.0))
        .with(DIAMOND, BlockProps::solid("diamond ore", 5.0))
        .with(WOOD, BlockProps::solid("wood", 2.0))
        .with(LEAVES, BlockProps::new("leaves").hardness(0.2).drops(AIR))
        .with(SAND, BlockProps::solid("sand", 0.5).granular())
        .with(GRAVEL, BlockProps::solid("gravel", 0.6).granular())
        .with(WATER, BlockProps::new("water").hardness(-1.0))
        .with(LAVA, BlockProps::new("lava").transparent(false).hardness(-1.0))
        .with(BEDROCK, BlockProps::solid("bedrock", -1.0))
        .with(PLANKS, BlockProps::solid("planks", 2.0))
        .with(GLASS, BlockProps::solid("glass", 0.3).transparent(true).drops(AIR))
        .with(TORCH, BlockProps::new("torch").hardness(0.1))
        .with(CRAFTING_TABLE, BlockProps::solid("crafting table", 2.5))
        .with(FURNACE, BlockProps::solid("furnace", 3.5))
        .with(STICK, item("stick"))
        .with(COAL_ITEM, item("coal"))
        .with(IRON_INGOT, item("iron ingot"))
        .with(GOLD_INGOT, item("gold ingot"))
        .with(DIAMOND_GEM, item("diamond"))
        .with(WOOD_PICK, item("wooden pickaxe"))
        .with(STONE_PICK, item("stone pickaxe"))
        .with(IRON_PICK, item("iron pickaxe"))
        .with(WOOD_AXE, item("wooden axe"))
        .with(STONE_AXE, item("stone axe"))
        .with(IRON_AXE, item("iron axe"))
        .with(WOOD_SWORD, item("wooden sword"))
        .with(STONE_SWORD, item("stone sword"))
        .with(IRON_SWORD, item("iron sword"))
}

/// Can a player put this id into the world? Solid blocks can, plus the few
/// non-solid fixtures.
pub fn is_placeable(catalog: &BlockCatalog, id: BlockId) -> bool {
    catalog.is_solid(id) || id == TORCH || id == CRAFTING_TABLE || id == FURNACE
}
