//! The classic block palette and the static properties the simulators need.
#![allow(missing_docs)]

use bitflags::bitflags;
use cinder_utils::BlockId;
use cinder_utils::types::BLOCK_COUNT;

pub const AIR: BlockId = 0;
pub const STONE: BlockId = 1;
pub const GRASS: BlockId = 2;
pub const DIRT: BlockId = 3;
pub const COBBLESTONE: BlockId = 4;
pub const PLANKS: BlockId = 5;
pub const SAPLING: BlockId = 6;
pub const BEDROCK: BlockId = 7;
pub const WATER: BlockId = 8;
pub const STILL_WATER: BlockId = 9;
pub const LAVA: BlockId = 10;
pub const STILL_LAVA: BlockId = 11;
pub const SAND: BlockId = 12;
pub const GRAVEL: BlockId = 13;
pub const GOLD_ORE: BlockId = 14;
pub const IRON_ORE: BlockId = 15;
pub const COAL_ORE: BlockId = 16;
pub const LOG: BlockId = 17;
pub const LEAVES: BlockId = 18;
pub const SPONGE: BlockId = 19;
pub const GLASS: BlockId = 20;
pub const DANDELION: BlockId = 37;
pub const ROSE: BlockId = 38;
pub const BROWN_MUSHROOM: BlockId = 39;
pub const RED_MUSHROOM: BlockId = 40;
pub const SLAB: BlockId = 44;
pub const TNT: BlockId = 46;
pub const OBSIDIAN: BlockId = 49;

bitflags! {
    /// Static per-block properties.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BlockFlags: u8 {
        /// Entities and liquids pass through it; liquids overwrite it.
        const WALK_THROUGH = 1 << 0;
        /// Casts a shadow on the block below.
        const BLOCKS_LIGHT = 1 << 1;
        /// Water or lava, flowing or still.
        const LIQUID = 1 << 2;
        /// Drops when unsupported.
        const FALLING = 1 << 3;
        /// Survives explosions.
        const BLAST_PROOF = 1 << 4;
    }
}

static PROPERTIES: [BlockFlags; BLOCK_COUNT] = build_properties();

const fn build_properties() -> [BlockFlags; BLOCK_COUNT] {
    // Unknown ids behave like an opaque solid block.
    let mut table = [BlockFlags::BLOCKS_LIGHT; BLOCK_COUNT];

    table[AIR as usize] = BlockFlags::WALK_THROUGH;
    table[SAPLING as usize] = BlockFlags::WALK_THROUGH;
    table[DANDELION as usize] = BlockFlags::WALK_THROUGH;
    table[ROSE as usize] = BlockFlags::WALK_THROUGH;
    table[BROWN_MUSHROOM as usize] = BlockFlags::WALK_THROUGH;
    table[RED_MUSHROOM as usize] = BlockFlags::WALK_THROUGH;

    table[GLASS as usize] = BlockFlags::empty();
    table[LEAVES as usize] = BlockFlags::empty();

    let liquid = BlockFlags::LIQUID
        .union(BlockFlags::BLOCKS_LIGHT)
        .union(BlockFlags::BLAST_PROOF);
    table[WATER as usize] = liquid;
    table[STILL_WATER as usize] = liquid;
    table[LAVA as usize] = liquid;
    table[STILL_LAVA as usize] = liquid;

    let falling = BlockFlags::FALLING.union(BlockFlags::BLOCKS_LIGHT);
    table[SAND as usize] = falling;
    table[GRAVEL as usize] = falling;

    let blast_proof = BlockFlags::BLAST_PROOF.union(BlockFlags::BLOCKS_LIGHT);
    table[BEDROCK as usize] = blast_proof;
    table[OBSIDIAN as usize] = blast_proof;

    table
}

/// Returns the static properties of a block.
#[inline]
#[must_use]
pub fn flags(block: BlockId) -> BlockFlags {
    PROPERTIES[usize::from(block)]
}

/// Returns true if liquids and falling blocks may replace this block.
#[inline]
#[must_use]
pub fn is_walk_through(block: BlockId) -> bool {
    flags(block).contains(BlockFlags::WALK_THROUGH)
}

/// Returns true if the block shades the cell below it.
#[inline]
#[must_use]
pub fn blocks_light(block: BlockId) -> bool {
    flags(block).contains(BlockFlags::BLOCKS_LIGHT)
}

/// Returns true for water and lava, flowing or still.
#[inline]
#[must_use]
pub fn is_liquid(block: BlockId) -> bool {
    flags(block).contains(BlockFlags::LIQUID)
}

/// Returns true for flowing or still water.
#[inline]
#[must_use]
pub const fn is_water(block: BlockId) -> bool {
    matches!(block, WATER | STILL_WATER)
}

/// Returns true for flowing or still lava.
#[inline]
#[must_use]
pub const fn is_lava(block: BlockId) -> bool {
    matches!(block, LAVA | STILL_LAVA)
}

/// Returns true for blocks that drop when unsupported.
#[inline]
#[must_use]
pub fn is_falling(block: BlockId) -> bool {
    flags(block).contains(BlockFlags::FALLING)
}

/// Returns true if an explosion leaves the block in place.
#[inline]
#[must_use]
pub fn is_blast_proof(block: BlockId) -> bool {
    flags(block).contains(BlockFlags::BLAST_PROOF)
}

/// A short human readable name, used for logging.
#[must_use]
pub const fn name(block: BlockId) -> &'static str {
    match block {
        AIR => "air",
        STONE => "stone",
        GRASS => "grass",
        DIRT => "dirt",
        COBBLESTONE => "cobblestone",
        PLANKS => "planks",
        SAPLING => "sapling",
        BEDROCK => "bedrock",
        WATER => "water",
        STILL_WATER => "still_water",
        LAVA => "lava",
        STILL_LAVA => "still_lava",
        SAND => "sand",
        GRAVEL => "gravel",
        GOLD_ORE => "gold_ore",
        IRON_ORE => "iron_ore",
        COAL_ORE => "coal_ore",
        LOG => "log",
        LEAVES => "leaves",
        SPONGE => "sponge",
        GLASS => "glass",
        DANDELION => "dandelion",
        ROSE => "rose",
        BROWN_MUSHROOM => "brown_mushroom",
        RED_MUSHROOM => "red_mushroom",
        SLAB => "slab",
        TNT => "tnt",
        OBSIDIAN => "obsidian",
        _ => "unknown",
    }
}
