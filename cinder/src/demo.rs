//! A flat demo world with a few active features scattered on the surface.

use cinder_core::block;
use cinder_core::{Level, LevelError, Physics, World};
use cinder_utils::random::{Random, RandomKind, RandomSource};
use cinder_utils::{BlockId, Dimensions};

/// Generates flat terrain: bedrock, stone with ores, three layers of dirt and
/// a grass surface at half the world height.
pub fn generate(dims: Dimensions, seed: u64) -> Result<Level, LevelError> {
    let mut rng = RandomKind::Xoroshiro.with_seed(seed);
    let surface = surface_y(dims);
    let mut blocks = Vec::with_capacity(dims.volume());

    for y in 0..dims.height {
        for _ in 0..dims.one_y() {
            let block = match y {
                0 => block::BEDROCK,
                y if y == surface => block::GRASS,
                y if y > surface => block::AIR,
                y if y + 3 >= surface => block::DIRT,
                _ => ore_or_stone(&mut rng),
            };
            blocks.push(block);
        }
    }

    let mut level = Level::new();
    level.load(dims, blocks)?;
    Ok(level)
}

fn ore_or_stone(rng: &mut RandomSource) -> BlockId {
    match rng.next_i32_bounded(256) {
        0..4 => block::COAL_ORE,
        4..6 => block::IRON_ORE,
        6 => block::GOLD_ORE,
        _ => block::STONE,
    }
}

const fn surface_y(dims: Dimensions) -> usize {
    dims.height / 2
}

/// Places liquids, loose sand, explosives and plants through the physics
/// engine so their handlers schedule work.
///
/// Returns the number of features placed.
pub fn seed_activity<W: World, R: Random>(physics: &mut Physics<W, R>, seed: u64) -> usize {
    let dims = physics.dimensions();
    if dims.is_empty() || dims.height < 2 {
        return 0;
    }
    let mut rng = RandomKind::Xoroshiro.with_seed(seed ^ 0x5DEE_CE66);
    let top = surface_y(dims) + 1;
    let features = (dims.width * dims.length / 512).max(1);

    for _ in 0..features {
        let x = rng.next_i32_bounded(dims.width as i32) as usize;
        let z = rng.next_i32_bounded(dims.length as i32) as usize;
        let y = top.min(dims.height - 1);
        match rng.next_i32_bounded(6) {
            0 => physics.place_block(x, y, z, block::WATER),
            1 => {
                physics.place_block(x, y, z, block::LAVA);
                if x + 1 < dims.width {
                    physics.place_block(x + 1, y, z, block::TNT);
                }
            }
            2 => {
                for dy in (4..8).filter(|dy| y + dy < dims.height) {
                    physics.place_block(x, y + dy, z, block::SAND);
                }
            }
            3 => physics.place_block(x, y, z, block::SAPLING),
            4 => physics.place_block(x, y, z, block::ROSE),
            _ => physics.place_block(x, y, z, block::DANDELION),
        }
    }
    features
}
