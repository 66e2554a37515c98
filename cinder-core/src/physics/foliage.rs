//! Ambient plant life: grass spreading and dying, saplings, flowers.
//!
//! Foliage has no queue; it only reacts to random ticks.

use cinder_utils::random::Random;
use cinder_utils::{BlockId, Dimensions};

use super::Physics;
use crate::behavior::BlockCallbacks;
use crate::block;
use crate::world::World;

/// Shortest trunk a sapling grows.
pub const TREE_MIN_HEIGHT: i32 = 4;

/// Tallest trunk a sapling grows.
pub const TREE_MAX_HEIGHT: i32 = 6;

/// Grows and withers plants on random ticks.
#[derive(Debug, Default)]
pub struct FoliagePhysics {
    dims: Dimensions,
}

impl FoliagePhysics {
    /// Creates the simulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts new map extents.
    pub fn resize(&mut self, dims: Dimensions) {
        self.dims = dims;
    }

    fn above(&self, index: usize) -> Option<usize> {
        let above = index + self.dims.one_y();
        (above < self.dims.volume()).then_some(above)
    }

    fn below(&self, index: usize) -> Option<usize> {
        index.checked_sub(self.dims.one_y())
    }

    fn tick_grass<W: World>(&self, world: &mut W, index: usize) {
        if let Some(above) = self.above(index)
            && block::blocks_light(world.get_block(above))
        {
            world.set_block(index, block::DIRT);
        }
    }

    fn tick_dirt<W: World>(&self, world: &mut W, index: usize) {
        let shaded = self
            .above(index)
            .is_some_and(|above| block::blocks_light(world.get_block(above)));
        if !shaded {
            world.set_block(index, block::GRASS);
        }
    }

    /// Removes a plant unless the block below is one of `soil`.
    fn check_soil<W: World>(&self, world: &mut W, index: usize, soil: &[BlockId]) {
        let supported = self
            .below(index)
            .is_some_and(|below| soil.contains(&world.get_block(below)));
        if !supported {
            world.set_block(index, block::AIR);
        }
    }

    fn grow_tree<W: World, R: Random>(&self, world: &mut W, rng: &mut R, index: usize) {
        let dims = self.dims;
        let (x, y, z) = dims.unpack(index);
        let (x, y, z) = (x as i32, y as i32, z as i32);
        let height = rng.next_i32_between(TREE_MIN_HEIGHT, TREE_MAX_HEIGHT);
        let canopy = canopy(height);

        let cell = |(dx, dy, dz): (i32, i32, i32)| {
            let (nx, ny, nz) = (x + dx, y + dy, z + dz);
            dims.contains(nx, ny, nz)
                .then(|| dims.index(nx as usize, ny as usize, nz as usize))
        };

        let fits = (1..height)
            .map(|dy| (0, dy, 0))
            .chain(canopy.iter().copied())
            .all(|offset| {
                cell(offset).is_some_and(|cell| {
                    matches!(world.get_block(cell), block::AIR | block::LEAVES)
                })
            });
        if !fits {
            return;
        }

        for cell in canopy.into_iter().filter_map(cell) {
            if world.get_block(cell) == block::AIR {
                world.set_block(cell, block::LEAVES);
            }
        }
        for cell in (0..height).filter_map(|dy| cell((0, dy, 0))) {
            world.set_block(cell, block::LOG);
        }
        log::trace!("Sapling at ({x}, {y}, {z}) grew into a tree of height {height}");
    }
}

/// Leaf offsets relative to the sapling for a trunk of `height` logs.
fn canopy(height: i32) -> Vec<(i32, i32, i32)> {
    let mut cells = Vec::new();
    for dy in height - 2..height {
        for dz in -2_i32..=2 {
            for dx in -2_i32..=2 {
                let corner = dx.abs() == 2 && dz.abs() == 2;
                let trunk = dx == 0 && dz == 0;
                if !corner && !trunk {
                    cells.push((dx, dy, dz));
                }
            }
        }
    }
    for dz in -1_i32..=1 {
        for dx in -1_i32..=1 {
            if dx.abs() + dz.abs() < 2 {
                cells.push((dx, height, dz));
            }
        }
    }
    cells
}

pub(super) fn register<W: World, R: Random>(callbacks: &mut BlockCallbacks<W, R>) {
    callbacks.set_random_tick(block::GRASS, tick_grass::<W, R>);
    callbacks.set_random_tick(block::DIRT, tick_dirt::<W, R>);
    callbacks.set_random_tick(block::SAPLING, grow_sapling::<W, R>);
    callbacks.set_random_tick(block::DANDELION, check_flower::<W, R>);
    callbacks.set_random_tick(block::ROSE, check_flower::<W, R>);
    callbacks.set_random_tick(block::BROWN_MUSHROOM, check_mushroom::<W, R>);
    callbacks.set_random_tick(block::RED_MUSHROOM, check_mushroom::<W, R>);
}

fn tick_grass<W: World, R: Random>(physics: &mut Physics<W, R>, index: usize, _: BlockId) {
    physics.foliage.tick_grass(&mut physics.world, index);
}

fn tick_dirt<W: World, R: Random>(physics: &mut Physics<W, R>, index: usize, _: BlockId) {
    physics.foliage.tick_dirt(&mut physics.world, index);
}

fn grow_sapling<W: World, R: Random>(physics: &mut Physics<W, R>, index: usize, _: BlockId) {
    physics
        .foliage
        .grow_tree(&mut physics.world, &mut physics.rng, index);
}

fn check_flower<W: World, R: Random>(physics: &mut Physics<W, R>, index: usize, _: BlockId) {
    physics
        .foliage
        .check_soil(&mut physics.world, index, &[block::GRASS, block::DIRT]);
}

fn check_mushroom<W: World, R: Random>(physics: &mut Physics<W, R>, index: usize, _: BlockId) {
    physics.foliage.check_soil(
        &mut physics.world,
        index,
        &[
            block::STONE,
            block::COBBLESTONE,
            block::GRAVEL,
            block::DIRT,
            block::GRASS,
        ],
    );
}
