//! Water and lava spreading.
//!
//! Liquids spread sideways and down, never up. Water spreads one cell per
//! tick; lava waits [`LAVA_DELAY`] ticks between steps. Where the two meet the
//! cell that was reached turns to stone.

use cinder_utils::random::Random;
use cinder_utils::{BlockId, Dimensions};

use super::{BELOW, Physics, TntPhysics, neighbours};
use crate::behavior::BlockCallbacks;
use crate::block;
use crate::ticks::{PackedEntry, TickQueue};
use crate::world::World;

/// Ticks between two lava spreading steps.
pub const LAVA_DELAY: u8 = 30;

/// Ticks between two water spreading steps.
pub const WATER_DELAY: u8 = 0;

/// Water never spreads within this many cells of a sponge.
pub const SPONGE_RADIUS: usize = 2;

/// Spreads water and lava through their scheduled update queues.
#[derive(Debug, Default)]
pub struct LiquidPhysics {
    lava: TickQueue,
    water: TickQueue,
    dims: Dimensions,
}

impl LiquidPhysics {
    /// Creates the simulator with empty queues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a lava cell to spread after [`LAVA_DELAY`] ticks.
    pub fn schedule_lava(&mut self, index: usize) {
        self.lava.enqueue(PackedEntry::new(index, LAVA_DELAY));
    }

    /// Schedules a water cell to spread on the next water pass.
    pub fn schedule_water(&mut self, index: usize) {
        self.water.enqueue(PackedEntry::new(index, WATER_DELAY));
    }

    /// Pending lava updates.
    #[must_use]
    pub fn lava_queue(&self) -> &TickQueue {
        &self.lava
    }

    /// Pending water updates.
    #[must_use]
    pub fn water_queue(&self) -> &TickQueue {
        &self.water
    }

    /// Total pending updates.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.lava.len() + self.water.len()
    }

    /// Drops every pending update.
    pub fn clear(&mut self) {
        self.lava.clear();
        self.water.clear();
    }

    /// Drops every pending update and adopts new map extents.
    pub fn reset_map(&mut self, dims: Dimensions) {
        self.clear();
        self.dims = dims;
    }

    /// Runs the lava updates that are due.
    pub(super) fn tick_lava<W: World>(&mut self, world: &mut W, tnt: &mut TntPhysics) {
        let count = self.lava.len();
        for _ in 0..count {
            let Some(entry) = self.lava.check().due() else {
                continue;
            };
            let index = entry.pos();
            if block::is_lava(world.get_block(index)) {
                self.activate_lava(world, tnt, index);
            }
        }
    }

    /// Runs the water updates that are due.
    pub(super) fn tick_water<W: World>(&mut self, world: &mut W) {
        let count = self.water.len();
        for _ in 0..count {
            let Some(entry) = self.water.check().due() else {
                continue;
            };
            let index = entry.pos();
            if block::is_water(world.get_block(index)) {
                self.activate_water(world, index);
            }
        }
    }

    fn activate_lava<W: World>(&mut self, world: &mut W, tnt: &mut TntPhysics, index: usize) {
        for target in neighbours(self.dims, index)[..=BELOW].iter().flatten() {
            self.propagate_lava(world, tnt, *target);
        }
    }

    fn propagate_lava<W: World>(&mut self, world: &mut W, tnt: &mut TntPhysics, index: usize) {
        let block = world.get_block(index);
        if block::is_water(block) {
            world.set_block(index, block::STONE);
        } else if block == block::TNT {
            tnt.ignite(index, false);
        } else if block::is_walk_through(block) {
            world.set_block(index, block::LAVA);
            self.schedule_lava(index);
        }
    }

    fn activate_water<W: World>(&mut self, world: &mut W, index: usize) {
        for target in neighbours(self.dims, index)[..=BELOW].iter().flatten() {
            self.propagate_water(world, *target);
        }
    }

    fn propagate_water<W: World>(&mut self, world: &mut W, index: usize) {
        let block = world.get_block(index);
        if block::is_lava(block) {
            world.set_block(index, block::STONE);
        } else if block::is_walk_through(block) && !self.near_sponge(world, index) {
            world.set_block(index, block::WATER);
            self.schedule_water(index);
        }
    }

    /// Calls `f` for every in-bounds cell of the cube of [`SPONGE_RADIUS`]
    /// around `index`. Stops early when `f` returns true.
    fn any_in_sponge_range(&self, index: usize, mut f: impl FnMut(usize) -> bool) -> bool {
        let dims = self.dims;
        let (x, y, z) = dims.unpack(index);
        let r = SPONGE_RADIUS;
        for ny in y.saturating_sub(r)..=(y + r).min(dims.height - 1) {
            for nz in z.saturating_sub(r)..=(z + r).min(dims.length - 1) {
                for nx in x.saturating_sub(r)..=(x + r).min(dims.width - 1) {
                    if f(dims.index(nx, ny, nz)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn near_sponge<W: World>(&self, world: &W, index: usize) -> bool {
        self.any_in_sponge_range(index, |cell| world.get_block(cell) == block::SPONGE)
    }

    fn soak_up<W: World>(&self, world: &mut W, index: usize) {
        self.any_in_sponge_range(index, |cell| {
            if block::is_water(world.get_block(cell)) {
                world.set_block(cell, block::AIR);
            }
            false
        });
    }
}

pub(super) fn register<W: World, R: Random>(callbacks: &mut BlockCallbacks<W, R>) {
    callbacks.set_place(block::LAVA, place_lava::<W, R>);
    callbacks.set_place(block::WATER, place_water::<W, R>);
    callbacks.set_place(block::SPONGE, place_sponge::<W, R>);

    callbacks.set_random_tick(block::LAVA, activate_lava::<W, R>);
    callbacks.set_random_tick(block::STILL_LAVA, activate_lava::<W, R>);
    callbacks.set_random_tick(block::WATER, activate_water::<W, R>);
    callbacks.set_random_tick(block::STILL_WATER, activate_water::<W, R>);
}

fn place_lava<W: World, R: Random>(physics: &mut Physics<W, R>, index: usize, _: BlockId) {
    physics.liquid.schedule_lava(index);
}

fn place_water<W: World, R: Random>(physics: &mut Physics<W, R>, index: usize, _: BlockId) {
    physics.liquid.schedule_water(index);
}

fn place_sponge<W: World, R: Random>(physics: &mut Physics<W, R>, index: usize, _: BlockId) {
    physics.liquid.soak_up(&mut physics.world, index);
}

fn activate_lava<W: World, R: Random>(physics: &mut Physics<W, R>, index: usize, _: BlockId) {
    physics
        .liquid
        .activate_lava(&mut physics.world, &mut physics.tnt, index);
}

fn activate_water<W: World, R: Random>(physics: &mut Physics<W, R>, index: usize, _: BlockId) {
    physics.liquid.activate_water(&mut physics.world, index);
}

#[cfg(test)]
mod tests {
    use cinder_utils::random::legacy_random::LegacyRandom;

    use super::*;
    use crate::world::{Level, WorldEvents};

    type TestPhysics = Physics<Level, LegacyRandom>;

    fn physics(dims: Dimensions) -> TestPhysics {
        let level = Level::empty(dims).expect("test level");
        Physics::with_random(level, &WorldEvents::new(), true, LegacyRandom::from_seed(0))
    }

    fn lava_pass(physics: &mut TestPhysics) {
        physics
            .liquid
            .tick_lava(&mut physics.world, &mut physics.tnt);
    }

    fn water_pass(physics: &mut TestPhysics) {
        physics.liquid.tick_water(&mut physics.world);
    }

    #[test]
    fn test_water_spreads_sideways_and_down() {
        let dims = Dimensions::new(5, 5, 5);
        let mut physics = physics(dims);
        physics.place_block(2, 2, 2, block::WATER);
        assert_eq!(physics.liquid().water_queue().len(), 1);

        water_pass(&mut physics);

        let world = physics.world();
        for (x, y, z) in [(1, 2, 2), (3, 2, 2), (2, 2, 1), (2, 2, 3), (2, 1, 2)] {
            assert_eq!(world.block_at(x, y, z), block::WATER, "({x}, {y}, {z})");
        }
        assert_eq!(world.block_at(2, 3, 2), block::AIR);
        assert_eq!(physics.liquid().water_queue().len(), 5);
    }

    #[test]
    fn test_lava_waits_before_spreading() {
        let dims = Dimensions::new(3, 1, 1);
        let mut physics = physics(dims);
        physics.place_block(1, 0, 0, block::LAVA);

        for _ in 0..LAVA_DELAY {
            lava_pass(&mut physics);
        }
        assert_eq!(physics.world().block_at(0, 0, 0), block::AIR);

        lava_pass(&mut physics);
        assert_eq!(physics.world().block_at(0, 0, 0), block::LAVA);
        assert_eq!(physics.world().block_at(2, 0, 0), block::LAVA);
        assert_eq!(physics.liquid().lava_queue().len(), 2);
    }

    #[test]
    fn test_lava_and_water_make_stone() {
        let dims = Dimensions::new(3, 1, 1);
        let mut physics = physics(dims);
        physics.world_mut().set_block(0, block::STILL_WATER);
        physics.world_mut().set_block(2, block::STILL_LAVA);

        physics.place_block(1, 0, 0, block::WATER);
        water_pass(&mut physics);
        assert_eq!(physics.world().block_at(0, 0, 0), block::STILL_WATER);
        assert_eq!(physics.world().block_at(2, 0, 0), block::STONE);

        physics.place_block(1, 0, 0, block::LAVA);
        physics.liquid.clear();
        physics.liquid.activate_lava(&mut physics.world, &mut physics.tnt, 1);
        assert_eq!(physics.world().block_at(0, 0, 0), block::STONE);
    }

    #[test]
    fn test_lava_ignites_tnt() {
        let dims = Dimensions::new(2, 1, 1);
        let mut physics = physics(dims);
        physics.world_mut().set_block(1, block::TNT);
        physics.world_mut().set_block(0, block::LAVA);

        physics.liquid.activate_lava(&mut physics.world, &mut physics.tnt, 0);
        assert_eq!(physics.tnt().pending(), 1);
        assert_eq!(physics.world().block_at(1, 0, 0), block::TNT);
    }

    #[test]
    fn test_sponge_soaks_and_blocks_water() {
        let dims = Dimensions::new(9, 1, 1);
        let mut physics = physics(dims);
        for x in 0..9 {
            physics.world_mut().set_block(x, block::STILL_WATER);
        }

        physics.place_block(4, 0, 0, block::SPONGE);
        let row: Vec<_> = (0..9).map(|x| physics.world().block_at(x, 0, 0)).collect();
        assert_eq!(
            row,
            vec![
                block::STILL_WATER,
                block::STILL_WATER,
                block::AIR,
                block::AIR,
                block::SPONGE,
                block::AIR,
                block::AIR,
                block::STILL_WATER,
                block::STILL_WATER,
            ]
        );

        // Water next to the dried area cannot flow back in.
        physics.liquid.activate_water(&mut physics.world, 1);
        assert_eq!(physics.world().block_at(2, 0, 0), block::AIR);
    }

    #[test]
    fn test_stale_entries_are_dropped() {
        let dims = Dimensions::new(3, 1, 1);
        let mut physics = physics(dims);
        physics.place_block(1, 0, 0, block::WATER);
        physics.world_mut().set_block(1, block::STONE);

        water_pass(&mut physics);
        assert_eq!(physics.world().count(block::WATER), 0);
        assert_eq!(physics.liquid().pending(), 0);
    }

    #[test]
    fn test_reset_map_clears_queues() {
        let mut liquid = LiquidPhysics::new();
        liquid.schedule_lava(3);
        liquid.schedule_water(4);
        assert_eq!(liquid.pending(), 2);

        liquid.reset_map(Dimensions::new(8, 8, 8));
        assert_eq!(liquid.pending(), 0);
    }
}
