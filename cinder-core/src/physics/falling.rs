//! Gravity for sand and gravel.

use cinder_utils::random::Random;
use cinder_utils::{BlockId, Dimensions};

use super::Physics;
use crate::behavior::BlockCallbacks;
use crate::block;
use crate::ticks::{PackedEntry, TickQueue};
use crate::world::World;

/// Ticks a falling block hangs in the air before it drops.
pub const FALL_DELAY: u8 = 1;

/// Drops unsupported sand and gravel.
#[derive(Debug, Default)]
pub struct FallingPhysics {
    queue: TickQueue,
    dims: Dimensions,
}

impl FallingPhysics {
    /// Creates the simulator with an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a cell to be checked for support after [`FALL_DELAY`] ticks.
    pub fn schedule(&mut self, index: usize) {
        self.queue.enqueue(PackedEntry::new(index, FALL_DELAY));
    }

    /// Pending checks.
    #[must_use]
    pub fn queue(&self) -> &TickQueue {
        &self.queue
    }

    /// Number of pending checks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drops every pending check.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Drops every pending check and adopts new map extents.
    pub fn reset_map(&mut self, dims: Dimensions) {
        self.clear();
        self.dims = dims;
    }

    /// Runs the checks that are due.
    pub(super) fn tick<W: World>(&mut self, world: &mut W) {
        let count = self.queue.len();
        for _ in 0..count {
            let Some(entry) = self.queue.check().due() else {
                continue;
            };
            let index = entry.pos();
            let block = world.get_block(index);
            if block::is_falling(block) {
                self.drop_block(world, index, block);
            }
        }
    }

    /// Moves the block at `index` down to the lowest cell it can fall into.
    fn drop_block<W: World>(&mut self, world: &mut W, index: usize, block: BlockId) {
        let one_y = self.dims.one_y();
        let mut target = index;
        while target >= one_y && Self::can_fall_into(world.get_block(target - one_y)) {
            target -= one_y;
        }
        if target == index {
            return;
        }

        world.set_block(index, block::AIR);
        world.set_block(target, block);
        log::trace!("{} fell from {index} to {target}", block::name(block));

        // Let the rest of the column follow.
        let above = index + one_y;
        if above < self.dims.volume() && block::is_falling(world.get_block(above)) {
            self.schedule(above);
        }
    }

    fn can_fall_into(block: BlockId) -> bool {
        block::is_walk_through(block) || block::is_liquid(block)
    }
}

pub(super) fn register<W: World, R: Random>(callbacks: &mut BlockCallbacks<W, R>) {
    for falling in [block::SAND, block::GRAVEL] {
        callbacks.set_place(falling, schedule_fall::<W, R>);
        callbacks.set_random_tick(falling, schedule_fall::<W, R>);
    }
}

fn schedule_fall<W: World, R: Random>(physics: &mut Physics<W, R>, index: usize, _: BlockId) {
    physics.falling.schedule(index);
}
