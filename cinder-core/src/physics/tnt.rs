//! Explosives.
//!
//! Lit charges wait in a fuse queue drained with the masked countdown
//! protocol: the low four bits of the delay field count down the fuse and
//! the fifth bit, [`CHAINED`], marks charges set off by another blast.

use cinder_utils::random::Random;
use cinder_utils::{BlockId, Dimensions};

use super::{Physics, neighbours};
use crate::behavior::BlockCallbacks;
use crate::block;
use crate::ticks::{PackedEntry, TickQueue, TickState};
use crate::world::World;

/// Delay-field bits holding the fuse countdown.
pub const FUSE_MASK: u8 = 0b0_1111;

/// Delay-field bit marking a charge lit by another explosion.
pub const CHAINED: u8 = 0b1_0000;

/// Fuse of a charge lit by lava.
pub const FUSE_TICKS: u8 = 15;

/// Fuse of a charge lit by another explosion.
pub const CHAINED_FUSE_TICKS: u8 = 3;

/// Blast radius of a charge lit by lava.
pub const BLAST_RADIUS: usize = 4;

/// Blast radius of a charge lit by another explosion.
pub const CHAINED_BLAST_RADIUS: usize = 3;

/// Burns fuses and detonates TNT.
///
/// Unlike the liquid and falling simulators, lit fuses survive both the
/// enable toggle and map reloads.
#[derive(Debug, Default)]
pub struct TntPhysics {
    fuses: TickQueue,
    dims: Dimensions,
}

impl TntPhysics {
    /// Creates the simulator with no lit fuses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lights the charge at `index`.
    pub fn ignite(&mut self, index: usize, chained: bool) {
        let flags = if chained {
            CHAINED | CHAINED_FUSE_TICKS
        } else {
            FUSE_TICKS
        };
        self.fuses.enqueue(PackedEntry::new(index, flags));
    }

    /// Lit fuses.
    #[must_use]
    pub fn queue(&self) -> &TickQueue {
        &self.fuses
    }

    /// Number of lit fuses.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.fuses.len()
    }

    /// Adopts new map extents, keeping lit fuses.
    pub fn resize(&mut self, dims: Dimensions) {
        self.dims = dims;
    }

    /// Burns every fuse down by one tick and detonates the expired ones.
    pub(super) fn tick<W: World>(&mut self, world: &mut W) {
        let count = self.fuses.len();
        for _ in 0..count {
            let TickState::Due(entry) = self.fuses.check_masked(FUSE_MASK) else {
                continue;
            };
            let index = entry.pos();
            if world.get_block(index) == block::TNT {
                self.explode(world, index, entry.flags() & CHAINED != 0);
            }
        }
    }

    fn explode<W: World>(&mut self, world: &mut W, index: usize, chained: bool) {
        let dims = self.dims;
        let radius = if chained {
            CHAINED_BLAST_RADIUS
        } else {
            BLAST_RADIUS
        };
        let (x, y, z) = dims.unpack(index);
        world.set_block(index, block::AIR);
        log::debug!("TNT exploded at ({x}, {y}, {z}), radius {radius}");

        let r2 = radius * radius;
        for ny in y.saturating_sub(radius)..=(y + radius).min(dims.height - 1) {
            for nz in z.saturating_sub(radius)..=(z + radius).min(dims.length - 1) {
                for nx in x.saturating_sub(radius)..=(x + radius).min(dims.width - 1) {
                    let dist2 =
                        nx.abs_diff(x).pow(2) + ny.abs_diff(y).pow(2) + nz.abs_diff(z).pow(2);
                    if dist2 > r2 {
                        continue;
                    }
                    let cell = dims.index(nx, ny, nz);
                    let block = world.get_block(cell);
                    if block == block::TNT {
                        log::trace!("Blast at {index} lit {} at {cell}", block::name(block));
                        self.ignite(cell, true);
                    } else if block != block::AIR && !block::is_blast_proof(block) {
                        world.set_block(cell, block::AIR);
                    }
                }
            }
        }
    }
}

pub(super) fn register<W: World, R: Random>(callbacks: &mut BlockCallbacks<W, R>) {
    callbacks.set_place(block::TNT, place_tnt::<W, R>);
}

/// Lights TNT placed against lava.
fn place_tnt<W: World, R: Random>(physics: &mut Physics<W, R>, index: usize, _: BlockId) {
    let touches_lava = neighbours(physics.dimensions, index)
        .iter()
        .flatten()
        .any(|&cell| block::is_lava(physics.world.get_block(cell)));
    if touches_lava {
        physics.tnt.ignite(index, false);
    }
}
