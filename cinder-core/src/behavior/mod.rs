//! Per-block callback tables.
//!
//! Simulators register a [`BlockHandler`] for the block types they care about;
//! the orchestrator looks handlers up by block id when a block is placed and
//! when the random ticker samples a cell. Unregistered ids hold
//! [`BlockAction::Noop`].

use std::fmt;

use cinder_utils::BlockId;
use cinder_utils::random::Random;
use cinder_utils::types::BLOCK_COUNT;

use crate::physics::Physics;
use crate::world::World;

/// A block behavior, invoked with the linear cell index and the block id
/// found there.
///
/// Handlers may mutate any cell of the world, including cells the current
/// pass has not visited yet.
pub type BlockHandler<W, R> = fn(&mut Physics<W, R>, usize, BlockId);

/// A slot of the callback table.
pub enum BlockAction<W: World, R: Random> {
    /// Nothing is registered; invoking does nothing.
    Noop,
    /// Runs the handler.
    Run(BlockHandler<W, R>),
}

impl<W: World, R: Random> BlockAction<W, R> {
    /// Runs the handler, if any.
    #[inline]
    pub fn invoke(self, physics: &mut Physics<W, R>, index: usize, block: BlockId) {
        if let Self::Run(handler) = self {
            handler(physics, index, block);
        }
    }

    /// Returns true if nothing is registered.
    #[must_use]
    #[inline]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::Noop)
    }
}

// Manual impls: a derive would require `W: Copy` and `R: Copy`.
impl<W: World, R: Random> Clone for BlockAction<W, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W: World, R: Random> Copy for BlockAction<W, R> {}

impl<W: World, R: Random> fmt::Debug for BlockAction<W, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Noop => f.write_str("Noop"),
            Self::Run(_) => f.write_str("Run"),
        }
    }
}

/// The two per-block callback tables: random ambient ticks and placement.
pub struct BlockCallbacks<W: World, R: Random> {
    on_random_tick: [BlockAction<W, R>; BLOCK_COUNT],
    on_place: [BlockAction<W, R>; BLOCK_COUNT],
}

impl<W: World, R: Random> BlockCallbacks<W, R> {
    /// Creates tables with nothing registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            on_random_tick: [BlockAction::Noop; BLOCK_COUNT],
            on_place: [BlockAction::Noop; BLOCK_COUNT],
        }
    }

    /// The random tick action for a block.
    #[must_use]
    #[inline]
    pub fn random_tick(&self, block: BlockId) -> BlockAction<W, R> {
        self.on_random_tick[usize::from(block)]
    }

    /// The placement action for a block.
    #[must_use]
    #[inline]
    pub fn place(&self, block: BlockId) -> BlockAction<W, R> {
        self.on_place[usize::from(block)]
    }

    /// Registers the random tick handler for a block, replacing any previous one.
    pub fn set_random_tick(&mut self, block: BlockId, handler: BlockHandler<W, R>) {
        self.on_random_tick[usize::from(block)] = BlockAction::Run(handler);
    }

    /// Registers the placement handler for a block, replacing any previous one.
    pub fn set_place(&mut self, block: BlockId, handler: BlockHandler<W, R>) {
        self.on_place[usize::from(block)] = BlockAction::Run(handler);
    }

    /// Removes the random tick handler for a block.
    pub fn clear_random_tick(&mut self, block: BlockId) {
        self.on_random_tick[usize::from(block)] = BlockAction::Noop;
    }

    /// Removes the placement handler for a block.
    pub fn clear_place(&mut self, block: BlockId) {
        self.on_place[usize::from(block)] = BlockAction::Noop;
    }
}

impl<W: World, R: Random> Default for BlockCallbacks<W, R> {
    fn default() -> Self {
        Self::new()
    }
}
