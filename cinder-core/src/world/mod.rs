//! The block grid the simulators read and mutate.

use cinder_utils::{BlockId, Dimensions};
use thiserror::Error;

use crate::block;
use crate::ticks::PackedEntry;

mod events;

pub use events::{Subscription, WorldEvent, WorldEvents};

/// A world grid as seen by the physics engine.
///
/// Cells are addressed by linear index, see [`Dimensions::index`]. Reads and
/// writes outside the grid must not panic: reads yield air and writes are
/// ignored.
pub trait World {
    /// Returns false while no map is loaded.
    fn is_loaded(&self) -> bool;

    /// Current extents of the grid.
    fn dimensions(&self) -> Dimensions;

    /// Block at a linear index.
    fn get_block(&self, index: usize) -> BlockId;

    /// Replaces the block at a linear index.
    fn set_block(&mut self, index: usize, block: BlockId);
}

/// Errors raised when loading a map into a [`Level`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    /// The block buffer does not match the requested extents.
    #[error("expected {expected} blocks for the given dimensions, got {actual}")]
    SizeMismatch {
        /// `width * height * length`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
    /// The map has more cells than a packed entry can address.
    #[error("map of {0} cells exceeds the addressable limit")]
    TooLarge(usize),
}

/// An in-memory world grid.
#[derive(Debug, Clone, Default)]
pub struct Level {
    blocks: Vec<BlockId>,
    dimensions: Dimensions,
    loaded: bool,
}

impl Level {
    /// Creates a level with no map loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loaded level filled with air.
    pub fn empty(dimensions: Dimensions) -> Result<Self, LevelError> {
        let mut level = Self::new();
        level.load(dimensions, vec![block::AIR; dimensions.volume()])?;
        Ok(level)
    }

    /// Replaces the whole map.
    ///
    /// Callers raise [`WorldEvents::raise_new_map_loaded`] afterwards so
    /// subscribers pick up the new extents.
    pub fn load(&mut self, dimensions: Dimensions, blocks: Vec<BlockId>) -> Result<(), LevelError> {
        let expected = dimensions.volume();
        if expected > PackedEntry::POS_MASK as usize + 1 {
            return Err(LevelError::TooLarge(expected));
        }
        if blocks.len() != expected {
            return Err(LevelError::SizeMismatch {
                expected,
                actual: blocks.len(),
            });
        }

        self.blocks = blocks;
        self.dimensions = dimensions;
        self.loaded = true;
        log::info!(
            "Loaded {}x{}x{} map",
            dimensions.width,
            dimensions.height,
            dimensions.length
        );
        Ok(())
    }

    /// Drops the map.
    pub fn unload(&mut self) {
        self.blocks = Vec::new();
        self.dimensions = Dimensions::default();
        self.loaded = false;
    }

    /// Block at a coordinate, or air outside the grid.
    #[must_use]
    pub fn block_at(&self, x: usize, y: usize, z: usize) -> BlockId {
        if x >= self.dimensions.width || y >= self.dimensions.height || z >= self.dimensions.length
        {
            return block::AIR;
        }
        self.get_block(self.dimensions.index(x, y, z))
    }

    /// Counts the cells holding `block`.
    #[must_use]
    pub fn count(&self, block: BlockId) -> usize {
        self.blocks.iter().filter(|&&b| b == block).count()
    }

    /// The raw block buffer.
    #[must_use]
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }
}

impl World for Level {
    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[inline]
    fn get_block(&self, index: usize) -> BlockId {
        self.blocks.get(index).copied().unwrap_or(block::AIR)
    }

    #[inline]
    fn set_block(&mut self, index: usize, block: BlockId) {
        if let Some(cell) = self.blocks.get_mut(index) {
            *cell = block;
        }
    }
}
