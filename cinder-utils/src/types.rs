//! Wrapper types making it harder to accidentaly mix up cell addressing.

use serde::Deserialize;

/// A raw block type identifier. Every cell of a world grid holds exactly one.
pub type BlockId = u8;

/// The number of distinct block identifiers.
pub const BLOCK_COUNT: usize = 256;

/// Extents of a world grid.
///
/// Cells are addressed by the linear index `(y * length + z) * width + x`,
/// so x varies fastest and y slowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub struct Dimensions {
    /// Size along the x axis.
    pub width: usize,
    /// Size along the y (vertical) axis.
    pub height: usize,
    /// Size along the z axis.
    pub length: usize,
}

impl Dimensions {
    /// Creates a new set of dimensions.
    #[must_use]
    pub const fn new(width: usize, height: usize, length: usize) -> Self {
        Self {
            width,
            height,
            length,
        }
    }

    /// Stride between two vertically adjacent cells.
    #[inline]
    #[must_use]
    pub const fn one_y(self) -> usize {
        self.width * self.length
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub const fn volume(self) -> usize {
        self.width * self.height * self.length
    }

    /// Returns true if the grid holds no cells.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.volume() == 0
    }

    /// Linear index of a cell. Does not check bounds.
    #[inline]
    #[must_use]
    pub const fn index(self, x: usize, y: usize, z: usize) -> usize {
        (y * self.length + z) * self.width + x
    }

    /// Splits a linear index back into `(x, y, z)`.
    #[inline]
    #[must_use]
    pub const fn unpack(self, index: usize) -> (usize, usize, usize) {
        let x = index % self.width;
        let z = (index / self.width) % self.length;
        let y = index / self.one_y();
        (x, y, z)
    }

    /// Returns true if the signed coordinate lies inside the grid.
    #[inline]
    #[must_use]
    pub fn contains(self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.width
            && (y as usize) < self.height
            && (z as usize) < self.length
    }
}
