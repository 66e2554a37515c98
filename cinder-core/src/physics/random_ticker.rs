//! Chunked random block ticking.

use cinder_utils::random::Random;

use super::Physics;
use crate::world::World;

/// Edge length of the cubes the ticker samples from.
pub const CHUNK_SIZE: usize = 16;

/// Cells sampled per chunk per tick.
pub const TICKS_PER_CHUNK: usize = 3;

impl<W: World, R: Random> Physics<W, R> {
    /// Samples [`TICKS_PER_CHUNK`] cells from every chunk and runs the random
    /// tick handler of whatever block occupies each.
    ///
    /// A chunk's samples are drawn from the linear index range spanned by its
    /// minimum and clipped maximum corners. That range also covers cells of
    /// neighbouring rows outside the chunk, so sampling density is uneven
    /// near chunk and map edges. Handlers run immediately, so a later sample
    /// sees changes made by an earlier one.
    pub(crate) fn tick_random_blocks(&mut self) {
        let dims = self.dimensions;
        if dims.is_empty() {
            return;
        }
        let (width, height, length) = (dims.width, dims.height, dims.length);
        let (x_max, y_max, z_max) = (width - 1, height - 1, length - 1);

        for y in (0..height).step_by(CHUNK_SIZE) {
            for z in (0..length).step_by(CHUNK_SIZE) {
                for x in (0..width).step_by(CHUNK_SIZE) {
                    let lo = (y * length + z) * width + x;
                    let hi = (y_max.min(y + CHUNK_SIZE - 1) * length
                        + z_max.min(z + CHUNK_SIZE - 1))
                        * width
                        + x_max.min(x + CHUNK_SIZE - 1);

                    for _ in 0..TICKS_PER_CHUNK {
                        let index =
                            self.rng.next_i32_between_exclusive(lo as i32, hi as i32) as usize;
                        let block = self.world.get_block(index);
                        self.callbacks.random_tick(block).invoke(self, index, block);
                    }
                }
            }
        }
    }
}
