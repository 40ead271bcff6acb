//! # Chunk Store
//!
//! A fixed-extent voxel grid for one chunk column, stored flat.
//!
//! ## Bounds contract
//!
//! Every read/write must satisfy `x < 16, y < 16, z < 128`. Out-of-range
//! access is a programming error and fails fast; silently clamping here
//! would corrupt terrain shape.
//!
//! ## Index injectivity
//!
//! The flat index is `x * (16 * 128) + y * 128 + z`. The stride multiplies
//! by the full Z extent, so distinct coordinates never alias (a stride of 16
//! would, since Z ranges to 128).

use std::fmt;

use crate::block::Block;

/// Chunk width/depth in blocks.
pub const CHUNK_SIZE: usize = 16;

/// Chunk height in blocks.
pub const CHUNK_HEIGHT: usize = 128;

/// Total blocks per chunk.
pub const BLOCKS_PER_CHUNK: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_HEIGHT;

/// A 16x16x128 voxel grid for one chunk column.
///
/// Exclusively owned by the scheduler once generated; the terrain generator
/// and decoration pass borrow it mutably and never retain it.
#[derive(Clone, PartialEq, Eq)]
pub struct Chunk {
    blocks: Vec<Block>,
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

/// Summarizes the grid instead of dumping 32,768 block variants, so a
/// failed chunk comparison in a test stays readable.
impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let solid = self.blocks.iter().filter(|block| !block.is_air()).count();
        f.debug_struct("Chunk")
            .field("solid_blocks", &solid)
            .finish_non_exhaustive()
    }
}

impl Chunk {
    /// Creates an all-air chunk.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::Air; BLOCKS_PER_CHUNK],
        }
    }

    #[inline]
    fn index(x: usize, y: usize, z: usize) -> usize {
        assert!(
            x < CHUNK_SIZE && y < CHUNK_SIZE && z < CHUNK_HEIGHT,
            "voxel coordinate ({x}, {y}, {z}) out of bounds"
        );
        x * (CHUNK_SIZE * CHUNK_HEIGHT) + y * CHUNK_HEIGHT + z
    }

    /// Reads the block at a local coordinate.
    ///
    /// # Panics
    ///
    /// If the coordinate is out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks[Self::index(x, y, z)]
    }

    /// Writes the block at a local coordinate.
    ///
    /// # Panics
    ///
    /// If the coordinate is out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, block: Block) {
        self.blocks[Self::index(x, y, z)] = block;
    }

    /// Z of the topmost non-air block in a column, scanning downward.
    #[must_use]
    pub fn top_of_column(&self, x: usize, y: usize) -> Option<usize> {
        (0..CHUNK_HEIGHT).rev().find(|&z| !self.get(x, y, z).is_air())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chunk_is_air() {
        let chunk = Chunk::new();
        assert_eq!(chunk.get(0, 0, 0), Block::Air);
        assert_eq!(chunk.get(15, 15, 127), Block::Air);
    }

    #[test]
    fn test_set_get_round_trip() {
        let mut chunk = Chunk::new();
        chunk.set(3, 7, 100, Block::Grass);
        assert_eq!(chunk.get(3, 7, 100), Block::Grass);
        // Neighbors untouched
        assert_eq!(chunk.get(3, 7, 99), Block::Air);
        assert_eq!(chunk.get(3, 7, 101), Block::Air);
        assert_eq!(chunk.get(2, 7, 100), Block::Air);
    }

    #[test]
    fn test_index_injective_over_full_extent() {
        // Regression against the aliasing stride (x*16*16 + y*16 + z with
        // z up to 128 maps distinct coordinates to the same slot).
        let mut seen = vec![false; BLOCKS_PER_CHUNK];
        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                for z in 0..CHUNK_HEIGHT {
                    let idx = Chunk::index(x, y, z);
                    assert!(!seen[idx], "index collision at ({x}, {y}, {z})");
                    seen[idx] = true;
                }
            }
        }
        assert!(seen.iter().all(|&s| s), "index must cover all slots");
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_x_out_of_bounds() {
        Chunk::new().get(16, 0, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_y_out_of_bounds() {
        Chunk::new().get(0, 16, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_set_z_out_of_bounds() {
        Chunk::new().set(0, 0, 128, Block::Stone);
    }

    #[test]
    fn test_debug_output_is_a_summary() {
        // assert_eq!/assert_ne! on chunks need Debug for failure output;
        // the rendering must stay a one-line summary, not the full grid.
        let mut chunk = Chunk::new();
        chunk.set(1, 2, 3, Block::Stone);
        chunk.set(4, 5, 6, Block::Grass);

        let rendered = format!("{chunk:?}");
        assert!(rendered.contains("solid_blocks: 2"), "got: {rendered}");
        assert!(rendered.len() < 80, "debug output too verbose: {rendered}");
    }

    #[test]
    fn test_top_of_column() {
        let mut chunk = Chunk::new();
        assert_eq!(chunk.top_of_column(5, 5), None);
        chunk.set(5, 5, 10, Block::Stone);
        chunk.set(5, 5, 40, Block::Grass);
        assert_eq!(chunk.top_of_column(5, 5), Some(40));
    }
}
