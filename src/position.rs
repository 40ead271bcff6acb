//! # Spatial Addressing
//!
//! Chunk-column coordinates, in-chunk block coordinates, and the combined
//! world address with neighbor/offset arithmetic.
//!
//! World X/Y decompose into chunk + local offset with floor-division
//! semantics so negative coordinates resolve to the correct column; Z is
//! clamped to the single vertical extent rather than wrapped.

use crate::chunk::{CHUNK_HEIGHT, CHUNK_SIZE};

/// Integer coordinate identifying a chunk column in the world grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
    /// X coordinate (in chunks, not blocks).
    pub x: i32,
    /// Y coordinate (in chunks, not blocks).
    pub y: i32,
}

impl ChunkPos {
    /// Creates a new chunk position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts world block coordinates to the containing chunk position.
    #[inline]
    #[must_use]
    pub const fn from_block(block_x: i32, block_y: i32) -> Self {
        Self {
            x: block_x.div_euclid(CHUNK_SIZE as i32),
            y: block_y.div_euclid(CHUNK_SIZE as i32),
        }
    }

    /// World X coordinate of the chunk's origin corner.
    #[inline]
    #[must_use]
    pub const fn world_x(self) -> i32 {
        self.x * CHUNK_SIZE as i32
    }

    /// World Y coordinate of the chunk's origin corner.
    #[inline]
    #[must_use]
    pub const fn world_y(self) -> i32 {
        self.y * CHUNK_SIZE as i32
    }

    /// Northern neighbor (+Y).
    #[inline]
    #[must_use]
    pub const fn north(self) -> Self {
        Self::new(self.x, self.y + 1)
    }

    /// North-eastern neighbor (+X, +Y).
    #[inline]
    #[must_use]
    pub const fn north_east(self) -> Self {
        Self::new(self.x + 1, self.y + 1)
    }

    /// Eastern neighbor (+X).
    #[inline]
    #[must_use]
    pub const fn east(self) -> Self {
        Self::new(self.x + 1, self.y)
    }

    /// South-eastern neighbor (+X, -Y).
    #[inline]
    #[must_use]
    pub const fn south_east(self) -> Self {
        Self::new(self.x + 1, self.y - 1)
    }

    /// Southern neighbor (-Y).
    #[inline]
    #[must_use]
    pub const fn south(self) -> Self {
        Self::new(self.x, self.y - 1)
    }

    /// South-western neighbor (-X, -Y).
    #[inline]
    #[must_use]
    pub const fn south_west(self) -> Self {
        Self::new(self.x - 1, self.y - 1)
    }

    /// Western neighbor (-X).
    #[inline]
    #[must_use]
    pub const fn west(self) -> Self {
        Self::new(self.x - 1, self.y)
    }

    /// North-western neighbor (-X, +Y).
    #[inline]
    #[must_use]
    pub const fn north_west(self) -> Self {
        Self::new(self.x - 1, self.y + 1)
    }

    /// All 8 horizontal neighbors, clockwise from north.
    #[must_use]
    pub const fn neighbors(self) -> [Self; 8] {
        [
            self.north(),
            self.north_east(),
            self.east(),
            self.south_east(),
            self.south(),
            self.south_west(),
            self.west(),
            self.north_west(),
        ]
    }
}

/// A global block address: chunk position plus in-chunk offset.
///
/// Local X/Y are always in `[0, 16)` and Z in `[0, 128)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldPos {
    /// The containing chunk column.
    pub chunk: ChunkPos,
    /// Local X within the chunk.
    pub x: usize,
    /// Local Y within the chunk.
    pub y: usize,
    /// Z level. There is exactly one vertical "chunk", so Z is absolute.
    pub z: usize,
}

impl WorldPos {
    /// Decomposes a raw signed block coordinate.
    ///
    /// X/Y use floor-division so negative coordinates map to the correct
    /// chunk with a non-negative local offset; Z is clamped to `[0, 128)`.
    #[must_use]
    pub const fn from_global(x: i32, y: i32, z: i32) -> Self {
        let size = CHUNK_SIZE as i32;
        let top = CHUNK_HEIGHT as i32 - 1;
        let z = if z < 0 {
            0
        } else if z > top {
            top
        } else {
            z
        };
        Self {
            chunk: ChunkPos::from_block(x, y),
            x: x.rem_euclid(size) as usize,
            y: y.rem_euclid(size) as usize,
            z: z as usize,
        }
    }

    /// Recomposes the absolute block coordinate.
    #[inline]
    #[must_use]
    pub const fn global(self) -> (i32, i32, i32) {
        (
            self.chunk.world_x() + self.x as i32,
            self.chunk.world_y() + self.y as i32,
            self.z as i32,
        )
    }

    /// Translates by a block offset.
    ///
    /// Re-runs the floor-division/clamp decomposition on the absolute
    /// coordinate, so multi-chunk offsets resolve to the right column.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        let (gx, gy, gz) = self.global();
        Self::from_global(gx + dx, gy + dy, gz + dz)
    }

    /// True if the given absolute Z is outside the vertical extent.
    ///
    /// `from_global` clamps Z, so callers that care about the distinction
    /// (the mesher's floor/ceiling rule) check this first.
    #[inline]
    #[must_use]
    pub const fn z_out_of_range(z: i32) -> bool {
        z < 0 || z >= CHUNK_HEIGHT as i32
    }
}
