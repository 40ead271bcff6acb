//! # Block Types
//!
//! The enumerated voxel kinds and their fixed display colors.

/// A single voxel kind.
///
/// Every non-[`Air`](Block::Air) kind maps to a fixed RGBA display color;
/// Air is fully transparent and never rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Block {
    /// Empty space.
    #[default]
    Air,
    /// Base terrain filler.
    Stone,
    /// Topsoil layers under grass.
    Dirt,
    /// Surface block; the only block trees grow on.
    Grass,
    /// Tree trunk.
    Wood,
    /// Tree canopy.
    Leaf,
    /// Translucent sea-level fill.
    Water,
}

impl Block {
    /// Returns true for empty space.
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }

    /// Fixed RGBA display color for this kind.
    ///
    /// Water is translucent (alpha `0x5F`); everything else is opaque.
    #[must_use]
    pub const fn color(self) -> [u8; 4] {
        match self {
            Self::Air => [0x00, 0x00, 0x00, 0x00],
            Self::Stone => [0x70, 0x80, 0x90, 0xFF],
            Self::Dirt => [0x80, 0x46, 0x1B, 0xFF],
            Self::Grass => [0x0A, 0x85, 0x04, 0xFF],
            Self::Wood => [0x4D, 0x33, 0x12, 0xFF],
            Self::Leaf => [0x17, 0x5C, 0x17, 0xFF],
            Self::Water => [0x00, 0x57, 0xFF, 0x5F],
        }
    }
}
