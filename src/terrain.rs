//! # Terrain Generator
//!
//! Fills a chunk's voxel grid from noise fields. A pure function of seed and
//! chunk position: no dependency on generation order or neighbor state.
//!
//! The column profile (surface height + dirt depth) sits behind the
//! [`ColumnSampler`] trait so tests can drive a flat stub through the whole
//! fill path.

use crate::block::Block;
use crate::chunk::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE};
use crate::config::TerrainConfig;
use crate::noise::{Brownian, WorldSeed};
use crate::position::ChunkPos;

/// Derivation tags for the independent noise streams.
const HEIGHT_STREAM: u32 = 1;
const DIRT_STREAM: u32 = 2;

/// Surface profile for one world column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnProfile {
    /// Z of the surface block.
    pub height: i32,
    /// Number of dirt layers under the surface; `<= 0` means bare stone.
    pub dirt_depth: i32,
}

/// Source of per-column surface profiles.
pub trait ColumnSampler {
    /// Samples the profile at a world block coordinate.
    fn column(&self, world_x: i32, world_y: i32) -> ColumnProfile;
}

/// Production sampler backed by two independent fractal noise fields.
pub struct NoiseColumnSampler {
    height: Brownian,
    dirt: Brownian,
}

impl NoiseColumnSampler {
    /// Creates the sampler from the world seed and terrain parameters.
    #[must_use]
    pub fn new(seed: WorldSeed, config: &TerrainConfig) -> Self {
        Self {
            height: Brownian::new(seed.derive(HEIGHT_STREAM))
                .octaves(config.octaves)
                .frequency(config.frequency)
                .lacunarity(config.lacunarity)
                .persistence(config.persistence),
            dirt: Brownian::new(seed.derive(DIRT_STREAM)).frequency(config.dirt_frequency),
        }
    }
}

impl ColumnSampler for NoiseColumnSampler {
    fn column(&self, world_x: i32, world_y: i32) -> ColumnProfile {
        let (fx, fy) = (f64::from(world_x), f64::from(world_y));
        let height = ((self.height.sample(fx, fy) + 1.0) / 2.0 * 32.0 + 16.0) as i32;
        let dirt_depth = (self.dirt.sample(fx, fy) * 3.0 + 2.0).floor() as i32;
        ColumnProfile { height, dirt_depth }
    }
}

/// Fills chunks from a [`ColumnSampler`].
pub struct TerrainGenerator<S = NoiseColumnSampler> {
    sampler: S,
    sea_level: usize,
}

impl TerrainGenerator<NoiseColumnSampler> {
    /// Creates the production generator.
    #[must_use]
    pub fn new(seed: WorldSeed, config: &TerrainConfig) -> Self {
        Self::with_sampler(NoiseColumnSampler::new(seed, config), config.sea_level)
    }
}

impl<S: ColumnSampler> TerrainGenerator<S> {
    /// Creates a generator over an arbitrary sampler (test seam).
    #[must_use]
    pub fn with_sampler(sampler: S, sea_level: usize) -> Self {
        Self { sampler, sea_level }
    }

    /// Generates the voxel grid for one chunk column.
    ///
    /// # Panics
    ///
    /// If the sampler yields a surface height outside `[0, 128)`; that is a
    /// sampler bug, not recoverable input.
    #[must_use]
    pub fn generate(&self, pos: ChunkPos) -> Chunk {
        let mut chunk = Chunk::new();

        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                let world_x = pos.world_x() + x as i32;
                let world_y = pos.world_y() + y as i32;
                let profile = self.sampler.column(world_x, world_y);
                self.fill_column(&mut chunk, x, y, profile);
            }
        }

        chunk
    }

    fn fill_column(&self, chunk: &mut Chunk, x: usize, y: usize, profile: ColumnProfile) {
        assert!(
            profile.height >= 0 && (profile.height as usize) < CHUNK_HEIGHT,
            "surface height {} outside vertical extent",
            profile.height
        );
        let height = profile.height as usize;

        for z in 0..height {
            chunk.set(x, y, z, Block::Stone);
        }

        if profile.dirt_depth > 0 {
            let dirt_bottom = height.saturating_sub(profile.dirt_depth as usize);
            for z in dirt_bottom..height {
                chunk.set(x, y, z, Block::Dirt);
            }
            chunk.set(x, y, height, Block::Grass);
        }

        // Surface block stays put under shallow water; the sea fills the
        // space above it.
        if height < self.sea_level {
            for z in (height + 1)..=self.sea_level {
                chunk.set(x, y, z, Block::Water);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::WorldSeed;

    /// Flat-profile stub for exercising the fill path.
    struct Flat {
        profile: ColumnProfile,
    }

    impl ColumnSampler for Flat {
        fn column(&self, _world_x: i32, _world_y: i32) -> ColumnProfile {
            self.profile
        }
    }

    fn flat(height: i32, dirt_depth: i32) -> TerrainGenerator<Flat> {
        TerrainGenerator::with_sampler(
            Flat {
                profile: ColumnProfile { height, dirt_depth },
            },
            32,
        )
    }

    #[test]
    fn test_column_profile_layers() {
        let chunk = flat(40, 3).generate(ChunkPos::new(0, 0));

        for z in 0..37 {
            assert_eq!(chunk.get(8, 8, z), Block::Stone, "z={z} should be stone");
        }
        for z in 37..40 {
            assert_eq!(chunk.get(8, 8, z), Block::Dirt, "z={z} should be dirt");
        }
        assert_eq!(chunk.get(8, 8, 40), Block::Grass);
        // Above sea level: no water anywhere in the column
        for z in 41..crate::chunk::CHUNK_HEIGHT {
            assert_eq!(chunk.get(8, 8, z), Block::Air, "z={z} should be air");
        }
    }

    #[test]
    fn test_bare_stone_when_dirt_depth_zero() {
        let chunk = flat(40, 0).generate(ChunkPos::new(0, 0));
        assert_eq!(chunk.get(0, 0, 39), Block::Stone);
        assert_eq!(chunk.get(0, 0, 40), Block::Air, "no grass on bare stone");
    }

    #[test]
    fn test_water_fills_to_sea_level() {
        let chunk = flat(20, 2).generate(ChunkPos::new(0, 0));
        assert_eq!(chunk.get(4, 4, 20), Block::Grass);
        for z in 21..=32 {
            assert_eq!(chunk.get(4, 4, z), Block::Water, "z={z} should be water");
        }
        assert_eq!(chunk.get(4, 4, 33), Block::Air);
    }

    #[test]
    fn test_generation_deterministic() {
        let config = crate::config::TerrainConfig::default();
        let gen1 = TerrainGenerator::new(WorldSeed::new(42), &config);
        let gen2 = TerrainGenerator::new(WorldSeed::new(42), &config);

        let pos = ChunkPos::new(5, -10);
        assert!(
            gen1.generate(pos) == gen2.generate(pos),
            "same seed must yield a bit-identical chunk"
        );
    }

    #[test]
    fn test_production_heights_in_range() {
        let config = crate::config::TerrainConfig::default();
        let sampler = NoiseColumnSampler::new(WorldSeed::new(7), &config);
        for i in -200..200 {
            let profile = sampler.column(i * 13, i * -7);
            assert!(
                (16..=48).contains(&profile.height),
                "height {} outside noise envelope",
                profile.height
            );
            assert!((-2..=5).contains(&profile.dirt_depth));
        }
    }

    #[test]
    fn test_chunks_differ_across_positions() {
        let config = crate::config::TerrainConfig::default();
        let generator = TerrainGenerator::new(WorldSeed::new(42), &config);
        let a = generator.generate(ChunkPos::new(0, 0));
        let b = generator.generate(ChunkPos::new(40, 40));
        assert!(a != b, "distant chunks should not be identical");
    }
}
