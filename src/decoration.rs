//! # Decoration Pass
//!
//! Places vegetation on an already-generated chunk. Canopy writes are routed
//! through world-position translation and may land in neighboring chunks, so
//! the pass operates on the owning chunk map rather than a single chunk.
//!
//! ## Reproducibility
//!
//! The random stream is reseeded per chunk from the world seed and the chunk
//! position, so placements are identical regardless of the order chunks are
//! populated in.

use std::collections::{BTreeSet, HashMap};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::block::Block;
use crate::chunk::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE};
use crate::config::DecorationConfig;
use crate::noise::WorldSeed;
use crate::position::{ChunkPos, WorldPos};

/// Per-axis stream constants for the chunk seed mix.
const C1: u64 = 0x9E37_79B9_7F4A_7C15;
const C2: u64 = 0xC2B2_AE3D_27D4_EB4F;

/// splitmix64 finalizer, used to avalanche each coordinate before mixing.
#[inline]
fn mix(v: i32) -> u64 {
    let mut z = (v as u64).wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Places trees on populated-eligible chunks.
pub struct Decorator {
    seed: WorldSeed,
    config: DecorationConfig,
}

impl Decorator {
    /// Creates a decorator for the given world seed.
    #[must_use]
    pub fn new(seed: WorldSeed, config: DecorationConfig) -> Self {
        Self { seed, config }
    }

    /// The deterministic RNG stream for one chunk.
    fn chunk_rng(&self, pos: ChunkPos) -> ChaCha8Rng {
        let stream = mix(pos.x)
            .wrapping_mul(C1)
            .wrapping_add(mix(pos.y).wrapping_mul(C2))
            .wrapping_add(u64::from(self.seed.value()));
        ChaCha8Rng::seed_from_u64(stream)
    }

    /// Decorates the chunk at `pos`, mutating it and possibly its neighbors.
    ///
    /// Returns the set of *neighbor* positions that received writes; the
    /// scheduler re-dirties those that are already populated.
    ///
    /// # Panics
    ///
    /// If the target chunk or a written neighbor is absent from `chunks`;
    /// the scheduler's eligibility gate is supposed to make that impossible.
    pub fn populate(
        &self,
        pos: ChunkPos,
        chunks: &mut HashMap<ChunkPos, Chunk>,
    ) -> BTreeSet<ChunkPos> {
        let mut rng = self.chunk_rng(pos);
        let mut mutated = BTreeSet::new();

        let count = rng.gen_range(0..=self.config.max_trunks);
        for _ in 0..count {
            let x = rng.gen_range(0..CHUNK_SIZE);
            let y = rng.gen_range(0..CHUNK_SIZE);
            let trunk_height = rng.gen_range(self.config.trunk_min..=self.config.trunk_max);

            let chunk = chunks
                .get(&pos)
                .expect("target chunk missing during decoration");
            let Some(surface) = chunk.top_of_column(x, y) else {
                continue;
            };
            if chunk.get(x, y, surface) != Block::Grass {
                continue;
            }
            // No headroom against the world ceiling: drop the candidate.
            if surface + trunk_height + 2 >= CHUNK_HEIGHT {
                continue;
            }

            self.place_tree(pos, chunks, x, y, surface, trunk_height, &mut mutated);
        }

        mutated
    }

    /// Writes one trunk + canopy rooted at local `(x, y)` above `surface`.
    fn place_tree(
        &self,
        pos: ChunkPos,
        chunks: &mut HashMap<ChunkPos, Chunk>,
        x: usize,
        y: usize,
        surface: usize,
        trunk_height: usize,
        mutated: &mut BTreeSet<ChunkPos>,
    ) {
        let chunk = chunks
            .get_mut(&pos)
            .expect("target chunk missing during decoration");
        for z in (surface + 1)..=(surface + trunk_height) {
            chunk.set(x, y, z, Block::Wood);
        }

        let world_x = pos.world_x() + x as i32;
        let world_y = pos.world_y() + y as i32;
        let canopy_base = (surface + trunk_height) as i32;

        // Lower canopy layer: 5x5 with the corners knocked out.
        for dx in -2i32..=2 {
            for dy in -2i32..=2 {
                if dx.abs() == 2 && dy.abs() == 2 {
                    continue;
                }
                self.place_leaf(pos, chunks, world_x + dx, world_y + dy, canopy_base, mutated);
            }
        }

        // Top canopy layer: 3x3 plus shape.
        for dx in -1i32..=1 {
            for dy in -1i32..=1 {
                if dx != 0 && dy != 0 {
                    continue;
                }
                self.place_leaf(pos, chunks, world_x + dx, world_y + dy, canopy_base + 1, mutated);
            }
        }
    }

    /// Writes a leaf into one world cell if it currently holds air.
    fn place_leaf(
        &self,
        origin: ChunkPos,
        chunks: &mut HashMap<ChunkPos, Chunk>,
        world_x: i32,
        world_y: i32,
        world_z: i32,
        mutated: &mut BTreeSet<ChunkPos>,
    ) {
        let target = WorldPos::from_global(world_x, world_y, world_z);
        let chunk = chunks
            .get_mut(&target.chunk)
            .expect("neighbor chunk missing during decoration");
        if chunk.get(target.x, target.y, target.z).is_air() {
            chunk.set(target.x, target.y, target.z, Block::Leaf);
            if target.chunk != origin {
                mutated.insert(target.chunk);
            }
        }
    }
}
