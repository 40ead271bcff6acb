//! # World State
//!
//! Resident chunk storage and the three-phase chunk lifecycle:
//! generated, populated, meshed. Each phase advances one chunk at a time
//! so the caller can spread the work across frames.
//!
//! Lifecycle queues are `BTreeSet`s keyed on [`ChunkPos`] ordering, so the
//! next chunk each phase picks is deterministic for a given resident set.

use std::collections::{BTreeSet, HashMap};

use crate::chunk::Chunk;
use crate::decoration::Decorator;
use crate::mesh::{mesh_chunk, ChunkMesh};
use crate::position::ChunkPos;
use crate::terrain::{ColumnSampler, TerrainGenerator};

/// Resident chunks and their lifecycle bookkeeping.
#[derive(Default)]
pub struct WorldState {
    chunks: HashMap<ChunkPos, Chunk>,
    meshes: HashMap<ChunkPos, ChunkMesh>,
    /// In the window but carrying no terrain yet.
    ungenerated: BTreeSet<ChunkPos>,
    /// Terrain written, decoration pass pending.
    unpopulated: BTreeSet<ChunkPos>,
    /// Blocks changed since the last meshing (or never meshed).
    dirty: BTreeSet<ChunkPos>,
}

impl WorldState {
    /// Empty world with no interest window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-centers the interest window on `center` with half-width `radius`.
    ///
    /// Chunks outside the new window are evicted from every collection;
    /// window positions with no resident chunk are queued for generation.
    /// Returns `(evicted, enqueued)` counts.
    pub fn retarget_window(&mut self, center: ChunkPos, radius: i32) -> (usize, usize) {
        let inside = |pos: &ChunkPos| {
            (pos.x - center.x).abs() <= radius && (pos.y - center.y).abs() <= radius
        };

        let stale: Vec<ChunkPos> = self
            .chunks
            .keys()
            .chain(self.ungenerated.iter())
            .filter(|pos| !inside(pos))
            .copied()
            .collect();
        let evicted = stale.len();
        for pos in stale {
            self.chunks.remove(&pos);
            self.meshes.remove(&pos);
            self.ungenerated.remove(&pos);
            self.unpopulated.remove(&pos);
            self.dirty.remove(&pos);
        }

        let mut enqueued = 0;
        for x in (center.x - radius)..=(center.x + radius) {
            for y in (center.y - radius)..=(center.y + radius) {
                let pos = ChunkPos::new(x, y);
                if !self.chunks.contains_key(&pos) && self.ungenerated.insert(pos) {
                    enqueued += 1;
                }
            }
        }
        (evicted, enqueued)
    }

    /// Generates terrain for the lowest-ordered queued position, if any.
    ///
    /// Returns the position generated.
    pub fn generate_step<S: ColumnSampler>(
        &mut self,
        generator: &TerrainGenerator<S>,
    ) -> Option<ChunkPos> {
        let pos = self.ungenerated.pop_first()?;
        let chunk = generator.generate(pos);
        self.chunks.insert(pos, chunk);
        self.unpopulated.insert(pos);
        Some(pos)
    }

    /// Runs the decoration pass on the first unpopulated chunk whose eight
    /// neighbors all carry terrain.
    ///
    /// The populated chunk and any neighbors the pass wrote into become
    /// dirty; mutated neighbors that still await their own decoration pass
    /// are left alone, since populating them re-dirties them anyway.
    pub fn populate_step(&mut self, decorator: &Decorator) -> Option<ChunkPos> {
        let pos = self
            .unpopulated
            .iter()
            .copied()
            .find(|pos| self.neighbors_resident(*pos))?;
        self.unpopulated.remove(&pos);

        let mutated = decorator.populate(pos, &mut self.chunks);
        for neighbor in mutated {
            if !self.unpopulated.contains(&neighbor) {
                self.dirty.insert(neighbor);
            }
        }
        self.dirty.insert(pos);
        Some(pos)
    }

    /// Meshes the first dirty chunk whose eight neighbors are resident.
    pub fn mesh_step(&mut self) -> Option<ChunkPos> {
        let pos = self
            .dirty
            .iter()
            .copied()
            .find(|pos| self.neighbors_resident(*pos))?;
        self.dirty.remove(&pos);
        self.meshes.insert(pos, mesh_chunk(pos, &self.chunks));
        Some(pos)
    }

    fn neighbors_resident(&self, pos: ChunkPos) -> bool {
        pos.neighbors()
            .iter()
            .all(|n| self.chunks.contains_key(n))
    }

    /// Resident chunk at `pos`, if generated.
    #[must_use]
    pub fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    /// Current mesh for `pos`, if built.
    #[must_use]
    pub fn mesh(&self, pos: ChunkPos) -> Option<&ChunkMesh> {
        self.meshes.get(&pos)
    }

    /// All currently built meshes.
    #[must_use]
    pub fn meshes(&self) -> &HashMap<ChunkPos, ChunkMesh> {
        &self.meshes
    }

    /// Number of resident chunks.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of window positions still awaiting terrain.
    #[must_use]
    pub fn ungenerated_count(&self) -> usize {
        self.ungenerated.len()
    }

    /// Number of generated chunks awaiting decoration.
    #[must_use]
    pub fn unpopulated_count(&self) -> usize {
        self.unpopulated.len()
    }

    /// Number of chunks awaiting (re-)meshing.
    #[must_use]
    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    /// True once every lifecycle queue has drained.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.ungenerated.is_empty() && self.unpopulated.is_empty() && self.dirty.is_empty()
    }

    /// Installs a pre-built chunk as generated-but-unpopulated, so tests
    /// can stage synthetic neighborhoods without running the generator.
    #[cfg(test)]
    pub(crate) fn insert_generated(&mut self, pos: ChunkPos, chunk: Chunk) {
        self.ungenerated.remove(&pos);
        self.chunks.insert(pos, chunk);
        self.unpopulated.insert(pos);
    }
}
