//! # Streaming Scheduler
//!
//! The single-threaded driver: a fixed-timestep accumulator loop that
//! tracks the viewer, re-centers the interest window on chunk crossings,
//! and spends a bounded per-tick budget advancing the chunk lifecycle.

use crate::config::WorldConfig;
use crate::decoration::Decorator;
use crate::noise::WorldSeed;
use crate::position::ChunkPos;
use crate::terrain::TerrainGenerator;
use crate::world::WorldState;

/// Fixed-timestep world streaming driver.
pub struct Scheduler {
    state: WorldState,
    generator: TerrainGenerator,
    decorator: Decorator,
    config: WorldConfig,
    seed: WorldSeed,
    /// Viewer position in world units (block-sized).
    viewer: (f32, f32),
    viewer_speed: f32,
    accumulator: f64,
}

impl Scheduler {
    /// New scheduler with the viewer at the world origin.
    ///
    /// The initial interest window around the origin chunk is queued
    /// immediately; the first ticks start draining it.
    #[must_use]
    pub fn new(seed: WorldSeed, config: WorldConfig) -> Self {
        let mut state = WorldState::new();
        let (_, enqueued) = state.retarget_window(ChunkPos::new(0, 0), config.radius);
        tracing::info!(seed = seed.value(), radius = config.radius, enqueued, "world created");

        Self {
            state,
            generator: TerrainGenerator::new(seed, &config.terrain),
            decorator: Decorator::new(seed, config.decoration),
            config,
            seed,
            viewer: (0.0, 0.0),
            viewer_speed: 0.0,
            accumulator: 0.0,
        }
    }

    /// Advances the simulation by wall-clock `dt` seconds.
    ///
    /// Runs zero or more fixed ticks. A `dt` backlog of a full second or
    /// more is treated as a stall and collapsed to a single tick rather
    /// than replayed.
    pub fn update(&mut self, dt: f64) {
        self.accumulator += dt;
        if self.accumulator >= 1.0 {
            tracing::warn!(backlog = self.accumulator, "stall detected, dropping backlog");
            self.accumulator = self.config.timestep;
        }
        while self.accumulator >= self.config.timestep {
            self.accumulator -= self.config.timestep;
            self.tick();
        }
    }

    /// One fixed step: move the viewer, retarget on chunk crossing, then
    /// spend the lifecycle budget.
    fn tick(&mut self) {
        let before = self.viewer_chunk();
        self.viewer.1 += self.viewer_speed * self.config.timestep as f32;
        let after = self.viewer_chunk();
        if after != before {
            let (evicted, enqueued) = self.state.retarget_window(after, self.config.radius);
            tracing::debug!(
                chunk_x = after.x,
                chunk_y = after.y,
                evicted,
                enqueued,
                "viewer crossed chunk boundary"
            );
        }

        for _ in 0..self.config.budget.generate {
            if self.state.generate_step(&self.generator).is_none() {
                break;
            }
        }
        for _ in 0..self.config.budget.populate {
            if self.state.populate_step(&self.decorator).is_none() {
                break;
            }
        }
        for _ in 0..self.config.budget.mesh {
            if let Some(pos) = self.state.mesh_step() {
                tracing::trace!(chunk_x = pos.x, chunk_y = pos.y, "meshed chunk");
            } else {
                break;
            }
        }
    }

    /// Sets the viewer's forward speed in world units per second.
    pub fn set_viewer_speed(&mut self, speed: f32) {
        self.viewer_speed = speed;
    }

    /// Teleports the viewer, retargeting the window if the chunk changed.
    pub fn set_viewer_position(&mut self, x: f32, y: f32) {
        let before = self.viewer_chunk();
        self.viewer = (x, y);
        let after = self.viewer_chunk();
        if after != before {
            let (evicted, enqueued) = self.state.retarget_window(after, self.config.radius);
            tracing::debug!(
                chunk_x = after.x,
                chunk_y = after.y,
                evicted,
                enqueued,
                "viewer teleported"
            );
        }
    }

    /// Viewer position in world units.
    #[must_use]
    pub fn viewer_position(&self) -> (f32, f32) {
        self.viewer
    }

    /// Chunk the viewer currently stands in.
    #[must_use]
    pub fn viewer_chunk(&self) -> ChunkPos {
        ChunkPos::from_block(self.viewer.0.floor() as i32, self.viewer.1.floor() as i32)
    }

    /// World seed.
    #[must_use]
    pub fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Resident world state.
    #[must_use]
    pub fn state(&self) -> &WorldState {
        &self.state
    }
}
