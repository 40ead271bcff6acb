//! # VOXELSTREAM
//!
//! Streaming core for an infinite voxel world: deterministic terrain
//! generation, a cross-chunk decoration pass, an ambient-occlusion mesher,
//! and a fixed-timestep scheduler that keeps a window of chunks resident
//! around a moving viewer.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: same seed always produces the same world,
//!    bit-for-bit, regardless of visit order
//! 2. **Chunked**: the world exists only as 16x16x128 chunks inside the
//!    viewer's interest window
//! 3. **Incremental**: each fixed tick spends a small configured budget of
//!    generation, decoration, and meshing work
//! 4. **Fail fast**: out-of-bounds voxel access and missing-neighbor
//!    meshing are bugs and panic, never silently clamp
//!
//! ## Core Components
//!
//! - [`GradientNoise`] / [`Brownian`]: seeded 2D lattice noise and its
//!   fractal sum
//! - [`TerrainGenerator`]: per-column stone/dirt/grass/water terrain
//! - [`Decorator`]: tree placement that may write into neighbor chunks
//! - [`mesh_chunk`]: greedy-free face mesher with per-vertex occlusion
//! - [`Scheduler`]: the fixed-timestep driver tying it all together
//!
//! ## Example
//!
//! ```rust
//! use voxelstream::{Scheduler, WorldConfig, WorldSeed};
//!
//! let mut scheduler = Scheduler::new(WorldSeed::new(12345), WorldConfig::default());
//! scheduler.set_viewer_speed(4.0);
//!
//! // One second of simulation at 60 Hz.
//! for _ in 0..60 {
//!     scheduler.update(1.0 / 60.0);
//! }
//! assert!(scheduler.state().chunk_count() > 0);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]

pub mod block;
pub mod chunk;
pub mod config;
pub mod decoration;
pub mod mesh;
pub mod noise;
pub mod position;
pub mod scheduler;
pub mod terrain;
pub mod world;

pub use block::Block;
pub use chunk::{Chunk, BLOCKS_PER_CHUNK, CHUNK_HEIGHT, CHUNK_SIZE};
pub use config::{
    ConfigError, ConfigResult, DecorationConfig, TerrainConfig, TickBudget, WorldConfig,
};
pub use decoration::Decorator;
pub use mesh::{mesh_chunk, ChunkMesh, MeshVertex};
pub use noise::{Brownian, GradientNoise, WorldSeed};
pub use position::{ChunkPos, WorldPos};
pub use scheduler::Scheduler;
pub use terrain::{ColumnProfile, ColumnSampler, NoiseColumnSampler, TerrainGenerator};
pub use world::WorldState;
