//! # Voxel Mesher
//!
//! Converts a populated chunk plus its 8 horizontal neighbors into a
//! triangle list with per-vertex ambient occlusion.
//!
//! A face is emitted only when the voxel across it is air (or past the
//! vertical floor/ceiling). Each emitted quad gets per-corner occlusion from
//! the three face-plane samples around the corner, and is split along
//! whichever diagonal minimizes the occlusion difference to avoid visible
//! seams.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

use crate::block::Block;
use crate::chunk::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE};
use crate::position::{ChunkPos, WorldPos};

/// Brightness byte per occlusion level 0..=3 (darkest first).
pub const BRIGHTNESS: [u8; 4] = [0xB2, 0xCC, 0xE5, 0xFF];

/// One mesh vertex, laid out for direct GPU upload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct MeshVertex {
    /// Local X corner coordinate (0..=16).
    pub x: u8,
    /// Local Y corner coordinate (0..=16).
    pub y: u8,
    /// Z corner coordinate (0..=128).
    pub z: u8,
    /// Occlusion brightness byte.
    pub light: u8,
    /// Block display color.
    pub rgba: [u8; 4],
}

/// Render artifact for one chunk: triangle list plus chunk-space offset.
///
/// Handed to the rendering collaborator, which must treat it as immutable
/// until replaced or the chunk is evicted.
#[derive(Clone, Debug, Default)]
pub struct ChunkMesh {
    /// Vertex buffer data.
    pub vertices: Vec<MeshVertex>,
    /// Index buffer data (triangle list, CCW front faces).
    pub indices: Vec<u32>,
    /// Chunk-space translation in world units.
    pub offset: [f32; 2],
}

impl ChunkMesh {
    /// True when no faces were emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// One face direction: outward normal, the corner-(0,0) offset from the
/// voxel's minimum corner, and two tangent axes with `t1 x t2 = normal` so
/// corners in (t1, t2) order wind counter-clockwise seen from outside.
struct FaceDef {
    normal: [i32; 3],
    origin: [i32; 3],
    t1: [i32; 3],
    t2: [i32; 3],
}

const FACES: [FaceDef; 6] = [
    // +X
    FaceDef {
        normal: [1, 0, 0],
        origin: [1, 0, 0],
        t1: [0, 1, 0],
        t2: [0, 0, 1],
    },
    // -X
    FaceDef {
        normal: [-1, 0, 0],
        origin: [0, 0, 0],
        t1: [0, 0, 1],
        t2: [0, 1, 0],
    },
    // +Y
    FaceDef {
        normal: [0, 1, 0],
        origin: [0, 1, 0],
        t1: [0, 0, 1],
        t2: [1, 0, 0],
    },
    // -Y
    FaceDef {
        normal: [0, -1, 0],
        origin: [0, 0, 0],
        t1: [1, 0, 0],
        t2: [0, 0, 1],
    },
    // +Z
    FaceDef {
        normal: [0, 0, 1],
        origin: [0, 0, 1],
        t1: [1, 0, 0],
        t2: [0, 1, 0],
    },
    // -Z
    FaceDef {
        normal: [0, 0, -1],
        origin: [0, 0, 0],
        t1: [0, 1, 0],
        t2: [1, 0, 0],
    },
];

/// The four quad corners in tangent space, counter-clockwise.
const CORNERS: [(i32, i32); 4] = [(0, 0), (1, 0), (1, 1), (0, 1)];

/// Reduces the three corner-adjacent solidity samples to an occlusion level.
///
/// `side1`/`side2` are the two face-plane-adjacent neighbors, `corner` the
/// diagonal one. Both sides solid always gives the darkest level, whatever
/// the diagonal holds; the diagonal alone contributes nothing.
#[inline]
#[must_use]
pub const fn occlusion_level(side1: bool, side2: bool, corner: bool) -> u8 {
    if side1 && side2 {
        0
    } else if (side1 || side2) && corner {
        1
    } else if side1 || side2 {
        2
    } else {
        3
    }
}

/// Whether the world cell at an absolute block coordinate holds a non-air
/// block. Outside the vertical extent nothing is solid.
///
/// # Panics
///
/// If the containing chunk column is absent: the scheduler only meshes
/// positions whose full neighborhood is resident.
fn solid_at(chunks: &HashMap<ChunkPos, Chunk>, x: i32, y: i32, z: i32) -> bool {
    if WorldPos::z_out_of_range(z) {
        return false;
    }
    let pos = WorldPos::from_global(x, y, z);
    let chunk = chunks
        .get(&pos.chunk)
        .expect("neighbor chunk missing during meshing");
    !chunk.get(pos.x, pos.y, pos.z).is_air()
}

/// Meshes the chunk at `pos` against its resident neighborhood.
///
/// # Panics
///
/// If `pos` or a sampled neighbor is absent from `chunks` (scheduler
/// invariant violation).
#[must_use]
pub fn mesh_chunk(pos: ChunkPos, chunks: &HashMap<ChunkPos, Chunk>) -> ChunkMesh {
    let chunk = chunks.get(&pos).expect("chunk missing during meshing");
    let base_x = pos.world_x();
    let base_y = pos.world_y();

    let mut mesh = ChunkMesh {
        offset: [base_x as f32, base_y as f32],
        ..ChunkMesh::default()
    };

    for x in 0..CHUNK_SIZE {
        for y in 0..CHUNK_SIZE {
            for z in 0..CHUNK_HEIGHT {
                let block = chunk.get(x, y, z);
                if block.is_air() {
                    continue;
                }
                let world = [base_x + x as i32, base_y + y as i32, z as i32];
                for face in &FACES {
                    let across = [
                        world[0] + face.normal[0],
                        world[1] + face.normal[1],
                        world[2] + face.normal[2],
                    ];
                    if !solid_at(chunks, across[0], across[1], across[2]) {
                        emit_face(&mut mesh, chunks, [x, y, z], world, face, block);
                    }
                }
            }
        }
    }

    mesh
}

/// Appends one quad (4 vertices, 2 triangles) for an exposed face.
fn emit_face(
    mesh: &mut ChunkMesh,
    chunks: &HashMap<ChunkPos, Chunk>,
    local: [usize; 3],
    world: [i32; 3],
    face: &FaceDef,
    block: Block,
) {
    let color = block.color();
    let base = mesh.vertices.len() as u32;

    let mut levels = [0u8; 4];
    for (i, &(a, b)) in CORNERS.iter().enumerate() {
        // Corner-local sample directions: towards the corner along each
        // tangent axis.
        let s1 = 2 * a - 1;
        let s2 = 2 * b - 1;
        let plane = [
            world[0] + face.normal[0],
            world[1] + face.normal[1],
            world[2] + face.normal[2],
        ];
        let side1 = solid_at(
            chunks,
            plane[0] + s1 * face.t1[0],
            plane[1] + s1 * face.t1[1],
            plane[2] + s1 * face.t1[2],
        );
        let side2 = solid_at(
            chunks,
            plane[0] + s2 * face.t2[0],
            plane[1] + s2 * face.t2[1],
            plane[2] + s2 * face.t2[2],
        );
        let corner = solid_at(
            chunks,
            plane[0] + s1 * face.t1[0] + s2 * face.t2[0],
            plane[1] + s1 * face.t1[1] + s2 * face.t2[1],
            plane[2] + s1 * face.t1[2] + s2 * face.t2[2],
        );
        levels[i] = occlusion_level(side1, side2, corner);

        let vx = local[0] as i32 + face.origin[0] + a * face.t1[0] + b * face.t2[0];
        let vy = local[1] as i32 + face.origin[1] + a * face.t1[1] + b * face.t2[1];
        let vz = local[2] as i32 + face.origin[2] + a * face.t1[2] + b * face.t2[2];
        mesh.vertices.push(MeshVertex {
            x: vx as u8,
            y: vy as u8,
            z: vz as u8,
            light: BRIGHTNESS[levels[i] as usize],
            rgba: color,
        });
    }

    // Split along the diagonal with the smaller occlusion difference so
    // interpolation doesn't produce a visible seam.
    let main_diag = levels[0].abs_diff(levels[2]);
    let anti_diag = levels[1].abs_diff(levels[3]);
    if main_diag <= anti_diag {
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    } else {
        mesh.indices
            .extend_from_slice(&[base + 1, base + 2, base + 3, base + 1, base + 3, base]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x3 map of empty chunks centered on the origin.
    fn empty_neighborhood() -> HashMap<ChunkPos, Chunk> {
        let mut chunks = HashMap::new();
        for cx in -1..=1 {
            for cy in -1..=1 {
                chunks.insert(ChunkPos::new(cx, cy), Chunk::new());
            }
        }
        chunks
    }

    fn set_world(chunks: &mut HashMap<ChunkPos, Chunk>, x: i32, y: i32, z: i32, block: Block) {
        let pos = WorldPos::from_global(x, y, z);
        chunks
            .get_mut(&pos.chunk)
            .expect("test chunk present")
            .set(pos.x, pos.y, pos.z, block);
    }

    #[test]
    fn test_isolated_voxel_emits_six_faces() {
        let mut chunks = empty_neighborhood();
        set_world(&mut chunks, 8, 8, 64, Block::Stone);

        let mesh = mesh_chunk(ChunkPos::new(0, 0), &chunks);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert_eq!(mesh.triangle_count(), 12);
        // Nothing solid nearby: every corner is at full brightness.
        assert!(mesh.vertices.iter().all(|v| v.light == 0xFF));
        assert!(mesh.vertices.iter().all(|v| v.rgba == Block::Stone.color()));
    }

    #[test]
    fn test_enclosed_voxel_emits_nothing() {
        let mut chunks = empty_neighborhood();
        // Plus-shape: center voxel fully enclosed by its six face neighbors.
        set_world(&mut chunks, 8, 8, 64, Block::Stone);
        for (dx, dy, dz) in [
            (1, 0, 0),
            (-1, 0, 0),
            (0, 1, 0),
            (0, -1, 0),
            (0, 0, 1),
            (0, 0, -1),
        ] {
            set_world(&mut chunks, 8 + dx, 8 + dy, 64 + dz, Block::Stone);
        }

        let mesh = mesh_chunk(ChunkPos::new(0, 0), &chunks);
        // Center contributes zero faces; each arm voxel exposes 5.
        assert_eq!(mesh.vertices.len(), 6 * 5 * 4);
        assert_eq!(mesh.indices.len(), 6 * 5 * 6);
    }

    #[test]
    fn test_floor_and_ceiling_always_exposed() {
        let mut chunks = empty_neighborhood();
        set_world(&mut chunks, 8, 8, 0, Block::Stone);
        set_world(&mut chunks, 4, 4, 127, Block::Stone);

        let mesh = mesh_chunk(ChunkPos::new(0, 0), &chunks);
        // Both voxels emit all six faces, including at z=0 and z=127.
        assert_eq!(mesh.vertices.len(), 48);
        assert!(mesh.vertices.iter().any(|v| v.z == 0));
        assert!(mesh.vertices.iter().any(|v| v.z == 128));
    }

    #[test]
    fn test_cross_chunk_culling() {
        let mut chunks = empty_neighborhood();
        set_world(&mut chunks, 15, 8, 64, Block::Stone);
        // Directly across the +X chunk boundary.
        set_world(&mut chunks, 16, 8, 64, Block::Stone);

        let mesh = mesh_chunk(ChunkPos::new(0, 0), &chunks);
        // The +X face is culled by the neighbor chunk's voxel.
        assert_eq!(mesh.vertices.len(), 20);
        assert_eq!(mesh.indices.len(), 30);
    }

    #[test]
    #[should_panic(expected = "missing during meshing")]
    fn test_missing_neighbor_is_fatal() {
        let mut chunks = HashMap::new();
        let mut chunk = Chunk::new();
        chunk.set(15, 8, 64, Block::Stone);
        chunks.insert(ChunkPos::new(0, 0), chunk);

        // The +X visibility sample crosses into an absent chunk.
        let _ = mesh_chunk(ChunkPos::new(0, 0), &chunks);
    }

    #[test]
    fn test_occlusion_table() {
        // 0 solid
        assert_eq!(occlusion_level(false, false, false), 3);
        // Diagonal alone is irrelevant.
        assert_eq!(occlusion_level(false, false, true), 3);
        // Exactly one plane-adjacent neighbor.
        assert_eq!(occlusion_level(true, false, false), 2);
        assert_eq!(occlusion_level(false, true, false), 2);
        // One plane-adjacent plus the diagonal.
        assert_eq!(occlusion_level(true, false, true), 1);
        assert_eq!(occlusion_level(false, true, true), 1);
        // Both plane-adjacent solid: darkest, independent of the diagonal.
        assert_eq!(occlusion_level(true, true, false), 0);
        assert_eq!(occlusion_level(true, true, true), 0);
    }

    #[test]
    fn test_brightness_bytes() {
        assert_eq!(BRIGHTNESS[occlusion_level(false, false, false) as usize], 0xFF);
        assert_eq!(BRIGHTNESS[occlusion_level(true, false, false) as usize], 0xE5);
        assert_eq!(BRIGHTNESS[occlusion_level(true, false, true) as usize], 0xCC);
        assert_eq!(BRIGHTNESS[occlusion_level(true, true, true) as usize], 0xB2);
    }

    #[test]
    fn test_top_face_occlusion_from_raised_neighbor() {
        let mut chunks = empty_neighborhood();
        set_world(&mut chunks, 8, 8, 64, Block::Stone);
        // One block up and over in +X: occludes the two +X corners of the
        // top face.
        set_world(&mut chunks, 9, 8, 65, Block::Stone);

        let mesh = mesh_chunk(ChunkPos::new(0, 0), &chunks);
        // Corners at z=65 belong to the lower voxel's top face and the
        // raised voxel's bottom and side faces; both see the other as an
        // occluder.
        let top: Vec<_> = mesh.vertices.iter().filter(|v| v.z == 65).collect();
        let dimmed = top.iter().filter(|v| v.light == 0xE5).count();
        let bright = top.iter().filter(|v| v.light == 0xFF).count();
        assert!(dimmed >= 2, "raised neighbor should dim two corners");
        assert!(bright >= 2);
    }

    #[test]
    fn test_quad_split_follows_occlusion() {
        let mut chunks = empty_neighborhood();
        set_world(&mut chunks, 8, 8, 64, Block::Stone);
        set_world(&mut chunks, 9, 8, 65, Block::Stone);

        let mesh = mesh_chunk(ChunkPos::new(0, 0), &chunks);
        // Every triangle keeps a consistent winding: 3 distinct indices.
        for tri in mesh.indices.chunks(3) {
            assert!(tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2]);
        }
        // All indices reference real vertices.
        let max = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }

    #[test]
    fn test_water_surface_translucent_color() {
        let mut chunks = empty_neighborhood();
        set_world(&mut chunks, 8, 8, 30, Block::Water);

        let mesh = mesh_chunk(ChunkPos::new(0, 0), &chunks);
        assert_eq!(mesh.vertices.len(), 24);
        assert!(mesh.vertices.iter().all(|v| v.rgba == [0x00, 0x57, 0xFF, 0x5F]));
    }

    #[test]
    fn test_offset_is_chunk_space_translation() {
        let chunks: HashMap<ChunkPos, Chunk> = (-3..=3)
            .flat_map(|cx| (-3..=3).map(move |cy| (ChunkPos::new(cx, cy), Chunk::new())))
            .collect();
        let mesh = mesh_chunk(ChunkPos::new(-2, 1), &chunks);
        assert_eq!(mesh.offset, [-32.0, 16.0]);
        assert!(mesh.is_empty());
    }
}
