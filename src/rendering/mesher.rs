use bytemuck::{Pod, Zeroable};

use crate::core::chunk::{Chunk, CHUNK_HEIGHT, CHUNK_SIZE};
use crate::rendering::texture::{FaceClass, FaceTextureResolver};

/// Sentinel for the optional vertex fields (overlay tile, top-face
/// world Y) when a face carries neither.
pub const NO_TILE: f32 = -1.0;

/// One mesh vertex: 12 scalars, tightly packed for direct buffer upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub light: f32,
    pub color: [f32; 3],
    pub block_id: f32,
    pub world_y: f32,
    pub overlay: f32,
}

/// CPU-side triangle-list geometry for one chunk. Exclusively owned by
/// its chunk once attached; the renderer uploads it from the main thread.
#[derive(Debug, Default)]
pub struct ChunkMesh {
    pub vertices: Vec<Vertex>,
}

impl ChunkMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// The six face directions of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    NegX,
    PosX,
    NegZ,
    PosZ,
    Bottom,
    Top,
}

impl Face {
    pub const ALL: [Self; 6] = [
        Self::NegX,
        Self::PosX,
        Self::NegZ,
        Self::PosZ,
        Self::Bottom,
        Self::Top,
    ];

    pub fn class(self) -> FaceClass {
        match self {
            Self::Top => FaceClass::Top,
            Self::Bottom => FaceClass::Bottom,
            _ => FaceClass::Side,
        }
    }

    fn offset(self) -> (i32, i32, i32) {
        match self {
            Self::NegX => (-1, 0, 0),
            Self::PosX => (1, 0, 0),
            Self::NegZ => (0, 0, -1),
            Self::PosZ => (0, 0, 1),
            Self::Bottom => (0, -1, 0),
            Self::Top => (0, 1, 0),
        }
    }

    /// Corner positions in emission order for a unit cube spanning
    /// `[x0,x1]×[y0,y1]×[z0,z1]`, wound to face outward.
    fn corners(self, x0: f32, x1: f32, y0: f32, y1: f32, z0: f32, z1: f32) -> [[f32; 3]; 4] {
        match self {
            Self::NegX => [[x0, y0, z0], [x0, y0, z1], [x0, y1, z1], [x0, y1, z0]],
            Self::PosX => [[x1, y0, z1], [x1, y0, z0], [x1, y1, z0], [x1, y1, z1]],
            Self::NegZ => [[x1, y0, z0], [x0, y0, z0], [x0, y1, z0], [x1, y1, z0]],
            Self::PosZ => [[x0, y0, z1], [x1, y0, z1], [x1, y1, z1], [x0, y1, z1]],
            Self::Bottom => [[x0, y0, z0], [x1, y0, z0], [x1, y0, z1], [x0, y0, z1]],
            Self::Top => [[x0, y1, z1], [x1, y1, z1], [x1, y1, z0], [x0, y1, z0]],
        }
    }
}

fn push_quad(
    vertices: &mut Vec<Vertex>,
    corners: [[f32; 3]; 4],
    u0: f32,
    u1: f32,
    color: [f32; 3],
    block_id: f32,
    world_y: f32,
    overlay: f32,
) {
    let uvs = [[u0, 0.0], [u1, 0.0], [u1, 1.0], [u0, 1.0]];
    // light placeholder until propagation exists
    let light = 1.0;
    for &i in &[0usize, 1, 2, 0, 2, 3] {
        vertices.push(Vertex {
            position: corners[i],
            uv: uvs[i],
            light,
            color,
            block_id,
            world_y,
            overlay,
        });
    }
}

/// Builds the triangle list for one chunk, culling faces between solid
/// neighbors. Neighbors beyond the chunk's own extents count as air, so
/// chunk-boundary faces are always emitted; adjacent chunks are never
/// consulted.
pub fn build_chunk_mesh(chunk: &Chunk, resolver: &dyn FaceTextureResolver) -> ChunkMesh {
    let mut vertices = Vec::new();
    let origin = chunk.coord.origin();
    let (ox, oz) = (origin.x as f32, origin.z as f32);

    let tile_w = 1.0 / resolver.tile_count().max(1) as f32;

    for lx in 0..CHUNK_SIZE {
        for lz in 0..CHUNK_SIZE {
            for y in 0..CHUNK_HEIGHT {
                let block = chunk.get_block(lx, y, lz);
                if !block.is_solid() {
                    continue;
                }

                let color = block.kind.color();
                let block_id = block.kind.shader_id() as f32;
                let overlay = resolver
                    .overlay_for(block.kind)
                    .map_or(NO_TILE, |tile| tile as f32);

                let x0 = ox + lx as f32;
                let z0 = oz + lz as f32;
                let y0 = y as f32;
                let (x1, y1, z1) = (x0 + 1.0, y0 + 1.0, z0 + 1.0);

                for face in Face::ALL {
                    let (dx, dy, dz) = face.offset();
                    if chunk.get_block(lx + dx, y + dy, lz + dz).is_solid() {
                        continue;
                    }

                    let tile = resolver.tile_for(block.kind, face.class());
                    let u0 = tile as f32 * tile_w;
                    let corners = face.corners(x0, x1, y0, y1, z0, z1);
                    // only top faces carry their world height and top tint
                    let (face_color, world_y) = match face {
                        Face::Top => (block.kind.top_color(), y1),
                        _ => (color, NO_TILE),
                    };

                    push_quad(
                        &mut vertices,
                        corners,
                        u0,
                        u0 + tile_w,
                        face_color,
                        block_id,
                        world_y,
                        overlay,
                    );
                }
            }
        }
    }

    ChunkMesh { vertices }
}
