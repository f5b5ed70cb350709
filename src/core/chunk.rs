use glam::IVec3;

use crate::core::block::Block;
use crate::rendering::mesher::ChunkMesh;

pub const CHUNK_SIZE: i32 = 16;
pub const CHUNK_HEIGHT: i32 = 128;
pub const CHUNK_VOLUME: usize = (CHUNK_SIZE * CHUNK_HEIGHT * CHUNK_SIZE) as usize;

/// Horizontal coordinate of a chunk in the infinite grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Splits a world column into its owning chunk and local offsets.
    /// Floor division keeps negative coordinates in `[0, CHUNK_SIZE)`.
    pub fn from_world(wx: i32, wz: i32) -> (Self, i32, i32) {
        let coord = Self::new(wx.div_euclid(CHUNK_SIZE), wz.div_euclid(CHUNK_SIZE));
        (coord, wx.rem_euclid(CHUNK_SIZE), wz.rem_euclid(CHUNK_SIZE))
    }

    /// World-space position of the chunk's (0, 0, 0) corner.
    pub fn origin(self) -> IVec3 {
        IVec3::new(self.x * CHUNK_SIZE, 0, self.z * CHUNK_SIZE)
    }
}

/// A fixed-size column of the voxel grid: the unit of generation and
/// meshing. Block data may be filled on any thread; the attached mesh is
/// only ever touched from the main thread.
pub struct Chunk {
    pub coord: ChunkCoord,
    blocks: Box<[Block]>,
    needs_mesh: bool,
    mesh: Option<ChunkMesh>,
}

impl Chunk {
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: vec![Block::AIR; CHUNK_VOLUME].into_boxed_slice(),
            needs_mesh: false,
            mesh: None,
        }
    }

    #[inline]
    fn in_bounds(lx: i32, y: i32, lz: i32) -> bool {
        lx >= 0 && lx < CHUNK_SIZE && y >= 0 && y < CHUNK_HEIGHT && lz >= 0 && lz < CHUNK_SIZE
    }

    #[inline]
    fn index(lx: i32, y: i32, lz: i32) -> usize {
        ((lx * CHUNK_HEIGHT + y) * CHUNK_SIZE + lz) as usize
    }

    /// Block at local coordinates; anything out of range reads as air.
    pub fn get_block(&self, lx: i32, y: i32, lz: i32) -> Block {
        if !Self::in_bounds(lx, y, lz) {
            return Block::AIR;
        }
        self.blocks[Self::index(lx, y, lz)]
    }

    /// Writes a block and marks the mesh stale. Out-of-range writes are
    /// silently dropped.
    pub fn set_block(&mut self, lx: i32, y: i32, lz: i32, block: Block) {
        if !Self::in_bounds(lx, y, lz) {
            return;
        }
        self.blocks[Self::index(lx, y, lz)] = block;
        self.needs_mesh = true;
    }

    pub fn needs_mesh(&self) -> bool {
        self.needs_mesh
    }

    pub fn mark_mesh_dirty(&mut self) {
        self.needs_mesh = true;
    }

    /// Installs freshly built geometry, dropping whatever was attached
    /// before, and clears the dirty flag.
    pub fn attach_mesh(&mut self, mesh: ChunkMesh) {
        self.mesh = Some(mesh);
        self.needs_mesh = false;
    }

    pub fn mesh(&self) -> Option<&ChunkMesh> {
        self.mesh.as_ref()
    }
}
