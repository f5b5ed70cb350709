use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, info};
use parking_lot::{Mutex, RwLock};

use crate::core::block::Block;
use crate::core::chunk::{Chunk, ChunkCoord, CHUNK_HEIGHT};
use crate::rendering::mesher::build_chunk_mesh;
use crate::rendering::texture::FaceTextureResolver;
use crate::terrain::generator::ChunkGenerator;

/// Thread-safe chunk handle
pub type ChunkHandle = Arc<RwLock<Chunk>>;

/// The chunk store. Owns every generated chunk and the scheduling state
/// between background generation and main-thread mesh rebuilding.
///
/// A coordinate key exists in the map iff generation for it has been
/// requested; the slot holds `None` while generation is in flight and the
/// finished chunk afterwards. The store lock only ever guards O(1) map
/// work; it is never held across generation or meshing.
pub struct World {
    chunks: Mutex<HashMap<ChunkCoord, Option<ChunkHandle>>>,
    generator: Arc<dyn ChunkGenerator>,
    generated: AtomicUsize,
}

impl World {
    pub fn new(generator: Arc<dyn ChunkGenerator>) -> Self {
        Self {
            chunks: Mutex::new(HashMap::new()),
            generator,
            generated: AtomicUsize::new(0),
        }
    }

    /// Generates the chunk at `(cx, cz)` unless it already exists or is
    /// in flight. Safe to call from any thread; returns whether this call
    /// performed the generation.
    pub fn generate_chunk(&self, cx: i32, cz: i32) -> bool {
        let coord = ChunkCoord::new(cx, cz);
        {
            let mut chunks = self.chunks.lock();
            if chunks.contains_key(&coord) {
                return false;
            }
            // Reserve the slot so nobody else generates this coordinate,
            // then drop the lock for the duration of the actual work.
            chunks.insert(coord, None);
        }

        let chunk = self.generator.generate(coord);
        self.generated.fetch_add(1, Ordering::Relaxed);

        self.chunks
            .lock()
            .insert(coord, Some(Arc::new(RwLock::new(chunk))));
        true
    }

    /// Looks up a chunk without generating. A coordinate whose generation
    /// is still in flight reads as absent.
    pub fn get_chunk(&self, cx: i32, cz: i32) -> Option<ChunkHandle> {
        self.chunks
            .lock()
            .get(&ChunkCoord::new(cx, cz))
            .and_then(|slot| slot.clone())
    }

    /// Block at world coordinates; a missing chunk or out-of-range local
    /// index yields air. Never generates.
    pub fn get_block_at(&self, wx: i32, wy: i32, wz: i32) -> Block {
        let (coord, lx, lz) = ChunkCoord::from_world(wx, wz);
        match self.get_chunk(coord.x, coord.z) {
            Some(chunk) => chunk.read().get_block(lx, wy, lz),
            None => Block::AIR,
        }
    }

    /// Writes a block, generating the target chunk first if needed, and
    /// flags the chunk for a mesh rebuild. The sole mutation entry point.
    pub fn set_block_at(&self, wx: i32, wy: i32, wz: i32, block: Block) {
        let (coord, lx, lz) = ChunkCoord::from_world(wx, wz);
        self.generate_chunk(coord.x, coord.z);
        if let Some(chunk) = self.get_chunk(coord.x, coord.z) {
            chunk.write().set_block(lx, wy, lz, block);
        }
    }

    /// Surface height of the column containing `(wx, wz)`: the largest y
    /// holding a solid block, or -1 if the column is entirely empty.
    /// Generates the chunk if it is missing.
    pub fn get_height_at(&self, wx: f32, wz: f32) -> i32 {
        let (coord, lx, lz) = ChunkCoord::from_world(wx.floor() as i32, wz.floor() as i32);
        self.generate_chunk(coord.x, coord.z);
        let chunk = match self.get_chunk(coord.x, coord.z) {
            Some(chunk) => chunk,
            None => return -1,
        };
        let chunk = chunk.read();
        for y in (0..CHUNK_HEIGHT).rev() {
            if chunk.get_block(lx, y, lz).is_solid() {
                return y;
            }
        }
        -1
    }

    /// Fires one detached background task that generates every chunk in a
    /// `(2 * radius + 1)²` square around the origin. Fire-and-forget: no
    /// completion signal exists beyond the chunks appearing in the store.
    pub fn pregenerate_async(self: Arc<Self>, radius: i32) {
        let world = self;
        rayon::spawn(move || {
            info!("pregeneration: generating radius={}", radius);
            for cx in -radius..=radius {
                for cz in -radius..=radius {
                    world.generate_chunk(cx, cz);
                }
            }
            info!("pregeneration: done, {} chunks loaded", world.chunk_count());
        });
    }

    /// Rebuilds the geometry of up to `max_rebuild` dirty chunks and
    /// attaches the results, clearing their flags. Bounds mesh work per
    /// frame; leftover dirty chunks wait for a later call.
    ///
    /// Must only be called from the thread that owns graphics state;
    /// attached geometry is handed to the renderer from here.
    pub fn process_mesh_queue(
        &self,
        max_rebuild: usize,
        resolver: &dyn FaceTextureResolver,
    ) -> usize {
        if max_rebuild == 0 {
            return 0;
        }

        let mut to_rebuild: Vec<ChunkHandle> = Vec::new();
        {
            let chunks = self.chunks.lock();
            for handle in chunks.values().flatten() {
                if handle.read().needs_mesh() {
                    to_rebuild.push(Arc::clone(handle));
                    if to_rebuild.len() >= max_rebuild {
                        break;
                    }
                }
            }
        }

        for handle in &to_rebuild {
            let mut chunk = handle.write();
            let mesh = build_chunk_mesh(&chunk, resolver);
            debug!(
                "rebuilt mesh for chunk ({}, {}): {} vertices",
                chunk.coord.x,
                chunk.coord.z,
                mesh.vertex_count()
            );
            chunk.attach_mesh(mesh);
        }
        to_rebuild.len()
    }

    /// Number of store entries, in-flight reservations included.
    pub fn chunk_count(&self) -> usize {
        self.chunks.lock().len()
    }

    /// Chunks currently flagged for a mesh rebuild.
    pub fn pending_mesh_count(&self) -> usize {
        self.chunks
            .lock()
            .values()
            .flatten()
            .filter(|handle| handle.read().needs_mesh())
            .count()
    }

    /// Total terrain generator executions so far.
    pub fn generated_count(&self) -> usize {
        self.generated.load(Ordering::Relaxed)
    }

    /// Coordinates of every fully generated chunk.
    pub fn loaded_coords(&self) -> Vec<ChunkCoord> {
        self.chunks
            .lock()
            .iter()
            .filter(|(_, slot)| slot.is_some())
            .map(|(coord, _)| *coord)
            .collect()
    }
}
