//! Geometry construction
pub mod mesher;
pub mod texture;

pub use mesher::{build_chunk_mesh, ChunkMesh, Vertex};
pub use texture::{FaceClass, FaceTextureResolver, FlatTileResolver};
