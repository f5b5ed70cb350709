pub mod config;
pub mod core;
pub mod rendering;
pub mod terrain;

// Re-export commonly used types
pub use crate::config::{ConfigError, WorldGenConfig};
pub use crate::core::block::{Block, BlockKind};
pub use crate::core::chunk::{Chunk, ChunkCoord, CHUNK_HEIGHT, CHUNK_SIZE};
pub use crate::core::world::{ChunkHandle, World};
pub use crate::rendering::mesher::{build_chunk_mesh, ChunkMesh, Vertex};
pub use crate::rendering::texture::{FaceClass, FaceTextureResolver, FlatTileResolver};
pub use crate::terrain::generator::{ChunkGenerator, TerrainGenerator};
pub use crate::terrain::noise::ValueNoise;
