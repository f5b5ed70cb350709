//! Core voxel systems
pub mod block;
pub mod chunk;
pub mod world;

// Selective re-exports
pub use block::{Block, BlockKind};
pub use chunk::{Chunk, ChunkCoord, CHUNK_HEIGHT, CHUNK_SIZE};
pub use world::{ChunkHandle, World};
