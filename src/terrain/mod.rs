//! World generation
pub mod generator;
pub mod noise;

pub use generator::{ChunkGenerator, TerrainGenerator};
pub use noise::ValueNoise;
