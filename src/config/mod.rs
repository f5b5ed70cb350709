pub mod worldgen;

pub use worldgen::{ConfigError, WorldGenConfig};
