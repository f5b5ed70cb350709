use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// World generation parameters. The defaults produce rolling grassland
/// with scattered trees; every field can be overridden from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    pub seed: u32,
    /// Mean surface level the height noise oscillates around.
    pub base_height: i32,
    /// Peak-to-valley swing of the height noise, in blocks.
    pub amplitude: f32,
    /// Horizontal frequency of the height noise.
    pub terrain_scale: f32,
    pub octaves: u32,
    pub lacunarity: f32,
    pub gain: f32,
    /// Horizontal frequency of the vegetation noise.
    pub tree_scale: f32,
    /// Vegetation noise value a column must exceed to host a tree.
    pub tree_threshold: f32,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: 1337,
            base_height: 60,
            amplitude: 24.0,
            terrain_scale: 0.01,
            octaves: 5,
            lacunarity: 2.0,
            gain: 0.5,
            tree_scale: 0.05,
            tree_threshold: 0.68,
        }
    }
}

impl WorldGenConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = WorldGenConfig::default();
        assert_eq!(config.base_height, 60);
        assert_eq!(config.octaves, 5);
        assert_eq!(config.tree_threshold, 0.68);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 99\nbase_height = 40").unwrap();

        let config = WorldGenConfig::from_path(file.path()).unwrap();
        assert_eq!(config.seed, 99);
        assert_eq!(config.base_height, 40);
        assert_eq!(config.amplitude, 24.0);
    }

    #[test]
    fn test_malformed_file_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = \"not a number\"").unwrap();

        assert!(matches!(
            WorldGenConfig::from_path(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_reports_io_error() {
        assert!(matches!(
            WorldGenConfig::from_path(Path::new("/nonexistent/worldgen.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = WorldGenConfig::default();
        let raw = toml::to_string(&config).unwrap();
        let parsed: WorldGenConfig = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.seed, config.seed);
        assert_eq!(parsed.terrain_scale, config.terrain_scale);
    }
}
