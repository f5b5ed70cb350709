use log::warn;

use crate::config::WorldGenConfig;
use crate::core::block::{Block, BlockKind};
use crate::core::chunk::{Chunk, ChunkCoord, CHUNK_HEIGHT, CHUNK_SIZE};
use crate::terrain::noise::ValueNoise;

/// Anything that can populate a chunk from its coordinate. The world
/// schedules generation through this seam, so it never needs to know
/// which terrain it is running.
pub trait ChunkGenerator: Send + Sync {
    fn generate(&self, coord: ChunkCoord) -> Chunk;
}

const VEGETATION_SEED_OFFSET: u32 = 0x9e37_79b9;
const CANOPY_RADIUS: i32 = 2;

/// Noise-driven terrain. A pure function of chunk coordinate and config:
/// no shared state is touched beyond the chunk being filled, so it can run
/// on any number of worker threads at once.
pub struct TerrainGenerator {
    config: WorldGenConfig,
    terrain_noise: ValueNoise,
    vegetation_noise: ValueNoise,
}

impl TerrainGenerator {
    pub fn new(config: WorldGenConfig) -> Self {
        if config.octaves == 0 {
            warn!("worldgen config has zero octaves, terrain will be flat");
        }
        Self {
            terrain_noise: ValueNoise::new(config.seed),
            vegetation_noise: ValueNoise::new(config.seed.wrapping_add(VEGETATION_SEED_OFFSET)),
            config,
        }
    }

    fn surface_height(&self, wx: i32, wz: i32) -> i32 {
        let n = self.terrain_noise.fractal(
            wx as f32 * self.config.terrain_scale,
            wz as f32 * self.config.terrain_scale,
            self.config.octaves,
            self.config.lacunarity,
            self.config.gain,
        );
        let height = self.config.base_height + (n * self.config.amplitude).round() as i32;
        height.clamp(0, CHUNK_HEIGHT - 1)
    }

    fn plant_tree(&self, chunk: &mut Chunk, lx: i32, lz: i32, height: i32, t: f32) {
        let trunk = (4 + ((t - self.config.tree_threshold) * 6.0).floor() as i32).clamp(4, 6);
        for y in height + 1..=height + trunk {
            chunk.set_block(lx, y, lz, Block::new(BlockKind::Wood));
        }

        // Vertically squashed ellipsoid canopy around the trunk top
        let top = height + trunk;
        let r = CANOPY_RADIUS as f32 + 0.5;
        for dx in -CANOPY_RADIUS..=CANOPY_RADIUS {
            for dz in -CANOPY_RADIUS..=CANOPY_RADIUS {
                for dy in -1..=2 {
                    let d = (dx * dx + dz * dz) as f32 + (dy as f32 * 1.5) * (dy as f32 * 1.5);
                    if d > r * r {
                        continue;
                    }
                    // leave the trunk's own column alone
                    if dx == 0 && dz == 0 && (0..=2).contains(&dy) {
                        continue;
                    }
                    let (ax, ay, az) = (lx + dx, top + dy, lz + dz);
                    if chunk.get_block(ax, ay, az).kind == BlockKind::Air {
                        chunk.set_block(ax, ay, az, Block::new(BlockKind::Leaves));
                    }
                }
            }
        }
    }
}

impl ChunkGenerator for TerrainGenerator {
    fn generate(&self, coord: ChunkCoord) -> Chunk {
        let mut chunk = Chunk::new(coord);

        for lx in 0..CHUNK_SIZE {
            for lz in 0..CHUNK_SIZE {
                let wx = coord.x * CHUNK_SIZE + lx;
                let wz = coord.z * CHUNK_SIZE + lz;
                let height = self.surface_height(wx, wz);

                for y in 0..=height {
                    let kind = if y == height {
                        BlockKind::Grass
                    } else if y > height - 3 {
                        BlockKind::Dirt
                    } else {
                        BlockKind::Stone
                    };
                    chunk.set_block(lx, y, lz, Block::new(kind));
                }

                let t = self.vegetation_noise.sample(
                    wx as f32 * self.config.tree_scale,
                    wz as f32 * self.config.tree_scale,
                );
                if chunk.get_block(lx, height, lz).kind == BlockKind::Grass
                    && t > self.config.tree_threshold
                    && (lx + lz) % 6 == 0
                    && height + 6 < CHUNK_HEIGHT
                {
                    self.plant_tree(&mut chunk, lx, lz, height, t);
                }
            }
        }

        chunk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> TerrainGenerator {
        TerrainGenerator::new(WorldGenConfig::default())
    }

    /// The y of the single grass block in a column, ignoring any canopy
    /// leaves a neighboring tree may have draped over it.
    fn grass_height(chunk: &Chunk, lx: i32, lz: i32) -> i32 {
        (0..CHUNK_HEIGHT)
            .find(|&y| chunk.get_block(lx, y, lz).kind == BlockKind::Grass)
            .expect("column has no grass surface")
    }

    #[test]
    fn test_generation_is_deterministic() {
        let gen = generator();
        let coord = ChunkCoord::new(4, -7);
        let a = gen.generate(coord);
        let b = gen.generate(coord);
        for lx in 0..CHUNK_SIZE {
            for lz in 0..CHUNK_SIZE {
                for y in 0..CHUNK_HEIGHT {
                    assert_eq!(a.get_block(lx, y, lz), b.get_block(lx, y, lz));
                }
            }
        }
    }

    #[test]
    fn test_fresh_chunks_need_meshing() {
        let chunk = generator().generate(ChunkCoord::new(0, 0));
        assert!(chunk.needs_mesh());
    }

    #[test]
    fn test_column_layering() {
        let gen = generator();
        let chunk = gen.generate(ChunkCoord::new(2, 3));
        // (lx + lz) % 6 != 0 keeps the column itself tree-free
        let (lx, lz) = (0, 1);
        let h = grass_height(&chunk, lx, lz);

        assert_eq!(h, gen.surface_height(2 * CHUNK_SIZE + lx, 3 * CHUNK_SIZE + lz));
        assert_eq!(chunk.get_block(lx, h - 1, lz).kind, BlockKind::Dirt);
        assert_eq!(chunk.get_block(lx, h - 2, lz).kind, BlockKind::Dirt);
        assert_eq!(chunk.get_block(lx, h - 3, lz).kind, BlockKind::Stone);
        assert_eq!(chunk.get_block(lx, 0, lz).kind, BlockKind::Stone);

        // Above the surface: air, or leaves from a neighboring canopy
        for y in h + 1..CHUNK_HEIGHT {
            let kind = chunk.get_block(lx, y, lz).kind;
            assert!(
                kind == BlockKind::Air || kind == BlockKind::Leaves,
                "unexpected {:?} above surface at y={}",
                kind,
                y
            );
        }
    }

    #[test]
    fn test_heights_stay_in_band() {
        let gen = generator();
        let cfg = WorldGenConfig::default();
        for cx in -3..3 {
            for cz in -3..3 {
                for lx in 0..CHUNK_SIZE {
                    for lz in 0..CHUNK_SIZE {
                        let h = gen.surface_height(cx * CHUNK_SIZE + lx, cz * CHUNK_SIZE + lz);
                        assert!(h >= cfg.base_height - cfg.amplitude as i32);
                        assert!(h <= cfg.base_height + cfg.amplitude as i32);
                    }
                }
            }
        }
    }

    /// Finds a tree site away from chunk edges whose neighboring columns
    /// are all lower than the trunk top, so the full canopy ring fits.
    fn find_tree_site(gen: &TerrainGenerator) -> Option<(Chunk, i32, i32, i32)> {
        let cfg = WorldGenConfig::default();
        for cx in -12..12 {
            for cz in -12..12 {
                for lx in CANOPY_RADIUS..CHUNK_SIZE - CANOPY_RADIUS {
                    for lz in CANOPY_RADIUS..CHUNK_SIZE - CANOPY_RADIUS {
                        if (lx + lz) % 6 != 0 {
                            continue;
                        }
                        let wx = cx * CHUNK_SIZE + lx;
                        let wz = cz * CHUNK_SIZE + lz;
                        let t = gen
                            .vegetation_noise
                            .sample(wx as f32 * cfg.tree_scale, wz as f32 * cfg.tree_scale);
                        if t <= cfg.tree_threshold {
                            continue;
                        }
                        let h = gen.surface_height(wx, wz);
                        if h + 6 >= CHUNK_HEIGHT {
                            continue;
                        }
                        let lateral_clear = [(1, 0), (-1, 0), (0, 1), (0, -1)]
                            .iter()
                            .all(|&(dx, dz)| gen.surface_height(wx + dx, wz + dz) < h + 4);
                        if !lateral_clear {
                            continue;
                        }
                        let chunk = gen.generate(ChunkCoord::new(cx, cz));
                        return Some((chunk, lx, lz, h));
                    }
                }
            }
        }
        None
    }

    #[test]
    fn test_tree_trunk_and_canopy() {
        let gen = generator();
        let (chunk, lx, lz, h) = find_tree_site(&gen).expect("no tree site in search area");

        assert_eq!(chunk.get_block(lx, h, lz).kind, BlockKind::Grass);

        // Contiguous wood run above the surface
        let mut trunk = 0;
        while chunk.get_block(lx, h + 1 + trunk, lz).kind == BlockKind::Wood {
            trunk += 1;
        }
        assert!((4..=6).contains(&trunk), "trunk height {} out of range", trunk);

        // Lateral canopy around the trunk top
        let top = h + trunk;
        for (dx, dz) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            assert_eq!(
                chunk.get_block(lx + dx, top, lz + dz).kind,
                BlockKind::Leaves,
                "missing canopy at offset ({}, {})",
                dx,
                dz
            );
        }
        // The trunk column itself is never overwritten by leaves
        assert_eq!(chunk.get_block(lx, top, lz).kind, BlockKind::Wood);
    }

    #[test]
    fn test_canopy_only_replaces_air() {
        let gen = generator();
        let chunk = gen.generate(ChunkCoord::new(0, 0));
        // No grass or dirt cell anywhere was swapped for leaves: every
        // column still carries its full dirt band under the surface.
        for lx in 0..CHUNK_SIZE {
            for lz in 0..CHUNK_SIZE {
                let h = grass_height(&chunk, lx, lz);
                assert_eq!(chunk.get_block(lx, h - 1, lz).kind, BlockKind::Dirt);
            }
        }
    }
}
