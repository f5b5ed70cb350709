//! Headless world bootstrap: pregenerates a square of chunks, runs the
//! bounded mesh passes a frame loop would, and reports what came out.
//! Useful for profiling generation and eyeballing worldgen changes
//! without bringing up a window.

use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use log::info;

use terravox::{FlatTileResolver, TerrainGenerator, World, WorldGenConfig};

const MESH_REBUILDS_PER_PASS: usize = 2;

fn main() -> Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init()
        .context("failed to initialize logger")?;

    let args: Vec<String> = std::env::args().collect();
    let mut radius = 4i32;
    let mut config = WorldGenConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--radius" if i + 1 < args.len() => {
                i += 1;
                radius = args[i].parse().context("invalid --radius value")?;
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                config = WorldGenConfig::from_path(Path::new(&args[i]))
                    .context("failed to load worldgen config")?;
            }
            other => bail!("unknown argument: {}", other),
        }
        i += 1;
    }

    let world = Arc::new(World::new(Arc::new(TerrainGenerator::new(config))));
    let started = Instant::now();
    Arc::clone(&world).pregenerate_async(radius);

    // A player would spawn on the surface at the origin
    let surface = world.get_height_at(0.5, 0.5);
    info!("surface height at origin: {}", surface);

    let expected = ((2 * radius + 1) * (2 * radius + 1)) as usize;
    let deadline = Instant::now() + Duration::from_secs(60);
    loop {
        let rebuilt = world.process_mesh_queue(MESH_REBUILDS_PER_PASS, &FlatTileResolver);
        let done = world.loaded_coords().len() >= expected && world.pending_mesh_count() == 0;
        if done && rebuilt == 0 {
            break;
        }
        if Instant::now() > deadline {
            bail!("pregeneration did not finish within 60s");
        }
        thread::sleep(Duration::from_millis(5));
    }

    let mut total_vertices = 0usize;
    for coord in world.loaded_coords() {
        if let Some(chunk) = world.get_chunk(coord.x, coord.z) {
            if let Some(mesh) = chunk.read().mesh() {
                total_vertices += mesh.vertex_count();
            }
        }
    }
    info!(
        "generated {} chunks ({} generator runs), {} mesh vertices, in {:.2?}",
        world.chunk_count(),
        world.generated_count(),
        total_vertices,
        started.elapsed()
    );

    Ok(())
}
