use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glam::Vec3;
use hexglobe_config::{CliArgs, Config};
use hexglobe_tiles::TileId;
use hexglobe_world::{Focus, World};

/// Log what the world is made of.
fn report(world: &World) {
    let topology = world.topology();
    tracing::info!(
        seed = world.seed(),
        tiles = world.tiles().len(),
        regions = world.hierarchy().regions.len(),
        continents = world.hierarchy().continents.len(),
        plates = world.hierarchy().plates.len(),
        "world summary"
    );
    tracing::info!(
        land = topology.land_tiles,
        ocean = topology.ocean_tiles,
        faults = topology.fault_tiles,
        islands = topology.islands,
        "topology"
    );

    let total = world.tiles().len().max(1) as f32;
    for (biome, count) in world.biome_histogram() {
        if count > 0 {
            tracing::info!(
                biome = %biome,
                tiles = count,
                percent = (1000.0 * count as f32 / total).round() / 10.0,
                "biome"
            );
        }
    }

    // Chunk streaming order for a camera hovering over the north pole.
    let radius = world.config().planet.radius;
    let viewpoint = Vec3::Y * radius * 2.0;
    let chunks = world.chunks();
    tracing::info!(
        chunks = chunks.len(),
        triangles = chunks.triangle_count(),
        "chunks"
    );
    for chunk in chunks.nearest_first(viewpoint).into_iter().take(3) {
        tracing::info!(
            chunk = chunk.id,
            tiles = chunk.tiles.len(),
            triangles = chunk.triangle_count,
            "near chunk"
        );
    }

    if let Some(tile) = world.tile(TileId(0)) {
        for focus in [Focus::Biome, Focus::Continent, Focus::Temperature] {
            tracing::debug!(
                tile = %tile.id,
                ?focus,
                color = ?world.palette().tile_color(tile, focus),
                "tile color"
            );
        }
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args
        .config
        .clone()
        .or_else(Config::default_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    hexglobe_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));
    tracing::info!(config_dir = %config_dir.display(), "hexglobe starting");

    match World::generate(&config) {
        Ok(world) => {
            report(&world);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "world generation failed");
            ExitCode::FAILURE
        }
    }
}
