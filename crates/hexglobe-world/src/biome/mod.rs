//! Biome assignment.
//!
//! Relief decides ocean, mountain and highland tiles; every other tile gets a
//! climate biome from [`classify`]. Mountain ranges are then grown, coasts
//! get their oceanic or mediterranean character, and boundaries are
//! roughened.

mod classify;
mod coastal;
mod spread;

pub use classify::classify;
pub use coastal::{assign_coastal_climates, count_water};
pub use spread::{roughen_biomes, spread_mountains};

use hexglobe_config::{BiomeConfig, ClimateConfig};
use hexglobe_tiles::{Biome, Relief, TileArena};
use rand::Rng;

/// Number of cosmetic variants per biome.
pub const BIOME_VARIATIONS: u8 = 5;

/// Assign `biome` and `biome_variation` to every tile.
pub fn assign_biomes<R: Rng + ?Sized>(
    tiles: &mut TileArena,
    config: &BiomeConfig,
    climate: &ClimateConfig,
    rng: &mut R,
) {
    let _span = tracing::info_span!("biomes").entered();

    for tile in tiles.iter_mut() {
        tile.biome = match tile.relief() {
            Relief::Ocean => Biome::Ocean,
            Relief::Highlands => Biome::Highlands,
            Relief::Mountain => Biome::Mountain,
            Relief::Lowland => classify(tile.temperature, tile.rainfall, &config.thresholds),
        };
        tile.biome_variation = if tile.ocean {
            0
        } else {
            rng.random_range(0..BIOME_VARIATIONS)
        };
    }

    for _ in 0..config.mountain_spreading_iterations {
        spread_mountains(tiles, config.mountain_spread_chance, rng);
    }
    assign_coastal_climates(tiles, config, climate);
    for _ in 0..config.biome_roughing_iterations {
        roughen_biomes(tiles, config.biome_roughing_chance, rng);
    }

    tracing::info!(
        land = tiles.iter().filter(|t| !t.ocean).count(),
        mountains = tiles.iter().filter(|t| t.biome == Biome::Mountain).count(),
        "biomes assigned"
    );
}
