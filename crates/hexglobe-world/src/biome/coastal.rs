//! Oceanic and mediterranean coasts.
//!
//! A coast facing the prevailing wind across open water turns oceanic and
//! wetter; a coast with its water on the lee side turns mediterranean and
//! drier. Both then creep inland with a shrinking rainfall adjustment.

use hexglobe_config::{BiomeConfig, ClimateConfig};
use hexglobe_tiles::{Biome, Tile, TileArena, TileId};

use crate::geo::{Heading, lateral_step, prevailing_wind};

fn is_coastal(biome: Biome) -> bool {
    matches!(biome, Biome::Oceanic | Biome::Mediterranean)
}

/// Land tile with a climate biome inside the coastal latitude band.
fn in_band(tile: &Tile, climate: &ClimateConfig, config: &BiomeConfig) -> bool {
    !tile.ocean
        && !tile.biome.is_relief()
        && tile.latitude >= climate.hadley_cutoff
        && tile.latitude < config.coastal_max_latitude
}

/// Ocean tiles met while walking `distance` steps from `from`.
pub fn count_water(tiles: &TileArena, from: TileId, heading: Heading, distance: u32) -> usize {
    let mut current = from;
    let mut water = 0;
    for _ in 0..distance {
        let Some(next) = lateral_step(tiles, current, heading) else {
            break;
        };
        if tiles[next].ocean {
            water += 1;
        }
        current = next;
    }
    water
}

/// Coastal biome for an eligible tile, or `None` when both sides hold the
/// same amount of water.
fn coastal_biome(
    tiles: &TileArena,
    tile: &Tile,
    climate: &ClimateConfig,
    config: &BiomeConfig,
) -> Option<Biome> {
    let wind = prevailing_wind(tile.latitude, climate.hadley_cutoff, climate.ferrel_cutoff);
    // Air arrives from the side opposite the wind direction.
    let windward = count_water(tiles, tile.id, wind.reverse(), config.water_search_distance);
    let leeward = count_water(tiles, tile.id, wind, config.water_search_distance);

    match windward.cmp(&leeward) {
        std::cmp::Ordering::Greater => Some(Biome::Oceanic),
        std::cmp::Ordering::Less => Some(Biome::Mediterranean),
        std::cmp::Ordering::Equal => None,
    }
}

fn shift_rainfall(tile: &mut Tile, biome: Biome, amount: f32, climate: &ClimateConfig) {
    let signed = if biome == Biome::Oceanic {
        amount
    } else {
        -amount
    };
    tile.rainfall = (tile.rainfall + signed).clamp(climate.min_rainfall, climate.max_rainfall);
}

/// Classify coasts, then spread the coastal biomes inland.
pub fn assign_coastal_climates(tiles: &mut TileArena, config: &BiomeConfig, climate: &ClimateConfig) {
    let decisions: Vec<(TileId, Biome)> = tiles
        .iter()
        .filter(|t| t.ocean_neighbor && in_band(t, climate, config))
        .filter_map(|t| coastal_biome(tiles, t, climate, config).map(|b| (t.id, b)))
        .collect();

    for &(id, biome) in &decisions {
        let tile = &mut tiles[id];
        tile.biome = biome;
        shift_rainfall(tile, biome, config.coastal_rain_shift, climate);
    }

    let mut shift = config.coastal_rain_shift;
    let mut spread = 0;
    for _ in 0..config.coastal_biome_spreading_iterations {
        shift *= config.coastal_spread_decay;
        spread += spread_inland(tiles, shift, config, climate);
    }

    tracing::debug!(coasts = decisions.len(), spread, "coastal climates assigned");
}

/// One inland step: each eligible non-coastal tile takes the biome of its
/// first coastal neighbor in the snapshot.
fn spread_inland(
    tiles: &mut TileArena,
    shift: f32,
    config: &BiomeConfig,
    climate: &ClimateConfig,
) -> usize {
    let snapshot: Vec<Biome> = tiles.iter().map(|t| t.biome).collect();
    let changes: Vec<(TileId, Biome)> = tiles
        .iter()
        .filter(|t| !is_coastal(t.biome) && in_band(t, climate, config))
        .filter_map(|t| {
            t.neighbors
                .iter()
                .map(|n| snapshot[n.index()])
                .find(|&b| is_coastal(b))
                .map(|b| (t.id, b))
        })
        .collect();

    for &(id, biome) in &changes {
        let tile = &mut tiles[id];
        tile.biome = biome;
        shift_rainfall(tile, biome, shift, climate);
    }
    changes.len()
}
