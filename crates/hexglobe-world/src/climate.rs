//! Latitude climate with orographic rain effects.
//!
//! Temperature and rainfall start from a linear equator-to-pole baseline,
//! are damped on raised terrain, then mountains cast rain shadows downwind
//! and wring extra rain out of the air on their ocean-facing side. A single
//! smoothing pass and a clamp to the valid ranges finish the fields.

use hexglobe_config::ClimateConfig;
use hexglobe_tiles::{Relief, TileArena, TileId};

use crate::geo::{lateral_step, prevailing_wind};

/// Fill `latitude`, `temperature` and `rainfall` on every tile.
pub fn simulate_climate(tiles: &mut TileArena, config: &ClimateConfig, radius: f32) {
    let _span = tracing::info_span!("climate").entered();

    apply_baseline(tiles, config, radius);
    apply_wind(tiles, config);
    smooth(tiles);
    clamp(tiles, config);

    let (mut min_t, mut max_t) = (f32::MAX, f32::MIN);
    let mut rain_total = 0.0;
    for tile in tiles.iter() {
        min_t = min_t.min(tile.temperature);
        max_t = max_t.max(tile.temperature);
        rain_total += tile.rainfall;
    }
    tracing::info!(
        min_temperature = min_t,
        max_temperature = max_t,
        mean_rainfall = rain_total / tiles.len().max(1) as f32,
        "climate simulated"
    );
}

/// Normalized distance from the equatorial plane.
pub fn latitude(y: f32, radius: f32) -> f32 {
    (y.abs() / radius).min(1.0)
}

fn lerp(equator: f32, pole: f32, latitude: f32) -> f32 {
    equator + (pole - equator) * latitude
}

fn apply_baseline(tiles: &mut TileArena, config: &ClimateConfig, radius: f32) {
    for tile in tiles.iter_mut() {
        tile.latitude = latitude(tile.center.y, radius);
        tile.temperature = lerp(
            config.equator_temperature,
            config.pole_temperature,
            tile.latitude,
        );
        tile.rainfall = lerp(config.equator_rainfall, config.pole_rainfall, tile.latitude);

        let attenuation = match tile.relief() {
            Relief::Mountain => config.mountain_attenuation,
            Relief::Highlands => config.highland_attenuation,
            Relief::Ocean | Relief::Lowland => continue,
        };
        tile.rainfall *= attenuation;
        tile.temperature =
            config.min_temperature + (tile.temperature - config.min_temperature) * attenuation;
    }
}

/// Rain shadows and windward boosts, accumulated per tile and applied once
/// every mountain has been processed.
fn apply_wind(tiles: &mut TileArena, config: &ClimateConfig) {
    let steps = config.wind_strength;
    let mut shadow = vec![1.0_f32; tiles.len()];
    let mut boost = vec![0.0_f32; tiles.len()];

    let mountains: Vec<TileId> = tiles
        .iter()
        .filter(|t| t.is_mountain())
        .map(|t| t.id)
        .collect();

    for &mountain in &mountains {
        let downwind = prevailing_wind(
            tiles[mountain].latitude,
            config.hadley_cutoff,
            config.ferrel_cutoff,
        );

        let mut current = mountain;
        for _ in 0..steps {
            let Some(next) = lateral_step(tiles, current, downwind) else {
                break;
            };
            if tiles[next].ocean {
                break;
            }
            if !tiles[next].is_mountain() {
                shadow[next.index()] *= config.rain_shadow_factor;
            }
            current = next;
        }

        let mut path = Vec::with_capacity(steps as usize);
        let mut reached_ocean = false;
        current = mountain;
        for _ in 0..steps {
            let Some(next) = lateral_step(tiles, current, downwind.reverse()) else {
                break;
            };
            if tiles[next].ocean {
                reached_ocean = true;
                break;
            }
            path.push(next);
            current = next;
        }
        if reached_ocean {
            for (distance, id) in path.into_iter().enumerate() {
                let falloff = 1.0 - distance as f32 / steps as f32;
                boost[id.index()] += config.windward_rain_boost * falloff;
            }
        }
    }

    for tile in tiles.iter_mut() {
        let i = tile.id.index();
        tile.rainfall = tile.rainfall * shadow[i] + boost[i];
    }
    tracing::debug!(mountains = mountains.len(), "wind effects applied");
}

/// Average each tile with its direct neighbors, reading the previous values.
fn smooth(tiles: &mut TileArena) {
    let snapshot: Vec<(f32, f32)> = tiles.iter().map(|t| (t.temperature, t.rainfall)).collect();
    for tile in tiles.iter_mut() {
        let (mut temperature, mut rainfall) = snapshot[tile.id.index()];
        for n in &tile.neighbors {
            temperature += snapshot[n.index()].0;
            rainfall += snapshot[n.index()].1;
        }
        let count = (tile.neighbors.len() + 1) as f32;
        tile.temperature = temperature / count;
        tile.rainfall = rainfall / count;
    }
}

fn clamp(tiles: &mut TileArena, config: &ClimateConfig) {
    for tile in tiles.iter_mut() {
        tile.temperature = tile
            .temperature
            .clamp(config.min_temperature, config.max_temperature);
        tile.rainfall = tile.rainfall.clamp(config.min_rainfall, config.max_rainfall);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use hexglobe_tiles::{Tile, build_tiles};

    fn globe() -> TileArena {
        build_tiles(10.0, 3).unwrap()
    }

    #[test]
    fn test_latitude_range() {
        assert_eq!(latitude(0.0, 10.0), 0.0);
        assert_eq!(latitude(-10.0, 10.0), 1.0);
        assert_eq!(latitude(5.0, 10.0), 0.5);
        // Float error on the pole stays within range.
        assert_eq!(latitude(10.0001, 10.0), 1.0);
    }

    #[test]
    fn test_baseline_interpolates() {
        let config = ClimateConfig::default();
        let mut tiles = TileArena::from_tiles(vec![
            Tile::new(TileId(0), Vec3::new(10.0, 0.0, 0.0), vec![]),
            Tile::new(TileId(1), Vec3::new(0.0, 10.0, 0.0), vec![]),
        ]);
        tiles[TileId(0)].ocean = true;
        tiles[TileId(1)].ocean = true;
        apply_baseline(&mut tiles, &config, 10.0);
        assert_eq!(tiles[TileId(0)].temperature, config.equator_temperature);
        assert_eq!(tiles[TileId(0)].rainfall, config.equator_rainfall);
        assert_eq!(tiles[TileId(1)].temperature, config.pole_temperature);
        assert_eq!(tiles[TileId(1)].rainfall, config.pole_rainfall);
    }

    #[test]
    fn test_mountain_attenuation() {
        let config = ClimateConfig::default();
        let mut tiles = TileArena::from_tiles(vec![Tile::new(
            TileId(0),
            Vec3::new(10.0, 0.0, 0.0),
            vec![],
        )]);
        tiles[TileId(0)].fault = true;
        apply_baseline(&mut tiles, &config, 10.0);
        let tile = &tiles[TileId(0)];
        assert_eq!(tile.rainfall, config.equator_rainfall * 0.5);
        let expected = config.min_temperature
            + (config.equator_temperature - config.min_temperature) * 0.5;
        assert!((tile.temperature - expected).abs() < 1e-4);
    }

    #[test]
    fn test_climate_within_ranges() {
        let config = ClimateConfig::default();
        let mut tiles = globe();
        for (i, tile) in tiles.iter_mut().enumerate() {
            tile.ocean = i % 3 == 0;
            tile.fault = i % 5 == 0;
        }
        simulate_climate(&mut tiles, &config, 10.0);
        for tile in &tiles {
            assert!((config.min_temperature..=config.max_temperature).contains(&tile.temperature));
            assert!((config.min_rainfall..=config.max_rainfall).contains(&tile.rainfall));
            assert!((0.0..=1.0).contains(&tile.latitude));
        }
    }

    #[test]
    fn test_rain_shadow_downwind() {
        let config = ClimateConfig {
            windward_rain_boost: 0.0,
            ..Default::default()
        };
        let mut tiles = globe();
        let mountain = tiles
            .iter()
            .filter(|t| t.center.y.abs() < 1.0)
            .map(|t| t.id)
            .next()
            .unwrap();
        tiles[mountain].fault = true;
        apply_baseline(&mut tiles, &config, 10.0);
        let before: Vec<f32> = tiles.iter().map(|t| t.rainfall).collect();
        apply_wind(&mut tiles, &config);

        // Near the equator the trade winds blow west.
        let shadowed = lateral_step(&tiles, mountain, crate::geo::Heading::West).unwrap();
        let i = shadowed.index();
        assert!((tiles[shadowed].rainfall - before[i] * config.rain_shadow_factor).abs() < 1e-3);
        assert_eq!(tiles[mountain].rainfall, before[mountain.index()]);
    }

    #[test]
    fn test_windward_boost_needs_ocean() {
        let config = ClimateConfig {
            rain_shadow_factor: 1.0,
            wind_strength: 3,
            ..Default::default()
        };
        let mut tiles = globe();
        let mountain = tiles
            .iter()
            .filter(|t| t.center.y.abs() < 1.0)
            .map(|t| t.id)
            .next()
            .unwrap();
        tiles[mountain].fault = true;

        // All land: the upwind walk never meets water.
        apply_baseline(&mut tiles, &config, 10.0);
        let before: Vec<f32> = tiles.iter().map(|t| t.rainfall).collect();
        apply_wind(&mut tiles, &config);
        let after: Vec<f32> = tiles.iter().map(|t| t.rainfall).collect();
        assert_eq!(before, after);

        // Water three steps upwind (east of the mountain).
        let one = lateral_step(&tiles, mountain, crate::geo::Heading::East).unwrap();
        let two = lateral_step(&tiles, one, crate::geo::Heading::East).unwrap();
        let three = lateral_step(&tiles, two, crate::geo::Heading::East).unwrap();
        tiles[three].ocean = true;
        apply_baseline(&mut tiles, &config, 10.0);
        let before: Vec<f32> = tiles.iter().map(|t| t.rainfall).collect();
        apply_wind(&mut tiles, &config);
        let boost = config.windward_rain_boost;
        assert!((tiles[one].rainfall - (before[one.index()] + boost)).abs() < 1e-2);
        let falloff = boost * (1.0 - 1.0 / 3.0);
        assert!((tiles[two].rainfall - (before[two.index()] + falloff)).abs() < 1e-2);
    }

    #[test]
    fn test_smoothing_averages_neighbors() {
        let mut tiles = globe();
        for tile in tiles.iter_mut() {
            tile.temperature = 10.0;
            tile.rainfall = 100.0;
        }
        tiles[TileId(0)].rainfall = 700.0;
        smooth(&mut tiles);
        // Tile 0 is a pentagon: (700 + 5 * 100) / 6.
        assert!((tiles[TileId(0)].rainfall - 200.0).abs() < 1e-3);
        let neighbor = tiles.neighbors(TileId(0))[0];
        assert!((tiles[neighbor].rainfall - (600.0 + 700.0) / 7.0).abs() < 1e-3);
        assert!(tiles.iter().all(|t| (t.temperature - 10.0).abs() < 1e-4));
    }
}
