//! Per-tile display colors.

use hexglobe_config::ClimateConfig;
use hexglobe_tiles::{Biome, Tile};
use rand::Rng;

use crate::Hierarchy;
use crate::biome::BIOME_VARIATIONS;

/// Linear RGBA.
pub type Rgba = [f32; 4];

/// Which tile attribute a render pass colors by.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Focus {
    #[default]
    Biome,
    Region,
    Continent,
    TectonicPlate,
    Temperature,
    Rainfall,
}

const OCEAN_DEPTH: Rgba = [0.0, 0.0, 0.25, 1.0];

fn base_color(biome: Biome) -> Rgba {
    match biome {
        Biome::Ocean => OCEAN_DEPTH,
        Biome::Mountain => [1.0, 1.0, 1.0, 1.0],
        Biome::Highlands => [0.6, 0.6, 0.6, 1.0],
        Biome::Desert => [0.9, 0.88, 0.64, 1.0],
        Biome::Steppe => [0.82, 0.69, 0.35, 1.0],
        Biome::Savanna => [0.6, 0.87, 0.17, 1.0],
        Biome::DryForest => [0.41, 0.65, 0.04, 1.0],
        Biome::BroadleafForest => [0.05, 0.73, 0.28, 1.0],
        Biome::Rainforest => [0.18, 0.7, 0.44, 1.0],
        Biome::Tundra => [0.77, 0.91, 0.91, 1.0],
        Biome::Taiga => [0.09, 0.57, 0.57, 1.0],
        Biome::Mediterranean => [1.0, 0.85, 0.0, 1.0],
        Biome::Oceanic => [0.0, 1.0, 0.7, 1.0],
    }
}

/// Slot of a biome variant in the biome table.
///
/// Ocean owns slot 0; every other biome owns [`BIOME_VARIATIONS`]
/// consecutive slots after it.
pub fn biome_slot(biome: Biome, variation: u8) -> usize {
    if biome == Biome::Ocean {
        return 0;
    }
    let variants = BIOME_VARIATIONS as usize;
    (biome as usize - 1) * variants + 1 + (variation as usize).min(variants - 1)
}

/// Color tables built once per world.
#[derive(Clone, Debug)]
pub struct Palette {
    biomes: Vec<Rgba>,
    regions: Vec<Rgba>,
    continents: Vec<Rgba>,
    plates: Vec<Rgba>,
    temperature_range: (f32, f32),
    rainfall_range: (f32, f32),
}

fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgba {
    [
        rng.random_range(0.0..1.0),
        rng.random_range(0.0..1.0),
        rng.random_range(0.0..1.0),
        1.0,
    ]
}

fn lerp_color(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
}

impl Palette {
    pub fn new<R: Rng + ?Sized>(hierarchy: &Hierarchy, climate: &ClimateConfig, rng: &mut R) -> Self {
        let mut biomes = Vec::with_capacity(1 + (Biome::ALL.len() - 1) * BIOME_VARIATIONS as usize);
        biomes.push(OCEAN_DEPTH);
        for biome in Biome::ALL.into_iter().skip(1) {
            let base = base_color(biome);
            for _ in 0..BIOME_VARIATIONS {
                // Darken each channel by 0.11..=0.20.
                let mut shade = [0.0; 4];
                for channel in shade.iter_mut().take(3) {
                    *channel = rng.random_range(0..10) as f32 / 100.0 - 0.2;
                }
                biomes.push(std::array::from_fn(|i| (base[i] + shade[i]).clamp(0.0, 1.0)));
            }
        }

        Self {
            biomes,
            regions: hierarchy.regions.iter().map(|_| random_color(rng)).collect(),
            continents: hierarchy.continents.iter().map(|_| random_color(rng)).collect(),
            plates: hierarchy.plates.iter().map(|_| random_color(rng)).collect(),
            temperature_range: (climate.min_temperature, climate.max_temperature),
            rainfall_range: (climate.min_rainfall, climate.max_rainfall),
        }
    }

    pub fn biome_color(&self, biome: Biome, variation: u8) -> Rgba {
        self.biomes[biome_slot(biome, variation)]
    }

    /// Color of `tile` under `focus`.
    pub fn tile_color(&self, tile: &Tile, focus: Focus) -> Rgba {
        let cluster = |table: &[Rgba], index: u32| {
            table.get(index as usize).copied().unwrap_or(OCEAN_DEPTH)
        };
        match focus {
            Focus::Biome => self.biome_color(tile.biome, tile.biome_variation),
            Focus::Region => cluster(&self.regions[..], tile.region),
            Focus::Continent => cluster(&self.continents[..], tile.continent),
            Focus::TectonicPlate => cluster(&self.plates[..], tile.tectonic_plate),
            Focus::Temperature => {
                let (min, max) = self.temperature_range;
                let t = (tile.temperature - min) / (max - min);
                lerp_color([0.1, 0.2, 0.9, 1.0], [0.9, 0.15, 0.1, 1.0], t)
            }
            Focus::Rainfall => {
                let (min, max) = self.rainfall_range;
                let t = (tile.rainfall - min) / (max - min);
                lerp_color([0.75, 0.6, 0.35, 1.0], [0.1, 0.35, 0.85, 1.0], t)
            }
        }
    }
}
