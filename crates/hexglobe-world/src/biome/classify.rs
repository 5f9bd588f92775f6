//! Threshold table from (temperature, rainfall) to a climate biome.

use hexglobe_config::BiomeThresholds;
use hexglobe_tiles::Biome;

/// Climate biome for a lowland tile. First matching rule wins.
///
/// | Rule                                   | Biome            |
/// |----------------------------------------|------------------|
/// | temperature < tundra                   | Tundra           |
/// | temperature < taiga, rainfall < desert | Tundra           |
/// | temperature < taiga                    | Taiga            |
/// | rainfall < desert                      | Desert           |
/// | rainfall < steppe                      | Savanna if hot, else Steppe |
/// | rainfall < forest                      | DryForest if hot, else BroadleafForest |
/// | hot, rainfall >= rainforest            | Rainforest       |
/// | otherwise                              | BroadleafForest  |
pub fn classify(temperature: f32, rainfall: f32, thresholds: &BiomeThresholds) -> Biome {
    let hot = temperature >= thresholds.hot_temperature;

    if temperature < thresholds.tundra_temperature {
        Biome::Tundra
    } else if temperature < thresholds.taiga_temperature {
        if rainfall < thresholds.desert_rainfall {
            Biome::Tundra
        } else {
            Biome::Taiga
        }
    } else if rainfall < thresholds.desert_rainfall {
        Biome::Desert
    } else if rainfall < thresholds.steppe_rainfall {
        if hot { Biome::Savanna } else { Biome::Steppe }
    } else if rainfall < thresholds.forest_rainfall {
        if hot {
            Biome::DryForest
        } else {
            Biome::BroadleafForest
        }
    } else if hot && rainfall >= thresholds.rainforest_rainfall {
        Biome::Rainforest
    } else {
        Biome::BroadleafForest
    }
}
