//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name used inside the config directory.
const CONFIG_FILE: &str = "hexglobe.ron";

/// Top-level world generation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Sphere and subdivision settings.
    pub planet: PlanetConfig,
    /// Region / continent / plate clustering and chunking.
    pub hierarchy: HierarchyConfig,
    /// Ocean, coastline and fault settings.
    pub topology: TopologyConfig,
    /// Temperature, rainfall and wind settings.
    pub climate: ClimateConfig,
    /// Biome classification settings.
    pub biome: BiomeConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Planet geometry and seeding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Number of 1-to-4 subdivision passes applied to the icosahedron.
    pub subdivisions: u32,
    /// Sphere radius in world units.
    pub radius: f32,
    /// Generation seed. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
}

/// Hierarchical clustering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Number of region seeds picked among tiles.
    pub region_count: u32,
    /// Number of continent seeds picked among regions.
    pub continent_count: u32,
    /// Number of tectonic plate seeds picked among continents.
    pub tectonic_plate_count: u32,
    /// Maximum number of tiles per render chunk.
    pub chunk_capacity: u32,
}

/// Ocean/land and coastline configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TopologyConfig {
    /// Number of stochastic coastline roughening passes.
    pub coast_roughing_iterations: u32,
    /// A continent is ocean when its 1..=100 draw exceeds this value.
    pub ocean_threshold: u32,
    /// Land masses of at most this many tiles are flagged as islands.
    pub island_max_tiles: u32,
}

/// Climate model configuration.
///
/// Latitudes are normalized: `0.0` at the equator, `1.0` at either pole.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClimateConfig {
    /// Poleward edge of the Hadley cell (trade winds).
    pub hadley_cutoff: f32,
    /// Poleward edge of the Ferrel cell (westerlies).
    pub ferrel_cutoff: f32,
    /// Number of lateral steps a wind walk travels from a mountain.
    pub wind_strength: u32,
    /// Lowest valid temperature (°C).
    pub min_temperature: f32,
    /// Highest valid temperature (°C).
    pub max_temperature: f32,
    /// Baseline temperature at the equator (°C).
    pub equator_temperature: f32,
    /// Baseline temperature at the poles (°C).
    pub pole_temperature: f32,
    /// Lowest valid rainfall (mm/year).
    pub min_rainfall: f32,
    /// Highest valid rainfall (mm/year).
    pub max_rainfall: f32,
    /// Baseline rainfall at the equator (mm/year).
    pub equator_rainfall: f32,
    /// Baseline rainfall at the poles (mm/year).
    pub pole_rainfall: f32,
    /// Climate attenuation factor on mountain tiles.
    pub mountain_attenuation: f32,
    /// Climate attenuation factor on highland tiles.
    pub highland_attenuation: f32,
    /// Rainfall multiplier applied per rain-shadowed step.
    pub rain_shadow_factor: f32,
    /// Rainfall added next to a mountain on a windward slope that reaches the sea.
    pub windward_rain_boost: f32,
}

/// Thresholds of the (temperature, rainfall) biome lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BiomeThresholds {
    /// Below this temperature land is always tundra.
    pub tundra_temperature: f32,
    /// Below this temperature land is taiga (or tundra when dry).
    pub taiga_temperature: f32,
    /// At or above this temperature the hot-climate biomes apply.
    pub hot_temperature: f32,
    /// Below this rainfall land is desert.
    pub desert_rainfall: f32,
    /// Below this rainfall land is steppe or savanna.
    pub steppe_rainfall: f32,
    /// Below this rainfall land is dry or broadleaf forest.
    pub forest_rainfall: f32,
    /// Hot land at or above this rainfall is rainforest.
    pub rainforest_rainfall: f32,
}

/// Biome classifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BiomeConfig {
    /// Number of mountain/highland spreading passes.
    pub mountain_spreading_iterations: u32,
    /// Probability that an eligible neighbor joins a mountain range per pass.
    pub mountain_spread_chance: f64,
    /// Steps walked east and west when searching for open water.
    pub water_search_distance: u32,
    /// Coastal climates only form below this latitude.
    pub coastal_max_latitude: f32,
    /// Number of inward spreading passes of the coastal climates.
    pub coastal_biome_spreading_iterations: u32,
    /// Rainfall added (oceanic) or removed (mediterranean) on the coast.
    pub coastal_rain_shift: f32,
    /// Multiplier applied to the rainfall shift per inward pass.
    pub coastal_spread_decay: f32,
    /// Number of boundary roughening passes.
    pub biome_roughing_iterations: u32,
    /// Probability that an eligible tile adopts a neighbor's biome per pass.
    pub biome_roughing_chance: f64,
    /// Threshold lookup table.
    pub thresholds: BiomeThresholds,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Fail generation when a neighbor ring is not a closed boundary walk.
    pub strict_rings: bool,
}

// --- Default implementations ---

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            subdivisions: 6,
            radius: 100.0,
            seed: None,
        }
    }
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            region_count: 600,
            continent_count: 120,
            tectonic_plate_count: 12,
            chunk_capacity: 300,
        }
    }
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            coast_roughing_iterations: 30,
            ocean_threshold: 50,
            island_max_tiles: 24,
        }
    }
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            hadley_cutoff: 0.3,
            ferrel_cutoff: 0.6,
            wind_strength: 10,
            min_temperature: -25.0,
            max_temperature: 30.0,
            equator_temperature: 30.0,
            pole_temperature: -25.0,
            min_rainfall: 0.0,
            max_rainfall: 5000.0,
            equator_rainfall: 2400.0,
            pole_rainfall: 200.0,
            mountain_attenuation: 0.5,
            highland_attenuation: 0.9,
            rain_shadow_factor: 0.5,
            windward_rain_boost: 800.0,
        }
    }
}

impl Default for BiomeThresholds {
    fn default() -> Self {
        Self {
            tundra_temperature: -10.0,
            taiga_temperature: 0.0,
            hot_temperature: 20.0,
            desert_rainfall: 250.0,
            steppe_rainfall: 600.0,
            forest_rainfall: 1200.0,
            rainforest_rainfall: 2000.0,
        }
    }
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self {
            mountain_spreading_iterations: 3,
            mountain_spread_chance: 0.25,
            water_search_distance: 10,
            coastal_max_latitude: 0.75,
            coastal_biome_spreading_iterations: 3,
            coastal_rain_shift: 400.0,
            coastal_spread_decay: 0.5,
            biome_roughing_iterations: 5,
            biome_roughing_chance: 0.15,
            thresholds: BiomeThresholds::default(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            strict_rings: false,
        }
    }
}

/// Number of tiles produced by `subdivisions` passes: `V + F = 30 * 4^n + 2`.
pub fn expected_tile_count(subdivisions: u32) -> usize {
    30 * 4usize.pow(subdivisions) + 2
}

impl Config {
    /// Classic scaling of every count with a single "world size" knob.
    ///
    /// World size doubles as the subdivision depth.
    pub fn for_world_size(world_size: u32) -> Self {
        let mut config = Self::default();
        config.planet.subdivisions = world_size;
        config.hierarchy.region_count = 100 * world_size;
        config.hierarchy.continent_count = 20 * world_size;
        config.hierarchy.tectonic_plate_count = 2 * world_size;
        config.biome.mountain_spreading_iterations = world_size.saturating_sub(3);
        config.biome.coastal_biome_spreading_iterations = world_size.saturating_sub(3);
        config
    }

    /// Default config directory (`<platform config dir>/hexglobe`).
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hexglobe"))
    }

    /// Reject configurations that cannot produce a consistent world.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let planet = &self.planet;
        if planet.subdivisions > 10 {
            return invalid("planet.subdivisions", format!("{} exceeds 10", planet.subdivisions));
        }
        if !(planet.radius.is_finite() && planet.radius > 0.0) {
            return invalid("planet.radius", format!("{} is not a positive number", planet.radius));
        }

        let tiles = expected_tile_count(planet.subdivisions);
        let h = &self.hierarchy;
        check_seeds("hierarchy.region_count", h.region_count, tiles, "tiles")?;
        check_seeds(
            "hierarchy.continent_count",
            h.continent_count,
            h.region_count as usize,
            "regions",
        )?;
        check_seeds(
            "hierarchy.tectonic_plate_count",
            h.tectonic_plate_count,
            h.continent_count as usize,
            "continents",
        )?;
        if h.chunk_capacity == 0 {
            return invalid("hierarchy.chunk_capacity", "must be at least 1".to_string());
        }

        if self.topology.ocean_threshold > 100 {
            return invalid(
                "topology.ocean_threshold",
                format!("{} exceeds 100", self.topology.ocean_threshold),
            );
        }

        let c = &self.climate;
        check_unit("climate.hadley_cutoff", c.hadley_cutoff)?;
        check_unit("climate.ferrel_cutoff", c.ferrel_cutoff)?;
        if c.ferrel_cutoff < c.hadley_cutoff {
            return invalid(
                "climate.ferrel_cutoff",
                format!("{} is below hadley_cutoff {}", c.ferrel_cutoff, c.hadley_cutoff),
            );
        }
        check_range(
            "climate.temperature",
            c.min_temperature,
            c.max_temperature,
            &[c.equator_temperature, c.pole_temperature],
        )?;
        check_range(
            "climate.rainfall",
            c.min_rainfall,
            c.max_rainfall,
            &[c.equator_rainfall, c.pole_rainfall],
        )?;
        if c.min_rainfall < 0.0 {
            return invalid("climate.min_rainfall", "must not be negative".to_string());
        }
        check_unit("climate.mountain_attenuation", c.mountain_attenuation)?;
        check_unit("climate.highland_attenuation", c.highland_attenuation)?;
        check_unit("climate.rain_shadow_factor", c.rain_shadow_factor)?;

        let b = &self.biome;
        check_chance("biome.mountain_spread_chance", b.mountain_spread_chance)?;
        check_chance("biome.biome_roughing_chance", b.biome_roughing_chance)?;
        check_unit("biome.coastal_max_latitude", b.coastal_max_latitude)?;
        check_unit("biome.coastal_spread_decay", b.coastal_spread_decay)?;

        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> Result<(), ConfigError> {
    Err(ConfigError::InvalidValue { field, reason })
}

fn check_seeds(
    field: &'static str,
    seeds: u32,
    population: usize,
    what: &str,
) -> Result<(), ConfigError> {
    if seeds == 0 {
        return invalid(field, "must be at least 1".to_string());
    }
    if seeds as usize >= population {
        return invalid(
            field,
            format!("{seeds} seeds for only {population} {what}; must be smaller"),
        );
    }
    Ok(())
}

fn check_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return invalid(field, format!("{value} is outside [0, 1]"));
    }
    Ok(())
}

fn check_chance(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return invalid(field, format!("{value} is not a probability"));
    }
    Ok(())
}

fn check_range(field: &'static str, min: f32, max: f32, inside: &[f32]) -> Result<(), ConfigError> {
    if !(min.is_finite() && max.is_finite() && min < max) {
        return invalid(field, format!("range [{min}, {max}] is empty"));
    }
    if let Some(v) = inside.iter().find(|v| !(min..=max).contains(*v)) {
        return invalid(field, format!("{v} lies outside [{min}, {max}]"));
    }
    Ok(())
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `hexglobe.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("subdivisions: 6"));
        assert!(ron_str.contains("region_count: 600"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.planet.seed = Some(7);
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let ron_str = "(planet: (subdivisions: 2), hierarchy: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.planet.subdivisions, 2);
        assert_eq!(config.planet.radius, 100.0);
        assert_eq!(config.climate, ClimateConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.planet.subdivisions = 3;
        config.hierarchy.region_count = 50;
        config.debug.log_level = "debug".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let created = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(created, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.climate.wind_strength = 4;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().climate.wind_strength, 4);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_expected_tile_count() {
        assert_eq!(expected_tile_count(0), 32);
        assert_eq!(expected_tile_count(1), 122);
        assert_eq!(expected_tile_count(2), 482);
    }

    #[test]
    fn test_default_config_is_valid() {
        Config::default().validate().unwrap();
        Config::for_world_size(2).validate().unwrap();
    }

    #[test]
    fn test_world_size_scaling() {
        let config = Config::for_world_size(4);
        assert_eq!(config.planet.subdivisions, 4);
        assert_eq!(config.hierarchy.region_count, 400);
        assert_eq!(config.hierarchy.continent_count, 80);
        assert_eq!(config.hierarchy.tectonic_plate_count, 8);
        assert_eq!(config.biome.mountain_spreading_iterations, 1);
        assert_eq!(Config::for_world_size(2).biome.coastal_biome_spreading_iterations, 0);
    }

    #[test]
    fn test_more_regions_than_tiles_rejected() {
        let mut config = Config::default();
        config.planet.subdivisions = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field: "hierarchy.region_count", .. }
        ));
    }

    #[test]
    fn test_seed_count_must_be_smaller_than_population() {
        let mut config = Config::default();
        config.hierarchy.continent_count = config.hierarchy.region_count;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.hierarchy.tectonic_plate_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_chunk_capacity_rejected() {
        let mut config = Config::default();
        config.hierarchy.chunk_capacity = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("chunk_capacity"));
    }

    #[test]
    fn test_inverted_cutoffs_rejected() {
        let mut config = Config::default();
        config.climate.hadley_cutoff = 0.7;
        config.climate.ferrel_cutoff = 0.4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_baseline_outside_range_rejected() {
        let mut config = Config::default();
        config.climate.pole_temperature = -40.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { field: "climate.temperature", .. }
        ));
    }
}
