//! Command-line argument parsing for hexglobe tools.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// hexglobe command-line arguments.
///
/// CLI values override settings loaded from `hexglobe.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "hexglobe", about = "Hex-tiled planet generator")]
pub struct CliArgs {
    /// Icosphere subdivision depth.
    #[arg(long)]
    pub subdivisions: Option<u32>,

    /// Sphere radius.
    #[arg(long)]
    pub radius: Option<f32>,

    /// Generation seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of regions.
    #[arg(long)]
    pub regions: Option<u32>,

    /// Number of continents.
    #[arg(long)]
    pub continents: Option<u32>,

    /// Number of tectonic plates.
    #[arg(long)]
    pub plates: Option<u32>,

    /// Maximum tiles per render chunk.
    #[arg(long)]
    pub chunk_capacity: Option<u32>,

    /// Scale every count from a single world size (applied before other overrides).
    #[arg(long)]
    pub world_size: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(size) = args.world_size {
            let scaled = Config::for_world_size(size);
            self.planet.subdivisions = scaled.planet.subdivisions;
            self.hierarchy.region_count = scaled.hierarchy.region_count;
            self.hierarchy.continent_count = scaled.hierarchy.continent_count;
            self.hierarchy.tectonic_plate_count = scaled.hierarchy.tectonic_plate_count;
            self.biome.mountain_spreading_iterations = scaled.biome.mountain_spreading_iterations;
            self.biome.coastal_biome_spreading_iterations =
                scaled.biome.coastal_biome_spreading_iterations;
        }
        if let Some(n) = args.subdivisions {
            self.planet.subdivisions = n;
        }
        if let Some(r) = args.radius {
            self.planet.radius = r;
        }
        if let Some(seed) = args.seed {
            self.planet.seed = Some(seed);
        }
        if let Some(n) = args.regions {
            self.hierarchy.region_count = n;
        }
        if let Some(n) = args.continents {
            self.hierarchy.continent_count = n;
        }
        if let Some(n) = args.plates {
            self.hierarchy.tectonic_plate_count = n;
        }
        if let Some(n) = args.chunk_capacity {
            self.hierarchy.chunk_capacity = n;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            subdivisions: Some(3),
            seed: Some(99),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.planet.subdivisions, 3);
        assert_eq!(config.planet.seed, Some(99));
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.planet.radius, 100.0);
        assert_eq!(config.hierarchy.region_count, 600);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_world_size_then_explicit_override() {
        let mut config = Config::default();
        let args = CliArgs {
            world_size: Some(3),
            plates: Some(4),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.planet.subdivisions, 3);
        assert_eq!(config.hierarchy.region_count, 300);
        assert_eq!(config.hierarchy.tectonic_plate_count, 4);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from(["hexglobe", "--seed", "5", "--regions", "40"]);
        assert_eq!(args.seed, Some(5));
        assert_eq!(args.regions, Some(40));
        assert!(args.config.is_none());
    }
}
