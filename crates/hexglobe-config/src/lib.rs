//! Configuration system for hexglobe world generation.
//!
//! Every tunable constant of the generation pipeline lives here, persisted to
//! disk as a RON file. Supports CLI overrides via clap, hot-reload detection,
//! forward/backward compatible serialization and up-front validation.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BiomeConfig, BiomeThresholds, ClimateConfig, Config, DebugConfig, HierarchyConfig,
    PlanetConfig, TopologyConfig, expected_tile_count,
};
pub use error::ConfigError;
