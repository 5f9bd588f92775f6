//! World generation errors.

use hexglobe_config::ConfigError;
use hexglobe_tiles::{MeshError, TileId};

use crate::partition::ClusterLevel;

/// Errors that abort world generation.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// Seed count not strictly between zero and the population size.
    #[error("cannot pick {seeds} {level} seeds from {population} candidates")]
    TooManySeeds {
        level: ClusterLevel,
        seeds: usize,
        population: usize,
    },

    /// A tile ended up outside every cluster of a level.
    #[error("tile {tile} was not assigned a {level}")]
    UnassignedTile { tile: TileId, level: ClusterLevel },

    /// Accessor called with an id outside the arena.
    #[error("tile {0} does not exist")]
    UnknownTile(TileId),
}
