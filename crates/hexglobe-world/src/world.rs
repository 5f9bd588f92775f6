//! The generation pipeline and the finished world.

use std::num::NonZeroU32;

use hexglobe_config::{Config, ConfigError};
use hexglobe_tiles::{Biome, Tile, TileArena, TileId, build_tiles, validate};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::biome::assign_biomes;
use crate::chunk::ChunkSet;
use crate::climate::simulate_climate;
use crate::drainage::compute_mountain_distance;
use crate::palette::Palette;
use crate::partition::{Hierarchy, partition};
use crate::topology::{TopologySummary, generate_topology};
use crate::WorldError;

/// A fully generated planet.
#[derive(Clone, Debug)]
pub struct World {
    config: Config,
    seed: u64,
    tiles: TileArena,
    hierarchy: Hierarchy,
    chunks: ChunkSet,
    palette: Palette,
    topology: TopologySummary,
}

impl World {
    /// Run every generation stage for `config`.
    ///
    /// All randomness comes from one ChaCha8 stream seeded from
    /// `config.planet.seed`, so equal configs give equal worlds. Without a
    /// configured seed one is drawn and logged.
    pub fn generate(config: &Config) -> Result<Self, WorldError> {
        config.validate()?;

        let seed = config.planet.seed.unwrap_or_else(|| {
            let seed = rand::random::<u64>();
            tracing::info!(seed, "no seed configured, drew one");
            seed
        });
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let planet = &config.planet;
        let _span = tracing::info_span!(
            "generate_world",
            seed,
            subdivisions = planet.subdivisions
        )
        .entered();

        let mut tiles = build_tiles(planet.radius, planet.subdivisions)?;
        if config.debug.strict_rings {
            validate::check_rings(&tiles)?;
        } else {
            let broken = validate::broken_rings(&tiles);
            if !broken.is_empty() {
                tracing::warn!(
                    count = broken.len(),
                    first = %broken[0],
                    "neighbor rings are not closed walks"
                );
            }
        }
        tracing::info!(tiles = tiles.len(), "tiles built");

        let mut hierarchy = partition(&mut tiles, &config.hierarchy, &mut rng)?;
        let topology = generate_topology(&mut tiles, &mut hierarchy, &config.topology, &mut rng);
        simulate_climate(&mut tiles, &config.climate, planet.radius);
        assign_biomes(&mut tiles, &config.biome, &config.climate, &mut rng);
        compute_mountain_distance(&mut tiles);

        let capacity = NonZeroU32::new(config.hierarchy.chunk_capacity).ok_or_else(|| {
            ConfigError::InvalidValue {
                field: "hierarchy.chunk_capacity",
                reason: "must be at least 1".to_string(),
            }
        })?;
        let chunks = ChunkSet::build(&mut tiles, &hierarchy, capacity, planet.radius);
        let palette = Palette::new(&hierarchy, &config.climate, &mut rng);

        tracing::info!(
            tiles = tiles.len(),
            chunks = chunks.len(),
            triangles = chunks.triangle_count(),
            "world generated"
        );

        Ok(Self {
            config: config.clone(),
            seed,
            tiles,
            hierarchy,
            chunks,
            palette,
            topology,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Seed the world was generated from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tiles(&self) -> &TileArena {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn chunks(&self) -> &ChunkSet {
        &self.chunks
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn topology(&self) -> TopologySummary {
        self.topology
    }

    /// Tile count per biome, in [`Biome::ALL`] order.
    pub fn biome_histogram(&self) -> Vec<(Biome, usize)> {
        let mut counts = [0usize; Biome::ALL.len()];
        for tile in &self.tiles {
            counts[tile.biome as usize] += 1;
        }
        Biome::ALL.into_iter().zip(counts).collect()
    }

    // -----------------------------------------------------------------------
    // Demographic accessors
    // -----------------------------------------------------------------------

    fn tile_mut(&mut self, id: TileId) -> Result<&mut Tile, WorldError> {
        if id.index() < self.tiles.len() {
            Ok(&mut self.tiles[id])
        } else {
            Err(WorldError::UnknownTile(id))
        }
    }

    pub fn population(&self, id: TileId) -> Option<u32> {
        self.tile(id).map(|t| t.population)
    }

    pub fn set_population(&mut self, id: TileId, population: u32) -> Result<(), WorldError> {
        self.tile_mut(id)?.population = population;
        Ok(())
    }

    pub fn population_id(&self, id: TileId) -> Option<u32> {
        self.tile(id).and_then(|t| t.population_id)
    }

    pub fn set_population_id(
        &mut self,
        id: TileId,
        population_id: Option<u32>,
    ) -> Result<(), WorldError> {
        self.tile_mut(id)?.population_id = population_id;
        Ok(())
    }

    pub fn language_id(&self, id: TileId) -> Option<u32> {
        self.tile(id).and_then(|t| t.language_id)
    }

    pub fn set_language_id(
        &mut self,
        id: TileId,
        language_id: Option<u32>,
    ) -> Result<(), WorldError> {
        self.tile_mut(id)?.language_id = language_id;
        Ok(())
    }
}
