//! Planet generation on top of the hexglobe tiling.
//!
//! Stages run in a fixed order, each reading and updating the shared
//! [`TileArena`](hexglobe_tiles::TileArena):
//!
//! 1. [`partition`]: regions, continents and tectonic plates.
//! 2. [`topology`]: land and ocean, faults, coasts and islands.
//! 3. [`climate`]: latitude baseline plus rain shadows and windward rain.
//! 4. [`biome`]: threshold biomes, mountain ranges, coastal climates.
//! 5. [`drainage`]: distance from the nearest mountain.
//! 6. [`chunk`]: fixed-capacity render buckets.
//!
//! [`World::generate`] runs all of them from a [`Config`](hexglobe_config::Config).

pub mod biome;
pub mod chunk;
pub mod climate;
pub mod drainage;
pub mod geo;
pub mod palette;
pub mod partition;
pub mod topology;

mod error;
mod world;

pub use chunk::{Chunk, ChunkSet};
pub use error::WorldError;
pub use palette::{Focus, Palette, Rgba};
pub use partition::{ClusterLevel, Continent, Hierarchy, Region, TectonicPlate};
pub use topology::TopologySummary;
pub use world::World;
