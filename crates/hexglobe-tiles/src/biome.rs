//! Biome kinds assigned to tiles.

use std::fmt;

/// Biome of a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Biome {
    Ocean,
    Mountain,
    Highlands,
    Desert,
    Steppe,
    Savanna,
    DryForest,
    BroadleafForest,
    Rainforest,
    Tundra,
    Taiga,
    /// Dry-summer coast on the leeward side of a westerly or trade wind.
    Mediterranean,
    /// Wet coast facing the prevailing wind.
    Oceanic,
}

impl Biome {
    /// Every biome, in declaration order.
    pub const ALL: [Biome; 13] = [
        Biome::Ocean,
        Biome::Mountain,
        Biome::Highlands,
        Biome::Desert,
        Biome::Steppe,
        Biome::Savanna,
        Biome::DryForest,
        Biome::BroadleafForest,
        Biome::Rainforest,
        Biome::Tundra,
        Biome::Taiga,
        Biome::Mediterranean,
        Biome::Oceanic,
    ];

    /// Snake-case name used in logs and summaries.
    pub fn name(self) -> &'static str {
        match self {
            Biome::Ocean => "ocean",
            Biome::Mountain => "mountain",
            Biome::Highlands => "highlands",
            Biome::Desert => "desert",
            Biome::Steppe => "steppe",
            Biome::Savanna => "savanna",
            Biome::DryForest => "dry_forest",
            Biome::BroadleafForest => "broadleaf_forest",
            Biome::Rainforest => "rainforest",
            Biome::Tundra => "tundra",
            Biome::Taiga => "taiga",
            Biome::Mediterranean => "mediterranean",
            Biome::Oceanic => "oceanic",
        }
    }

    /// Biomes fixed by relief rather than climate.
    pub fn is_relief(self) -> bool {
        matches!(self, Biome::Ocean | Biome::Mountain | Biome::Highlands)
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
