//! Tiles and the arena that owns them.

use std::fmt;
use std::ops::{Index, IndexMut};

use glam::Vec3;

use crate::Biome;

/// Sentinel for cluster and chunk indices that have not been assigned yet.
pub const UNASSIGNED: u32 = u32::MAX;

/// Index of a tile in its [`TileArena`].
///
/// Vertex-derived tiles occupy `0..V`, face-derived tiles `V..V+F`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl TileId {
    /// Position in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Elevation class of a tile, derived from its topology flags.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Relief {
    Ocean,
    Mountain,
    Highlands,
    Lowland,
}

/// One cell of the spherical tiling.
///
/// Geometry and adjacency are fixed once the arena is built; the remaining
/// fields are filled in by the world generation stages.
#[derive(Clone, Debug)]
pub struct Tile {
    pub id: TileId,
    /// Position on the sphere surface (length equals the sphere radius).
    pub center: Vec3,
    /// Adjacent tiles, ordered as a cyclic walk around the boundary once
    /// [`order_neighbors`](crate::order_neighbors) has run.
    pub neighbors: Vec<TileId>,

    pub region: u32,
    pub continent: u32,
    pub tectonic_plate: u32,
    /// Render chunk holding this tile.
    pub chunk: u32,
    /// Position of this tile inside its chunk's member list.
    pub chunk_index: u32,

    pub ocean: bool,
    /// Touches a tile of another tectonic plate.
    pub fault: bool,
    /// Next to a fault tile without being one.
    pub fault_neighbor: bool,
    pub ocean_neighbor: bool,
    /// Part of a small landmass.
    pub island: bool,

    /// Normalized distance from the equator, 0 at the equator and 1 at the poles.
    pub latitude: f32,
    pub temperature: f32,
    pub rainfall: f32,

    pub biome: Biome,
    /// Cosmetic variant of the biome, 0..=4 on land and 0 on water.
    pub biome_variation: u8,

    /// Steps to the nearest mountain tile, `None` if none is reachable.
    pub mountain_distance: Option<u32>,

    pub population: u32,
    pub population_id: Option<u32>,
    pub language_id: Option<u32>,
}

impl Tile {
    /// A fresh tile with no cluster, climate or biome data.
    pub fn new(id: TileId, center: Vec3, neighbors: Vec<TileId>) -> Self {
        Self {
            id,
            center,
            neighbors,
            region: UNASSIGNED,
            continent: UNASSIGNED,
            tectonic_plate: UNASSIGNED,
            chunk: UNASSIGNED,
            chunk_index: UNASSIGNED,
            ocean: false,
            fault: false,
            fault_neighbor: false,
            ocean_neighbor: false,
            island: false,
            latitude: 0.0,
            temperature: 0.0,
            rainfall: 0.0,
            biome: Biome::Ocean,
            biome_variation: 0,
            mountain_distance: None,
            population: 0,
            population_id: None,
            language_id: None,
        }
    }

    /// Pentagons have five neighbors, hexagons six.
    pub fn is_pentagon(&self) -> bool {
        self.neighbors.len() == 5
    }

    /// Number of triangles in the tile's fan (one per boundary edge).
    pub fn triangle_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Inland fault tile.
    pub fn is_mountain(&self) -> bool {
        self.relief() == Relief::Mountain
    }

    /// Land tile bordering a fault, or a coastal fault tile.
    pub fn is_highlands(&self) -> bool {
        !self.ocean && (self.fault_neighbor || (self.fault && self.ocean_neighbor))
    }

    /// Elevation class. Highlands take precedence over mountains so coastal
    /// fault tiles read as highlands.
    pub fn relief(&self) -> Relief {
        if self.ocean {
            Relief::Ocean
        } else if self.is_highlands() {
            Relief::Highlands
        } else if self.fault {
            Relief::Mountain
        } else {
            Relief::Lowland
        }
    }
}

/// Owning store of all tiles, indexed by [`TileId`].
#[derive(Clone, Debug, Default)]
pub struct TileArena {
    tiles: Vec<Tile>,
}

impl TileArena {
    /// Wrap tiles whose ids match their positions.
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        debug_assert!(tiles.iter().enumerate().all(|(i, t)| t.id.index() == i));
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Tile> {
        self.tiles.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        (0..self.tiles.len() as u32).map(TileId)
    }

    /// Neighbors of `id` in boundary order.
    pub fn neighbors(&self, id: TileId) -> &[TileId] {
        &self.tiles[id.index()].neighbors
    }

    /// Whether `b` is in `a`'s neighbor list.
    pub fn are_adjacent(&self, a: TileId, b: TileId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Total triangle count of the tiling.
    pub fn triangle_count(&self) -> usize {
        self.tiles.iter().map(Tile::triangle_count).sum()
    }
}

impl Index<TileId> for TileArena {
    type Output = Tile;

    fn index(&self, id: TileId) -> &Tile {
        &self.tiles[id.index()]
    }
}

impl IndexMut<TileId> for TileArena {
    fn index_mut(&mut self, id: TileId) -> &mut Tile {
        &mut self.tiles[id.index()]
    }
}

impl<'a> IntoIterator for &'a TileArena {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}
