//! Structural checks over a finished tile arena.

use crate::{MeshError, PENTAGON_COUNT, TileArena, TileId};

/// Every listed neighbor must list the tile back.
pub fn check_symmetry(tiles: &TileArena) -> Result<(), MeshError> {
    for tile in tiles {
        if let Some(&neighbor) = tiles
            .neighbors(tile.id)
            .iter()
            .find(|&&n| !tiles.are_adjacent(n, tile.id))
        {
            return Err(MeshError::AsymmetricAdjacency {
                tile: tile.id,
                neighbor,
            });
        }
    }
    Ok(())
}

/// Every tile has five or six neighbors and exactly twelve have five.
pub fn check_degrees(tiles: &TileArena) -> Result<(), MeshError> {
    let mut pentagons = 0;
    for tile in tiles {
        match tile.neighbors.len() {
            5 => pentagons += 1,
            6 => {}
            degree => {
                return Err(MeshError::BadDegree {
                    tile: tile.id,
                    degree,
                });
            }
        }
    }
    if pentagons != PENTAGON_COUNT {
        return Err(MeshError::PentagonCount { found: pentagons });
    }
    Ok(())
}

/// Tiles whose neighbor list is not a closed walk.
///
/// A ring is closed when every pair of consecutive neighbors, including the
/// last and the first, are adjacent to each other.
pub fn broken_rings(tiles: &TileArena) -> Vec<TileId> {
    tiles
        .iter()
        .filter(|tile| {
            let ring = &tile.neighbors;
            (0..ring.len()).any(|i| !tiles.are_adjacent(ring[i], ring[(i + 1) % ring.len()]))
        })
        .map(|tile| tile.id)
        .collect()
}

/// [`broken_rings`] as an error, for callers that require closed rings.
pub fn check_rings(tiles: &TileArena) -> Result<(), MeshError> {
    let broken = broken_rings(tiles);
    match broken.first() {
        Some(&first) => Err(MeshError::BrokenRings {
            count: broken.len(),
            first,
        }),
        None => Ok(()),
    }
}
