//! Cyclic ordering of tile neighbor lists.

use crate::{MeshError, TileArena, TileId};

/// Reorder every tile's neighbors into a walk around its boundary.
///
/// Rings are computed against the unmodified arena and written back
/// afterwards. Only the neighbor lists change.
pub fn order_neighbors(tiles: &mut TileArena) -> Result<(), MeshError> {
    let snapshot: &TileArena = tiles;
    let rings = snapshot
        .ids()
        .map(|id| ordered_ring(snapshot, id))
        .collect::<Result<Vec<_>, _>>()?;

    for (tile, ring) in tiles.iter_mut().zip(rings) {
        tile.neighbors = ring;
    }
    Ok(())
}

/// Greedy nearest-neighbor walk over the neighbors of `id`.
///
/// Starts at the first listed neighbor and keeps stepping to the closest
/// unvisited one. The result is a permutation of the input list.
pub fn ordered_ring(tiles: &TileArena, id: TileId) -> Result<Vec<TileId>, MeshError> {
    let original = tiles.neighbors(id);
    let expected = original.len();

    for (i, neighbor) in original.iter().enumerate() {
        if original[..i].contains(neighbor) {
            return Err(MeshError::DuplicateNeighbor {
                tile: id,
                neighbor: *neighbor,
            });
        }
    }

    let Some(&first) = original.first() else {
        return Err(MeshError::StalledWalk {
            tile: id,
            placed: 0,
            expected: 0,
        });
    };

    let mut visited = vec![false; expected];
    visited[0] = true;
    let mut ring = Vec::with_capacity(expected);
    ring.push(first);

    let mut current = first;
    while ring.len() < expected {
        let from = tiles[current].center;
        let mut best: Option<(usize, f32)> = None;
        for (i, &candidate) in original.iter().enumerate() {
            if visited[i] {
                continue;
            }
            let d = from.distance_squared(tiles[candidate].center);
            if d.is_finite() && best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((i, d));
            }
        }

        let Some((i, _)) = best else {
            return Err(MeshError::StalledWalk {
                tile: id,
                placed: ring.len(),
                expected,
            });
        };
        visited[i] = true;
        current = original[i];
        ring.push(current);
    }

    Ok(ring)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Icosphere, Tile, extract_tiles, validate};
    use glam::Vec3;

    fn arena(depth: u32) -> TileArena {
        extract_tiles(Icosphere::with_subdivisions(1.0, depth)).unwrap()
    }

    #[test]
    fn test_ring_is_permutation() {
        let tiles = arena(2);
        for id in tiles.ids() {
            let ring = ordered_ring(&tiles, id).unwrap();
            let mut before = tiles.neighbors(id).to_vec();
            let mut after = ring.clone();
            before.sort();
            after.sort();
            assert_eq!(before, after, "ring of {id} is not a permutation");
            assert_eq!(ring[0], tiles.neighbors(id)[0]);
        }
    }

    #[test]
    fn test_ordered_rings_closed() {
        for depth in 0..=3 {
            let mut tiles = arena(depth);
            order_neighbors(&mut tiles).unwrap();
            assert!(validate::broken_rings(&tiles).is_empty());
        }
    }

    #[test]
    fn test_ordering_keeps_symmetry() {
        let mut tiles = arena(2);
        order_neighbors(&mut tiles).unwrap();
        assert_eq!(validate::check_symmetry(&tiles), Ok(()));
    }

    #[test]
    fn test_duplicate_neighbor_rejected() {
        let tiles = TileArena::from_tiles(vec![
            Tile::new(TileId(0), Vec3::X, vec![TileId(1), TileId(1)]),
            Tile::new(TileId(1), Vec3::Y, vec![TileId(0)]),
        ]);
        assert_eq!(
            ordered_ring(&tiles, TileId(0)),
            Err(MeshError::DuplicateNeighbor {
                tile: TileId(0),
                neighbor: TileId(1)
            })
        );
    }

    #[test]
    fn test_unreachable_neighbor_stalls() {
        let tiles = TileArena::from_tiles(vec![
            Tile::new(TileId(0), Vec3::X, vec![TileId(1), TileId(2)]),
            Tile::new(TileId(1), Vec3::Y, vec![TileId(0)]),
            Tile::new(TileId(2), Vec3::NAN, vec![TileId(0)]),
        ]);
        assert_eq!(
            ordered_ring(&tiles, TileId(0)),
            Err(MeshError::StalledWalk {
                tile: TileId(0),
                placed: 1,
                expected: 2
            })
        );
    }
}
