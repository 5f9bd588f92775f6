//! Fixed-capacity render chunks.

use std::num::NonZeroU32;

use glam::Vec3;
use hexglobe_tiles::{Tile, TileArena, TileId};

use crate::Hierarchy;

/// A bucket of spatially close tiles drawn together.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub id: u32,
    pub tiles: Vec<TileId>,
    /// Mean of the member centers, pushed back onto the sphere.
    pub centroid: Vec3,
    /// Triangles needed to draw the chunk as hex columns.
    pub triangle_count: usize,
}

/// All chunks of a world.
#[derive(Clone, Debug, Default)]
pub struct ChunkSet {
    chunks: Vec<Chunk>,
}

/// Triangles of one tile drawn as a column: a top fan, plus walls where the
/// column stands higher or lower than its surroundings.
pub fn column_triangles(tile: &Tile) -> usize {
    let sides = tile.triangle_count();
    if tile.ocean_neighbor || tile.fault || tile.fault_neighbor {
        sides * 3
    } else {
        sides
    }
}

impl ChunkSet {
    /// Cut the continent-major, region-major tile order into chunks of at
    /// most `capacity` tiles. Writes `chunk` and `chunk_index` on every tile.
    pub fn build(
        tiles: &mut TileArena,
        hierarchy: &Hierarchy,
        capacity: NonZeroU32,
        radius: f32,
    ) -> Self {
        let capacity = capacity.get() as usize;
        let order: Vec<TileId> = hierarchy.tiles_in_order().collect();

        let chunks: Vec<Chunk> = order
            .chunks(capacity)
            .enumerate()
            .map(|(id, members)| {
                let id = id as u32;
                let mut sum = Vec3::ZERO;
                let mut triangle_count = 0;
                for (index, &tile_id) in members.iter().enumerate() {
                    let tile = &mut tiles[tile_id];
                    tile.chunk = id;
                    tile.chunk_index = index as u32;
                    sum += tile.center;
                    triangle_count += column_triangles(tile);
                }
                Chunk {
                    id,
                    tiles: members.to_vec(),
                    centroid: sum.normalize_or_zero() * radius,
                    triangle_count,
                }
            })
            .collect();

        tracing::debug!(chunks = chunks.len(), capacity, "chunks built");
        Self { chunks }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Chunk> {
        self.chunks.get(id as usize)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    pub fn triangle_count(&self) -> usize {
        self.chunks.iter().map(|c| c.triangle_count).sum()
    }

    /// Chunks sorted by distance from `viewpoint`, closest first.
    pub fn nearest_first(&self, viewpoint: Vec3) -> Vec<&Chunk> {
        let mut sorted: Vec<&Chunk> = self.chunks.iter().collect();
        sorted.sort_by(|a, b| {
            a.centroid
                .distance_squared(viewpoint)
                .total_cmp(&b.centroid.distance_squared(viewpoint))
        });
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::partition;
    use hexglobe_config::HierarchyConfig;
    use hexglobe_tiles::build_tiles;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn chunked(capacity: u32) -> (TileArena, Hierarchy, ChunkSet) {
        let mut tiles = build_tiles(5.0, 3).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = HierarchyConfig {
            region_count: 40,
            continent_count: 8,
            tectonic_plate_count: 3,
            chunk_capacity: capacity,
        };
        let hierarchy = partition(&mut tiles, &config, &mut rng).unwrap();
        let capacity = NonZeroU32::new(capacity).unwrap();
        let chunks = ChunkSet::build(&mut tiles, &hierarchy, capacity, 5.0);
        (tiles, hierarchy, chunks)
    }

    #[test]
    fn test_chunks_respect_capacity() {
        let (tiles, _, chunks) = chunked(100);
        assert_eq!(chunks.len(), tiles.len().div_ceil(100));
        assert!(chunks.iter().all(|c| c.tiles.len() <= 100));
        let total: usize = chunks.iter().map(|c| c.tiles.len()).sum();
        assert_eq!(total, tiles.len());
    }

    #[test]
    fn test_unit_capacity_gives_one_tile_per_chunk() {
        let (tiles, _, chunks) = chunked(1);
        assert_eq!(chunks.len(), tiles.len());
        for tile in &tiles {
            assert_eq!(tile.chunk_index, 0);
            assert_eq!(chunks.get(tile.chunk).unwrap().tiles, vec![tile.id]);
        }
    }

    #[test]
    fn test_tiles_know_their_chunk() {
        let (tiles, _, chunks) = chunked(64);
        for chunk in chunks.iter() {
            for (i, &id) in chunk.tiles.iter().enumerate() {
                assert_eq!(tiles[id].chunk, chunk.id);
                assert_eq!(tiles[id].chunk_index as usize, i);
            }
        }
    }

    #[test]
    fn test_chunks_follow_continent_order() {
        let (tiles, _, chunks) = chunked(50);
        let continents: Vec<u32> = chunks
            .iter()
            .flat_map(|c| c.tiles.iter().map(|&id| tiles[id].continent))
            .collect();
        assert!(continents.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_flat_tiles_one_triangle_per_side() {
        let (tiles, _, chunks) = chunked(300);
        // No topology yet, so every tile is a flat column.
        assert_eq!(chunks.triangle_count(), tiles.triangle_count());
    }

    #[test]
    fn test_nearest_first() {
        let (_, _, chunks) = chunked(100);
        let target = chunks.get(3).unwrap().centroid;
        let sorted = chunks.nearest_first(target);
        assert_eq!(sorted[0].id, 3);
        assert_eq!(sorted.len(), chunks.len());
        for pair in sorted.windows(2) {
            assert!(
                pair[0].centroid.distance_squared(target)
                    <= pair[1].centroid.distance_squared(target)
            );
        }
    }

    #[test]
    fn test_column_walls() {
        let mut tile = Tile::new(TileId(0), Vec3::X, vec![TileId(1); 6]);
        assert_eq!(column_triangles(&tile), 6);
        tile.ocean_neighbor = true;
        assert_eq!(column_triangles(&tile), 18);
    }
}
