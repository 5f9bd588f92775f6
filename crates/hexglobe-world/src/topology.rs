//! Land and ocean layout, coastline roughening and plate boundaries.

use std::collections::VecDeque;

use hexglobe_config::TopologyConfig;
use hexglobe_tiles::{TileArena, TileId};
use rand::Rng;

use crate::Hierarchy;

/// Counts reported after topology generation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TopologySummary {
    pub ocean_tiles: usize,
    pub land_tiles: usize,
    pub fault_tiles: usize,
    pub islands: usize,
}

/// Lay out land and ocean, then derive fault and coast flags.
pub fn generate_topology<R: Rng + ?Sized>(
    tiles: &mut TileArena,
    hierarchy: &mut Hierarchy,
    config: &TopologyConfig,
    rng: &mut R,
) -> TopologySummary {
    let _span = tracing::info_span!("topology").entered();

    assign_continents(tiles, hierarchy, config.ocean_threshold, rng);
    for _ in 0..config.coast_roughing_iterations {
        roughen_coastline(tiles, rng);
    }
    mark_faults(tiles);
    mark_neighbors(tiles);
    let islands = mark_islands(tiles, config.island_max_tiles as usize);

    let ocean_tiles = tiles.iter().filter(|t| t.ocean).count();
    let summary = TopologySummary {
        ocean_tiles,
        land_tiles: tiles.len() - ocean_tiles,
        fault_tiles: tiles.iter().filter(|t| t.fault).count(),
        islands,
    };
    tracing::info!(
        ocean = summary.ocean_tiles,
        land = summary.land_tiles,
        faults = summary.fault_tiles,
        islands = summary.islands,
        "topology generated"
    );
    summary
}

/// Draw 1..=100 per continent; above `threshold` the whole continent is ocean.
fn assign_continents<R: Rng + ?Sized>(
    tiles: &mut TileArena,
    hierarchy: &mut Hierarchy,
    threshold: u32,
    rng: &mut R,
) {
    for c in 0..hierarchy.continents.len() {
        let ocean = rng.random_range(1..=100u32) > threshold;
        hierarchy.continents[c].ocean = ocean;
        for id in hierarchy.continent_tiles(c as u32) {
            tiles[id].ocean = ocean;
        }
    }
}

/// One roughening pass over a snapshot of the ocean flags.
///
/// A tile flips when more of its neighbors are of the other kind than a
/// fresh 1..=9 draw.
fn roughen_coastline<R: Rng + ?Sized>(tiles: &mut TileArena, rng: &mut R) {
    let snapshot: Vec<bool> = tiles.iter().map(|t| t.ocean).collect();
    for tile in tiles.iter_mut() {
        let ocean_count = tile
            .neighbors
            .iter()
            .filter(|n| snapshot[n.index()])
            .count();
        let opposing = if snapshot[tile.id.index()] {
            tile.neighbors.len() - ocean_count
        } else {
            ocean_count
        };
        let draw = rng.random_range(1..=9usize);
        if opposing > draw {
            tile.ocean = !snapshot[tile.id.index()];
        }
    }
}

/// Tiles bordering another tectonic plate.
fn mark_faults(tiles: &mut TileArena) {
    let plates: Vec<u32> = tiles.iter().map(|t| t.tectonic_plate).collect();
    for tile in tiles.iter_mut() {
        let plate = plates[tile.id.index()];
        tile.fault = tile.neighbors.iter().any(|n| plates[n.index()] != plate);
    }
}

fn mark_neighbors(tiles: &mut TileArena) {
    let flags: Vec<(bool, bool)> = tiles.iter().map(|t| (t.ocean, t.fault)).collect();
    for tile in tiles.iter_mut() {
        let (ocean, fault) = flags[tile.id.index()];
        tile.ocean_neighbor = tile.neighbors.iter().any(|n| flags[n.index()].0 != ocean);
        tile.fault_neighbor = !fault && tile.neighbors.iter().any(|n| flags[n.index()].1);
    }
}

/// Flag land components of at most `max_tiles` tiles. Returns how many
/// such components exist.
fn mark_islands(tiles: &mut TileArena, max_tiles: usize) -> usize {
    let mut visited = vec![false; tiles.len()];
    let mut islands = 0;
    let mut queue = VecDeque::new();

    for start in (0..tiles.len() as u32).map(TileId) {
        if visited[start.index()] || tiles[start].ocean {
            continue;
        }
        visited[start.index()] = true;
        queue.push_back(start);
        let mut component: Vec<TileId> = Vec::new();
        while let Some(id) = queue.pop_front() {
            component.push(id);
            for &n in tiles.neighbors(id) {
                if !visited[n.index()] && !tiles[n].ocean {
                    visited[n.index()] = true;
                    queue.push_back(n);
                }
            }
        }
        if component.len() <= max_tiles {
            islands += 1;
            for id in component {
                tiles[id].island = true;
            }
        }
    }
    islands
}
