//! Distance-from-mountain gradient, the downhill direction for future river
//! routing.

use std::collections::VecDeque;

use hexglobe_tiles::{Biome, TileArena};

/// Breadth-first step count from the nearest mountain to every land tile.
///
/// Mountains get 0; land tiles cut off from every mountain and all ocean
/// tiles get `None`. Returns the largest distance found.
pub fn compute_mountain_distance(tiles: &mut TileArena) -> Option<u32> {
    let mut queue = VecDeque::new();
    for tile in tiles.iter_mut() {
        tile.mountain_distance = None;
        if tile.biome == Biome::Mountain {
            tile.mountain_distance = Some(0);
            queue.push_back(tile.id);
        }
    }

    let mut deepest = None;
    while let Some(id) = queue.pop_front() {
        let Some(distance) = tiles[id].mountain_distance else {
            continue;
        };
        deepest = Some(distance);
        for i in 0..tiles.neighbors(id).len() {
            let n = tiles.neighbors(id)[i];
            let neighbor = &mut tiles[n];
            if neighbor.ocean || neighbor.mountain_distance.is_some() {
                continue;
            }
            neighbor.mountain_distance = Some(distance + 1);
            queue.push_back(n);
        }
    }

    tracing::debug!(deepest = ?deepest, "mountain distance computed");
    deepest
}
