//! Stochastic biome growth and boundary blurring.

use hexglobe_tiles::{Biome, TileArena, TileId};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Climate biome on land, the only kind spreading and roughening may replace.
fn replaceable(biome: Biome) -> bool {
    !biome.is_relief()
}

/// One pass growing mountain and highland ranges.
///
/// Every replaceable neighbor of a mountain or highland tile in the snapshot
/// takes that tile's biome with probability `chance`.
pub fn spread_mountains<R: Rng + ?Sized>(tiles: &mut TileArena, chance: f64, rng: &mut R) {
    let snapshot: Vec<Biome> = tiles.iter().map(|t| t.biome).collect();
    let mut next = snapshot.clone();

    for tile in tiles.iter() {
        let biome = snapshot[tile.id.index()];
        if !matches!(biome, Biome::Mountain | Biome::Highlands) {
            continue;
        }
        for &n in &tile.neighbors {
            if replaceable(snapshot[n.index()]) && rng.random_bool(chance) {
                next[n.index()] = biome;
            }
        }
    }

    let converted = apply(tiles, &next);
    tracing::debug!(converted, "mountain spreading pass");
}

/// One pass blurring biome boundaries.
///
/// Each replaceable tile, with probability `chance`, adopts the biome of a
/// random replaceable neighbor from the snapshot.
pub fn roughen_biomes<R: Rng + ?Sized>(tiles: &mut TileArena, chance: f64, rng: &mut R) {
    let snapshot: Vec<Biome> = tiles.iter().map(|t| t.biome).collect();
    let mut next = snapshot.clone();
    let mut candidates: Vec<TileId> = Vec::with_capacity(6);

    for tile in tiles.iter() {
        if !replaceable(snapshot[tile.id.index()]) || !rng.random_bool(chance) {
            continue;
        }
        candidates.clear();
        candidates.extend(
            tile.neighbors
                .iter()
                .copied()
                .filter(|n| replaceable(snapshot[n.index()])),
        );
        if let Some(&pick) = candidates.choose(rng) {
            next[tile.id.index()] = snapshot[pick.index()];
        }
    }

    let changed = apply(tiles, &next);
    tracing::debug!(changed, "biome roughening pass");
}

fn apply(tiles: &mut TileArena, biomes: &[Biome]) -> usize {
    let mut changed = 0;
    for tile in tiles.iter_mut() {
        let biome = biomes[tile.id.index()];
        if tile.biome != biome {
            tile.biome = biome;
            changed += 1;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexglobe_tiles::build_tiles;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn forest_with_peak() -> TileArena {
        let mut tiles = build_tiles(1.0, 2).unwrap();
        for tile in tiles.iter_mut() {
            tile.biome = Biome::BroadleafForest;
        }
        tiles[TileId(20)].biome = Biome::Mountain;
        tiles
    }

    #[test]
    fn test_certain_spread_takes_all_neighbors() {
        let mut tiles = forest_with_peak();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        spread_mountains(&mut tiles, 1.0, &mut rng);
        let mountains: Vec<TileId> = tiles
            .iter()
            .filter(|t| t.biome == Biome::Mountain)
            .map(|t| t.id)
            .collect();
        assert_eq!(mountains.len(), 1 + tiles.neighbors(TileId(20)).len());
    }

    #[test]
    fn test_spread_never_touches_ocean() {
        let mut tiles = forest_with_peak();
        for &n in tiles.neighbors(TileId(20)).to_vec().iter() {
            tiles[n].biome = Biome::Ocean;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        spread_mountains(&mut tiles, 1.0, &mut rng);
        assert_eq!(
            tiles.iter().filter(|t| t.biome == Biome::Mountain).count(),
            1
        );
    }

    #[test]
    fn test_zero_chance_is_noop() {
        let mut tiles = forest_with_peak();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        spread_mountains(&mut tiles, 0.0, &mut rng);
        roughen_biomes(&mut tiles, 0.0, &mut rng);
        assert_eq!(
            tiles.iter().filter(|t| t.biome == Biome::Mountain).count(),
            1
        );
    }

    #[test]
    fn test_roughening_keeps_relief() {
        let mut tiles = build_tiles(1.0, 2).unwrap();
        for (i, tile) in tiles.iter_mut().enumerate() {
            tile.biome = match i % 4 {
                0 => Biome::Ocean,
                1 => Biome::Desert,
                2 => Biome::Taiga,
                _ => Biome::Highlands,
            };
        }
        let before: Vec<Biome> = tiles.iter().map(|t| t.biome).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..5 {
            roughen_biomes(&mut tiles, 1.0, &mut rng);
        }
        for tile in &tiles {
            let was = before[tile.id.index()];
            if was.is_relief() {
                assert_eq!(tile.biome, was);
            } else {
                assert!(matches!(tile.biome, Biome::Desert | Biome::Taiga));
            }
        }
    }
}
