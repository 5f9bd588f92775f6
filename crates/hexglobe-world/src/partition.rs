//! Region, continent and tectonic plate clustering.
//!
//! Each level picks distinct random seeds among the clusters of the level
//! below and hands every lower cluster to its nearest seed. Tiles therefore
//! belong to exactly one region, every region to exactly one continent and
//! every continent to exactly one plate.

use std::fmt;

use glam::Vec3;
use hexglobe_config::HierarchyConfig;
use hexglobe_tiles::{TileArena, TileId, UNASSIGNED};
use rand::Rng;
use rand::seq::index;

use crate::WorldError;

/// Level of the cluster hierarchy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClusterLevel {
    Region,
    Continent,
    TectonicPlate,
}

impl fmt::Display for ClusterLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClusterLevel::Region => "region",
            ClusterLevel::Continent => "continent",
            ClusterLevel::TectonicPlate => "tectonic plate",
        })
    }
}

/// Tiles closest to one seed tile.
#[derive(Clone, Debug)]
pub struct Region {
    pub seed: TileId,
    pub center: Vec3,
    /// Members sorted by distance to the seed, seed first.
    pub tiles: Vec<TileId>,
    pub continent: u32,
}

/// Regions closest to one seed region.
#[derive(Clone, Debug)]
pub struct Continent {
    /// Index of the seed region.
    pub seed: u32,
    pub center: Vec3,
    pub regions: Vec<u32>,
    pub tectonic_plate: u32,
    /// Set by topology generation.
    pub ocean: bool,
}

/// Continents closest to one seed continent.
#[derive(Clone, Debug)]
pub struct TectonicPlate {
    /// Index of the seed continent.
    pub seed: u32,
    pub center: Vec3,
    pub continents: Vec<u32>,
}

/// The full three-level clustering of a tile arena.
#[derive(Clone, Debug, Default)]
pub struct Hierarchy {
    pub regions: Vec<Region>,
    pub continents: Vec<Continent>,
    pub plates: Vec<TectonicPlate>,
}

impl Hierarchy {
    /// Tiles of a continent, region by region.
    pub fn continent_tiles(&self, continent: u32) -> impl Iterator<Item = TileId> + '_ {
        self.continents[continent as usize]
            .regions
            .iter()
            .flat_map(|&r| self.regions[r as usize].tiles.iter().copied())
    }

    /// Every tile, continent-major then region-major.
    pub fn tiles_in_order(&self) -> impl Iterator<Item = TileId> + '_ {
        (0..self.continents.len() as u32).flat_map(|c| self.continent_tiles(c))
    }
}

/// Pick `count` distinct indices below `population`, in selection order.
fn pick_seeds<R: Rng + ?Sized>(
    rng: &mut R,
    level: ClusterLevel,
    population: usize,
    count: u32,
) -> Result<Vec<usize>, WorldError> {
    let count = count as usize;
    if count == 0 || count >= population {
        return Err(WorldError::TooManySeeds {
            level,
            seeds: count,
            population,
        });
    }
    Ok(index::sample(rng, population, count).into_vec())
}

/// Index and squared distance of the seed nearest to `point`.
///
/// Ties go to the seed picked first.
fn nearest_seed(point: Vec3, seeds: &[Vec3]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, seed) in seeds.iter().enumerate() {
        let d = point.distance_squared(*seed);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((i, d));
        }
    }
    best
}

/// Cluster every tile into regions, continents and tectonic plates.
///
/// Writes `region`, `continent` and `tectonic_plate` on every tile.
pub fn partition<R: Rng + ?Sized>(
    tiles: &mut TileArena,
    config: &HierarchyConfig,
    rng: &mut R,
) -> Result<Hierarchy, WorldError> {
    let _span = tracing::info_span!("partition").entered();

    // Regions
    let region_seeds: Vec<TileId> =
        pick_seeds(rng, ClusterLevel::Region, tiles.len(), config.region_count)?
            .into_iter()
            .map(|i| TileId(i as u32))
            .collect();
    let region_centers: Vec<Vec3> = region_seeds.iter().map(|&id| tiles[id].center).collect();

    let mut members: Vec<Vec<(f32, TileId)>> = vec![Vec::new(); region_seeds.len()];
    for tile in tiles.iter_mut() {
        let (region, distance) = nearest_seed(tile.center, &region_centers).ok_or(
            WorldError::UnassignedTile {
                tile: tile.id,
                level: ClusterLevel::Region,
            },
        )?;
        tile.region = region as u32;
        members[region].push((distance, tile.id));
    }

    let mut regions: Vec<Region> = region_seeds
        .iter()
        .zip(region_centers)
        .zip(members)
        .map(|((&seed, center), mut members)| {
            members.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            Region {
                seed,
                center,
                tiles: members.into_iter().map(|(_, id)| id).collect(),
                continent: UNASSIGNED,
            }
        })
        .collect();

    // Continents
    let continent_seeds = pick_seeds(
        rng,
        ClusterLevel::Continent,
        regions.len(),
        config.continent_count,
    )?;
    let continent_centers: Vec<Vec3> = continent_seeds.iter().map(|&r| regions[r].center).collect();
    let mut continents: Vec<Continent> = continent_seeds
        .iter()
        .zip(&continent_centers)
        .map(|(&seed, &center)| Continent {
            seed: seed as u32,
            center,
            regions: Vec::new(),
            tectonic_plate: UNASSIGNED,
            ocean: false,
        })
        .collect();
    for (r, region) in regions.iter_mut().enumerate() {
        if let Some((c, _)) = nearest_seed(region.center, &continent_centers) {
            region.continent = c as u32;
            continents[c].regions.push(r as u32);
        }
    }

    // Tectonic plates
    let plate_seeds = pick_seeds(
        rng,
        ClusterLevel::TectonicPlate,
        continents.len(),
        config.tectonic_plate_count,
    )?;
    let plate_centers: Vec<Vec3> = plate_seeds.iter().map(|&c| continents[c].center).collect();
    let mut plates: Vec<TectonicPlate> = plate_seeds
        .iter()
        .zip(&plate_centers)
        .map(|(&seed, &center)| TectonicPlate {
            seed: seed as u32,
            center,
            continents: Vec::new(),
        })
        .collect();
    for (c, continent) in continents.iter_mut().enumerate() {
        if let Some((p, _)) = nearest_seed(continent.center, &plate_centers) {
            continent.tectonic_plate = p as u32;
            plates[p].continents.push(c as u32);
        }
    }

    for tile in tiles.iter_mut() {
        let region = &regions[tile.region as usize];
        tile.continent = region.continent;
        if let Some(continent) = continents.get(region.continent as usize) {
            tile.tectonic_plate = continent.tectonic_plate;
        }
    }

    let hierarchy = Hierarchy {
        regions,
        continents,
        plates,
    };
    check_totality(tiles, &hierarchy)?;

    tracing::info!(
        regions = hierarchy.regions.len(),
        continents = hierarchy.continents.len(),
        plates = hierarchy.plates.len(),
        "hierarchy built"
    );
    Ok(hierarchy)
}

/// Every tile carries a valid id at every level.
fn check_totality(tiles: &TileArena, hierarchy: &Hierarchy) -> Result<(), WorldError> {
    for tile in tiles {
        let missing = if tile.region as usize >= hierarchy.regions.len() {
            Some(ClusterLevel::Region)
        } else if tile.continent as usize >= hierarchy.continents.len() {
            Some(ClusterLevel::Continent)
        } else if tile.tectonic_plate as usize >= hierarchy.plates.len() {
            Some(ClusterLevel::TectonicPlate)
        } else {
            None
        };
        if let Some(level) = missing {
            return Err(WorldError::UnassignedTile {
                tile: tile.id,
                level,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexglobe_tiles::build_tiles;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config(regions: u32, continents: u32, plates: u32) -> HierarchyConfig {
        HierarchyConfig {
            region_count: regions,
            continent_count: continents,
            tectonic_plate_count: plates,
            ..Default::default()
        }
    }

    fn partitioned(seed: u64) -> (TileArena, Hierarchy) {
        let mut tiles = build_tiles(1.0, 3).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let hierarchy = partition(&mut tiles, &config(60, 12, 4), &mut rng).unwrap();
        (tiles, hierarchy)
    }

    #[test]
    fn test_partition_is_total() {
        let (tiles, hierarchy) = partitioned(7);
        let region_total: usize = hierarchy.regions.iter().map(|r| r.tiles.len()).sum();
        assert_eq!(region_total, tiles.len());

        let continent_total: usize = hierarchy.continents.iter().map(|c| c.regions.len()).sum();
        assert_eq!(continent_total, hierarchy.regions.len());

        let plate_total: usize = hierarchy.plates.iter().map(|p| p.continents.len()).sum();
        assert_eq!(plate_total, hierarchy.continents.len());

        for tile in &tiles {
            assert!(hierarchy.regions[tile.region as usize].tiles.contains(&tile.id));
            assert_eq!(
                tile.continent,
                hierarchy.regions[tile.region as usize].continent
            );
            assert_eq!(
                tile.tectonic_plate,
                hierarchy.continents[tile.continent as usize].tectonic_plate
            );
        }
    }

    #[test]
    fn test_totality_reports_first_unassigned_level() {
        let (mut tiles, hierarchy) = partitioned(3);
        assert!(check_totality(&tiles, &hierarchy).is_ok());

        tiles[TileId(40)].tectonic_plate = UNASSIGNED;
        assert!(matches!(
            check_totality(&tiles, &hierarchy),
            Err(WorldError::UnassignedTile {
                tile: TileId(40),
                level: ClusterLevel::TectonicPlate,
            })
        ));

        tiles[TileId(7)].continent = hierarchy.continents.len() as u32;
        assert!(matches!(
            check_totality(&tiles, &hierarchy),
            Err(WorldError::UnassignedTile {
                tile: TileId(7),
                level: ClusterLevel::Continent,
            })
        ));

        tiles[TileId(7)].region = UNASSIGNED;
        assert!(matches!(
            check_totality(&tiles, &hierarchy),
            Err(WorldError::UnassignedTile {
                tile: TileId(7),
                level: ClusterLevel::Region,
            })
        ));
    }

    #[test]
    fn test_clusters_non_empty() {
        let (_, hierarchy) = partitioned(11);
        assert!(hierarchy.regions.iter().all(|r| !r.tiles.is_empty()));
        assert!(hierarchy.continents.iter().all(|c| !c.regions.is_empty()));
        assert!(hierarchy.plates.iter().all(|p| !p.continents.is_empty()));
    }

    #[test]
    fn test_region_members_sorted_by_distance() {
        let (tiles, hierarchy) = partitioned(3);
        for region in &hierarchy.regions {
            assert_eq!(region.tiles[0], region.seed);
            let distances: Vec<f32> = region
                .tiles
                .iter()
                .map(|&id| tiles[id].center.distance_squared(region.center))
                .collect();
            assert!(distances.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_tiles_join_nearest_seed() {
        let (tiles, hierarchy) = partitioned(5);
        for tile in &tiles {
            let own = tile
                .center
                .distance_squared(hierarchy.regions[tile.region as usize].center);
            for region in &hierarchy.regions {
                assert!(own <= tile.center.distance_squared(region.center));
            }
        }
    }

    #[test]
    fn test_same_seed_same_partition() {
        let (a, _) = partitioned(42);
        let (b, _) = partitioned(42);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(
                (x.region, x.continent, x.tectonic_plate),
                (y.region, y.continent, y.tectonic_plate)
            );
        }
    }

    #[test]
    fn test_too_many_seeds_rejected() {
        let mut tiles = build_tiles(1.0, 0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = partition(&mut tiles, &config(32, 4, 2), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            WorldError::TooManySeeds {
                level: ClusterLevel::Region,
                seeds: 32,
                population: 32
            }
        ));

        let err = partition(&mut tiles, &config(10, 10, 2), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            WorldError::TooManySeeds {
                level: ClusterLevel::Continent,
                ..
            }
        ));
    }

    #[test]
    fn test_tiles_in_order_covers_everything() {
        let (tiles, hierarchy) = partitioned(9);
        let mut ordered: Vec<TileId> = hierarchy.tiles_in_order().collect();
        assert_eq!(ordered.len(), tiles.len());
        ordered.sort();
        ordered.dedup();
        assert_eq!(ordered.len(), tiles.len());
    }
}
