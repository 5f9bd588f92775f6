//! Lateral movement across the tiling.

use glam::Vec3;
use hexglobe_tiles::{TileArena, TileId};

/// East or west along a latitude band.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Heading {
    East,
    West,
}

impl Heading {
    pub fn reverse(self) -> Self {
        match self {
            Heading::East => Heading::West,
            Heading::West => Heading::East,
        }
    }

    /// Unit tangent at `point` pointing this way, zero at the poles.
    pub fn tangent(self, point: Vec3) -> Vec3 {
        let east = Vec3::Y.cross(point).normalize_or_zero();
        match self {
            Heading::East => east,
            Heading::West => -east,
        }
    }
}

/// Prevailing wind direction at a latitude: westerlies inside
/// `[hadley, ferrel]` blow east, trade and polar winds blow west.
pub fn prevailing_wind(latitude: f32, hadley: f32, ferrel: f32) -> Heading {
    if (hadley..=ferrel).contains(&latitude) {
        Heading::East
    } else {
        Heading::West
    }
}

/// Neighbor of `from` that moves along `heading` while staying closest to
/// its latitude. `None` when no neighbor makes progress.
pub fn lateral_step(tiles: &TileArena, from: TileId, heading: Heading) -> Option<TileId> {
    let here = tiles[from].center;
    let direction = heading.tangent(here);
    if direction == Vec3::ZERO {
        return None;
    }

    let mut best: Option<(TileId, f32)> = None;
    for &neighbor in tiles.neighbors(from) {
        let there = tiles[neighbor].center;
        if (there - here).dot(direction) <= 0.0 {
            continue;
        }
        let drift = (there.y - here.y).abs();
        if best.is_none_or(|(_, best_drift)| drift < best_drift) {
            best = Some((neighbor, drift));
        }
    }
    best.map(|(id, _)| id)
}
