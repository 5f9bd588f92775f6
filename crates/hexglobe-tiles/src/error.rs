//! Tile graph invariant violations.

use crate::TileId;

/// A broken structural invariant of the mesh or the tile graph.
///
/// None of these are recoverable: a world built on top of them would be
/// internally inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    /// Two mesh vertices share the exact same position (midpoint dedup failed).
    #[error("mesh vertices {first} and {second} occupy the same position")]
    DuplicateVertex {
        /// Index of the first vertex at that position.
        first: u32,
        /// Index of the duplicate.
        second: u32,
    },

    /// No other face shares the edge `from`-`to` of `face`.
    #[error("face {face} has no neighbor across edge {from}-{to}")]
    MissingEdgeNeighbor {
        /// Face being extracted.
        face: u32,
        /// First edge vertex.
        from: u32,
        /// Second edge vertex.
        to: u32,
    },

    /// A neighbor appears twice in a tile's neighbor list.
    #[error("tile {tile} lists neighbor {neighbor} more than once")]
    DuplicateNeighbor {
        /// Tile being ordered.
        tile: TileId,
        /// Repeated neighbor.
        neighbor: TileId,
    },

    /// The boundary walk ran out of reachable neighbors before visiting all of them.
    #[error("neighbor walk of tile {tile} stalled after {placed} of {expected} neighbors")]
    StalledWalk {
        /// Tile being ordered.
        tile: TileId,
        /// Neighbors placed before the walk stalled.
        placed: usize,
        /// Total neighbors of the tile.
        expected: usize,
    },

    /// `tile` lists `neighbor`, but `neighbor` does not list `tile`.
    #[error("tile {tile} lists {neighbor} as a neighbor but not the other way around")]
    AsymmetricAdjacency {
        /// Tile holding the one-way link.
        tile: TileId,
        /// Target of the one-way link.
        neighbor: TileId,
    },

    /// A tile has neither five nor six neighbors.
    #[error("tile {tile} has {degree} neighbors, expected 5 or 6")]
    BadDegree {
        /// Offending tile.
        tile: TileId,
        /// Its neighbor count.
        degree: usize,
    },

    /// The tiling does not contain exactly twelve pentagons.
    #[error("found {found} pentagons, expected 12")]
    PentagonCount {
        /// Pentagons found.
        found: usize,
    },

    /// Neighbor rings that are not closed boundary walks.
    #[error("{count} neighbor rings are not closed boundary walks (first: tile {first})")]
    BrokenRings {
        /// Number of broken rings.
        count: usize,
        /// First tile with a broken ring.
        first: TileId,
    },
}
