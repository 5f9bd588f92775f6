//! Hexagonal/pentagonal tiling of a sphere.
//!
//! Builds a subdivided icosphere, turns it into its tile graph (one tile per
//! mesh vertex and one per mesh face), and orders every tile's neighbors into
//! a cyclic boundary walk. Tiles live in a [`TileArena`] and refer to each
//! other by [`TileId`].

mod biome;
mod dual;
mod error;
mod icosphere;
mod ordering;
mod tile;

pub mod validate;

pub use biome::Biome;
pub use dual::extract_tiles;
pub use error::MeshError;
pub use icosphere::{Icosphere, MeshFace, MeshVertex};
pub use ordering::{order_neighbors, ordered_ring};
pub use tile::{Relief, Tile, TileArena, TileId, UNASSIGNED};

/// Number of pentagonal tiles on any subdivided icosphere.
pub const PENTAGON_COUNT: usize = 12;

/// Build the ordered tile arena for a sphere of `radius` subdivided `depth` times.
///
/// Runs icosphere construction, the vertex-uniqueness check, dual-graph
/// extraction, neighbor ordering and the adjacency invariants in sequence.
pub fn build_tiles(radius: f32, depth: u32) -> Result<TileArena, MeshError> {
    let mesh = Icosphere::with_subdivisions(radius, depth);
    mesh.check_unique_vertices()?;
    tracing::debug!(
        vertices = mesh.vertices().len(),
        faces = mesh.faces().len(),
        depth,
        "icosphere built"
    );

    let mut tiles = extract_tiles(mesh)?;
    order_neighbors(&mut tiles)?;
    validate::check_symmetry(&tiles)?;
    validate::check_degrees(&tiles)?;
    Ok(tiles)
}
