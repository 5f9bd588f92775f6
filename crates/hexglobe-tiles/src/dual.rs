//! Tile graph extraction from a triangulated sphere.

use crate::{Icosphere, MeshError, Tile, TileArena, TileId};

/// Turn every mesh vertex and every mesh face into a tile.
///
/// Vertex tiles take ids `0..V` and border the faces around the vertex.
/// Face tiles take ids `V..V+F` and border their three corners plus the
/// three faces across their edges. The mesh is consumed.
pub fn extract_tiles(mesh: Icosphere) -> Result<TileArena, MeshError> {
    let vertex_count = mesh.vertices().len() as u32;
    let face_tile = |face: u32| TileId(vertex_count + face);

    let mut tiles = Vec::with_capacity(mesh.vertices().len() + mesh.faces().len());

    for (v, vertex) in mesh.vertices().iter().enumerate() {
        let neighbors = vertex.sharers.iter().map(|&f| face_tile(f)).collect();
        tiles.push(Tile::new(TileId(v as u32), vertex.position, neighbors));
    }

    for (f, face) in mesh.faces().iter().enumerate() {
        let f = f as u32;
        let [a, b, c] = face.corners();

        let mut neighbors = Vec::with_capacity(6);
        neighbors.extend([TileId(a), TileId(b), TileId(c)]);
        for (from, to) in [(a, b), (b, c), (c, a)] {
            neighbors.push(face_tile(edge_neighbor(&mesh, f, from, to)?));
        }

        let centroid = (mesh.position(a) + mesh.position(b) + mesh.position(c)) / 3.0;
        let center = centroid.normalize() * mesh.radius();
        tiles.push(Tile::new(face_tile(f), center, neighbors));
    }

    tracing::debug!(
        vertex_tiles = vertex_count,
        face_tiles = mesh.faces().len(),
        "tile graph extracted"
    );
    Ok(TileArena::from_tiles(tiles))
}

/// The face other than `face` that also holds the edge `from`-`to`.
fn edge_neighbor(mesh: &Icosphere, face: u32, from: u32, to: u32) -> Result<u32, MeshError> {
    mesh.vertices()[from as usize]
        .sharers
        .iter()
        .copied()
        .find(|&other| other != face && mesh.faces()[other as usize].contains(to))
        .ok_or(MeshError::MissingEdgeNeighbor { face, from, to })
}
