//! Icosphere construction with shared-midpoint subdivision.

use glam::Vec3;
use hashbrown::HashMap;

use crate::MeshError;

/// A mesh vertex and the faces that reference it.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshVertex {
    /// Position on the sphere surface.
    pub position: Vec3,
    /// Indices of faces that use this vertex as a corner.
    pub sharers: Vec<u32>,
}

/// A triangular face, corners wound counter-clockwise seen from outside.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MeshFace {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl MeshFace {
    pub fn corners(&self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }

    pub fn contains(&self, vertex: u32) -> bool {
        self.a == vertex || self.b == vertex || self.c == vertex
    }
}

/// A subdivided icosahedron projected onto a sphere.
#[derive(Clone, Debug)]
pub struct Icosphere {
    radius: f32,
    vertices: Vec<MeshVertex>,
    faces: Vec<MeshFace>,
}

const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Bit pattern of a position, used for exact equality lookups.
fn position_key(p: Vec3) -> [u32; 3] {
    [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()]
}

impl Icosphere {
    /// The base icosahedron: 12 vertices and 20 faces on a sphere of `radius`.
    pub fn new(radius: f32) -> Self {
        // Golden ratio rectangles
        let t = (1.0 + 5.0_f32.sqrt()) / 2.0;

        let corners = [
            Vec3::new(-1.0, t, 0.0),
            Vec3::new(1.0, t, 0.0),
            Vec3::new(-1.0, -t, 0.0),
            Vec3::new(1.0, -t, 0.0),
            Vec3::new(0.0, -1.0, t),
            Vec3::new(0.0, 1.0, t),
            Vec3::new(0.0, -1.0, -t),
            Vec3::new(0.0, 1.0, -t),
            Vec3::new(t, 0.0, -1.0),
            Vec3::new(t, 0.0, 1.0),
            Vec3::new(-t, 0.0, -1.0),
            Vec3::new(-t, 0.0, 1.0),
        ];

        let vertices = corners
            .into_iter()
            .map(|p| MeshVertex {
                position: p.normalize() * radius,
                sharers: Vec::new(),
            })
            .collect();
        let faces = ICOSAHEDRON_FACES
            .iter()
            .map(|&[a, b, c]| MeshFace { a, b, c })
            .collect();

        let mut sphere = Self {
            radius,
            vertices,
            faces,
        };
        sphere.rebuild_sharers();
        sphere
    }

    /// The icosahedron subdivided `depth` times.
    pub fn with_subdivisions(radius: f32, depth: u32) -> Self {
        let mut sphere = Self::new(radius);
        for _ in 0..depth {
            sphere.subdivide();
        }
        sphere
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[MeshFace] {
        &self.faces
    }

    pub fn position(&self, vertex: u32) -> Vec3 {
        self.vertices[vertex as usize].position
    }

    /// Split every face into four.
    ///
    /// Existing vertices keep their indices; midpoints are appended. Faces
    /// sharing an edge compute the same midpoint bit for bit, so the lookup
    /// resolves them to a single vertex.
    pub fn subdivide(&mut self) {
        let mut midpoints: HashMap<[u32; 3], u32> =
            HashMap::with_capacity(self.faces.len() * 3 / 2);
        let mut faces = Vec::with_capacity(self.faces.len() * 4);

        let old_faces = std::mem::take(&mut self.faces);
        for face in &old_faces {
            let MeshFace { a, b, c } = *face;
            let ab = self.midpoint(a, b, &mut midpoints);
            let bc = self.midpoint(b, c, &mut midpoints);
            let ca = self.midpoint(c, a, &mut midpoints);

            faces.push(MeshFace { a, b: ab, c: ca });
            faces.push(MeshFace { a: b, b: bc, c: ab });
            faces.push(MeshFace { a: c, b: ca, c: bc });
            faces.push(MeshFace { a: ab, b: bc, c: ca });
        }

        self.faces = faces;
        self.rebuild_sharers();
    }

    fn midpoint(&mut self, a: u32, b: u32, cache: &mut HashMap<[u32; 3], u32>) -> u32 {
        let mid = ((self.position(a) + self.position(b)) * 0.5).normalize() * self.radius;
        *cache.entry(position_key(mid)).or_insert_with(|| {
            self.vertices.push(MeshVertex {
                position: mid,
                sharers: Vec::new(),
            });
            (self.vertices.len() - 1) as u32
        })
    }

    fn rebuild_sharers(&mut self) {
        for vertex in &mut self.vertices {
            vertex.sharers.clear();
        }
        for (i, face) in self.faces.iter().enumerate() {
            for corner in face.corners() {
                self.vertices[corner as usize].sharers.push(i as u32);
            }
        }
    }

    /// Fail if two vertices occupy the same position.
    pub fn check_unique_vertices(&self) -> Result<(), MeshError> {
        let mut seen: HashMap<[u32; 3], u32> = HashMap::with_capacity(self.vertices.len());
        for (i, vertex) in self.vertices.iter().enumerate() {
            if let Some(&first) = seen.get(&position_key(vertex.position)) {
                return Err(MeshError::DuplicateVertex {
                    first,
                    second: i as u32,
                });
            }
            seen.insert(position_key(vertex.position), i as u32);
        }
        Ok(())
    }
}

#[cfg(test)]
impl Icosphere {
    /// Remove one face, leaving a hole in the surface.
    pub(crate) fn remove_face(&mut self, face: usize) {
        self.faces.remove(face);
        self.rebuild_sharers();
    }
}
