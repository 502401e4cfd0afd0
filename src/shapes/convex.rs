//! Convex polyhedra: construction, adjacency, and the hull operations the
//! SAT narrow-phase kernel and the broad phase both need.

use glam::{Mat3, Vec3};

use crate::aabb::Aabb;
use crate::consts::EPS_PARALLEL;
use crate::error::BuildError;
use crate::transform::Transform3d;

/// The plane of a face adjacent to another face, recorded as a point on that
/// plane plus its outward normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdjacentFace {
    pub point: Vec3,
    pub normal: Vec3,
}

/// One planar face of a [`Convex`] hull: vertex indices in CCW winding
/// (viewed from outside), its outward unit normal, and the faces it shares
/// an edge with.
#[derive(Clone, Debug)]
pub struct Face {
    pub vertices: Vec<usize>,
    pub normal: Vec3,
    pub adjacent_faces: Vec<AdjacentFace>,
}

/// An immutable convex polyhedron in its own local frame.
#[derive(Clone, Debug)]
pub struct Convex {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Face>,
    pub unique_normals: Vec<Vec3>,
    pub unique_edges: Vec<Vec3>,
    /// Centroid of the hull's vertices, in local space.
    pub position: Vec3,
    /// Inertia tensor for unit mass, approximated from the hull's AABB —
    /// exact polyhedral inertia is out of scope for this engine.
    pub inertia: Mat3,
}

/// True if `a` and `b` are parallel or anti-parallel within [`EPS_PARALLEL`].
fn directions_collapse(a: Vec3, b: Vec3) -> bool {
    let d = a.dot(b);
    d > 1.0 - EPS_PARALLEL || d < -(1.0 - EPS_PARALLEL)
}

fn push_unique_direction(list: &mut Vec<Vec3>, dir: Vec3) {
    if list.iter().any(|existing| directions_collapse(*existing, dir)) {
        return;
    }
    list.push(dir);
}

impl Convex {
    /// Builds a hull from CCW face/vertex-index lists. Rejects any face with
    /// fewer than 3 vertices or whose first three vertices are collinear
    /// (zero-length normal).
    pub fn from_faces(
        face_vertex_lists: &[Vec<usize>],
        vertices: Vec<Vec3>,
    ) -> Result<Convex, BuildError> {
        let mut faces = Vec::with_capacity(face_vertex_lists.len());
        for (index, indices) in face_vertex_lists.iter().enumerate() {
            if indices.len() < 3 {
                return Err(BuildError::DegenerateFace { face: index });
            }
            let v0 = vertices[indices[0]];
            let v1 = vertices[indices[1]];
            let v2 = vertices[indices[2]];
            let normal = (v1 - v0).cross(v2 - v0);
            if normal.length_squared() < f32::EPSILON {
                tracing::debug!(face = index, "convex face rejected: collinear vertices");
                return Err(BuildError::DegenerateFace { face: index });
            }
            faces.push(Face {
                vertices: indices.clone(),
                normal: normal.normalize(),
                adjacent_faces: Vec::new(),
            });
        }

        let adjacency = compute_adjacency(&faces);
        for (face, neighbors) in faces.iter_mut().zip(adjacency) {
            face.adjacent_faces = neighbors
                .into_iter()
                .map(|j| AdjacentFace {
                    point: vertices[faces_first_vertex(&j)],
                    normal: j.normal,
                })
                .collect();
        }

        let unique_normals = dedup_normals(&faces);
        let unique_edges = dedup_edges(&faces, &vertices);
        let position = centroid(&vertices);
        let inertia = cuboid_inertia_from_aabb(&vertices);

        Ok(Convex {
            vertices,
            faces,
            unique_normals,
            unique_edges,
            position,
            inertia,
        })
    }

    /// The canonical axis-aligned box hull: 8 vertices, 6 faces, each face
    /// adjacent to the 4 faces that aren't its parallel opposite.
    #[must_use]
    pub fn cuboid(half_extents: Vec3) -> Convex {
        let (x, y, z) = (half_extents.x, half_extents.y, half_extents.z);
        let vertices = vec![
            Vec3::new(-x, -y, -z), // 0
            Vec3::new(x, -y, -z),  // 1
            Vec3::new(x, y, -z),   // 2
            Vec3::new(-x, y, -z),  // 3
            Vec3::new(-x, -y, z),  // 4
            Vec3::new(x, -y, z),   // 5
            Vec3::new(x, y, z),    // 6
            Vec3::new(-x, y, z),   // 7
        ];
        let face_indices: [(Vec<usize>, Vec3); 6] = [
            (vec![1, 2, 6, 5], Vec3::X),
            (vec![0, 4, 7, 3], Vec3::NEG_X),
            (vec![3, 7, 6, 2], Vec3::Y),
            (vec![0, 1, 5, 4], Vec3::NEG_Y),
            (vec![4, 5, 6, 7], Vec3::Z),
            (vec![0, 3, 2, 1], Vec3::NEG_Z),
        ];
        // opposite[i] is the index of the face parallel to face i.
        let opposite = [1, 0, 3, 2, 5, 4];

        let mut faces: Vec<Face> = face_indices
            .iter()
            .map(|(idx, normal)| Face {
                vertices: idx.clone(),
                normal: *normal,
                adjacent_faces: Vec::new(),
            })
            .collect();

        for i in 0..6 {
            let mut neighbors = Vec::with_capacity(4);
            for j in 0..6 {
                if j != i && j != opposite[i] {
                    neighbors.push(AdjacentFace {
                        point: vertices[faces[j].vertices[0]],
                        normal: faces[j].normal,
                    });
                }
            }
            faces[i].adjacent_faces = neighbors;
        }

        let unique_normals = vec![Vec3::X, Vec3::Y, Vec3::Z];
        let unique_edges = vec![Vec3::X, Vec3::Y, Vec3::Z];

        Convex {
            vertices,
            faces,
            unique_normals,
            unique_edges,
            position: Vec3::ZERO,
            inertia: box_inertia(half_extents, 1.0),
        }
    }

    /// Hull vertices transformed into world space.
    pub fn world_vertices(&self, transform: &Transform3d) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(move |v| transform.point_place_in(*v))
    }

    /// Min/max dot product of the hull's world-space vertices against `axis`
    /// (`axis` need not be unit length for comparison purposes, but SAT
    /// overlap math here assumes it is).
    #[must_use]
    pub fn project_onto_axis(&self, transform: &Transform3d, axis: Vec3) -> (f32, f32) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for v in self.world_vertices(transform) {
            let d = v.dot(axis);
            min = min.min(d);
            max = max.max(d);
        }
        (min, max)
    }

    #[must_use]
    pub fn aabb(&self, transform: &Transform3d) -> Aabb {
        Aabb::from_points(self.world_vertices(transform))
    }

    /// Farthest local vertex distance from the hull's own origin (not its
    /// centroid) — the radius a bounding sphere centered on the body origin
    /// must have to contain this hull.
    #[must_use]
    pub fn bounding_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.length())
            .fold(0.0_f32, f32::max)
    }

    #[must_use]
    pub fn face_vertices_world(&self, face: &Face, transform: &Transform3d) -> Vec<Vec3> {
        face.vertices
            .iter()
            .map(|&i| transform.point_place_in(self.vertices[i]))
            .collect()
    }
}

fn faces_first_vertex(face: &Face) -> usize {
    face.vertices[0]
}

fn compute_adjacency(faces: &[Face]) -> Vec<Vec<Face>> {
    faces
        .iter()
        .enumerate()
        .map(|(i, face)| {
            faces
                .iter()
                .enumerate()
                .filter(|(j, other)| {
                    *j != i && face.vertices.iter().any(|v| other.vertices.contains(v))
                })
                .map(|(_, other)| other.clone())
                .collect()
        })
        .collect()
}

fn dedup_normals(faces: &[Face]) -> Vec<Vec3> {
    let mut out = Vec::new();
    for face in faces {
        push_unique_direction(&mut out, face.normal);
    }
    out
}

fn dedup_edges(faces: &[Face], vertices: &[Vec3]) -> Vec<Vec3> {
    let mut out = Vec::new();
    for face in faces {
        let n = face.vertices.len();
        for i in 0..n {
            let a = vertices[face.vertices[i]];
            let b = vertices[face.vertices[(i + 1) % n]];
            let edge = b - a;
            if edge.length_squared() < f32::EPSILON {
                continue;
            }
            push_unique_direction(&mut out, edge.normalize());
        }
    }
    out
}

fn centroid(vertices: &[Vec3]) -> Vec3 {
    if vertices.is_empty() {
        return Vec3::ZERO;
    }
    vertices.iter().fold(Vec3::ZERO, |acc, v| acc + *v) / vertices.len() as f32
}

fn cuboid_inertia_from_aabb(vertices: &[Vec3]) -> Mat3 {
    let aabb = Aabb::from_points(vertices.iter().copied());
    box_inertia(aabb.half_extents(), 1.0)
}

/// Inertia tensor of a solid box (half-extents `he`) of mass `m` about its
/// own center, diagonal in the box's local frame.
fn box_inertia(he: Vec3, m: f32) -> Mat3 {
    let (x2, y2, z2) = (he.x * he.x, he.y * he.y, he.z * he.z);
    let ixx = (m / 3.0) * (y2 + z2);
    let iyy = (m / 3.0) * (x2 + z2);
    let izz = (m / 3.0) * (x2 + y2);
    Mat3::from_diagonal(Vec3::new(ixx, iyy, izz))
}
