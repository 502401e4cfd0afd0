//! The nine shape-pair contact kernels. Each is written for a fixed
//! `(lower_tag, higher_tag)` argument order; [`super::dispatch`] is the only
//! place that reverses a pair for the opposite order.

use glam::Vec3;

use crate::consts::EPS_PRECISION;
use crate::shapes::Convex;
use crate::transform::Transform3d;

type RawContact = (Vec3, Vec3, Vec3);

pub fn plane_plane() -> Vec<RawContact> {
    Vec::new()
}

/// Shared by Plane–Sphere and Plane–Particle (`radius = 0`).
pub fn plane_sphere(plane: &Transform3d, sphere: &Transform3d, radius: f32) -> Vec<RawContact> {
    let n = plane.direction_place_in(Vec3::Z);
    let v = sphere.position - radius * n;
    let d = n.dot(v - plane.position);
    if d <= 0.0 {
        vec![(n, v - d * n, v)]
    } else {
        Vec::new()
    }
}

pub fn plane_convex(plane: &Transform3d, convex_world: &Transform3d, convex: &Convex) -> Vec<RawContact> {
    let n = plane.direction_place_in(Vec3::Z);
    convex
        .world_vertices(convex_world)
        .filter_map(|v| {
            let d = n.dot(v - plane.position);
            (d <= 0.0).then_some((n, v - d * n, v))
        })
        .collect()
}

/// Shared by Sphere–Sphere and Sphere–Particle (`radius2 = 0`). Concentric
/// spheres have no well-defined normal and are skipped.
pub fn sphere_sphere(a: &Transform3d, radius_a: f32, b: &Transform3d, radius_b: f32) -> Vec<RawContact> {
    let delta = b.position - a.position;
    let dist = delta.length();
    if dist < EPS_PRECISION {
        tracing::trace!("sphere-sphere kernel skipped: concentric centers");
        return Vec::new();
    }
    let d = dist - radius_a - radius_b;
    if d <= 0.0 {
        let ni = delta / dist;
        let pi = a.position + (radius_a - d) * ni;
        let pj = b.position - radius_b * ni;
        vec![(ni, pi, pj)]
    } else {
        Vec::new()
    }
}

/// True if `point` (in the face's own plane) lies inside the face polygon,
/// tested edge by edge with a consistent-sign cross-product check.
fn point_in_face_polygon(vertices_local: &[Vec3], face: &crate::shapes::Face, point: Vec3) -> bool {
    let n = face.vertices.len();
    for i in 0..n {
        let v0 = vertices_local[face.vertices[i]];
        let v1 = vertices_local[face.vertices[(i + 1) % n]];
        let edge = v1 - v0;
        let to_point = point - v0;
        if edge.cross(to_point).dot(face.normal) < 0.0 {
            return false;
        }
    }
    true
}

pub fn sphere_convex(
    sphere: &Transform3d,
    radius: f32,
    convex_world: &Transform3d,
    convex: &Convex,
) -> Vec<RawContact> {
    let center_local = convex_world.point_relative_to(sphere.position);

    for face in &convex.faces {
        let v0 = convex.vertices[face.vertices[0]];
        let d = face.normal.dot(center_local - v0);
        if d > 0.0 && d < radius {
            let projected = center_local - d * face.normal;
            if point_in_face_polygon(&convex.vertices, face, projected) {
                let pj_local = projected;
                let ni = -convex_world.direction_place_in(face.normal).normalize();
                let pj = convex_world.point_place_in(pj_local);
                let pi = sphere.position + radius * ni;
                return vec![(ni, pi, pj)];
            }
        }
    }

    let mut best_edge: Option<(f32, Vec3)> = None;
    let mut seen_edges: Vec<(usize, usize)> = Vec::new();
    for face in &convex.faces {
        let n = face.vertices.len();
        for i in 0..n {
            let i0 = face.vertices[i];
            let i1 = face.vertices[(i + 1) % n];
            let key = if i0 < i1 { (i0, i1) } else { (i1, i0) };
            if seen_edges.contains(&key) {
                continue;
            }
            seen_edges.push(key);
            let a = convex.vertices[i0];
            let b = convex.vertices[i1];
            let edge = b - a;
            let len2 = edge.length_squared();
            if len2 < f32::EPSILON {
                continue;
            }
            let t = ((center_local - a).dot(edge) / len2).clamp(0.0, 1.0);
            let closest = a + edge * t;
            let dist = (center_local - closest).length();
            if best_edge.map_or(true, |(best, _)| dist < best) {
                best_edge = Some((dist, closest));
            }
        }
    }
    if let Some((dist, closest)) = best_edge {
        if dist < radius && dist > EPS_PRECISION {
            let ni_local = (closest - center_local) / dist;
            let ni = convex_world.direction_place_in(ni_local).normalize();
            let pj = convex_world.point_place_in(closest);
            let pi = sphere.position + radius * ni;
            return vec![(ni, pi, pj)];
        }
    }

    let mut best_vertex: Option<(f32, Vec3)> = None;
    for &v in &convex.vertices {
        let dist = (center_local - v).length();
        if best_vertex.map_or(true, |(best, _)| dist < best) {
            best_vertex = Some((dist, v));
        }
    }
    if let Some((dist, v)) = best_vertex {
        if dist < radius && dist > EPS_PRECISION {
            let ni_local = (v - center_local) / dist;
            let ni = convex_world.direction_place_in(ni_local).normalize();
            let pj = convex_world.point_place_in(v);
            let pi = sphere.position + radius * ni;
            return vec![(ni, pi, pj)];
        }
    }

    Vec::new()
}

pub fn particle_convex(
    particle: &Transform3d,
    convex_world: &Transform3d,
    convex: &Convex,
) -> Vec<RawContact> {
    let point_local = convex_world.point_relative_to(particle.position);
    let mut deepest: Option<(f32, Vec3)> = None;
    for face in &convex.faces {
        let v0 = convex.vertices[face.vertices[0]];
        let d = face.normal.dot(v0 - point_local);
        if d < 0.0 {
            return Vec::new();
        }
        if deepest.map_or(true, |(best, _)| d < best) {
            deepest = Some((d, face.normal));
        }
    }
    match deepest {
        Some((d, normal_local)) => {
            let ni = -convex_world.direction_place_in(normal_local).normalize();
            let pj_local = point_local + d * normal_local;
            let pj = convex_world.point_place_in(pj_local);
            vec![(ni, particle.position, pj)]
        }
        None => Vec::new(),
    }
}

pub fn convex_convex(
    world1: &Transform3d,
    c1: &Convex,
    world2: &Transform3d,
    c2: &Convex,
) -> Vec<RawContact> {
    let mut axes = Vec::new();
    for n in &c1.unique_normals {
        axes.push(world1.direction_place_in(*n).normalize());
    }
    for n in &c2.unique_normals {
        axes.push(world2.direction_place_in(*n).normalize());
    }
    for e1 in &c1.unique_edges {
        let w1 = world1.direction_place_in(*e1);
        for e2 in &c2.unique_edges {
            let w2 = world2.direction_place_in(*e2);
            let cross = w1.cross(w2);
            if cross.length_squared() > EPS_PRECISION * EPS_PRECISION {
                axes.push(cross.normalize());
            }
        }
    }

    let mut best_axis = Vec3::ZERO;
    let mut best_overlap = f32::INFINITY;
    for axis in &axes {
        let (min1, max1) = c1.project_onto_axis(world1, *axis);
        let (min2, max2) = c2.project_onto_axis(world2, *axis);
        let overlap = max1.min(max2) - min1.max(min2);
        if overlap <= 0.0 {
            return Vec::new();
        }
        if overlap < best_overlap {
            best_overlap = overlap;
            best_axis = *axis;
        }
    }
    if best_axis == Vec3::ZERO {
        return Vec::new();
    }
    if (world2.position - world1.position).dot(best_axis) < 0.0 {
        best_axis = -best_axis;
    }

    // `best_axis` points hull1 -> hull2: hull1's contact face is the one
    // most aligned with it, hull2's is the one most anti-aligned.
    let reference = c1
        .faces
        .iter()
        .max_by(|a, b| {
            let da = world1.direction_place_in(a.normal).dot(best_axis);
            let db = world1.direction_place_in(b.normal).dot(best_axis);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("convex hull has at least one face");
    let incident = c2
        .faces
        .iter()
        .min_by(|a, b| {
            let da = world2.direction_place_in(a.normal).dot(best_axis);
            let db = world2.direction_place_in(b.normal).dot(best_axis);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("convex hull has at least one face");

    let n_ref = world1.direction_place_in(reference.normal).normalize();
    let ref_vertices_world: Vec<Vec3> = reference
        .vertices
        .iter()
        .map(|&i| world1.point_place_in(c1.vertices[i]))
        .collect();
    let mut incident_polygon: Vec<Vec3> = incident
        .vertices
        .iter()
        .map(|&i| world2.point_place_in(c2.vertices[i]))
        .collect();

    let n = ref_vertices_world.len();
    for i in 0..n {
        let v0 = ref_vertices_world[i];
        let v1 = ref_vertices_world[(i + 1) % n];
        let side_normal = n_ref.cross(v1 - v0);
        let plane_constant = -side_normal.dot(v0);
        incident_polygon = clip_polygon(&incident_polygon, side_normal, plane_constant);
        if incident_polygon.is_empty() {
            return Vec::new();
        }
    }

    let ref_plane_constant = -n_ref.dot(ref_vertices_world[0]);
    incident_polygon
        .into_iter()
        .filter_map(|v| {
            let d = n_ref.dot(v) + ref_plane_constant;
            (d <= 0.0).then_some((best_axis, v - d * n_ref, v))
        })
        .collect()
}

/// Sutherland–Hodgman: keeps the part of `polygon` on the negative side of
/// the plane `normal · x + plane_constant <= 0`, interpolating new vertices
/// at every edge that crosses the plane.
fn clip_polygon(polygon: &[Vec3], normal: Vec3, plane_constant: f32) -> Vec<Vec3> {
    if polygon.is_empty() {
        return Vec::new();
    }
    let len = polygon.len();
    let mut output = Vec::with_capacity(len + 1);
    for i in 0..len {
        let current = polygon[i];
        let next = polygon[(i + 1) % len];
        let d_current = normal.dot(current) + plane_constant;
        let d_next = normal.dot(next) + plane_constant;
        if d_current <= 0.0 {
            output.push(current);
        }
        if (d_current <= 0.0) != (d_next <= 0.0) {
            let denom = d_current - d_next;
            if denom.abs() > EPS_PRECISION {
                let t = d_current / denom;
                output.push(current + (next - current) * t);
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Convex;

    #[test]
    fn plane_sphere_touching_produces_no_contact() {
        let plane = Transform3d::IDENTITY;
        let sphere = Transform3d::from_position(Vec3::new(0.0, 0.0, 2.0));
        assert!(plane_sphere(&plane, &sphere, 1.0).is_empty());
    }

    #[test]
    fn plane_sphere_penetrating_produces_contact() {
        let plane = Transform3d::IDENTITY;
        let sphere = Transform3d::from_position(Vec3::new(0.0, 0.0, 0.5));
        let contacts = plane_sphere(&plane, &sphere, 1.0);
        assert_eq!(contacts.len(), 1);
        assert!((contacts[0].0 - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn sphere_sphere_overlap_normal_points_outward() {
        let a = Transform3d::IDENTITY;
        let b = Transform3d::from_position(Vec3::new(1.5, 0.0, 0.0));
        let contacts = sphere_sphere(&a, 1.0, &b, 1.0);
        assert_eq!(contacts.len(), 1);
        assert!((contacts[0].0 - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn sphere_sphere_concentric_is_skipped() {
        let a = Transform3d::IDENTITY;
        let b = Transform3d::IDENTITY;
        assert!(sphere_sphere(&a, 1.0, &b, 1.0).is_empty());
    }

    #[test]
    fn convex_convex_separated_boxes_no_contact() {
        let c1 = Convex::cuboid(Vec3::ONE);
        let c2 = Convex::cuboid(Vec3::ONE);
        let w1 = Transform3d::IDENTITY;
        let w2 = Transform3d::from_position(Vec3::new(10.0, 0.0, 0.0));
        assert!(convex_convex(&w1, &c1, &w2, &c2).is_empty());
    }

    #[test]
    fn convex_convex_overlapping_boxes_produce_contacts() {
        let c1 = Convex::cuboid(Vec3::ONE);
        let c2 = Convex::cuboid(Vec3::ONE);
        let w1 = Transform3d::IDENTITY;
        let w2 = Transform3d::from_position(Vec3::new(1.5, 0.0, 0.0));
        let contacts = convex_convex(&w1, &c1, &w2, &c2);
        assert!(!contacts.is_empty());
        for (ni, pi, pj) in &contacts {
            assert!(ni.dot(Vec3::X).abs() > 0.99);
            // pi must sit on hull1's face actually facing hull2 (x=1), not
            // the far face (x=-1); pj likewise on hull2's near face (x=0.5).
            assert!((pi.x - 1.0).abs() < 1e-4, "pi should be on box1's near face: pi={pi}");
            assert!((pj.x - 0.5).abs() < 1e-4, "pj should be on box2's near face: pj={pj}");
            let penetration = (*pj - *pi).dot(*ni);
            assert!((-1.0..0.0).contains(&penetration), "penetration={penetration}");
        }
    }

    #[test]
    fn convex_convex_stacked_boxes_contact_sits_between_them() {
        let c1 = Convex::cuboid(Vec3::splat(0.5));
        let c2 = Convex::cuboid(Vec3::splat(0.5));
        let w1 = Transform3d::IDENTITY;
        let w2 = Transform3d::from_position(Vec3::new(0.0, 0.0, 0.9));
        let contacts = convex_convex(&w1, &c1, &w2, &c2);
        assert!(!contacts.is_empty());
        for (ni, pi, pj) in &contacts {
            assert!(ni.dot(Vec3::Z) > 0.99);
            assert!((pi.z - 0.5).abs() < 1e-4, "pi should be on box1's top face: pi={pi}");
            assert!((pj.z - 0.4).abs() < 1e-4, "pj should be on box2's bottom face: pj={pj}");
            let penetration = (*pj - *pi).dot(*ni);
            assert!((-0.2..0.0).contains(&penetration), "penetration={penetration}");
        }
    }

    #[test]
    fn particle_convex_inside_box_has_contact() {
        let convex = Convex::cuboid(Vec3::ONE);
        let particle = Transform3d::from_position(Vec3::new(0.0, 0.0, 0.2));
        let world = Transform3d::IDENTITY;
        let contacts = particle_convex(&particle, &world, &convex);
        assert_eq!(contacts.len(), 1);
    }

    #[test]
    fn particle_convex_outside_box_has_no_contact() {
        let convex = Convex::cuboid(Vec3::ONE);
        let particle = Transform3d::from_position(Vec3::new(5.0, 0.0, 0.0));
        let world = Transform3d::IDENTITY;
        assert!(particle_convex(&particle, &world, &convex).is_empty());
    }

    #[test]
    fn sphere_convex_face_contact() {
        let convex = Convex::cuboid(Vec3::ONE);
        let sphere = Transform3d::from_position(Vec3::new(0.0, 0.0, 1.5));
        let world = Transform3d::IDENTITY;
        let contacts = sphere_convex(&sphere, 1.0, &world, &convex);
        assert_eq!(contacts.len(), 1);
        // ni points sphere -> convex, i.e. down into the box beneath it.
        let (ni, pi, pj) = contacts[0];
        assert!((ni - (-Vec3::Z)).length() < 1e-5);
        assert!((pi.z - 0.5).abs() < 1e-5, "pi should be on the sphere's surface: pi={pi}");
        assert!((pj.z - 1.0).abs() < 1e-5, "pj should be on the box's top face: pj={pj}");
        let penetration = (pj - pi).dot(ni);
        assert!(penetration < 0.0, "penetration={penetration}");
    }
}
