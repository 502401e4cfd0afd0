//! Ray vs world intersection, used for picking and sensor queries (not for
//! continuous collision — the engine's contacts are discrete per §1).

use glam::Vec3;

use crate::body::{Body, BodyId};
use crate::shapes::Shape;
use crate::transform::Transform3d;

/// A ray with a unit-length direction.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Ray {
        Ray { origin, direction: direction.normalize() }
    }
}

/// The nearest intersection of a [`Ray`] against a body's surface.
/// `point` and `normal` are expressed in the hit body's own frame.
#[derive(Clone, Copy, Debug)]
pub struct RaycastHit {
    pub body: BodyId,
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
}

/// Finds the closest hit across every shape of every body in `bodies`.
pub fn cast<'a>(ray: Ray, bodies: impl Iterator<Item = (BodyId, &'a Body)>) -> Option<RaycastHit> {
    let mut best: Option<RaycastHit> = None;
    for (id, body) in bodies {
        for (local, shape) in &body.shapes {
            let world_transform = body.frame().then(local);
            if let Some((t, point_world, normal_world)) = intersect_shape(&ray, &world_transform, shape) {
                let closer = match &best {
                    Some(existing) => t < existing.distance,
                    None => true,
                };
                if closer {
                    best = Some(RaycastHit {
                        body: id,
                        point: body.frame().point_relative_to(point_world),
                        normal: body.frame().direction_relative_to(normal_world),
                        distance: t,
                    });
                }
            }
        }
    }
    best
}

fn intersect_shape(ray: &Ray, transform: &Transform3d, shape: &Shape) -> Option<(f32, Vec3, Vec3)> {
    let origin_local = transform.point_relative_to(ray.origin);
    let dir_local = transform.direction_relative_to(ray.direction);

    let (t, point_local, normal_local) = match shape {
        Shape::Plane => intersect_plane(origin_local, dir_local)?,
        Shape::Sphere { radius } => intersect_sphere(origin_local, dir_local, *radius)?,
        Shape::Particle => return None,
        Shape::Convex(convex) => intersect_convex(origin_local, dir_local, convex)?,
    };

    let point_world = transform.point_place_in(point_local);
    let normal_world = transform.direction_place_in(normal_local);
    Some((t, point_world, normal_world))
}

fn intersect_plane(origin: Vec3, dir: Vec3) -> Option<(f32, Vec3, Vec3)> {
    let normal = Vec3::Z;
    let denom = dir.dot(normal);
    if denom.abs() < crate::consts::EPS_PRECISION {
        return None;
    }
    let t = -origin.dot(normal) / denom;
    if t < 0.0 {
        return None;
    }
    let point = origin + dir * t;
    let facing_normal = if denom < 0.0 { normal } else { -normal };
    Some((t, point, facing_normal))
}

fn intersect_sphere(origin: Vec3, dir: Vec3, radius: f32) -> Option<(f32, Vec3, Vec3)> {
    let a = dir.dot(dir);
    let b = 2.0 * origin.dot(dir);
    let c = origin.dot(origin) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_disc = discriminant.sqrt();
    let t0 = (-b - sqrt_disc) / (2.0 * a);
    let t1 = (-b + sqrt_disc) / (2.0 * a);
    let t = if t0 >= 0.0 {
        t0
    } else if t1 >= 0.0 {
        t1
    } else {
        return None;
    };
    let point = origin + dir * t;
    let normal = point.normalize();
    Some((t, point, normal))
}

fn intersect_convex(origin: Vec3, dir: Vec3, convex: &crate::shapes::Convex) -> Option<(f32, Vec3, Vec3)> {
    let mut best: Option<(f32, Vec3, Vec3)> = None;
    for face in &convex.faces {
        let v0 = convex.vertices[face.vertices[0]];
        let denom = dir.dot(face.normal);
        if denom.abs() < crate::consts::EPS_PRECISION {
            continue;
        }
        let t = face.normal.dot(v0 - origin) / denom;
        if t < 0.0 {
            continue;
        }
        let point = origin + dir * t;
        if !point_in_polygon(&convex.vertices, face, point) {
            continue;
        }
        let closer = match best {
            Some((best_t, _, _)) => t < best_t,
            None => true,
        };
        if closer {
            best = Some((t, point, face.normal));
        }
    }
    best
}

fn point_in_polygon(vertices: &[Vec3], face: &crate::shapes::Face, point: Vec3) -> bool {
    let n = face.vertices.len();
    for i in 0..n {
        let v0 = vertices[face.vertices[i]];
        let v1 = vertices[face.vertices[(i + 1) % n]];
        let edge = v1 - v0;
        let to_point = point - v0;
        if edge.cross(to_point).dot(face.normal) < 0.0 {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;

    #[test]
    fn ray_hits_sphere_from_above() {
        let sphere = Body::sphere(1.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = cast(ray, std::iter::once((BodyId(0), &sphere))).unwrap();
        assert!((hit.distance - 4.0).abs() < 1e-4);
        assert!((hit.point - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-4);
        assert!((hit.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-4);
    }

    #[test]
    fn ray_misses_sphere_when_offset_past_radius() {
        let sphere = Body::sphere(1.0);
        let ray = Ray::new(Vec3::new(5.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(cast(ray, std::iter::once((BodyId(0), &sphere))).is_none());
    }

    #[test]
    fn ray_hits_plane() {
        let plane = Body::plane();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = cast(ray, std::iter::once((BodyId(0), &plane))).unwrap();
        assert!((hit.distance - 3.0).abs() < 1e-4);
    }

    #[test]
    fn ray_parallel_to_plane_misses() {
        let plane = Body::plane();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(cast(ray, std::iter::once((BodyId(0), &plane))).is_none());
    }

    #[test]
    fn particle_never_reports_a_hit() {
        let particle = Body::particle();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(cast(ray, std::iter::once((BodyId(0), &particle))).is_none());
    }

    #[test]
    fn ray_hits_block_face() {
        let block = Body::block(2.0, 2.0, 2.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = cast(ray, std::iter::once((BodyId(0), &block))).unwrap();
        assert!((hit.distance - 4.0).abs() < 1e-4);
    }
}
