//! Narrow phase: exact contact generation for a candidate body pair.

mod kernels;

use glam::Vec3;

use crate::body::{Body, BodyId};
use crate::material::combine_materials;
use crate::shapes::Shape;
use crate::transform::Transform3d;

/// One point of contact between two bodies.
///
/// `ni` points from `body_a`'s surface toward `body_b`'s. `pi` and `pj` are
/// the corresponding world-space points on each body's surface; when the
/// shapes interpenetrate they differ by the penetration depth along `ni`.
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    pub body_a: BodyId,
    pub body_b: BodyId,
    pub ni: Vec3,
    pub pi: Vec3,
    pub pj: Vec3,
    pub friction: f32,
    pub bounciness: f32,
}

/// Tag rank pinning the canonical argument order for kernel dispatch:
/// `Plane < Sphere < Particle < Convex`.
fn tag_rank(shape: &Shape) -> u8 {
    match shape {
        Shape::Plane => 0,
        Shape::Sphere { .. } => 1,
        Shape::Particle => 2,
        Shape::Convex(_) => 3,
    }
}

/// All contacts between every shape of `body_a` and every shape of
/// `body_b`. `id_a` and `id_b` are recorded on the produced contacts
/// verbatim (the caller is expected to pass `id_a < id_b`).
#[must_use]
pub fn contacts_for_pair(id_a: BodyId, body_a: &Body, id_b: BodyId, body_b: &Body) -> Vec<Contact> {
    let material = combine_materials(&body_a.material, &body_b.material);
    let mut contacts = Vec::new();
    for (local_a, shape_a) in &body_a.shapes {
        let world_a = body_a.frame.then(local_a);
        for (local_b, shape_b) in &body_b.shapes {
            let world_b = body_b.frame.then(local_b);
            for (ni, pi, pj) in dispatch(shape_a, &world_a, shape_b, &world_b) {
                contacts.push(Contact {
                    body_a: id_a,
                    body_b: id_b,
                    ni,
                    pi,
                    pj,
                    friction: material.friction,
                    bounciness: material.bounciness,
                });
            }
        }
    }
    contacts
}

/// Orients a shape pair to the pinned tag rank before calling the kernel,
/// then flips the result back to the caller's original `(a, b)` order.
fn dispatch(
    shape_a: &Shape,
    world_a: &Transform3d,
    shape_b: &Shape,
    world_b: &Transform3d,
) -> Vec<(Vec3, Vec3, Vec3)> {
    if tag_rank(shape_a) <= tag_rank(shape_b) {
        kernel_for_ranked_pair(shape_a, world_a, shape_b, world_b)
    } else {
        kernel_for_ranked_pair(shape_b, world_b, shape_a, world_a)
            .into_iter()
            .map(|(n, p_lo, p_hi)| (-n, p_hi, p_lo))
            .collect()
    }
}

/// Flat match over the nine defined shape-pair kernels. `shape_lo` always
/// has the lower (or equal) tag rank of the two arguments.
fn kernel_for_ranked_pair(
    shape_lo: &Shape,
    world_lo: &Transform3d,
    shape_hi: &Shape,
    world_hi: &Transform3d,
) -> Vec<(Vec3, Vec3, Vec3)> {
    match (shape_lo, shape_hi) {
        (Shape::Plane, Shape::Plane) => kernels::plane_plane(),
        (Shape::Plane, Shape::Sphere { radius }) => kernels::plane_sphere(world_lo, world_hi, *radius),
        (Shape::Plane, Shape::Particle) => kernels::plane_sphere(world_lo, world_hi, 0.0),
        (Shape::Plane, Shape::Convex(c)) => kernels::plane_convex(world_lo, world_hi, c),
        (Shape::Sphere { radius: r1 }, Shape::Sphere { radius: r2 }) => {
            kernels::sphere_sphere(world_lo, *r1, world_hi, *r2)
        }
        (Shape::Sphere { radius }, Shape::Particle) => kernels::sphere_sphere(world_lo, *radius, world_hi, 0.0),
        (Shape::Sphere { radius }, Shape::Convex(c)) => kernels::sphere_convex(world_lo, *radius, world_hi, c),
        (Shape::Particle, Shape::Particle) => Vec::new(),
        (Shape::Particle, Shape::Convex(c)) => kernels::particle_convex(world_lo, world_hi, c),
        (Shape::Convex(c1), Shape::Convex(c2)) => kernels::convex_convex(world_lo, c1, world_hi, c2),
        _ => {
            tracing::debug!("narrow phase called with an out-of-rank shape pair; no contact produced");
            Vec::new()
        }
    }
}
