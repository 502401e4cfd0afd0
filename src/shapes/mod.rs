//! Collision shapes and their per-kind geometric queries.

mod convex;

pub use convex::{AdjacentFace, Convex, Face};

use glam::{Mat3, Vec3};

use crate::aabb::Aabb;
use crate::transform::Transform3d;

/// A body's collision geometry. `Plane` and `Particle` have no intrinsic
/// size: a plane is the half-space behind its shape-local transform's XY
/// plane (outward normal +Z), a particle is a single point.
#[derive(Clone, Debug)]
pub enum Shape {
    Plane,
    Sphere { radius: f32 },
    Particle,
    Convex(Convex),
}

impl Shape {
    /// World-space AABB of this shape given the combined body+shape
    /// transform.
    #[must_use]
    pub fn aabb(&self, transform: &Transform3d) -> Aabb {
        match self {
            Shape::Plane => {
                // Unbounded; callers (the broad phase) special-case planes
                // rather than intersecting against this.
                let origin = transform.position;
                Aabb { min: origin, max: origin }
            }
            Shape::Sphere { radius } => Aabb {
                min: transform.position - Vec3::splat(*radius),
                max: transform.position + Vec3::splat(*radius),
            },
            Shape::Particle => Aabb::of_point(transform.position),
            Shape::Convex(convex) => convex.aabb(transform),
        }
    }

    /// Radius of a sphere centered on `local_transform.position` (the
    /// shape's offset within its body) that fully contains the shape, used
    /// by the broad phase's per-body bounding sphere.
    #[must_use]
    pub fn bounding_sphere_radius(&self, local_transform: &Transform3d) -> f32 {
        let offset = local_transform.position.length();
        match self {
            Shape::Plane => f32::INFINITY,
            Shape::Sphere { radius } => offset + radius,
            Shape::Particle => offset,
            Shape::Convex(convex) => offset + convex.bounding_radius(),
        }
    }

    /// Inertia tensor contribution for this shape alone, in the shape's own
    /// local frame, scaled to `mass`. Planes and particles contribute
    /// nothing (a plane is implicitly infinite/static; a particle has no
    /// rotational inertia).
    #[must_use]
    pub fn inertia_contribution(&self, mass: f32) -> Mat3 {
        match self {
            Shape::Plane | Shape::Particle => Mat3::ZERO,
            Shape::Sphere { radius } => {
                let i = 0.4 * mass * radius * radius;
                Mat3::from_diagonal(Vec3::splat(i))
            }
            Shape::Convex(convex) => convex.inertia * mass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_bounding_radius_includes_offset() {
        let shape = Shape::Sphere { radius: 1.0 };
        let local = Transform3d::from_position(Vec3::new(2.0, 0.0, 0.0));
        assert!((shape.bounding_sphere_radius(&local) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn particle_has_zero_inertia() {
        let shape = Shape::Particle;
        assert_eq!(shape.inertia_contribution(5.0), Mat3::ZERO);
    }

    #[test]
    fn sphere_inertia_scales_with_mass_and_radius_squared() {
        let shape = Shape::Sphere { radius: 2.0 };
        let i = shape.inertia_contribution(3.0);
        let expected = 0.4 * 3.0 * 4.0;
        assert!((i.x_axis.x - expected).abs() < 1e-5);
    }

    #[test]
    fn convex_aabb_matches_cuboid_half_extents() {
        let shape = Shape::Convex(Convex::cuboid(Vec3::new(1.0, 2.0, 3.0)));
        let aabb = shape.aabb(&Transform3d::IDENTITY);
        assert!((aabb.half_extents() - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
    }
}
