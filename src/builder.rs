//! Fluent constructors for [`Body`], one per primitive shape plus a
//! compound-shape escape hatch.

use glam::Vec3;

use crate::body::{Behavior, Body};
use crate::shapes::{Convex, Shape};
use crate::transform::Transform3d;

impl Body {
    /// An infinite half-space behind the shape-local +Z plane. Always
    /// [`Behavior::Static`] at construction (callers can change it, though a
    /// non-static plane has no sensible mass distribution).
    #[must_use]
    pub fn plane() -> Body {
        Body::new(vec![(Transform3d::IDENTITY, Shape::Plane)], Behavior::Static)
    }

    /// A ball of the given radius, centered on the body origin. Defaults to
    /// [`Behavior::Dynamic`] with `mass = 1.0`.
    #[must_use]
    pub fn sphere(radius: f32) -> Body {
        Body::new(
            vec![(Transform3d::IDENTITY, Shape::Sphere { radius })],
            Behavior::Dynamic { mass: 1.0 },
        )
    }

    /// A point mass with no volume. Defaults to `Behavior::Dynamic` with
    /// `mass = 1.0`.
    #[must_use]
    pub fn particle() -> Body {
        Body::new(
            vec![(Transform3d::IDENTITY, Shape::Particle)],
            Behavior::Dynamic { mass: 1.0 },
        )
    }

    /// A rectangular box of full side lengths `(bx, by, bz)`, centered on
    /// the body origin. Defaults to `Behavior::Dynamic` with `mass = 1.0`.
    #[must_use]
    pub fn block(bx: f32, by: f32, bz: f32) -> Body {
        let half = Vec3::new(bx, by, bz) * 0.5;
        Body::new(
            vec![(Transform3d::IDENTITY, Shape::Convex(Convex::cuboid(half)))],
            Behavior::Dynamic { mass: 1.0 },
        )
    }

    /// A body made of several shapes rigidly attached at their given local
    /// transforms. Defaults to `Behavior::Dynamic` with `mass = 1.0`,
    /// distributed evenly across the shapes (see
    /// [`Body::recompute_mass_properties`]).
    #[must_use]
    pub fn compound(shapes: Vec<(Transform3d, Shape)>) -> Body {
        Body::new(shapes, Behavior::Dynamic { mass: 1.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Behavior;

    #[test]
    fn plane_is_static_by_default() {
        let body = Body::plane();
        assert!(body.behavior.is_static());
    }

    #[test]
    fn sphere_defaults_to_unit_mass() {
        let body = Body::sphere(2.0);
        assert_eq!(body.mass(), 1.0);
    }

    #[test]
    fn block_builds_a_single_convex_shape() {
        let body = Body::block(2.0, 4.0, 6.0);
        assert_eq!(body.shapes.len(), 1);
        match &body.shapes[0].1 {
            crate::shapes::Shape::Convex(c) => assert_eq!(c.vertices.len(), 8),
            _ => panic!("expected convex shape"),
        }
    }

    #[test]
    fn with_behavior_updates_mass_properties() {
        let body = Body::sphere(1.0).with_behavior(Behavior::Dynamic { mass: 4.0 });
        assert!((body.inv_mass() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn compound_combines_multiple_shapes() {
        let shapes = vec![
            (Transform3d::IDENTITY, Shape::Sphere { radius: 0.5 }),
            (Transform3d::from_position(Vec3::X), Shape::Sphere { radius: 0.5 }),
        ];
        let body = Body::compound(shapes);
        assert_eq!(body.shapes.len(), 2);
    }
}
