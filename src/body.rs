//! Rigid bodies: pose, velocity, mass properties, and compound shapes.

use std::any::Any;

use glam::{Mat3, Vec3};

use crate::material::Material;
use crate::shapes::Shape;
use crate::transform::Transform3d;

/// Stable identifier for a [`Body`] inside a [`crate::world::World`].
/// Ids are assigned in increasing order and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub(crate) u64);

impl BodyId {
    #[must_use]
    pub fn index(self) -> u64 {
        self.0
    }
}

/// How a body participates in integration and the solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Behavior {
    /// Infinite mass, never integrated, never receives solver impulses.
    Static,
    /// Ordinary rigid body: integrated and solved like any other mass.
    Dynamic { mass: f32 },
    /// Integrated like a Dynamic body (its velocity moves it) but excluded
    /// from the solver: it pushes other bodies around but is never itself
    /// corrected by a contact or constraint.
    Kinematic { mass: f32 },
}

impl Behavior {
    #[must_use]
    pub fn mass(self) -> f32 {
        match self {
            Behavior::Static => f32::INFINITY,
            Behavior::Dynamic { mass } | Behavior::Kinematic { mass } => mass,
        }
    }

    #[must_use]
    pub fn is_static(self) -> bool {
        matches!(self, Behavior::Static)
    }

    /// Whether the solver is allowed to apply an impulse to this body.
    #[must_use]
    pub fn receives_solver_impulses(self) -> bool {
        matches!(self, Behavior::Dynamic { .. })
    }
}

/// A rigid body: one or more shapes rigidly attached at fixed local offsets,
/// with a single combined mass distribution.
pub struct Body {
    pub(crate) id: BodyId,
    pub frame: Transform3d,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub force: Vec3,
    pub torque: Vec3,
    pub behavior: Behavior,
    pub material: Material,
    pub shapes: Vec<(Transform3d, Shape)>,

    pub(crate) inv_mass: f32,
    pub(crate) inv_inertia_local: Mat3,
    pub(crate) inv_inertia_world: Mat3,
    pub(crate) bounding_sphere_radius: f32,
    pub(crate) center_of_mass: Vec3,

    user_data: Option<Box<dyn Any>>,
}

impl Body {
    pub(crate) fn new(shapes: Vec<(Transform3d, Shape)>, behavior: Behavior) -> Self {
        let mut body = Body {
            id: BodyId(0),
            frame: Transform3d::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
            behavior,
            material: Material::default(),
            shapes,
            inv_mass: 0.0,
            inv_inertia_local: Mat3::ZERO,
            inv_inertia_world: Mat3::ZERO,
            bounding_sphere_radius: 0.0,
            center_of_mass: Vec3::ZERO,
            user_data: None,
        };
        body.recompute_mass_properties();
        body.sync_inertia_world();
        body
    }

    #[must_use]
    pub fn id(&self) -> BodyId {
        self.id
    }

    #[must_use]
    pub fn mass(&self) -> f32 {
        self.behavior.mass()
    }

    #[must_use]
    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    #[must_use]
    pub fn inv_inertia_world(&self) -> Mat3 {
        self.inv_inertia_world
    }

    #[must_use]
    pub fn bounding_sphere_radius(&self) -> f32 {
        self.bounding_sphere_radius
    }

    #[must_use]
    pub fn frame(&self) -> Transform3d {
        self.frame
    }

    /// Mass-weighted centroid of this body's shapes, in the body's local
    /// frame. Informational only: every kinematic formula in this engine
    /// (solver Jacobians, `velocity_at`, `apply_impulse`) pivots about
    /// `frame.position` directly, not about this point, matching cannon.js.
    #[must_use]
    pub fn center_of_mass(&self) -> Vec3 {
        self.center_of_mass
    }

    /// Recomputes `inv_mass`, `inv_inertia_local` (parallel-axis-summed over
    /// all shapes), and `bounding_sphere_radius` from the current shape list
    /// and behavior. Call after mutating `shapes` or `behavior` directly.
    pub fn recompute_mass_properties(&mut self) {
        let shape_count = self.shapes.len().max(1) as f32;
        self.center_of_mass = self
            .shapes
            .iter()
            .fold(Vec3::ZERO, |acc, (local, _)| acc + local.position)
            / shape_count;

        match self.behavior {
            Behavior::Static => {
                self.inv_mass = 0.0;
                self.inv_inertia_local = Mat3::ZERO;
                self.bounding_sphere_radius = self
                    .shapes
                    .iter()
                    .map(|(local, shape)| shape.bounding_sphere_radius(local))
                    .fold(0.0_f32, f32::max);
                return;
            }
            Behavior::Dynamic { mass } | Behavior::Kinematic { mass } => {
                self.inv_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
                let mut inertia = Mat3::ZERO;
                for (local, shape) in &self.shapes {
                    let per_shape_mass = mass / shape_count;
                    let local_inertia = shape.inertia_contribution(per_shape_mass);
                    let offset = local.position - self.center_of_mass;
                    inertia += parallel_axis_shift(local_inertia, per_shape_mass, offset);
                }
                self.inv_inertia_local = if inertia == Mat3::ZERO {
                    Mat3::ZERO
                } else {
                    inertia.inverse()
                };
                self.bounding_sphere_radius = self
                    .shapes
                    .iter()
                    .map(|(local, shape)| shape.bounding_sphere_radius(local))
                    .fold(0.0_f32, f32::max);
            }
        }
    }

    /// Recomputes `inv_inertia_world = R * inv_inertia_local * R^T` from the
    /// current orientation. Must be called after any change to `frame`.
    pub fn sync_inertia_world(&mut self) {
        let r = self.frame.rotation_matrix();
        self.inv_inertia_world = r * self.inv_inertia_local * r.transpose();
    }

    /// World-space linear velocity of the material point currently at
    /// `world_point`.
    #[must_use]
    pub fn velocity_at(&self, world_point: Vec3) -> Vec3 {
        let r = world_point - self.frame.position;
        self.linear_velocity + self.angular_velocity.cross(r)
    }

    /// Applies an instantaneous impulse of `magnitude` along `direction`
    /// (must be unit length; the caller is responsible for normalizing it)
    /// at world point `point`. No-op on a body that doesn't receive impulses.
    pub fn apply_impulse(&mut self, magnitude: f32, direction: Vec3, point: Vec3) {
        if !matches!(self.behavior, Behavior::Dynamic { .. }) {
            return;
        }
        let impulse = direction * magnitude;
        self.linear_velocity += impulse * self.inv_mass;
        let r = point - self.frame.position;
        self.angular_velocity += self.inv_inertia_world * r.cross(impulse);
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self.recompute_mass_properties();
        self
    }

    pub fn move_to(mut self, point: Vec3) -> Self {
        self.frame.position = point;
        self.sync_inertia_world();
        self
    }

    pub fn rotate_around(mut self, axis: Vec3, angle: f32) -> Self {
        self.frame.rotate_around_own(axis, angle);
        self.sync_inertia_world();
        self
    }

    /// Attaches an arbitrary caller-owned payload to this body (e.g. a
    /// handle into the caller's own entity store).
    pub fn with_data<T: Any>(mut self, data: T) -> Self {
        self.user_data = Some(Box::new(data));
        self
    }

    #[must_use]
    pub fn data<T: Any>(&self) -> Option<&T> {
        self.user_data.as_ref().and_then(|d| d.downcast_ref::<T>())
    }
}

/// Shifts a local inertia tensor (about the shape's own offset) to the
/// body's origin via the parallel-axis theorem: `I' = I + m(|r|^2 E - r r^T)`.
fn parallel_axis_shift(local_inertia: Mat3, mass: f32, offset: Vec3) -> Mat3 {
    let r2 = offset.length_squared();
    let outer = Mat3::from_cols(
        offset * offset.x,
        offset * offset.y,
        offset * offset.z,
    );
    local_inertia + (Mat3::IDENTITY * r2 - outer) * mass
}
