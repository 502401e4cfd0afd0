//! Rigid frames: an origin point plus an orientation quaternion.
//!
//! `Transform3d` is the one representation used throughout the engine for a
//! body's world frame and for a shape's fixed offset inside its owning body.
//! All operations are pure and stateless; nothing here mutates in place.

use glam::{Mat3, Quat, Vec3};

/// An origin point plus an orientation, used both as a body's world frame and
/// as a shape's local offset inside its body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3d {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Transform3d {
    pub const IDENTITY: Transform3d = Transform3d {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    #[must_use]
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation: orientation.normalize(),
        }
    }

    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
        }
    }

    /// Maps a point from this frame's local space into world space.
    #[must_use]
    pub fn point_place_in(&self, local_point: Vec3) -> Vec3 {
        self.orientation * local_point + self.position
    }

    /// Maps a world-space point into this frame's local space. Inverse of
    /// [`Self::point_place_in`].
    #[must_use]
    pub fn point_relative_to(&self, world_point: Vec3) -> Vec3 {
        self.orientation.inverse() * (world_point - self.position)
    }

    /// Rotates a direction from local space into world space (ignores
    /// translation).
    #[must_use]
    pub fn direction_place_in(&self, local_dir: Vec3) -> Vec3 {
        self.orientation * local_dir
    }

    /// Rotates a direction from world space into local space (ignores
    /// translation). Inverse of [`Self::direction_place_in`].
    #[must_use]
    pub fn direction_relative_to(&self, world_dir: Vec3) -> Vec3 {
        self.orientation.inverse() * world_dir
    }

    /// Composes two frames: `parent.then(child)` is the frame of `child` as
    /// seen from the space `parent` is embedded in. Quaternion composition is
    /// `q_parent * q_child`.
    #[must_use]
    pub fn then(&self, child: &Transform3d) -> Transform3d {
        Transform3d {
            position: self.point_place_in(child.position),
            orientation: (self.orientation * child.orientation).normalize(),
        }
    }

    #[must_use]
    pub fn inverse(&self) -> Transform3d {
        let inv_orientation = self.orientation.inverse();
        Transform3d {
            position: inv_orientation * (-self.position),
            orientation: inv_orientation,
        }
    }

    pub fn translate_by(&mut self, v: Vec3) {
        self.position += v;
    }

    pub fn rotate_around_own(&mut self, axis: Vec3, angle: f32) {
        let axis = axis.normalize();
        self.orientation = (self.orientation * Quat::from_axis_angle(axis, angle)).normalize();
    }

    /// The rotation matrix for this frame's orientation, used to transform
    /// local inertia tensors into world space (`R * I_local * R^T`).
    #[must_use]
    pub fn rotation_matrix(&self) -> Mat3 {
        Mat3::from_quat(self.orientation)
    }
}

impl Default for Transform3d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Integrates an orientation forward by `dt` given an angular velocity
/// (world-space, rad/s): `q' = normalize(q + 0.5 dt (omega ⊗ q))`.
#[must_use]
pub fn integrate_orientation(q: Quat, omega: Vec3, dt: f32) -> Quat {
    let omega_quat = Quat::from_xyzw(omega.x, omega.y, omega.z, 0.0);
    let dq = omega_quat * q;
    let integrated = Quat::from_xyzw(
        q.x + 0.5 * dt * dq.x,
        q.y + 0.5 * dt * dq.y,
        q.z + 0.5 * dt * dq.z,
        q.w + 0.5 * dt * dq.w,
    );
    integrated.normalize()
}
