//! User-declared joints, compiled to [`SolverEquation`]s once per step.

use glam::Vec3;

use crate::body::{Body, BodyId};
use crate::equation::{tangent_basis, ForceBound, Jacobian, SolverEquation};

/// A rigid constraint between two bodies, given in each body's own local
/// frame so it tracks the bodies as they move.
#[derive(Clone, Copy, Debug)]
pub enum Constraint {
    /// Pins a point on `body_a` to a point on `body_b`. 3 equations.
    PointToPoint { pivot_a: Vec3, pivot_b: Vec3 },
    /// Pins a point, as `PointToPoint`, and additionally locks the two
    /// tangent directions of `axis_a`/`axis_b` together so only rotation
    /// about the shared axis is free. 5 equations.
    Hinge { axis_a: Vec3, pivot_a: Vec3, axis_b: Vec3, pivot_b: Vec3 },
    /// Holds the distance between the two body origins at the given length.
    /// 1 equation.
    Distance(f32),
    /// Fully welds the two bodies together: pivot coincidence plus full
    /// orientation lock. 6 equations.
    Lock,
}

/// Stiffness/damping shared by every equation a constraint compiles to.
/// Joints default to very stiff, lightly-damped springs — soft enough to
/// stay numerically well-conditioned, stiff enough to look rigid.
const JOINT_STIFFNESS: f32 = 1e7;
const JOINT_DAMPING: f32 = 3.0;

impl Constraint {
    /// Compiles this constraint into its SPOOK equations for one step.
    pub fn compile(
        &self,
        body_a_id: BodyId,
        body_a: &Body,
        body_b_id: BodyId,
        body_b: &Body,
        dt: f32,
    ) -> Vec<SolverEquation> {
        match *self {
            Constraint::PointToPoint { pivot_a, pivot_b } => {
                point_to_point_equations(body_a_id, body_a, body_b_id, body_b, pivot_a, pivot_b, dt)
            }
            Constraint::Hinge { axis_a, pivot_a, axis_b, pivot_b } => {
                let mut equations =
                    point_to_point_equations(body_a_id, body_a, body_b_id, body_b, pivot_a, pivot_b, dt);
                let world_axis_a = body_a.frame().direction_place_in(axis_a).normalize();
                let (t1, t2) = tangent_basis(world_axis_a);
                let world_axis_b = body_b.frame().direction_place_in(axis_b).normalize();
                for tangent in [t1, t2] {
                    let error = tangent.dot(world_axis_b);
                    let jacobian_a = Jacobian { spatial: Vec3::ZERO, rotational: -tangent.cross(world_axis_b) };
                    let jacobian_b = Jacobian { spatial: Vec3::ZERO, rotational: tangent.cross(world_axis_b) };
                    equations.push(SolverEquation::new(
                        body_a_id,
                        body_a,
                        body_b_id,
                        body_b,
                        jacobian_a,
                        jacobian_b,
                        error,
                        JOINT_STIFFNESS,
                        JOINT_DAMPING,
                        dt,
                        ForceBound::Fixed { min_force: f32::NEG_INFINITY, max_force: f32::INFINITY },
                    ));
                }
                equations
            }
            Constraint::Distance(length) => {
                let delta = body_b.frame().position - body_a.frame().position;
                let dist = delta.length();
                let direction = if dist > f32::EPSILON { delta / dist } else { Vec3::X };
                let error = dist - length;
                let jacobian_a = Jacobian { spatial: -direction, rotational: Vec3::ZERO };
                let jacobian_b = Jacobian { spatial: direction, rotational: Vec3::ZERO };
                vec![SolverEquation::new(
                    body_a_id,
                    body_a,
                    body_b_id,
                    body_b,
                    jacobian_a,
                    jacobian_b,
                    error,
                    JOINT_STIFFNESS,
                    JOINT_DAMPING,
                    dt,
                    ForceBound::Fixed { min_force: f32::NEG_INFINITY, max_force: f32::INFINITY },
                )]
            }
            Constraint::Lock => {
                let mut equations =
                    point_to_point_equations(body_a_id, body_a, body_b_id, body_b, Vec3::ZERO, Vec3::ZERO, dt);
                for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
                    let world_a = body_a.frame().direction_place_in(axis);
                    let world_b = body_b.frame().direction_place_in(axis);
                    let error = world_a.cross(world_b).length();
                    let jacobian_a = Jacobian { spatial: Vec3::ZERO, rotational: -axis };
                    let jacobian_b = Jacobian { spatial: Vec3::ZERO, rotational: axis };
                    equations.push(SolverEquation::new(
                        body_a_id,
                        body_a,
                        body_b_id,
                        body_b,
                        jacobian_a,
                        jacobian_b,
                        error,
                        JOINT_STIFFNESS,
                        JOINT_DAMPING,
                        dt,
                        ForceBound::Fixed { min_force: f32::NEG_INFINITY, max_force: f32::INFINITY },
                    ));
                }
                equations
            }
        }
    }
}

fn point_to_point_equations(
    body_a_id: BodyId,
    body_a: &Body,
    body_b_id: BodyId,
    body_b: &Body,
    pivot_a: Vec3,
    pivot_b: Vec3,
    dt: f32,
) -> Vec<SolverEquation> {
    let world_pivot_a = body_a.frame().point_place_in(pivot_a);
    let world_pivot_b = body_b.frame().point_place_in(pivot_b);
    let r_a = world_pivot_a - body_a.frame().position;
    let r_b = world_pivot_b - body_b.frame().position;
    let error = world_pivot_a - world_pivot_b;

    [Vec3::X, Vec3::Y, Vec3::Z]
        .into_iter()
        .map(|axis| {
            let jacobian_a = Jacobian { spatial: axis, rotational: r_a.cross(axis) };
            let jacobian_b = Jacobian { spatial: -axis, rotational: -r_b.cross(axis) };
            SolverEquation::new(
                body_a_id,
                body_a,
                body_b_id,
                body_b,
                jacobian_a,
                jacobian_b,
                error.dot(axis),
                JOINT_STIFFNESS,
                JOINT_DAMPING,
                dt,
                ForceBound::Fixed { min_force: f32::NEG_INFINITY, max_force: f32::INFINITY },
            )
        })
        .collect()
}

impl Constraint {
    #[must_use]
    pub fn point_to_point(pivot_a: Vec3, pivot_b: Vec3) -> Constraint {
        Constraint::PointToPoint { pivot_a, pivot_b }
    }

    #[must_use]
    pub fn hinge(axis_a: Vec3, pivot_a: Vec3, axis_b: Vec3, pivot_b: Vec3) -> Constraint {
        Constraint::Hinge { axis_a, pivot_a, axis_b, pivot_b }
    }

    #[must_use]
    pub fn distance(length: f32) -> Constraint {
        Constraint::Distance(length)
    }

    #[must_use]
    pub fn lock() -> Constraint {
        Constraint::Lock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Behavior;

    #[test]
    fn point_to_point_compiles_to_three_equations() {
        let a = Body::sphere(1.0).with_behavior(Behavior::Dynamic { mass: 1.0 });
        let b = Body::sphere(1.0).move_to(Vec3::new(3.0, 0.0, 0.0));
        let c = Constraint::point_to_point(Vec3::new(1.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        let equations = c.compile(BodyId(0), &a, BodyId(1), &b, 1.0 / 60.0);
        assert_eq!(equations.len(), 3);
    }

    #[test]
    fn hinge_compiles_to_five_equations() {
        let a = Body::sphere(1.0);
        let b = Body::sphere(1.0).move_to(Vec3::new(2.0, 0.0, 0.0));
        let c = Constraint::hinge(Vec3::X, Vec3::ZERO, Vec3::X, Vec3::ZERO);
        let equations = c.compile(BodyId(0), &a, BodyId(1), &b, 1.0 / 60.0);
        assert_eq!(equations.len(), 5);
    }

    #[test]
    fn lock_compiles_to_six_equations() {
        let a = Body::sphere(1.0);
        let b = Body::sphere(1.0).move_to(Vec3::new(2.0, 0.0, 0.0));
        let equations = Constraint::lock().compile(BodyId(0), &a, BodyId(1), &b, 1.0 / 60.0);
        assert_eq!(equations.len(), 6);
    }

    #[test]
    fn distance_compiles_to_one_equation() {
        let a = Body::sphere(1.0);
        let b = Body::sphere(1.0).move_to(Vec3::new(2.0, 0.0, 0.0));
        let equations = Constraint::distance(2.0).compile(BodyId(0), &a, BodyId(1), &b, 1.0 / 60.0);
        assert_eq!(equations.len(), 1);
    }
}
