//! Projected Gauss–Seidel (Sequential Impulse) iteration over a step's
//! equations.

use std::collections::HashMap;

use glam::{Mat3, Vec3};

use crate::body::BodyId;
use crate::consts::{MAX_ITERATIONS, SOLVER_TOLERANCE};
use crate::equation::SolverEquation;

/// Per-body state the solver reads and writes. Kept separate from the real
/// [`crate::body::Body`] so a step's iteration never mutates world state
/// until it's done.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolverBody {
    pub inv_mass: f32,
    pub inv_inertia_world: Mat3,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
}

/// Runs up to [`MAX_ITERATIONS`] Gauss–Seidel sweeps over `equations`,
/// accumulating velocity deltas into `bodies` in place. Equations are
/// visited in their given (insertion) order every sweep; a contact's
/// friction rows must be inserted after its normal row so
/// [`crate::equation::ForceBound::CoupledToNormal`] sees this iteration's
/// value.
pub fn iterate(equations: &mut [SolverEquation], bodies: &mut HashMap<BodyId, SolverBody>) {
    for _ in 0..MAX_ITERATIONS {
        let mut delta_total = 0.0_f32;
        for i in 0..equations.len() {
            let eq = equations[i];
            let sa = *bodies
                .get(&eq.body_a)
                .expect("solver equation references a body missing from the solver pass");
            let sb = *bodies
                .get(&eq.body_b)
                .expect("solver equation references a body missing from the solver pass");

            let gw_lambda = eq.jacobian_a.spatial.dot(sa.linear_velocity)
                + eq.jacobian_a.rotational.dot(sa.angular_velocity)
                + eq.jacobian_b.spatial.dot(sb.linear_velocity)
                + eq.jacobian_b.rotational.dot(sb.angular_velocity);

            let unclamped = eq.lambda + eq.inv_c * (eq.bias - gw_lambda - eq.spook_eps * eq.lambda);
            let (min_impulse, max_impulse) = eq.impulse_bounds(equations);
            let lambda_new = unclamped.clamp(min_impulse, max_impulse);
            let applied = lambda_new - eq.lambda;
            equations[i].lambda = lambda_new;

            if let Some(body) = bodies.get_mut(&eq.body_a) {
                body.linear_velocity += applied * body.inv_mass * eq.jacobian_a.spatial;
                body.angular_velocity += applied * (body.inv_inertia_world * eq.jacobian_a.rotational);
            }
            if let Some(body) = bodies.get_mut(&eq.body_b) {
                body.linear_velocity += applied * body.inv_mass * eq.jacobian_b.spatial;
                body.angular_velocity += applied * (body.inv_inertia_world * eq.jacobian_b.rotational);
            }
            delta_total += applied.abs();
        }
        if delta_total < SOLVER_TOLERANCE {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equation::{ForceBound, Jacobian};

    fn solver_body(inv_mass: f32) -> SolverBody {
        SolverBody {
            inv_mass,
            inv_inertia_world: Mat3::ZERO,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        }
    }

    #[test]
    fn single_equation_drives_gw_lambda_toward_bias() {
        let a = BodyId(0);
        let b = BodyId(1);
        let mut bodies = HashMap::new();
        bodies.insert(a, solver_body(1.0));
        bodies.insert(b, solver_body(1.0));

        let mut equations = vec![SolverEquation {
            body_a: a,
            body_b: b,
            jacobian_a: Jacobian { spatial: -Vec3::X, rotational: Vec3::ZERO },
            jacobian_b: Jacobian { spatial: Vec3::X, rotational: Vec3::ZERO },
            bias: 1.0,
            spook_eps: 0.0,
            inv_c: 0.5,
            bound: ForceBound::Fixed { min_force: f32::NEG_INFINITY, max_force: f32::INFINITY },
            dt: 1.0 / 60.0,
            lambda: 0.0,
        }];

        iterate(&mut equations, &mut bodies);

        let gw_lambda = equations[0].jacobian_a.spatial.dot(bodies[&a].linear_velocity)
            + equations[0].jacobian_b.spatial.dot(bodies[&b].linear_velocity);
        assert!((gw_lambda - 1.0).abs() < 1e-3);
    }

    #[test]
    fn coupled_friction_bound_tracks_normal_lambda() {
        let a = BodyId(0);
        let b = BodyId(1);
        let mut bodies = HashMap::new();
        bodies.insert(a, solver_body(1.0));
        bodies.insert(b, solver_body(1.0));

        let mut equations = vec![
            SolverEquation {
                body_a: a,
                body_b: b,
                jacobian_a: Jacobian { spatial: -Vec3::Z, rotational: Vec3::ZERO },
                jacobian_b: Jacobian { spatial: Vec3::Z, rotational: Vec3::ZERO },
                bias: 5.0,
                spook_eps: 0.0,
                inv_c: 0.5,
                bound: ForceBound::Fixed { min_force: 0.0, max_force: f32::INFINITY },
                dt: 1.0 / 60.0,
                lambda: 0.0,
            },
            SolverEquation {
                body_a: a,
                body_b: b,
                jacobian_a: Jacobian { spatial: -Vec3::X, rotational: Vec3::ZERO },
                jacobian_b: Jacobian { spatial: Vec3::X, rotational: Vec3::ZERO },
                bias: 1000.0,
                spook_eps: 0.0,
                inv_c: 0.5,
                bound: ForceBound::CoupledToNormal { normal_row: 0, mu: 0.1 },
                dt: 1.0 / 60.0,
                lambda: 0.0,
            },
        ];

        iterate(&mut equations, &mut bodies);

        let normal_lambda = equations[0].lambda;
        let friction_lambda = equations[1].lambda;
        assert!(friction_lambda <= 0.1 * normal_lambda + 1e-4);
        assert!(friction_lambda >= -0.1 * normal_lambda - 1e-4);
    }
}
