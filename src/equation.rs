//! SPOOK solver equations: one per scalar constraint row (a contact normal,
//! a friction direction, or one axis of a user [`crate::constraint::Constraint`]).

use glam::Vec3;

use crate::body::{Body, BodyId};
use crate::collision::Contact;
use crate::consts::{CONTACT_BOUNCINESS_THRESHOLD, CONTACT_DAMPING, CONTACT_STIFFNESS};

/// The two 6-wide halves (linear + angular) of a constraint row's Jacobian.
#[derive(Clone, Copy, Debug, Default)]
pub struct Jacobian {
    pub spatial: Vec3,
    pub rotational: Vec3,
}

/// How an equation's impulse is bounded. Contact friction rows couple their
/// bound to whatever the paired normal row's accumulated impulse currently
/// is; every other row has a fixed bound for the whole step.
#[derive(Clone, Copy, Debug)]
pub enum ForceBound {
    Fixed { min_force: f32, max_force: f32 },
    CoupledToNormal { normal_row: usize, mu: f32 },
}

/// One scalar row of the solver: `G·(v + Δv) = bias`, projected each
/// iteration to `[min_force, max_force]·dt`.
#[derive(Clone, Copy, Debug)]
pub struct SolverEquation {
    pub body_a: BodyId,
    pub body_b: BodyId,
    pub jacobian_a: Jacobian,
    pub jacobian_b: Jacobian,
    pub bias: f32,
    pub spook_eps: f32,
    pub inv_c: f32,
    pub bound: ForceBound,
    pub dt: f32,
    pub lambda: f32,
}

impl SolverEquation {
    /// Builds an equation from its Jacobian, the current constraint error
    /// `constraint_error` (the `C` in SPOOK notation), and stiffness/damping
    /// parameters `k`/`d`. Uses the standard SPOOK relation
    /// `beta = 4d/(1+4d)`, `spook_eps = 4/(dt(1+4d)k)`.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        body_a: BodyId,
        a: &Body,
        body_b: BodyId,
        b: &Body,
        jacobian_a: Jacobian,
        jacobian_b: Jacobian,
        constraint_error: f32,
        k: f32,
        d: f32,
        dt: f32,
        bound: ForceBound,
    ) -> SolverEquation {
        let beta = 4.0 * d / (1.0 + 4.0 * d);
        let spook_eps = 4.0 / (dt * (1.0 + 4.0 * d) * k);
        let bias = -(beta / dt) * constraint_error;

        let denom = a.inv_mass() * jacobian_a.spatial.length_squared()
            + jacobian_a.rotational.dot(a.inv_inertia_world() * jacobian_a.rotational)
            + b.inv_mass() * jacobian_b.spatial.length_squared()
            + jacobian_b.rotational.dot(b.inv_inertia_world() * jacobian_b.rotational);
        let inv_c = if denom + spook_eps > 0.0 { 1.0 / (denom + spook_eps) } else { 0.0 };

        SolverEquation {
            body_a,
            body_b,
            jacobian_a,
            jacobian_b,
            bias,
            spook_eps,
            inv_c,
            bound,
            dt,
            lambda: 0.0,
        }
    }

    /// `(min_impulse, max_impulse)` for the current iteration. Coupled
    /// friction rows read `equations[normal_row].lambda`, which must already
    /// be up to date for this iteration (insertion order puts every
    /// contact's normal row before its friction rows).
    #[must_use]
    pub fn impulse_bounds(&self, equations: &[SolverEquation]) -> (f32, f32) {
        match self.bound {
            ForceBound::Fixed { min_force, max_force } => (min_force * self.dt, max_force * self.dt),
            ForceBound::CoupledToNormal { normal_row, mu } => {
                let normal_lambda = equations[normal_row].lambda;
                let bound = mu * normal_lambda.max(0.0);
                (-bound, bound)
            }
        }
    }
}

/// Two unit vectors orthogonal to `axis` and to each other, used both as a
/// hinge's locked tangent plane and as a contact's friction directions.
#[must_use]
pub(crate) fn tangent_basis(axis: Vec3) -> (Vec3, Vec3) {
    let axis = axis.normalize();
    let helper = if axis.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let t1 = axis.cross(helper).normalize();
    let t2 = axis.cross(t1);
    (t1, t2)
}

/// Compiles one [`Contact`] into a normal equation (bound `[0, inf)`,
/// unilateral) followed by two friction equations whose bound is coupled to
/// the normal row's accumulated impulse. `normal_row` is the index the
/// normal equation will occupy in the caller's equation list — the caller
/// must push the returned equations at consecutive indices starting there.
#[must_use]
pub fn contact_equations(
    contact: &Contact,
    body_a: &Body,
    body_b: &Body,
    dt: f32,
    normal_row: usize,
) -> [SolverEquation; 3] {
    let r_a = contact.pi - body_a.frame().position;
    let r_b = contact.pj - body_b.frame().position;
    let ni = contact.ni;

    let penetration = (contact.pj - contact.pi).dot(ni);
    let jacobian_a = Jacobian { spatial: -ni, rotational: -r_a.cross(ni) };
    let jacobian_b = Jacobian { spatial: ni, rotational: r_b.cross(ni) };
    let mut normal_eq = SolverEquation::new(
        contact.body_a,
        body_a,
        contact.body_b,
        body_b,
        jacobian_a,
        jacobian_b,
        penetration,
        CONTACT_STIFFNESS,
        CONTACT_DAMPING,
        dt,
        ForceBound::Fixed { min_force: 0.0, max_force: f32::INFINITY },
    );

    let closing_velocity = ni.dot(body_b.velocity_at(contact.pj) - body_a.velocity_at(contact.pi));
    if closing_velocity < -CONTACT_BOUNCINESS_THRESHOLD {
        normal_eq.bias += -contact.bounciness * closing_velocity;
    }

    let (t1, t2) = tangent_basis(ni);
    let friction = [t1, t2].map(|t| {
        let jacobian_a = Jacobian { spatial: -t, rotational: -r_a.cross(t) };
        let jacobian_b = Jacobian { spatial: t, rotational: r_b.cross(t) };
        SolverEquation::new(
            contact.body_a,
            body_a,
            contact.body_b,
            body_b,
            jacobian_a,
            jacobian_b,
            0.0,
            CONTACT_STIFFNESS,
            CONTACT_DAMPING,
            dt,
            ForceBound::CoupledToNormal { normal_row, mu: contact.friction },
        )
    });

    [normal_eq, friction[0], friction[1]]
}
