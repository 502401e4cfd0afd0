//! The simulation aggregate: owns every [`Body`] and user [`Constraint`],
//! and advances them through time with [`World::simulate`].
//!
//! `World` is the only piece of shared, mutable state in the engine. Bodies
//! live in a map keyed by [`BodyId`] rather than behind pointers to each
//! other, which is what lets the solver run its own pass-local body array
//! (`solver::SolverBody`) without the borrow-checker fights a graph of
//! `Rc<RefCell<Body>>` cross-references would invite.

use std::collections::{BTreeMap, HashMap};

use glam::{Mat3, Vec3};

use crate::body::{Behavior, Body, BodyId};
use crate::broad_phase;
use crate::collision::{self, Contact};
use crate::constraint::Constraint;
use crate::equation::{contact_equations, SolverEquation};
use crate::raycast::{self, Ray, RaycastHit};
use crate::solver::{self, SolverBody};
use crate::transform::integrate_orientation;

/// Owns every body and constraint in a simulation. Bodies are addressed by
/// the [`BodyId`] handed back from [`World::add`]; the `World` itself
/// assigns and owns ids, so there are no dangling pointers to worry about —
/// only ids that may no longer resolve to a body (see [`World::update`]).
pub struct World {
    bodies: BTreeMap<BodyId, Body>,
    next_id: u64,
    pub gravity: Vec3,
    constraints: Vec<(BodyId, BodyId, Constraint)>,
    simulated_time: f32,
    last_contacts: Vec<Contact>,
}

impl World {
    /// An empty world with zero gravity.
    #[must_use]
    pub fn empty() -> World {
        World {
            bodies: BTreeMap::new(),
            next_id: 0,
            gravity: Vec3::ZERO,
            constraints: Vec::new(),
            simulated_time: 0.0,
            last_contacts: Vec::new(),
        }
    }

    /// An empty world with the given gravity vector (e.g. `Vec3::new(0.0,
    /// 0.0, -9.81)`).
    #[must_use]
    pub fn with_gravity(gravity: Vec3) -> World {
        World { gravity, ..World::empty() }
    }

    /// Adds `body` to the world and returns its freshly assigned id. Ids are
    /// assigned in increasing order and never reused, even after the body
    /// they named is removed.
    pub fn add(&mut self, mut body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        body.id = id;
        self.bodies.insert(id, body);
        id
    }

    /// Removes a body. A no-op (logged, not an error) if `id` no longer
    /// resolves to a body.
    pub fn remove(&mut self, id: BodyId) {
        if self.bodies.remove(&id).is_none() {
            tracing::debug!(body = id.index(), "World::remove: no such body");
        }
    }

    /// Mutates the body named by `id` in place. A no-op (logged, not an
    /// error) if `id` no longer resolves to a body.
    pub fn update(&mut self, id: BodyId, f: impl FnOnce(&mut Body)) {
        match self.bodies.get_mut(&id) {
            Some(body) => f(body),
            None => tracing::debug!(body = id.index(), "World::update: no such body"),
        }
    }

    /// Removes every body for which `predicate` returns `false`.
    pub fn keep_if(&mut self, mut predicate: impl FnMut(&Body) -> bool) {
        self.bodies.retain(|_, body| predicate(body));
    }

    /// Looks up a single body by id.
    #[must_use]
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    /// Every body in the world, in ascending-id order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter().map(|(id, body)| (*id, body))
    }

    /// Registers a user constraint between two bodies, compiled into solver
    /// equations fresh every step. Constraints referencing a removed body
    /// are silently skipped at compile time, not rejected here.
    pub fn add_constraint(&mut self, body_a: BodyId, body_b: BodyId, constraint: Constraint) {
        self.constraints.push((body_a, body_b, constraint));
    }

    /// Total simulated time elapsed across every call to [`World::simulate`].
    #[must_use]
    pub fn simulated_time(&self) -> f32 {
        self.simulated_time
    }

    /// The contact list produced by the most recent [`World::simulate`]
    /// call, retained read-only for caller-side debugging/visualization.
    /// Never consumed by the next step — every step rebuilds its own list.
    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        &self.last_contacts
    }

    /// Casts `ray` against every shape of every body and returns the
    /// nearest hit, if any.
    #[must_use]
    pub fn raycast(&self, ray: Ray) -> Option<RaycastHit> {
        raycast::cast(ray, self.bodies())
    }

    /// Advances the world by `dt` seconds: integrate forces, find contacts,
    /// compile equations, solve, integrate positions. Never fails — numeric
    /// degeneracies are resolved by skipping the offending candidate deep in
    /// the narrow phase/solver, not by aborting the step.
    pub fn simulate(&mut self, dt: f32) {
        self.integrate_velocities(dt);
        self.integrate_positions(dt);

        let pairs = {
            let refs: Vec<(BodyId, &Body)> = self.bodies();
            broad_phase::find_pairs(&refs)
        };

        let mut contacts = Vec::new();
        for (id_a, id_b) in pairs {
            let body_a = &self.bodies[&id_a];
            let body_b = &self.bodies[&id_b];
            contacts.extend(collision::contacts_for_pair(id_a, body_a, id_b, body_b));
        }

        let mut equations = self.compile_equations(&contacts, dt);
        let mut solver_bodies = self.solver_bodies();
        solver::iterate(&mut equations, &mut solver_bodies);
        self.apply_solver_result(&solver_bodies);

        for body in self.bodies.values_mut() {
            body.force = Vec3::ZERO;
            body.torque = Vec3::ZERO;
        }

        self.last_contacts = contacts;
        self.simulated_time += dt;
    }

    /// Step 1-2: gravity and force/torque integration. Only `Dynamic`
    /// bodies carry forces — a `Kinematic` body's velocity is caller-driven
    /// and a `Static` body never moves.
    fn integrate_velocities(&mut self, dt: f32) {
        for body in self.bodies.values_mut() {
            if let Behavior::Dynamic { mass } = body.behavior {
                let total_force = body.force + mass * self.gravity;
                body.linear_velocity += total_force * body.inv_mass() * dt;
                body.angular_velocity += body.inv_inertia_world() * (body.torque * dt);
            }
        }
    }

    /// Step 3: position/orientation integration for every body whose
    /// velocity should move it (`Dynamic` and `Kinematic`, not `Static`).
    fn integrate_positions(&mut self, dt: f32) {
        for body in self.bodies.values_mut() {
            if body.behavior.is_static() {
                continue;
            }
            body.frame.position += body.linear_velocity * dt;
            body.frame.orientation = integrate_orientation(body.frame.orientation, body.angular_velocity, dt);
            body.sync_inertia_world();
        }
    }

    /// Step 6: compiles user constraints (in `add_constraint` call order)
    /// followed by contact equations (in narrow-phase dispatch order) into
    /// one flat equation list, ready for the solver.
    fn compile_equations(&self, contacts: &[Contact], dt: f32) -> Vec<SolverEquation> {
        let mut equations = Vec::new();
        for (id_a, id_b, constraint) in &self.constraints {
            let (Some(body_a), Some(body_b)) = (self.bodies.get(id_a), self.bodies.get(id_b)) else {
                tracing::debug!(
                    body_a = id_a.index(),
                    body_b = id_b.index(),
                    "constraint references a body missing from the world; skipped"
                );
                continue;
            };
            equations.extend(constraint.compile(*id_a, body_a, *id_b, body_b, dt));
        }
        for contact in contacts {
            let body_a = &self.bodies[&contact.body_a];
            let body_b = &self.bodies[&contact.body_b];
            let normal_row = equations.len();
            equations.extend(contact_equations(contact, body_a, body_b, dt, normal_row));
        }
        equations
    }

    /// The solver's own pass-local body array, seeded from current
    /// velocities. Bodies that don't receive solver impulses (`Static`,
    /// `Kinematic`) get a zeroed inverse mass/inertia so no equation can
    /// move them, regardless of which side of a row they appear on.
    fn solver_bodies(&self) -> HashMap<BodyId, SolverBody> {
        self.bodies
            .iter()
            .map(|(id, body)| {
                let receives = body.behavior.receives_solver_impulses();
                let solver_body = SolverBody {
                    inv_mass: if receives { body.inv_mass() } else { 0.0 },
                    inv_inertia_world: if receives { body.inv_inertia_world() } else { Mat3::ZERO },
                    linear_velocity: body.linear_velocity,
                    angular_velocity: body.angular_velocity,
                };
                (*id, solver_body)
            })
            .collect()
    }

    /// Step 8: writes the solver's resulting velocities back onto the real
    /// bodies. Harmless for bodies the solver couldn't move — their
    /// velocity is unchanged because their contribution was zeroed out in
    /// [`World::solver_bodies`].
    fn apply_solver_result(&mut self, solver_bodies: &HashMap<BodyId, SolverBody>) {
        for (id, body) in &mut self.bodies {
            if let Some(solved) = solver_bodies.get(id) {
                body.linear_velocity = solved.linear_velocity;
                body.angular_velocity = solved.angular_velocity;
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        World::empty()
    }
}
