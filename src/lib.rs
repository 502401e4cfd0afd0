//! A fixed-step 3D rigid-body physics engine.
//!
//! `World` owns a set of [`Body`] values, each carrying one or more [`Shape`]
//! primitives, and advances them through time with [`World::simulate`]. Per
//! step the engine integrates forces, finds candidate pairs with a broad
//! phase, generates exact contacts with a narrow phase (Separating Axis
//! Theorem for convex hulls, closed-form kernels for planes/spheres/
//! particles), compiles contacts and user [`Constraint`]s into SPOOK
//! equations, and resolves them with a projected Gauss-Seidel solver.
//!
//! The engine is single-threaded and synchronous: a step is atomic, and the
//! caller owns the clock.

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aabb;
pub mod body;
pub mod broad_phase;
pub mod builder;
pub mod collision;
pub mod constraint;
pub mod consts;
pub mod equation;
pub mod error;
pub mod material;
pub mod raycast;
pub mod shapes;
pub mod solver;
pub mod transform;
pub mod world;

pub use aabb::Aabb;
pub use body::{Behavior, Body, BodyId};
pub use collision::Contact;
pub use constraint::Constraint;
pub use error::BuildError;
pub use glam::{Quat, Vec3};
pub use material::Material;
pub use raycast::{Ray, RaycastHit};
pub use shapes::{Convex, Shape};
pub use transform::Transform3d;
pub use world::World;
