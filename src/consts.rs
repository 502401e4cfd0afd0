//! Numerical constants calibrated for the step pipeline and narrow phase.
//!
//! Centralized here rather than scattered as magic numbers through the
//! modules that use them.

/// Below this, two candidate axis/edge directions are treated as parallel
/// (or anti-parallel) and collapsed during `Convex` construction.
pub const EPS_PARALLEL: f32 = 1e-4;

/// General-purpose precision epsilon: degenerate denominators, near-zero
/// vector lengths, SAT cross-product magnitudes below which an edge pair is
/// skipped as a candidate separating axis.
pub const EPS_PRECISION: f32 = 1e-6;

/// Maximum number of projected Gauss-Seidel sweeps per step.
pub const MAX_ITERATIONS: usize = 20;

/// Solver exits early once the total impulse correction in a sweep drops
/// below this.
pub const SOLVER_TOLERANCE: f32 = 1e-7;

/// Restitution is suppressed for closing speeds below this, to kill jitter
/// in resting contacts.
pub const CONTACT_BOUNCINESS_THRESHOLD: f32 = 1e-3;

/// SPOOK stiffness/damping for contact equations (normal and friction).
/// Softer than a joint's stiffness — contacts are unilateral and resolved
/// fresh every step, so they don't need to be as rigid as a welded joint.
pub const CONTACT_STIFFNESS: f32 = 1e6;
pub const CONTACT_DAMPING: f32 = 3.0;
