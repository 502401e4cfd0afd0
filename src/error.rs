//! Error types surfaced by the engine's fallible constructors.
//!
//! `World::simulate` never fails: numeric degeneracies (a near-zero
//! denominator, a separating axis with vanishing magnitude, two concentric
//! spheres) are resolved by skipping the offending candidate, not by
//! returning an error. The only constructor that can reject its input is
//! [`crate::shapes::Convex::from_faces`].

use std::fmt;

/// A convex hull could not be built from the supplied face/vertex data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// A face listed fewer than 3 vertices, or its vertices were collinear
    /// (producing a zero-length face normal).
    DegenerateFace {
        /// Index into the `face_vertex_lists` argument that was rejected.
        face: usize,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::DegenerateFace { face } => {
                write!(f, "face {face} is degenerate: fewer than 3 vertices or a zero-length normal")
            }
        }
    }
}

impl std::error::Error for BuildError {}
