//! Candidate-pair pruning: O(n²) bounding-sphere overlap test.
//!
//! A spatial index would cut this down for large body counts, but this
//! engine targets scenes of a few hundred bodies, where the quadratic scan
//! is simpler and fast enough.

use crate::body::{Body, BodyId};

/// Every ordered pair `(a, b)` with `a < b` whose bounding spheres overlap.
/// Static–Static pairs are skipped since neither side can move into contact.
#[must_use]
pub fn find_pairs(bodies: &[(BodyId, &Body)]) -> Vec<(BodyId, BodyId)> {
    let mut pairs = Vec::new();
    for i in 0..bodies.len() {
        let (id_a, body_a) = bodies[i];
        for &(id_b, body_b) in &bodies[i + 1..] {
            if body_a.behavior.is_static() && body_b.behavior.is_static() {
                continue;
            }
            let distance = (body_a.frame().position - body_b.frame().position).length();
            if distance <= body_a.bounding_sphere_radius() + body_b.bounding_sphere_radius() {
                let (lo, hi) = if id_a < id_b { (id_a, id_b) } else { (id_b, id_a) };
                pairs.push((lo, hi));
            }
        }
    }
    pairs
}
