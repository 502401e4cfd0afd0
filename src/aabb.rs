//! Axis-aligned bounding boxes used by the broad phase and by `Convex`'s
//! fallback inertia approximation.

use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[must_use]
    pub fn of_point(p: Vec3) -> Self {
        Self { min: p, max: p }
    }

    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut iter = points.into_iter();
        let first = iter.next().unwrap_or(Vec3::ZERO);
        let mut aabb = Aabb::of_point(first);
        for p in iter {
            aabb.extend_with_point(p);
        }
        aabb
    }

    pub fn extend_with_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn extend(&mut self, other: &Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.max + self.min) * 0.5
    }

    #[must_use]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_boxes_detected() {
        let a = Aabb { min: Vec3::new(0.0, 0.0, 0.0), max: Vec3::new(1.0, 1.0, 1.0) };
        let b = Aabb { min: Vec3::new(0.5, 0.5, 0.5), max: Vec3::new(2.0, 2.0, 2.0) };
        assert!(a.overlaps(&b));
    }

    #[test]
    fn separated_boxes_not_overlapping() {
        let a = Aabb { min: Vec3::new(0.0, 0.0, 0.0), max: Vec3::new(1.0, 1.0, 1.0) };
        let b = Aabb { min: Vec3::new(2.0, 2.0, 2.0), max: Vec3::new(3.0, 3.0, 3.0) };
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn extend_grows_to_contain_both() {
        let mut a = Aabb { min: Vec3::new(0.0, 0.0, 0.0), max: Vec3::new(1.0, 1.0, 1.0) };
        let b = Aabb { min: Vec3::new(-1.0, 2.0, 0.0), max: Vec3::new(0.5, 3.0, 4.0) };
        a.extend(&b);
        assert_eq!(a.min, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(a.max, Vec3::new(1.0, 3.0, 4.0));
    }
}
