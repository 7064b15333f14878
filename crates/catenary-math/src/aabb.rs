use crate::Point2;
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box in the span plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb2 {
    pub min: Point2,
    pub max: Point2,
}

impl Aabb2 {
    /// Degenerate box holding a single point.
    pub fn from_point(p: Point2) -> Self {
        Self { min: p, max: p }
    }

    /// Grow the box so it contains `p`.
    pub fn include(&self, p: Point2) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn test_include_grows_box() {
        let b = Aabb2::from_point(dvec2(1.0, 2.0))
            .include(dvec2(-1.0, 5.0))
            .include(dvec2(3.0, -1.0));
        assert_eq!(b.min, dvec2(-1.0, -1.0));
        assert_eq!(b.max, dvec2(3.0, 5.0));
        assert_eq!(b.include(dvec2(0.0, 0.0)), b);
    }

    #[test]
    fn test_merge() {
        let a = Aabb2::from_point(dvec2(0.0, 0.0)).include(dvec2(2.0, 2.0));
        let b = Aabb2::from_point(dvec2(1.0, -3.0)).include(dvec2(4.0, 1.0));
        let m = a.merge(&b);
        assert_eq!(m.min, dvec2(0.0, -3.0));
        assert_eq!(m.max, dvec2(4.0, 2.0));
    }
}
