//! Straight chord between two supports.

use catenary_math::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use super::Curve;

/// The straight line from `start` to `start + step`, parameterized over `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Chord {
    pub start: Point2,
    pub step: Vector2,
}

impl Chord {
    pub fn new(start: Point2, step: Vector2) -> Self {
        Self { start, step }
    }

    pub fn end(&self) -> Point2 {
        self.start + self.step
    }

    pub fn length(&self) -> f64 {
        self.step.length()
    }

    pub fn slope(&self) -> f64 {
        self.step.y / self.step.x
    }

    /// Chord height at horizontal offset `x` from the start.
    pub fn height_at(&self, x: f64) -> f64 {
        self.start.y + x * self.slope()
    }
}

impl Curve for Chord {
    fn point_at(&self, t: f64) -> Point2 {
        self.start + t * self.step
    }

    fn tangent_at(&self, _t: f64) -> Vector2 {
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catenary_math::dvec2;

    #[test]
    fn test_chord_point_at() {
        let chord = Chord::new(dvec2(0.0, 100.0), dvec2(500.0, 50.0));
        let p = chord.point_at(0.5);
        assert!((p.x - 250.0).abs() < 1e-10);
        assert!((p.y - 125.0).abs() < 1e-10);
    }

    #[test]
    fn test_chord_endpoints() {
        let chord = Chord::new(dvec2(1.0, 2.0), dvec2(4.0, -3.0));
        assert!((chord.point_at(0.0) - chord.start).length() < 1e-10);
        assert!((chord.point_at(1.0) - chord.end()).length() < 1e-10);
        assert!((chord.length() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_chord_height_at() {
        let chord = Chord::new(dvec2(10.0, 100.0), dvec2(500.0, 50.0));
        assert!((chord.height_at(0.0) - 100.0).abs() < 1e-10);
        assert!((chord.height_at(250.0) - 125.0).abs() < 1e-10);
        assert!((chord.height_at(500.0) - 150.0).abs() < 1e-10);
    }

    #[test]
    fn test_chord_tangent() {
        let chord = Chord::new(dvec2(0.0, 0.0), dvec2(3.0, 4.0));
        assert_eq!(chord.tangent_at(0.3), dvec2(3.0, 4.0));
        assert_eq!(chord.domain(), (0.0, 1.0));
    }
}
