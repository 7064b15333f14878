//! Parametric curves in the span plane.

mod chord;

use catenary_math::{Aabb2, Point2, Vector2};

use crate::tessellate;

pub use chord::Chord;

/// Trait for parametric curves in the vertical span plane.
pub trait Curve: Send + Sync {
    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point2;

    /// Evaluate the tangent vector at parameter `t`.
    fn tangent_at(&self, t: f64) -> Vector2;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    /// Approximate bounding box from `samples + 1` evenly spaced parameters.
    fn sampled_bounds(&self, samples: usize) -> Aabb2 {
        let (t0, t1) = self.domain();
        tessellate::bounding_box(|s| self.point_at(t0 + (t1 - t0) * s), samples)
    }

    /// Polyline within `tolerance` of the curve, see [`tessellate::curve_to_polyline`].
    fn polyline(&self, tolerance: f64) -> Vec<Point2> {
        let (t0, t1) = self.domain();
        tessellate::curve_to_polyline(|s| self.point_at(t0 + (t1 - t0) * s), tolerance)
    }
}
