//! Sampling utilities for handing parametric curves to renderers and layout code.

use catenary_math::{Aabb2, Point2};

/// Number of segments used for bounding boxes unless the caller asks otherwise.
pub const DEFAULT_BOUND_SAMPLES: usize = 16;

/// Approximate bounding box of a parametric curve over `t in [0, 1]`.
///
/// The curve is evaluated at `samples + 1` evenly spaced parameters and the
/// results are folded into a box. Extremes between samples are missed, so this
/// is an approximation for viewport fitting, not a precision guarantee.
/// `samples == 0` is treated as one segment.
pub fn bounding_box<F>(curve: F, samples: usize) -> Aabb2
where
    F: Fn(f64) -> Point2,
{
    let n = samples.max(1);
    (1..=n).fold(Aabb2::from_point(curve(0.0)), |b, i| {
        b.include(curve(i as f64 / n as f64))
    })
}

/// Convert a curve over `t in [0, 1]` to a polyline using adaptive subdivision.
///
/// The algorithm recursively subdivides segments where the midpoint deviation
/// from the chord exceeds the given `tolerance`.
pub fn curve_to_polyline<F>(curve: F, tolerance: f64) -> Vec<Point2>
where
    F: Fn(f64) -> Point2,
{
    let mut points = vec![curve(0.0)];
    subdivide_curve(&curve, 0.0, 1.0, tolerance, &mut points, 0);
    points
}

/// Maximum recursion depth for adaptive subdivision.
const MAX_DEPTH: u32 = 12;

fn subdivide_curve<F>(curve: &F, t0: f64, t1: f64, tolerance: f64, points: &mut Vec<Point2>, depth: u32)
where
    F: Fn(f64) -> Point2,
{
    let p1 = curve(t1);
    if depth >= MAX_DEPTH {
        points.push(p1);
        return;
    }

    let t_mid = (t0 + t1) * 0.5;
    let p0 = curve(t0);
    let p_mid = curve(t_mid);

    let deviation = (p_mid - (p0 + p1) * 0.5).length();

    // A segment is only accepted after the first split so that a symmetric
    // sag is not mistaken for a straight line.
    if deviation > tolerance || depth == 0 {
        subdivide_curve(curve, t0, t_mid, tolerance, points, depth + 1);
        subdivide_curve(curve, t_mid, t1, tolerance, points, depth + 1);
    } else {
        points.push(p1);
    }
}
