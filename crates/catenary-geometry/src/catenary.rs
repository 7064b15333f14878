//! Closed-form catenary forward model.
//!
//! With catenary constant `c = H / w`, the curve measured from its vertex
//! (lowest point of the unbounded curve) obeys
//!
//! ```text
//! y(u) = c (cosh(u/c) - 1)      height above the vertex
//! s(u) = c sinh(u/c)            signed arc length from the vertex
//! V(u) = H sinh(u/c) = w s(u)   vertical tension component
//! T(u) = H cosh(u/c)            tension magnitude
//! ```
//!
//! All positions are offsets from the start support. `center` is the vertex
//! offset from the start, so `u = x - center.x` for a point at horizontal
//! distance `x` from the start.

use catenary_core::{require_finite, require_positive, CatenaryError, Result};
use catenary_math::{is_finite, Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::curve::Curve;

/// `cosh(a) - 1` without the cancellation that plain `cosh` suffers for flat curves.
fn cosh_m1(a: f64) -> f64 {
    let h = (a / 2.0).sinh();
    2.0 * h * h
}

/// `sinh(a) / a - 1`, by series near zero so stiff cables keep their sag.
fn sinhc_m1(a: f64) -> f64 {
    if a.abs() < 1e-2 {
        let a2 = a * a;
        a2 / 6.0 * (1.0 + a2 / 20.0 * (1.0 + a2 / 42.0))
    } else {
        a.sinh() / a - 1.0
    }
}

fn checked(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CatenaryError::DegenerateGeometry(format!(
            "{what} is not finite ({value})"
        )))
    }
}

fn checked_point(p: Point2, what: &str) -> Result<Point2> {
    if is_finite(p) {
        Ok(p)
    } else {
        Err(CatenaryError::DegenerateGeometry(format!(
            "{what} is not finite ({p})"
        )))
    }
}

/// Check the forward model preconditions: finite step with positive
/// horizontal span, positive weight and horizontal tension.
pub fn validate_parameters(step: Vector2, weight: f64, horizontal_tension: f64) -> Result<()> {
    require_finite(step.x, "Horizontal span")?;
    require_finite(step.y, "Span height difference")?;
    if step.x <= 0.0 {
        return Err(CatenaryError::DegenerateGeometry(format!(
            "horizontal span must be positive, got {}",
            step.x
        )));
    }
    require_positive(weight, "Weight")?;
    require_positive(horizontal_tension, "Horizontal tension")?;
    Ok(())
}

/// A validated catenary between two supports: support step, vertex offset,
/// weight per unit length and horizontal tension.
///
/// Construction is the only fallible step; the evaluation methods are plain
/// arithmetic on the validated parameters.
///
/// Only the inputs are persisted; the vertex is recomputed on load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatenaryRecord", into = "CatenaryRecord")]
pub struct Catenary {
    step: Vector2,
    center: Vector2,
    weight: f64,
    horizontal_tension: f64,
}

#[derive(Serialize, Deserialize)]
struct CatenaryRecord {
    step: Vector2,
    weight: f64,
    horizontal_tension: f64,
}

impl From<Catenary> for CatenaryRecord {
    fn from(cat: Catenary) -> Self {
        Self {
            step: cat.step,
            weight: cat.weight,
            horizontal_tension: cat.horizontal_tension,
        }
    }
}

impl TryFrom<CatenaryRecord> for Catenary {
    type Error = CatenaryError;

    fn try_from(record: CatenaryRecord) -> Result<Self> {
        Self::new(record.step, record.weight, record.horizontal_tension)
    }
}

impl Catenary {
    /// Build the catenary and locate its vertex.
    ///
    /// # Errors
    /// `InvalidArgument` for non-finite or non-positive loading,
    /// `DegenerateGeometry` for a non-positive span or when the vertex
    /// overflows (catenary constant far too small for the span).
    pub fn new(step: Vector2, weight: f64, horizontal_tension: f64) -> Result<Self> {
        validate_parameters(step, weight, horizontal_tension)?;
        let c = horizontal_tension / weight;

        // D = c [cosh((L - xc)/c) - cosh(xc/c)] = 2c sinh(L/2c) sinh((L - 2xc)/2c)
        let skew = skew(step, c);
        let xc = step.x / 2.0 - c * skew.asinh();
        let yc = -c * cosh_m1(xc / c);

        let center = checked_point(Vector2::new(xc, yc), "Catenary vertex")?;
        Ok(Self {
            step,
            center,
            weight,
            horizontal_tension,
        })
    }

    /// Wrap parameters with an already known vertex offset.
    pub fn with_center(step: Vector2, center: Vector2, weight: f64, horizontal_tension: f64) -> Result<Self> {
        validate_parameters(step, weight, horizontal_tension)?;
        checked_point(center, "Catenary vertex")?;
        Ok(Self {
            step,
            center,
            weight,
            horizontal_tension,
        })
    }

    pub fn step(&self) -> Vector2 {
        self.step
    }

    /// Vertex offset from the start support.
    pub fn center(&self) -> Vector2 {
        self.center
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn horizontal_tension(&self) -> f64 {
        self.horizontal_tension
    }

    /// Catenary constant `c = H / w`.
    pub fn constant(&self) -> f64 {
        self.horizontal_tension / self.weight
    }

    /// Dimensionless loading `w L / 2H`.
    pub fn eta(&self) -> f64 {
        self.weight * self.step.x / (2.0 * self.horizontal_tension)
    }

    /// Horizontal offset from the start for parameter `t in [0, 1]`.
    pub fn parameter_to_x(&self, t: f64) -> f64 {
        t * self.step.x
    }

    /// Curve position relative to the start at horizontal offset `x`.
    pub fn position_at_x(&self, x: f64) -> Point2 {
        let c = self.constant();
        // c [cosh((x - xc)/c) - cosh(xc/c)] as a product, exact at the start
        let y = 2.0 * c * ((x - 2.0 * self.center.x) / (2.0 * c)).sinh() * (x / (2.0 * c)).sinh();
        Point2::new(x, y)
    }

    pub fn position_at_t(&self, t: f64) -> Point2 {
        self.position_at_x(self.parameter_to_x(t))
    }

    /// Vertical tension component, negative left of the vertex.
    pub fn vertical_tension_at_x(&self, x: f64) -> f64 {
        self.horizontal_tension * ((x - self.center.x) / self.constant()).sinh()
    }

    pub fn total_tension_at_x(&self, x: f64) -> f64 {
        self.horizontal_tension.hypot(self.vertical_tension_at_x(x))
    }

    /// Signed arc length from the vertex to horizontal offset `x`.
    pub fn length_segment_at_x(&self, x: f64) -> f64 {
        let c = self.constant();
        c * ((x - self.center.x) / c).sinh()
    }

    /// Arc length from the start support to horizontal offset `x`.
    pub fn length_from_start(&self, x: f64) -> f64 {
        let c = self.constant();
        2.0 * c * ((x - 2.0 * self.center.x) / (2.0 * c)).cosh() * (x / (2.0 * c)).sinh()
    }

    /// `sqrt(D^2 + (2c sinh(L/2c))^2)`, which never drops below the chord.
    pub fn total_length(&self) -> f64 {
        self.step.y.hypot(self.step.x * self.stretch())
    }

    /// `2c sinh(L/2c) / L`, one for a straight cable.
    fn stretch(&self) -> f64 {
        1.0 + sinhc_m1(self.half_angle())
    }

    /// `L / 2c`
    fn half_angle(&self) -> f64 {
        self.step.x / (2.0 * self.constant())
    }

    /// Whether the vertex lies on the physical cable, i.e. the arc length
    /// from the start to the vertex falls within `[0, total_length]`.
    pub fn is_center_in_span(&self) -> bool {
        let s = self.length_from_start(self.center.x);
        s >= 0.0 && s <= self.total_length()
    }

    pub fn is_uplift_condition(&self) -> bool {
        !self.is_center_in_span()
    }

    /// Lowest point of the physical cable relative to the start: the vertex
    /// when it lies in the span, otherwise the lower support.
    pub fn lowest_point(&self) -> Point2 {
        if self.is_center_in_span() {
            self.center
        } else if self.step.y < 0.0 {
            self.step
        } else {
            Point2::ZERO
        }
    }

    /// Vertical drop of the curve below the chord at horizontal offset `x`.
    ///
    /// Evaluated without subtracting the chord height from the curve height,
    /// which for stiff cables are large and nearly equal.
    pub fn sag_at_x(&self, x: f64) -> f64 {
        let c = self.constant();
        let a = self.half_angle();
        let (q, r) = (x / (2.0 * c), (self.step.x - x) / (2.0 * c));
        let g = q - r;
        // g/a - sinh(g)/sinh(a), odd in g and zero at the supports
        let lean = if a < 1e-2 {
            let (g2, a2) = (g * g, a * a);
            g / a * ((a2 - g2) / 6.0 - g2 * g2 / 120.0 + g2 * a2 / 36.0 - 7.0 * a2 * a2 / 360.0)
        } else {
            g / a - g.sinh() / a.sinh()
        };
        let skew = skew(self.step, c);
        self.step.y / 2.0 * lean + 2.0 * c * skew.hypot(1.0) * q.sinh() * r.sinh()
    }

    /// Horizontal offset where the tangent is parallel to the chord, which is
    /// where the drop below the chord peaks. On inclined spans this is not
    /// the vertex.
    pub fn maximum_sag_x(&self) -> f64 {
        // asinh(D/L) - asinh(D/kL) with k = stretch, rearranged to avoid
        // cancelling two nearly equal angles
        let (u, k) = (self.step.y / self.step.x, self.stretch());
        let v = u / k;
        let km1 = sinhc_m1(self.half_angle());
        let gap = u * km1 * (k + 1.0) / (k * (k * v.hypot(1.0) + u.hypot(1.0)));
        let x = self.step.x / 2.0 + self.constant() * gap.asinh();
        x.clamp(0.0, self.step.x)
    }

    pub fn maximum_sag(&self) -> f64 {
        self.sag_at_x(self.maximum_sag_x())
    }

    pub fn mid_sag(&self) -> f64 {
        self.sag_at_x(self.step.x / 2.0)
    }

    /// Tension averaged over arc length, `(1/S) int T ds`.
    ///
    /// Not monotone in `H`: it grows again once the cable is slack enough.
    pub fn average_tension(&self) -> f64 {
        // int H cosh^2(u/c) du over the span = (H L / 2) [1 + cosh(2b) sinh(2a)/2a]
        // with a = L/2c and sinh(b) = D / (2c sinh(a))
        let skew = skew(self.step, self.constant());
        let cosh_2b = 1.0 + 2.0 * skew * skew;
        let spread = 1.0 + sinhc_m1(2.0 * self.half_angle());
        self.horizontal_tension * self.step.x / 2.0 * (1.0 + cosh_2b * spread) / self.total_length()
    }

    /// The larger of the two support tensions.
    pub fn max_tension(&self) -> f64 {
        self.total_tension_at_x(0.0)
            .max(self.total_tension_at_x(self.step.x))
    }
}

impl Curve for Catenary {
    fn point_at(&self, t: f64) -> Point2 {
        self.position_at_t(t)
    }

    fn tangent_at(&self, t: f64) -> Vector2 {
        let x = self.parameter_to_x(t);
        let slope = ((x - self.center.x) / self.constant()).sinh();
        Vector2::new(self.step.x, self.step.x * slope)
    }
}

/// `sinh((L - 2 xc) / 2c) = D / (2c sinh(L/2c))`: how far the vertex sits
/// from mid-span, in hyperbolic angle.
fn skew(step: Vector2, c: f64) -> f64 {
    step.y / (step.x * (1.0 + sinhc_m1(step.x / (2.0 * c))))
}

/// Vertex offset from the start for the given supports and loading.
pub fn center_position(step: Vector2, weight: f64, horizontal_tension: f64) -> Result<Vector2> {
    Ok(Catenary::new(step, weight, horizontal_tension)?.center())
}

pub fn position_at_x(step: Vector2, center: Vector2, weight: f64, h: f64, x: f64) -> Result<Point2> {
    let cat = Catenary::with_center(step, center, weight, h)?;
    checked_point(cat.position_at_x(require_finite(x, "x")?), "Curve position")
}

pub fn position_at_t(step: Vector2, center: Vector2, weight: f64, h: f64, t: f64) -> Result<Point2> {
    let cat = Catenary::with_center(step, center, weight, h)?;
    checked_point(cat.position_at_t(require_finite(t, "t")?), "Curve position")
}

pub fn parameter_to_x(step: Vector2, center: Vector2, weight: f64, h: f64, t: f64) -> Result<f64> {
    let cat = Catenary::with_center(step, center, weight, h)?;
    Ok(cat.parameter_to_x(require_finite(t, "t")?))
}

pub fn vertical_tension_at_x(step: Vector2, center: Vector2, weight: f64, h: f64, x: f64) -> Result<f64> {
    let cat = Catenary::with_center(step, center, weight, h)?;
    checked(cat.vertical_tension_at_x(require_finite(x, "x")?), "Vertical tension")
}

pub fn total_tension_at_x(step: Vector2, center: Vector2, weight: f64, h: f64, x: f64) -> Result<f64> {
    let cat = Catenary::with_center(step, center, weight, h)?;
    checked(cat.total_tension_at_x(require_finite(x, "x")?), "Total tension")
}

pub fn length_segment_at_x(step: Vector2, center: Vector2, weight: f64, h: f64, x: f64) -> Result<f64> {
    let cat = Catenary::with_center(step, center, weight, h)?;
    checked(cat.length_segment_at_x(require_finite(x, "x")?), "Arc length")
}

pub fn total_length(step: Vector2, center: Vector2, weight: f64, h: f64) -> Result<f64> {
    checked(Catenary::with_center(step, center, weight, h)?.total_length(), "Total length")
}

pub fn maximum_sag_x(step: Vector2, center: Vector2, weight: f64, h: f64) -> Result<f64> {
    checked(Catenary::with_center(step, center, weight, h)?.maximum_sag_x(), "Maximum sag offset")
}

pub fn maximum_sag(step: Vector2, center: Vector2, weight: f64, h: f64) -> Result<f64> {
    checked(Catenary::with_center(step, center, weight, h)?.maximum_sag(), "Maximum sag")
}

pub fn mid_sag(step: Vector2, center: Vector2, weight: f64, h: f64) -> Result<f64> {
    checked(Catenary::with_center(step, center, weight, h)?.mid_sag(), "Mid-span sag")
}

pub fn average_tension(step: Vector2, center: Vector2, weight: f64, h: f64) -> Result<f64> {
    checked(Catenary::with_center(step, center, weight, h)?.average_tension(), "Average tension")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use catenary_math::dvec2;

    fn level() -> Catenary {
        Catenary::new(dvec2(500.0, 0.0), 1.0, 1000.0).unwrap()
    }

    fn inclined() -> Catenary {
        Catenary::new(dvec2(500.0, 50.0), 1.0, 1000.0).unwrap()
    }

    #[test]
    fn test_level_span_vertex_at_midspan() {
        let center = center_position(dvec2(500.0, 0.0), 1.0, 1000.0).unwrap();
        assert_abs_diff_eq!(center.x, 250.0, epsilon = 1e-9);
        assert!(center.y < 0.0);
        // c (cosh(0.25) - 1) with c = 1000
        assert_relative_eq!(center.y, -1000.0 * (0.25f64.cosh() - 1.0), max_relative = 1e-12);
    }

    #[test]
    fn test_curve_passes_through_supports() {
        for &(dx, dy, w, h) in &[
            (500.0, 0.0, 1.0, 1000.0),
            (500.0, 50.0, 1.0, 1000.0),
            (300.0, -120.0, 2.5, 400.0),
            (100.0, 200.0, 1.0, 1000.0),
            (1000.0, 10.0, 0.8, 1e6),
        ] {
            let step = dvec2(dx, dy);
            let cat = Catenary::new(step, w, h).unwrap();
            let p0 = cat.position_at_x(0.0);
            let p1 = cat.position_at_x(dx);
            assert!(p0.length() <= 1e-6 * step.length(), "start {p0} for {step}");
            assert!((p1 - step).length() <= 1e-6 * step.length(), "end {p1} for {step}");
        }
    }

    #[test]
    fn test_inclined_vertex_shifts_toward_lower_support() {
        let cat = inclined();
        assert!(cat.center().x < 250.0);
        assert!(cat.center().x > 0.0);
        assert!(cat.is_center_in_span());
    }

    #[test]
    fn test_length_longer_than_chord() {
        for &h in &[50.0, 500.0, 1000.0, 1e5, 1e8] {
            let cat = Catenary::new(dvec2(500.0, 50.0), 1.0, h).unwrap();
            assert!(cat.total_length() > dvec2(500.0, 50.0).length(), "H = {h}");
        }
    }

    #[test]
    fn test_level_length_closed_form() {
        let cat = level();
        assert_relative_eq!(cat.total_length(), 2000.0 * 0.25f64.sinh(), max_relative = 1e-12);
    }

    #[test]
    fn test_monotone_in_horizontal_tension() {
        let step = dvec2(500.0, 50.0);
        let tensions = [300.0, 600.0, 1000.0, 2000.0, 5000.0];
        let cats: Vec<_> = tensions
            .iter()
            .map(|&h| Catenary::new(step, 1.0, h).unwrap())
            .collect();
        for pair in cats.windows(2) {
            assert!(pair[1].total_length() < pair[0].total_length());
            assert!(pair[1].maximum_sag() < pair[0].maximum_sag());
            assert!(pair[1].average_tension() > pair[0].average_tension());
        }
    }

    #[test]
    fn test_vertical_tension_signs() {
        let cat = inclined();
        let v0 = cat.vertical_tension_at_x(0.0);
        let v1 = cat.vertical_tension_at_x(500.0);
        assert!(v0 < 0.0 && v1 > 0.0);
        assert!(cat.is_center_in_span());

        let uplift = Catenary::new(dvec2(100.0, 200.0), 1.0, 1000.0).unwrap();
        assert!(uplift.center().x < 0.0);
        assert!(uplift.is_uplift_condition());
        let u0 = uplift.vertical_tension_at_x(0.0);
        let u1 = uplift.vertical_tension_at_x(100.0);
        assert!(u0 > 0.0 && u1 > 0.0);
        assert_eq!(uplift.lowest_point(), Point2::ZERO);
    }

    #[test]
    fn test_tension_relations() {
        let cat = inclined();
        for &x in &[0.0, 100.0, 333.0, 500.0] {
            let v = cat.vertical_tension_at_x(x);
            assert_relative_eq!(v, cat.weight() * cat.length_segment_at_x(x), max_relative = 1e-12);
            let u = (x - cat.center().x) / cat.constant();
            assert_relative_eq!(cat.total_tension_at_x(x), 1000.0 * u.cosh(), max_relative = 1e-12);
        }
        assert_abs_diff_eq!(cat.vertical_tension_at_x(cat.center().x), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_average_tension_between_extremes() {
        let cat = inclined();
        let avg = cat.average_tension();
        assert!(avg > cat.horizontal_tension());
        assert!(avg < cat.max_tension());
    }

    #[test]
    fn test_sag_level_span() {
        let cat = level();
        assert_abs_diff_eq!(cat.maximum_sag_x(), 250.0, epsilon = 1e-9);
        assert_relative_eq!(cat.maximum_sag(), -cat.center().y, max_relative = 1e-12);
        assert_relative_eq!(cat.mid_sag(), cat.maximum_sag(), max_relative = 1e-12);
        assert_abs_diff_eq!(cat.sag_at_x(0.0), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cat.sag_at_x(500.0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_maximum_sag_is_peak_of_chord_drop() {
        let cat = inclined();
        let x_max = cat.maximum_sag_x();
        let s_max = cat.maximum_sag();
        for i in 0..=50 {
            let x = 10.0 * i as f64;
            assert!(cat.sag_at_x(x) <= s_max + 1e-9, "x = {x}");
        }
        assert!(cat.sag_at_x(x_max - 1.0) < s_max);
        assert!(cat.sag_at_x(x_max + 1.0) < s_max);
    }

    #[test]
    fn test_parameter_mapping() {
        let cat = inclined();
        assert_eq!(cat.parameter_to_x(0.25), 125.0);
        assert_eq!(cat.position_at_t(0.25), cat.position_at_x(125.0));
        assert_eq!(cat.point_at(1.0), cat.position_at_x(500.0));
    }

    #[test]
    fn test_tangent_matches_finite_difference() {
        let cat = inclined();
        let t = 0.3;
        let dt = 1e-6;
        let fd = (cat.point_at(t + dt) - cat.point_at(t - dt)) / (2.0 * dt);
        let tangent = cat.tangent_at(t);
        assert_relative_eq!(fd.x, tangent.x, max_relative = 1e-6);
        assert_relative_eq!(fd.y, tangent.y, max_relative = 1e-5);
    }

    #[test]
    fn test_very_stiff_cable_is_nearly_straight() {
        let cat = Catenary::new(dvec2(500.0, 50.0), 1.0, 1e12).unwrap();
        let mid = cat.position_at_x(250.0);
        assert_abs_diff_eq!(mid.y, 25.0, epsilon = 1e-3);
        assert_relative_eq!(cat.total_length(), dvec2(500.0, 50.0).length(), max_relative = 1e-6);
    }

    #[test]
    fn test_stiffening_never_lengthens_or_inverts_sag() {
        let step = dvec2(500.0, 50.0);
        let chord = step.length();
        let cats: Vec<_> = (3..=19)
            .map(|e| Catenary::new(step, 1.0, 10f64.powi(e)).unwrap())
            .collect();
        for cat in &cats {
            assert!(cat.total_length() >= chord, "H = {}", cat.horizontal_tension());
            assert!(cat.maximum_sag() > 0.0, "H = {}", cat.horizontal_tension());
            assert!(cat.mid_sag() > 0.0, "H = {}", cat.horizontal_tension());
        }
        for pair in cats.windows(2) {
            assert!(pair[1].total_length() <= pair[0].total_length());
            assert!(pair[1].maximum_sag() < pair[0].maximum_sag());
        }
    }

    #[test]
    fn test_straight_line_limit() {
        // L / 2c is below machine epsilon here
        let step = dvec2(500.0, 50.0);
        let cat = Catenary::new(step, 1.0, 1e19).unwrap();
        assert!(cat.center().x.is_finite() && cat.center().y.is_finite());
        assert_relative_eq!(cat.total_length(), step.length(), max_relative = 1e-15);
        assert_abs_diff_eq!(cat.maximum_sag_x(), 250.0, epsilon = 1e-6);
        assert!(cat.maximum_sag() > 0.0 && cat.maximum_sag() < 1e-12);
        assert_abs_diff_eq!(cat.position_at_x(250.0).y, 25.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cat.position_at_x(500.0).y, 50.0, epsilon = 1e-9);
        // straight cable: T = H / cos(theta) everywhere
        assert_relative_eq!(cat.average_tension(), 1e19 * step.length() / 500.0, max_relative = 1e-12);
    }

    #[test]
    fn test_serde_recomputes_vertex() {
        let cat = inclined();
        let json = serde_json::to_string(&cat).unwrap();
        assert!(!json.contains("center"));
        let back: Catenary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cat);

        let forged = r#"{"step":[500.0,50.0],"center":[1.0,1.0],"weight":1.0,"horizontal_tension":1000.0}"#;
        let back: Catenary = serde_json::from_str(forged).unwrap();
        assert_eq!(back.center(), cat.center());
    }

    #[test]
    fn test_serde_rejects_invalid_record() {
        let bad_step = r#"{"step":[-5.0,0.0],"weight":1.0,"horizontal_tension":1000.0}"#;
        assert!(serde_json::from_str::<Catenary>(bad_step).is_err());
        let bad_weight = r#"{"step":[500.0,0.0],"weight":0.0,"horizontal_tension":1000.0}"#;
        assert!(serde_json::from_str::<Catenary>(bad_weight).is_err());
        let bad_tension = r#"{"step":[500.0,0.0],"weight":1.0,"horizontal_tension":-1.0}"#;
        assert!(serde_json::from_str::<Catenary>(bad_tension).is_err());
    }

    #[test]
    fn test_invalid_inputs() {
        let err = Catenary::new(dvec2(0.0, 10.0), 1.0, 1000.0).unwrap_err();
        assert!(err.is_degenerate());
        let err = Catenary::new(dvec2(-5.0, 10.0), 1.0, 1000.0).unwrap_err();
        assert!(err.is_degenerate());
        let err = Catenary::new(dvec2(500.0, 0.0), 0.0, 1000.0).unwrap_err();
        assert!(err.is_invalid_argument());
        let err = Catenary::new(dvec2(500.0, 0.0), 1.0, f64::NAN).unwrap_err();
        assert!(err.is_invalid_argument());
        let err = Catenary::new(dvec2(f64::INFINITY, 0.0), 1.0, 1000.0).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_overflowing_vertex_is_degenerate() {
        let err = center_position(dvec2(500.0, 0.0), 1.0, 1e-3).unwrap_err();
        assert!(err.is_degenerate());
    }

    #[test]
    fn test_free_functions_agree_with_methods() {
        let step = dvec2(500.0, 50.0);
        let cat = inclined();
        let c = cat.center();
        assert_eq!(position_at_x(step, c, 1.0, 1000.0, 120.0).unwrap(), cat.position_at_x(120.0));
        assert_eq!(position_at_t(step, c, 1.0, 1000.0, 0.5).unwrap(), cat.position_at_t(0.5));
        assert_eq!(parameter_to_x(step, c, 1.0, 1000.0, 0.5).unwrap(), 250.0);
        assert_eq!(total_length(step, c, 1.0, 1000.0).unwrap(), cat.total_length());
        assert_eq!(maximum_sag(step, c, 1.0, 1000.0).unwrap(), cat.maximum_sag());
        assert_eq!(maximum_sag_x(step, c, 1.0, 1000.0).unwrap(), cat.maximum_sag_x());
        assert_eq!(mid_sag(step, c, 1.0, 1000.0).unwrap(), cat.mid_sag());
        assert_eq!(average_tension(step, c, 1.0, 1000.0).unwrap(), cat.average_tension());
        assert_eq!(
            vertical_tension_at_x(step, c, 1.0, 1000.0, 0.0).unwrap(),
            cat.vertical_tension_at_x(0.0)
        );
        assert_eq!(
            total_tension_at_x(step, c, 1.0, 1000.0, 0.0).unwrap(),
            cat.total_tension_at_x(0.0)
        );
        assert_eq!(
            length_segment_at_x(step, c, 1.0, 1000.0, 0.0).unwrap(),
            cat.length_segment_at_x(0.0)
        );
    }

    #[test]
    fn test_free_function_overflow_is_reported() {
        let step = dvec2(500.0, 0.0);
        let cat = level();
        let err = position_at_x(step, cat.center(), 1.0, 1000.0, 1e7).unwrap_err();
        assert!(err.is_degenerate());
        let err = position_at_x(step, cat.center(), 1.0, 1000.0, f64::NAN).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
