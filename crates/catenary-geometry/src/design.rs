//! Inverse design: recover the horizontal tension that produces a target
//! clearance, sag, length or average tension for fixed supports and weight.
//!
//! Clearance, sag and length are monotone in `H` (a tighter cable is flatter
//! and shorter), which is what the root finder relies on. Average tension
//! is not: it has a minimum, and only the taut branch above it is searched.
//! The search runs on `ln H` so the bracket can never leave the physical
//! domain `H > 0`; the tolerance is scaled so that it still reads as an
//! absolute tension tolerance around the initial guess.

use std::f64::consts::LN_2;

use catenary_core::{require_finite, require_positive, CatenaryError, Result, Tolerance};
use catenary_math::{RootFinder, Vector2};
use log::{debug, warn};

use crate::catenary::{validate_parameters, Catenary};

/// Solves for horizontal tension on a fixed support geometry and weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseSolver {
    step: Vector2,
    weight: f64,
    initial_tension: f64,
    tolerance: Tolerance,
}

impl InverseSolver {
    /// Solver with the default tolerance and an initial guess of `c = span`.
    pub fn new(step: Vector2, weight: f64) -> Result<Self> {
        let initial_tension = weight * step.x;
        validate_parameters(step, weight, initial_tension)?;
        Ok(Self {
            step,
            weight,
            initial_tension,
            tolerance: Tolerance::default(),
        })
    }

    /// Start the search from a known tension, usually the current one.
    pub fn with_initial_tension(mut self, horizontal_tension: f64) -> Self {
        self.initial_tension = horizontal_tension;
        self
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn step(&self) -> Vector2 {
        self.step
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Tension that puts the lowest point of the cable `target_drop` below
    /// the start support.
    ///
    /// The lowest point is the vertex while it lies in the span, otherwise
    /// the lower support, so the drop can never be less than
    /// `max(0, -step.y)`.
    pub fn clearance(&self, target_drop: f64) -> Result<f64> {
        require_finite(target_drop, "Clearance drop")?;
        let floor = (-self.step.y).max(0.0);
        if target_drop <= floor {
            return Err(CatenaryError::InvalidArgument(format!(
                "Clearance drop must exceed {floor}, got {target_drop}"
            )));
        }
        self.solve_for("clearance drop", target_drop, |cat| -cat.lowest_point().y)
    }

    /// Tension giving a maximum drop below the chord of `target_sag`.
    pub fn maximum_sag(&self, target_sag: f64) -> Result<f64> {
        require_positive(target_sag, "Sag")?;
        self.solve_for("maximum sag", target_sag, Catenary::maximum_sag)
    }

    /// Tension giving a cable length of `target_length`, which must exceed the
    /// straight distance between the supports.
    pub fn total_length(&self, target_length: f64) -> Result<f64> {
        require_finite(target_length, "Length")?;
        let chord = self.step.length();
        if target_length <= chord {
            return Err(CatenaryError::InvalidArgument(format!(
                "Length must be larger than the span diagonal {chord}, got {target_length}"
            )));
        }
        self.solve_for("total length", target_length, Catenary::total_length)
    }

    /// Tension giving an arc-length averaged tension of `target_tension`.
    ///
    /// Average tension falls and then rises again as `H` grows, so a target
    /// above its minimum is met twice. The taut root (the larger `H`) is
    /// returned regardless of the initial tension.
    ///
    /// # Errors
    /// `RootNotFound` when the target is below the smallest average tension
    /// the span can carry.
    pub fn average_tension(&self, target_tension: f64) -> Result<f64> {
        let target = require_positive(target_tension, "Average tension")?;
        let what = "average tension";
        let avg = |log_h: f64| self.evaluate(log_h, Catenary::average_tension);

        // T >= H everywhere, so the taut root lies at or below H = target.
        let x_high = target.ln();
        let (x_low, y_low) = self.taut_floor(&avg, x_high, target);
        if !(y_low <= target) {
            warn!("{what} = {target} is below the reachable minimum {y_low}");
            return Err(CatenaryError::RootNotFound(format!(
                "{what} = {target}: smallest reachable average tension is {y_low}"
            )));
        }
        let solved = self.log_finder(target).solve_bracketed(avg, target, x_low, x_high);
        finish(what, target, target, solved)
    }

    /// Walk down from `x_high` (in `ln H`) while average tension keeps
    /// falling, stopping once it reaches `target`. When it turns upward
    /// first, the minimum is refined by golden-section search.
    fn taut_floor<F>(&self, avg: &F, x_high: f64, target: f64) -> (f64, f64)
    where
        F: Fn(f64) -> f64,
    {
        let iterations = self.tolerance.max_iterations;
        let (mut x, mut y) = (x_high, avg(x_high));
        for _ in 0..iterations {
            if y <= target {
                return (x, y);
            }
            let (next_x, next_y) = (x - LN_2, avg(x - LN_2));
            if !(next_y < y) {
                break;
            }
            x = next_x;
            y = next_y;
        }
        if y <= target {
            return (x, y);
        }
        golden_min(avg, x - LN_2, (x + LN_2).min(x_high), iterations)
    }

    /// Tension giving a drop of `target_drop` below the chord at horizontal
    /// offset `x` from the start; `x` must lie strictly inside the span.
    pub fn sag_at_x(&self, target_drop: f64, x: f64) -> Result<f64> {
        require_positive(target_drop, "Sag")?;
        require_finite(x, "Sag offset")?;
        if x <= 0.0 || x >= self.step.x {
            return Err(CatenaryError::InvalidArgument(format!(
                "Sag offset must lie inside the span (0, {}), got {x}",
                self.step.x
            )));
        }
        self.solve_for("sag at x", target_drop, |cat| cat.sag_at_x(x))
    }

    fn solve_for<F>(&self, what: &str, target: f64, quantity: F) -> Result<f64>
    where
        F: Fn(&Catenary) -> f64,
    {
        let h0 = require_positive(self.initial_tension, "Initial horizontal tension")?;
        let f = |log_h: f64| self.evaluate(log_h, &quantity);
        let solved = self.log_finder(h0).solve(f, target, h0.ln());
        finish(what, target, h0, solved)
    }

    /// Root finder on `ln H` whose step tolerance matches the absolute
    /// tension tolerance near `scale`.
    fn log_finder(&self, scale: f64) -> RootFinder {
        RootFinder::from_tolerance(Tolerance::new(
            self.tolerance.effective() / scale,
            self.tolerance.max_iterations,
        ))
    }

    /// Forward model at `H = exp(log_h)`; NaN where the curve is degenerate.
    fn evaluate<F>(&self, log_h: f64, quantity: F) -> f64
    where
        F: Fn(&Catenary) -> f64,
    {
        Catenary::new(self.step, self.weight, log_h.exp())
            .map(|cat| quantity(&cat))
            .unwrap_or(f64::NAN)
    }
}

fn finish(what: &str, target: f64, h0: f64, solved: Result<f64>) -> Result<f64> {
    let log_h = solved.map_err(|err| match err {
        CatenaryError::RootNotFound(msg) => CatenaryError::RootNotFound(format!("{what} = {target}: {msg}")),
        other => other,
    })?;
    let h = log_h.exp();
    if !h.is_finite() || h <= 0.0 {
        return Err(CatenaryError::DegenerateGeometry(format!(
            "{what} = {target} requires a horizontal tension of {h}"
        )));
    }
    debug!("{what} = {target} solved with H = {h} (from {h0})");
    Ok(h)
}

/// Golden-section minimum of a unimodal `f` on `[lo, hi]`; NaN counts as +inf.
fn golden_min<F>(f: &F, mut lo: f64, mut hi: f64, iterations: usize) -> (f64, f64)
where
    F: Fn(f64) -> f64,
{
    const INV_PHI: f64 = 0.618_033_988_749_894_9;
    let g = |x: f64| {
        let y = f(x);
        if y.is_nan() {
            f64::INFINITY
        } else {
            y
        }
    };
    let mut a = hi - INV_PHI * (hi - lo);
    let mut b = lo + INV_PHI * (hi - lo);
    let (mut fa, mut fb) = (g(a), g(b));
    for _ in 0..iterations {
        if fa < fb {
            hi = b;
            b = a;
            fb = fa;
            a = hi - INV_PHI * (hi - lo);
            fa = g(a);
        } else {
            lo = a;
            a = b;
            fa = fb;
            b = lo + INV_PHI * (hi - lo);
            fb = g(b);
        }
    }
    if fa < fb {
        (a, fa)
    } else {
        (b, fb)
    }
}

/// Horizontal tension putting the lowest point `target_drop` below the start.
pub fn set_clearance(step: Vector2, weight: f64, target_drop: f64, tol: f64) -> Result<f64> {
    InverseSolver::new(step, weight)?
        .with_tolerance(Tolerance::with_absolute(tol))
        .clearance(target_drop)
}

pub fn set_maximum_sag(step: Vector2, weight: f64, target_sag: f64, tol: f64) -> Result<f64> {
    InverseSolver::new(step, weight)?
        .with_tolerance(Tolerance::with_absolute(tol))
        .maximum_sag(target_sag)
}

pub fn set_total_length(step: Vector2, weight: f64, target_length: f64, tol: f64) -> Result<f64> {
    InverseSolver::new(step, weight)?
        .with_tolerance(Tolerance::with_absolute(tol))
        .total_length(target_length)
}

pub fn set_average_tension(step: Vector2, weight: f64, target_tension: f64, tol: f64) -> Result<f64> {
    InverseSolver::new(step, weight)?
        .with_tolerance(Tolerance::with_absolute(tol))
        .average_tension(target_tension)
}

pub fn set_sag_at_x(step: Vector2, weight: f64, target_drop: f64, x: f64, tol: f64) -> Result<f64> {
    InverseSolver::new(step, weight)?
        .with_tolerance(Tolerance::with_absolute(tol))
        .sag_at_x(target_drop, x)
}
