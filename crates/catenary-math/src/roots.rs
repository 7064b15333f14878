//! Monotone scalar root finding by bracket expansion and bisection.
//!
//! Solves `f(x) = y_target` for a continuous `f` that is monotone on the
//! region of interest. The direction of monotonicity does not need to be
//! known in advance. Non-monotone functions are not detected; they only show
//! up as a bracket that fails to contain the target.

use catenary_core::{CatenaryError, Result, Tolerance};
use log::{debug, trace, warn};

/// Half-width of the starting bracket, in multiples of the x tolerance.
const INITIAL_HALF_WIDTH: f64 = 10.0;

/// Bracketing/bisection solver with a fixed x tolerance and iteration ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootFinder {
    x_tol: f64,
    max_iterations: usize,
}

impl RootFinder {
    pub fn new(x_tol: f64) -> Self {
        Self::from_tolerance(Tolerance::with_absolute(x_tol))
    }

    pub fn from_tolerance(tolerance: Tolerance) -> Self {
        Self {
            x_tol: tolerance.effective(),
            max_iterations: tolerance.max_iterations,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn x_tol(&self) -> f64 {
        self.x_tol
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Solve `f(x) = y_target` starting near `x_init`.
    ///
    /// A narrow bracket around `x_init` (or around zero when
    /// `|x_init| <= x_tol`) is widened on whichever side does not yet contain
    /// the target, doubling its width each step in the locally observed
    /// direction of `f`. Once the target is bracketed the search continues
    /// with [`RootFinder::solve_bracketed`].
    ///
    /// # Errors
    /// [`CatenaryError::RootNotFound`] when no bracket is found within the
    /// iteration ceiling, or when bisection loses the bracket.
    pub fn solve<F>(&self, mut f: F, y_target: f64, x_init: f64) -> Result<f64>
    where
        F: FnMut(f64) -> f64,
    {
        let delta = INITIAL_HALF_WIDTH * self.x_tol;
        let (mut x_low, mut x_high) = if x_init.abs() > self.x_tol {
            (x_init - delta, x_init + delta)
        } else {
            (-delta, delta)
        };
        let mut y_low = f(x_low);
        let mut y_high = f(x_high);
        let mut ascending = y_high - y_low >= 0.0;

        let mut count = 0;
        while (y_high - y_target) * (y_low - y_target) > 0.0 {
            if count >= self.max_iterations {
                warn!(
                    "no bracket for target {y_target} after {count} expansions, \
                     last interval [{x_low}, {x_high}] -> [{y_low}, {y_high}]"
                );
                return Err(CatenaryError::RootNotFound(format!(
                    "could not bracket target {y_target} from x = {x_init} within {} expansions",
                    self.max_iterations
                )));
            }
            let x_mid = (x_low + x_high) / 2.0;
            let sign = if ascending { 1.0 } else { -1.0 };
            if sign * y_target < sign * y_low {
                x_low -= 2.0 * (x_mid - x_low);
                y_low = f(x_low);
            }
            if sign * y_target > sign * y_high {
                x_high += 2.0 * (x_high - x_mid);
                y_high = f(x_high);
            }
            ascending = y_high - y_low >= 0.0;
            count += 1;
            trace!("expansion {count}: [{x_low}, {x_high}] -> [{y_low}, {y_high}]");
        }
        debug!("bracketed target {y_target} in [{x_low}, {x_high}] after {count} expansions");

        self.bisect(&mut f, y_target, (x_low, y_low), (x_high, y_high))
    }

    /// Solve `f(x) = y_target` for `x` in `[x_low, x_high]` by bisection.
    ///
    /// Stops when the bracket is narrower than the x tolerance or the
    /// iteration ceiling is hit, and returns the bracket midpoint.
    ///
    /// # Errors
    /// [`CatenaryError::RootNotFound`] when the interval does not contain the
    /// target (no sign change of the residual, or a NaN residual).
    pub fn solve_bracketed<F>(&self, mut f: F, y_target: f64, x_low: f64, x_high: f64) -> Result<f64>
    where
        F: FnMut(f64) -> f64,
    {
        let y_low = f(x_low);
        let y_high = f(x_high);
        self.bisect(&mut f, y_target, (x_low, y_low), (x_high, y_high))
    }

    fn bisect<F>(&self, f: &mut F, y_target: f64, low: (f64, f64), high: (f64, f64)) -> Result<f64>
    where
        F: FnMut(f64) -> f64,
    {
        let ((mut x_low, mut y_low), (mut x_high, mut y_high)) = (low, high);
        let brackets = |y_a: f64, y_b: f64| (y_a - y_target) * (y_b - y_target) <= 0.0;

        if !brackets(y_low, y_high) {
            return Err(not_bracketed(y_target, x_low, x_high));
        }

        let mut x = (x_low + x_high) / 2.0;
        let mut count = 0;
        while (x_high - x_low).abs() > self.x_tol && count < self.max_iterations {
            let y = f(x);
            if brackets(y, y_high) {
                x_low = x;
                y_low = y;
            } else {
                x_high = x;
                y_high = y;
            }
            x = (x_low + x_high) / 2.0;
            count += 1;
        }

        if brackets(y_low, y_high) {
            debug!("converged to x = {x} after {count} bisections");
            Ok(x)
        } else {
            warn!("bisection lost the bracket for target {y_target} near x = {x}");
            Err(not_bracketed(y_target, x_low, x_high))
        }
    }
}

impl Default for RootFinder {
    fn default() -> Self {
        Self::from_tolerance(Tolerance::default())
    }
}

fn not_bracketed(y_target: f64, x_low: f64, x_high: f64) -> CatenaryError {
    CatenaryError::RootNotFound(format!(
        "target {y_target} is not bracketed by [{x_low}, {x_high}]"
    ))
}
