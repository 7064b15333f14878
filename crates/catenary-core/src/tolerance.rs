/// Settings shared by every inverse (target -> tension) computation.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Absolute solve tolerance on the tension axis (force units)
    pub absolute: f64,
    /// Ceiling for bracket expansion and for bisection, counted separately
    pub max_iterations: usize,
}

impl Tolerance {
    pub const DEFAULT_ABSOLUTE: f64 = 1e-3;
    pub const DEFAULT_MAX_ITERATIONS: usize = 40;
    /// Used when a caller hands in a non-positive tolerance.
    pub const FALLBACK_ABSOLUTE: f64 = 1e-8;

    pub fn new(absolute: f64, max_iterations: usize) -> Self {
        Self {
            absolute,
            max_iterations,
        }
    }

    pub fn with_absolute(absolute: f64) -> Self {
        Self {
            absolute,
            ..Self::default()
        }
    }

    /// The tolerance actually used for solving; non-positive or non-finite
    /// values fall back to [`Self::FALLBACK_ABSOLUTE`].
    pub fn effective(self) -> f64 {
        if self.absolute.is_finite() && self.absolute > 0.0 {
            self.absolute
        } else {
            Self::FALLBACK_ABSOLUTE
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ABSOLUTE, Self::DEFAULT_MAX_ITERATIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tol = Tolerance::default();
        assert_eq!(tol.absolute, 1e-3);
        assert_eq!(tol.max_iterations, 40);
    }

    #[test]
    fn test_effective_fallback() {
        assert_eq!(Tolerance::with_absolute(0.0).effective(), 1e-8);
        assert_eq!(Tolerance::with_absolute(-5.0).effective(), 1e-8);
        assert_eq!(Tolerance::with_absolute(f64::NAN).effective(), 1e-8);
        assert_eq!(Tolerance::with_absolute(0.5).effective(), 0.5);
    }

    #[test]
    fn test_serde_round_trip() {
        let tol = Tolerance::new(1e-4, 25);
        let json = serde_json::to_string(&tol).unwrap();
        let back: Tolerance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tol);
    }
}
