use catenary_core::{require_positive, Result};
use serde::{Deserialize, Serialize};

/// Multiplicative factors broadcast when the project unit system changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitScale {
    pub length_factor: f64,
    pub force_factor: f64,
}

impl UnitScale {
    pub const IDENTITY: Self = Self {
        length_factor: 1.0,
        force_factor: 1.0,
    };

    pub fn new(length_factor: f64, force_factor: f64) -> Result<Self> {
        Ok(Self {
            length_factor: require_positive(length_factor, "Length factor")?,
            force_factor: require_positive(force_factor, "Force factor")?,
        })
    }

    /// Factor applied to force per unit length.
    pub fn weight_factor(&self) -> f64 {
        self.force_factor / self.length_factor
    }
}

impl Default for UnitScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_to_imperial() {
        // m -> ft, N -> lbf
        let scale = UnitScale::new(3.280_84, 0.224_809).unwrap();
        assert!((scale.weight_factor() - 0.224_809 / 3.280_84).abs() < 1e-15);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(UnitScale::new(0.0, 1.0).unwrap_err().is_invalid_argument());
        assert!(UnitScale::new(1.0, -2.0).is_err());
        assert!(UnitScale::new(f64::NAN, 1.0).is_err());
    }
}
