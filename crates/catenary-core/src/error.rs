use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatenaryError {
    /// A non-finite or out-of-range value was offered where the model needs a
    /// finite, usually positive, quantity.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The root finder ran out of iterations before isolating the target.
    #[error("Root not found: {0}")]
    RootNotFound(String),

    /// Span or catenary constant too close to a singular configuration.
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),
}

impl CatenaryError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_root_not_found(&self) -> bool {
        matches!(self, Self::RootNotFound(_))
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateGeometry(_))
    }
}

pub type Result<T> = std::result::Result<T, CatenaryError>;

/// Reject NaN, infinities and values `<= 0`.
pub fn require_positive(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CatenaryError::InvalidArgument(format!(
            "{what} must be finite and positive, got {value}"
        )))
    }
}

/// Reject NaN and infinities.
pub fn require_finite(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CatenaryError::InvalidArgument(format!(
            "{what} must be finite, got {value}"
        )))
    }
}
