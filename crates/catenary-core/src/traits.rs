use crate::error::Result;

/// Validate the physical invariants of a span entity.
pub trait Validate {
    fn validate(&self) -> Result<()>;

    /// `true` when [`Validate::validate`] succeeds.
    fn is_ok(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Compute an axis-aligned bounding box.
pub trait BoundingBox {
    type Point;
    fn bounding_box(&self) -> (Self::Point, Self::Point);
}
