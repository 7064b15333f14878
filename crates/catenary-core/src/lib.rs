//! Core types shared by the catenary span crates: errors, solver settings,
//! entity identity and the validation/bounding traits.

pub mod error;
pub mod id;
pub mod tolerance;
pub mod traits;

pub use error::{require_finite, require_positive, CatenaryError, Result};
pub use id::EntityId;
pub use tolerance::Tolerance;
pub use traits::{BoundingBox, Validate};
