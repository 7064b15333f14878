//! Support-to-support span entities.
//!
//! [`Segment`] owns the support geometry, [`SuspendedCable`] layers weight and
//! horizontal tension on a segment and keeps the cached vertex consistent with
//! them. Every mutation is validated first and either applied completely or
//! rejected without touching the entity.
//!
//! Entities are not internally synchronized: concurrent mutation of one
//! instance must be serialized by the caller.

pub mod cable;
pub mod change;
pub mod ops;
pub mod segment;
pub mod units;

pub use cable::SuspendedCable;
pub use change::{Change, ChangeEvent, Field, FieldValue, Notifier};
pub use ops::{LengthOps, PositionOps, TensionOps};
pub use segment::Segment;
pub use units::UnitScale;
