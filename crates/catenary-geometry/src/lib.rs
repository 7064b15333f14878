//! Catenary geometry: the closed-form forward model, the inverse design
//! layer that recovers horizontal tension from a target, and curve sampling.

pub mod catenary;
pub mod curve;
pub mod design;
pub mod tessellate;

pub use catenary::Catenary;
pub use curve::{Chord, Curve};
pub use design::InverseSolver;
