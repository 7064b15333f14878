//! Read-only capabilities shared by span entities.
//!
//! Horizontal offsets `x` are measured from the start support; returned
//! positions are absolute.

use catenary_math::Point2;

pub trait PositionOps {
    /// Point on the span at horizontal offset `x` from the start.
    fn position_at_x(&self, x: f64) -> Point2;

    /// Point for parameter `t in [0, 1]`, linear in horizontal offset.
    fn position_at_t(&self, t: f64) -> Point2;
}

pub trait LengthOps {
    /// Length along the span from the start support to horizontal offset `x`.
    fn length_to_x(&self, x: f64) -> f64;

    fn total_length(&self) -> f64;
}

pub trait TensionOps {
    /// Vertical tension component at `x`; negative left of the vertex.
    fn vertical_tension_at_x(&self, x: f64) -> f64;

    fn total_tension_at_x(&self, x: f64) -> f64;

    fn average_tension(&self) -> f64;
}
