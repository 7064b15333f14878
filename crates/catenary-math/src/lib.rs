pub mod aabb;
pub mod roots;

pub use glam::{dvec2, DVec2};
pub use aabb::Aabb2;
pub use roots::RootFinder;

pub type Point2 = DVec2;
pub type Vector2 = DVec2;

/// `true` when both coordinates are finite.
pub fn is_finite(v: Vector2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
