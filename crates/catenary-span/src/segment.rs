//! Support-to-support geometry.

use std::fmt;

use catenary_core::{require_finite, require_positive, BoundingBox, CatenaryError, Result, Validate};
use catenary_geometry::{Chord, Curve};
use catenary_math::{dvec2, is_finite, Aabb2, Point2, Vector2};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::change::{Change, Field};
use crate::ops::{LengthOps, PositionOps};

/// Two supports: `start` and the offset `step` to the second support.
///
/// `step.x` (horizontal span) is always finite and positive; `step.y` may be
/// negative when the second support is lower.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SegmentRecord")]
pub struct Segment {
    start: Point2,
    step: Vector2,
}

#[derive(Deserialize)]
struct SegmentRecord {
    start: Point2,
    step: Vector2,
}

impl TryFrom<SegmentRecord> for Segment {
    type Error = CatenaryError;

    fn try_from(record: SegmentRecord) -> Result<Self> {
        Self::new(record.start, record.step)
    }
}

fn check_start(start: Point2) -> Result<Point2> {
    if is_finite(start) {
        Ok(start)
    } else {
        Err(CatenaryError::InvalidArgument(format!(
            "Start position must be finite, got {start}"
        )))
    }
}

fn check_step(step: Vector2) -> Result<Vector2> {
    require_positive(step.x, "Span")?;
    require_finite(step.y, "Span height")?;
    Ok(step)
}

fn rejected<T>(result: Result<T>, what: &str) -> Result<T> {
    result.map_err(|err| {
        warn!("rejected segment {what}: {err}");
        err
    })
}

impl Segment {
    pub const DEFAULT_SPAN_LENGTH: f64 = 500.0;
    pub const DEFAULT_TOWER_HEIGHT: f64 = 100.0;
    pub const DEFAULT_SPAN_RISE: f64 = 50.0;

    pub fn new(start: Point2, step: Vector2) -> Result<Self> {
        Ok(Self {
            start: check_start(start)?,
            step: check_step(step)?,
        })
    }

    pub fn from_offsets(start: Point2, dx: f64, dy: f64) -> Result<Self> {
        Self::new(start, dvec2(dx, dy))
    }

    pub fn start(&self) -> Point2 {
        self.start
    }

    pub fn step(&self) -> Vector2 {
        self.step
    }

    pub fn end(&self) -> Point2 {
        self.start + self.step
    }

    pub fn span_x(&self) -> f64 {
        self.step.x
    }

    pub fn span_y(&self) -> f64 {
        self.step.y
    }

    /// Straight-line distance between the supports.
    pub fn length(&self) -> f64 {
        self.step.length()
    }

    /// Ground projection of the start support.
    pub fn start_base(&self) -> Point2 {
        dvec2(self.start.x, 0.0)
    }

    pub fn end_base(&self) -> Point2 {
        dvec2(self.start.x + self.step.x, 0.0)
    }

    pub fn chord(&self) -> Chord {
        Chord::new(self.start, self.step)
    }

    /// Chord height at horizontal offset `x` from the start.
    pub fn diagonal_height(&self, x: f64) -> f64 {
        self.chord().height_at(x)
    }

    pub fn parametric_diagonal(&self, t: f64) -> Point2 {
        self.chord().point_at(t)
    }

    /// Whether the absolute horizontal coordinate `x` falls between the supports.
    pub fn contains_x(&self, x: f64) -> bool {
        self.start.x <= x && x - self.start.x <= self.step.x
    }

    /// Box around both supports and their ground projections.
    pub fn bounds(&self) -> Aabb2 {
        Aabb2::from_point(self.start_base())
            .include(self.end_base())
            .include(self.start)
            .include(self.end())
    }

    pub fn set_start(&mut self, start: Point2) -> Result<Change> {
        let start = rejected(check_start(start), "start")?;
        let change = Change::point(Field::Start, self.start, start);
        self.start = start;
        Ok(change)
    }

    pub fn set_step(&mut self, step: Vector2) -> Result<Change> {
        let step = rejected(check_step(step), "step")?;
        let change = Change::point(Field::Step, self.step, step);
        if !change.is_noop() {
            debug!("segment step {} -> {}", self.step, step);
        }
        self.step = step;
        Ok(change)
    }

    pub fn set_span_x(&mut self, span_x: f64) -> Result<Change> {
        self.set_step(dvec2(span_x, self.step.y))
    }

    pub fn set_span_y(&mut self, span_y: f64) -> Result<Change> {
        self.set_step(dvec2(self.step.x, span_y))
    }

    /// Copy with every coordinate multiplied by `length_factor`.
    pub fn scaled(&self, length_factor: f64) -> Result<Self> {
        let f = require_positive(length_factor, "Length factor")?;
        Self::new(self.start * f, self.step * f)
    }
}

impl Default for Segment {
    fn default() -> Self {
        Self {
            start: dvec2(0.0, Self::DEFAULT_TOWER_HEIGHT),
            step: dvec2(Self::DEFAULT_SPAN_LENGTH, Self::DEFAULT_SPAN_RISE),
        }
    }
}

impl Validate for Segment {
    fn validate(&self) -> Result<()> {
        check_start(self.start)?;
        check_step(self.step)?;
        Ok(())
    }
}

impl BoundingBox for Segment {
    type Point = Point2;

    fn bounding_box(&self) -> (Point2, Point2) {
        let b = self.bounds();
        (b.min, b.max)
    }
}

impl PositionOps for Segment {
    fn position_at_x(&self, x: f64) -> Point2 {
        dvec2(self.start.x + x, self.diagonal_height(x))
    }

    fn position_at_t(&self, t: f64) -> Point2 {
        self.parametric_diagonal(t)
    }
}

impl LengthOps for Segment {
    fn length_to_x(&self, x: f64) -> f64 {
        x / self.step.x * self.length()
    }

    fn total_length(&self) -> f64 {
        self.length()
    }
}

/// Format with at most three decimals and no trailing zeros.
pub(crate) fn nice(value: f64) -> String {
    let s = format!("{value:.3}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

pub(crate) fn nice_point(p: Point2) -> String {
    format!("({}, {})", nice(p.x), nice(p.y))
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Start={}, Step={}", nice_point(self.start), nice_point(self.step))
    }
}
