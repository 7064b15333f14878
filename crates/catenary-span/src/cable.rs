//! A cable hanging under its own weight between the two supports of a segment.

use std::fmt;
use std::sync::mpsc::Receiver;

use catenary_core::{
    require_finite, require_positive, BoundingBox, CatenaryError, EntityId, Result, Tolerance, Validate,
};
use catenary_geometry::tessellate::DEFAULT_BOUND_SAMPLES;
use catenary_geometry::{Catenary, Curve, InverseSolver};
use catenary_math::{dvec2, Aabb2, Point2, Vector2};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::change::{Change, ChangeEvent, Field, Notifier};
use crate::ops::{LengthOps, PositionOps, TensionOps};
use crate::segment::{nice, Segment};
use crate::units::UnitScale;

/// Segment plus loading: weight per unit length and horizontal tension.
///
/// The vertex offset from the start (`center`) is the only cached derived
/// value. It lives in `shape` together with the loading it was computed
/// from and is replaced as a whole on every accepted write, so it can never
/// be stale. All other outputs are evaluated on demand.
#[derive(Debug, Serialize, Deserialize)]
#[serde(try_from = "CableRecord", into = "CableRecord")]
pub struct SuspendedCable {
    id: EntityId,
    segment: Segment,
    shape: Catenary,
    tolerance: Tolerance,
    notifier: Notifier,
}

/// Persisted form: inputs only, the vertex is recomputed on load.
#[derive(Serialize, Deserialize)]
struct CableRecord {
    segment: Segment,
    weight: f64,
    horizontal_tension: f64,
}

impl From<SuspendedCable> for CableRecord {
    fn from(cable: SuspendedCable) -> Self {
        Self {
            segment: cable.segment,
            weight: cable.weight(),
            horizontal_tension: cable.horizontal_tension(),
        }
    }
}

impl TryFrom<CableRecord> for SuspendedCable {
    type Error = CatenaryError;

    fn try_from(record: CableRecord) -> Result<Self> {
        Self::from_segment(record.segment, record.weight, record.horizontal_tension)
    }
}

fn logged<T>(result: Result<T>, what: &str) -> Result<T> {
    result.map_err(|err| {
        warn!("rejected {what}: {err}");
        err
    })
}

impl SuspendedCable {
    pub const DEFAULT_HORIZONTAL_TENSION: f64 = 1000.0;
    pub const DEFAULT_WEIGHT: f64 = 1.0;

    pub fn new(start: Point2, step: Vector2, weight: f64, horizontal_tension: f64) -> Result<Self> {
        Self::from_segment(Segment::new(start, step)?, weight, horizontal_tension)
    }

    pub fn from_segment(segment: Segment, weight: f64, horizontal_tension: f64) -> Result<Self> {
        segment.validate()?;
        let shape = Catenary::new(segment.step(), weight, horizontal_tension)?;
        Ok(Self {
            id: EntityId::new(),
            segment,
            shape,
            tolerance: Tolerance::default(),
            notifier: Notifier::new(),
        })
    }

    /// The default span (see [`Segment::default`]) with default loading.
    pub fn with_defaults() -> Result<Self> {
        Self::from_segment(Segment::default(), Self::DEFAULT_WEIGHT, Self::DEFAULT_HORIZONTAL_TENSION)
    }

    /// Cable on `segment` with the given weight and the default tension.
    pub fn with_weight(segment: Segment, weight: f64) -> Result<Self> {
        Self::from_segment(segment, weight, Self::DEFAULT_HORIZONTAL_TENSION)
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Snapshot of the current curve for direct evaluation.
    pub fn shape(&self) -> Catenary {
        self.shape
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Tolerance used by the target setters (clearance, sag, length...).
    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        self.tolerance = tolerance;
    }

    /// Receive a [`ChangeEvent`] for every accepted, non-trivial write.
    pub fn subscribe(&mut self) -> Receiver<ChangeEvent> {
        self.notifier.subscribe()
    }

    // ---- loading -------------------------------------------------------

    pub fn weight(&self) -> f64 {
        self.shape.weight()
    }

    pub fn horizontal_tension(&self) -> f64 {
        self.shape.horizontal_tension()
    }

    pub fn set_weight(&mut self, weight: f64) -> Result<Change> {
        let weight = logged(require_positive(weight, "Weight"), "weight")?;
        let old = self.weight();
        let shape = logged(Catenary::new(self.segment.step(), weight, self.horizontal_tension()), "weight")?;
        Ok(self.commit_loading(Change::scalar(Field::Weight, old, weight), shape))
    }

    pub fn set_horizontal_tension(&mut self, horizontal_tension: f64) -> Result<Change> {
        let h = logged(
            require_positive(horizontal_tension, "Horizontal tension"),
            "horizontal tension",
        )?;
        let old = self.horizontal_tension();
        let shape = logged(Catenary::new(self.segment.step(), self.weight(), h), "horizontal tension")?;
        Ok(self.commit_loading(Change::scalar(Field::HorizontalTension, old, h), shape))
    }

    fn commit_loading(&mut self, change: Change, shape: Catenary) -> Change {
        if change.is_noop() {
            return change;
        }
        self.shape = shape;
        let change = change.recomputed(true);
        debug!("cable {} {:?} -> center {}", self.id, change.field, shape.center());
        self.notifier.notify(ChangeEvent::CatenaryChanged {
            source: self.id,
            change,
            center: shape.center(),
        });
        change
    }

    // ---- supports ------------------------------------------------------

    pub fn start(&self) -> Point2 {
        self.segment.start()
    }

    pub fn step(&self) -> Vector2 {
        self.segment.step()
    }

    pub fn end(&self) -> Point2 {
        self.segment.end()
    }

    pub fn span_x(&self) -> f64 {
        self.segment.span_x()
    }

    pub fn span_y(&self) -> f64 {
        self.segment.span_y()
    }

    /// Moving the start translates the whole cable; the vertex offset is unchanged.
    pub fn set_start(&mut self, start: Point2) -> Result<Change> {
        let mut segment = self.segment;
        let change = logged(segment.set_start(start), "start position")?;
        self.commit_segment(segment, change, self.shape);
        Ok(change)
    }

    pub fn set_step(&mut self, step: Vector2) -> Result<Change> {
        let mut segment = self.segment;
        let change = logged(segment.set_step(step), "span step")?;
        let shape = logged(
            Catenary::new(segment.step(), self.weight(), self.horizontal_tension()),
            "span step",
        )?;
        let change = change.recomputed(!change.is_noop());
        self.commit_segment(segment, change, shape);
        Ok(change)
    }

    pub fn set_span_x(&mut self, span_x: f64) -> Result<Change> {
        self.set_step(dvec2(span_x, self.span_y()))
    }

    pub fn set_span_y(&mut self, span_y: f64) -> Result<Change> {
        self.set_step(dvec2(self.span_x(), span_y))
    }

    fn commit_segment(&mut self, segment: Segment, change: Change, shape: Catenary) {
        if change.is_noop() {
            return;
        }
        self.segment = segment;
        self.shape = shape;
        debug!("cable {} {:?} -> {}", self.id, change.field, segment);
        self.notifier.notify(ChangeEvent::SegmentChanged {
            source: self.id,
            change,
            center: shape.center(),
        });
    }

    // ---- vertex --------------------------------------------------------

    /// Vertex offset from the start support.
    pub fn center(&self) -> Vector2 {
        self.shape.center()
    }

    /// Absolute position of the vertex.
    pub fn lowest_position(&self) -> Point2 {
        self.start() + self.center()
    }

    pub fn center_x(&self) -> f64 {
        self.lowest_position().x
    }

    pub fn center_y(&self) -> f64 {
        self.lowest_position().y
    }

    pub fn is_center_in_span(&self) -> bool {
        self.shape.is_center_in_span()
    }

    /// The vertex lies outside the span, so one support pulls the cable upward.
    pub fn is_uplift_condition(&self) -> bool {
        !self.is_center_in_span()
    }

    pub fn is_start_tower_uplift(&self) -> bool {
        self.start_vertical_tension() < 0.0
    }

    pub fn is_end_tower_uplift(&self) -> bool {
        self.end_vertical_tension() < 0.0
    }

    // ---- derived targets -----------------------------------------------

    fn solver(&self) -> Result<InverseSolver> {
        Ok(InverseSolver::new(self.step(), self.weight())?
            .with_initial_tension(self.horizontal_tension())
            .with_tolerance(self.tolerance))
    }

    fn apply_target(&mut self, what: &str, solved: Result<f64>) -> Result<Change> {
        let h = logged(solved, what)?;
        self.set_horizontal_tension(h)
    }

    /// Height of the lowest point of the cable: the vertex when it lies in
    /// the span, otherwise the lower support.
    pub fn clearance(&self) -> f64 {
        if self.is_center_in_span() {
            self.center_y()
        } else {
            self.start().y.min(self.end().y)
        }
    }

    /// Only accepted while the vertex lies in the span.
    pub fn set_clearance(&mut self, clearance: f64) -> Result<Change> {
        let clearance = logged(require_finite(clearance, "Clearance"), "clearance")?;
        if self.is_uplift_condition() {
            return logged(
                Err(CatenaryError::InvalidArgument(
                    "Clearance can only be set while the lowest point is in the span".into(),
                )),
                "clearance",
            );
        }
        let solved = self.solver()?.clearance(self.start().y - clearance);
        self.apply_target("clearance", solved)
    }

    pub fn maximum_sag(&self) -> f64 {
        self.shape.maximum_sag()
    }

    pub fn set_maximum_sag(&mut self, sag: f64) -> Result<Change> {
        let solved = self.solver()?.maximum_sag(sag);
        self.apply_target("maximum sag", solved)
    }

    pub fn mid_sag(&self) -> f64 {
        self.shape.mid_sag()
    }

    /// Absolute point where the drop below the chord is largest.
    pub fn sag_position(&self) -> Point2 {
        self.start() + self.shape.position_at_x(self.shape.maximum_sag_x())
    }

    pub fn catenary_constant(&self) -> f64 {
        self.shape.constant()
    }

    pub fn set_catenary_constant(&mut self, constant: f64) -> Result<Change> {
        let c = logged(require_positive(constant, "Catenary constant"), "catenary constant")?;
        self.set_horizontal_tension(self.weight() * c)
    }

    /// `w L / 2H`
    pub fn eta(&self) -> f64 {
        self.shape.eta()
    }

    pub fn set_eta(&mut self, eta: f64) -> Result<Change> {
        let eta = logged(require_positive(eta, "Eta"), "eta")?;
        self.set_horizontal_tension(self.weight() * self.span_x() / (2.0 * eta))
    }

    pub fn total_length(&self) -> f64 {
        self.shape.total_length()
    }

    pub fn set_total_length(&mut self, length: f64) -> Result<Change> {
        let solved = self.solver()?.total_length(length);
        self.apply_target("total length", solved)
    }

    /// Cable length in excess of the chord, in percent.
    pub fn geometric_strain_pct(&self) -> f64 {
        100.0 * (self.total_length() / self.segment.length() - 1.0)
    }

    pub fn set_geometric_strain_pct(&mut self, strain_pct: f64) -> Result<Change> {
        let pct = logged(require_positive(strain_pct, "Geometric strain"), "geometric strain")?;
        self.set_total_length(self.segment.length() * (1.0 + pct / 100.0))
    }

    pub fn average_tension(&self) -> f64 {
        self.shape.average_tension()
    }

    pub fn set_average_tension(&mut self, tension: f64) -> Result<Change> {
        let solved = self.solver()?.average_tension(tension);
        self.apply_target("average tension", solved)
    }

    /// Tension that makes the cable pass through the absolute `point`, which
    /// must lie below the chord and strictly between the supports.
    pub fn set_clearance_point(&mut self, point: Point2) -> Result<Change> {
        let x = point.x - self.start().x;
        let drop = self.segment.diagonal_height(x) - point.y;
        let solved = self.solver()?.sag_at_x(drop, x);
        self.apply_target("clearance point", solved)
    }

    // ---- support reactions ---------------------------------------------

    /// Force applied by the cable on the start support.
    pub fn start_tension(&self) -> Vector2 {
        dvec2(-self.horizontal_tension(), self.start_vertical_tension())
    }

    /// Force applied by the cable on the end support.
    pub fn end_tension(&self) -> Vector2 {
        dvec2(self.horizontal_tension(), self.end_vertical_tension())
    }

    /// Upward support reaction at the start; negative under uplift.
    pub fn start_vertical_tension(&self) -> f64 {
        -self.shape.vertical_tension_at_x(0.0)
    }

    pub fn end_vertical_tension(&self) -> f64 {
        self.shape.vertical_tension_at_x(self.span_x())
    }

    pub fn start_total_tension(&self) -> f64 {
        self.shape.total_tension_at_x(0.0)
    }

    pub fn end_total_tension(&self) -> f64 {
        self.shape.total_tension_at_x(self.span_x())
    }

    /// Tension at the more heavily loaded support.
    pub fn max_tension(&self) -> f64 {
        self.shape.max_tension()
    }

    // ---- curve functions -----------------------------------------------

    /// Absolute curve position for `t in [0, 1]`.
    pub fn parametric_curve(&self) -> impl Fn(f64) -> Point2 + Send + Sync + 'static {
        let (start, shape) = (self.start(), self.shape);
        move |t| start + shape.position_at_t(t)
    }

    /// `(H, V)` tension components for `t in [0, 1]`.
    pub fn parametric_tension(&self) -> impl Fn(f64) -> Vector2 + Send + Sync + 'static {
        let shape = self.shape;
        move |t| {
            let x = shape.parameter_to_x(t);
            dvec2(shape.horizontal_tension(), shape.vertical_tension_at_x(x))
        }
    }

    /// Curve height for an absolute horizontal coordinate.
    pub fn catenary_function(&self) -> impl Fn(f64) -> f64 + Send + Sync + 'static {
        let (start, shape) = (self.start(), self.shape);
        move |x| start.y + shape.position_at_x(x - start.x).y
    }

    /// Segment bounds merged with a 16-segment sampling of the curve.
    pub fn bounds(&self) -> Aabb2 {
        self.segment.bounds().merge(&self.sampled_bounds(DEFAULT_BOUND_SAMPLES))
    }

    // ---- units ---------------------------------------------------------

    /// Rescale every stored quantity for a unit-system change in one step:
    /// lengths by `length_factor`, tension by `force_factor` and weight by
    /// `force_factor / length_factor`. Emits a single
    /// [`ChangeEvent::UnitsRescaled`].
    pub fn scale_for_units(&mut self, scale: UnitScale) -> Result<()> {
        let l = logged(require_positive(scale.length_factor, "Length factor"), "unit scale")?;
        let f = logged(require_positive(scale.force_factor, "Force factor"), "unit scale")?;
        let segment = logged(self.segment.scaled(l), "unit scale")?;
        let shape = logged(
            Catenary::with_center(
                segment.step(),
                self.center() * l,
                self.weight() * scale.weight_factor(),
                self.horizontal_tension() * f,
            ),
            "unit scale",
        )?;
        self.segment = segment;
        self.shape = shape;
        debug!("cable {} rescaled by {:?}", self.id, scale);
        self.notifier.notify(ChangeEvent::UnitsRescaled {
            source: self.id,
            scale,
        });
        Ok(())
    }
}

impl Clone for SuspendedCable {
    /// Deep copy with a fresh identity and no subscribers.
    fn clone(&self) -> Self {
        Self {
            id: EntityId::new(),
            segment: self.segment,
            shape: self.shape,
            tolerance: self.tolerance,
            notifier: Notifier::new(),
        }
    }
}

impl PartialEq for SuspendedCable {
    fn eq(&self, other: &Self) -> bool {
        self.segment == other.segment && self.shape == other.shape
    }
}

impl Validate for SuspendedCable {
    fn validate(&self) -> Result<()> {
        self.segment.validate()?;
        require_positive(self.weight(), "Weight")?;
        require_positive(self.horizontal_tension(), "Horizontal tension")?;
        Ok(())
    }
}

impl BoundingBox for SuspendedCable {
    type Point = Point2;

    fn bounding_box(&self) -> (Point2, Point2) {
        let b = self.bounds();
        (b.min, b.max)
    }
}

impl Curve for SuspendedCable {
    fn point_at(&self, t: f64) -> Point2 {
        self.start() + self.shape.position_at_t(t)
    }

    fn tangent_at(&self, t: f64) -> Vector2 {
        self.shape.tangent_at(t)
    }
}

impl PositionOps for SuspendedCable {
    fn position_at_x(&self, x: f64) -> Point2 {
        self.start() + self.shape.position_at_x(x)
    }

    fn position_at_t(&self, t: f64) -> Point2 {
        self.point_at(t)
    }
}

impl LengthOps for SuspendedCable {
    fn length_to_x(&self, x: f64) -> f64 {
        self.shape.length_from_start(x)
    }

    fn total_length(&self) -> f64 {
        self.shape.total_length()
    }
}

impl TensionOps for SuspendedCable {
    fn vertical_tension_at_x(&self, x: f64) -> f64 {
        self.shape.vertical_tension_at_x(x)
    }

    fn total_tension_at_x(&self, x: f64) -> f64 {
        self.shape.total_tension_at_x(x)
    }

    fn average_tension(&self) -> f64 {
        self.shape.average_tension()
    }
}

impl fmt::Display for SuspendedCable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, H={}, w={}",
            self.segment,
            nice(self.horizontal_tension()),
            nice(self.weight())
        )
    }
}
