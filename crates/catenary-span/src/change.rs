//! Change records returned by setters and the events broadcast to observers.

use std::sync::mpsc::{channel, Receiver, Sender};

use catenary_core::EntityId;
use catenary_math::Vector2;

use crate::units::UnitScale;

/// Mutable input of a span entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Start,
    Step,
    Weight,
    HorizontalTension,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Scalar(f64),
    Point(Vector2),
}

/// Outcome of an accepted write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Change {
    pub field: Field,
    pub old: FieldValue,
    pub new: FieldValue,
    /// Whether the cached vertex was recomputed.
    pub center_recomputed: bool,
}

impl Change {
    pub(crate) fn scalar(field: Field, old: f64, new: f64) -> Self {
        Self {
            field,
            old: FieldValue::Scalar(old),
            new: FieldValue::Scalar(new),
            center_recomputed: false,
        }
    }

    pub(crate) fn point(field: Field, old: Vector2, new: Vector2) -> Self {
        Self {
            field,
            old: FieldValue::Point(old),
            new: FieldValue::Point(new),
            center_recomputed: false,
        }
    }

    pub(crate) fn recomputed(mut self, recomputed: bool) -> Self {
        self.center_recomputed = recomputed;
        self
    }

    /// The write stored a value equal to the previous one.
    pub fn is_noop(&self) -> bool {
        self.old == self.new && !self.center_recomputed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    /// Support geometry moved; `center` is the vertex after the update.
    SegmentChanged {
        source: EntityId,
        change: Change,
        center: Vector2,
    },
    /// Weight or horizontal tension changed.
    CatenaryChanged {
        source: EntityId,
        change: Change,
        center: Vector2,
    },
    UnitsRescaled {
        source: EntityId,
        scale: UnitScale,
    },
}

impl ChangeEvent {
    pub fn source(&self) -> EntityId {
        match self {
            Self::SegmentChanged { source, .. }
            | Self::CatenaryChanged { source, .. }
            | Self::UnitsRescaled { source, .. } => *source,
        }
    }
}

/// Fan-out of change events to channel subscribers.
///
/// Events are sent after the entity is fully updated. Subscribers whose
/// receiver was dropped are pruned on the next send. Cloning a notifier
/// yields one without subscribers.
#[derive(Debug, Default)]
pub struct Notifier {
    subscribers: Vec<Sender<ChangeEvent>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<ChangeEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn notify(&mut self, event: ChangeEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Clone for Notifier {
    fn clone(&self) -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catenary_math::dvec2;

    fn event(source: EntityId) -> ChangeEvent {
        ChangeEvent::CatenaryChanged {
            source,
            change: Change::scalar(Field::Weight, 1.0, 2.0).recomputed(true),
            center: dvec2(250.0, -31.0),
        }
    }

    #[test]
    fn test_notify_reaches_all_subscribers() {
        let mut notifier = Notifier::new();
        let a = notifier.subscribe();
        let b = notifier.subscribe();
        let id = EntityId::new();
        notifier.notify(event(id));
        assert_eq!(a.try_recv().unwrap().source(), id);
        assert_eq!(b.try_recv().unwrap(), event(id));
        assert!(a.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut notifier = Notifier::new();
        let kept = notifier.subscribe();
        drop(notifier.subscribe());
        notifier.notify(event(EntityId::new()));
        assert_eq!(notifier.subscriber_count(), 1);
        assert!(kept.try_recv().is_ok());
    }

    #[test]
    fn test_clone_has_no_subscribers() {
        let mut notifier = Notifier::new();
        let _rx = notifier.subscribe();
        assert_eq!(notifier.clone().subscriber_count(), 0);
    }

    #[test]
    fn test_noop_detection() {
        assert!(Change::scalar(Field::Weight, 1.0, 1.0).is_noop());
        assert!(!Change::scalar(Field::Weight, 1.0, 1.5).is_noop());
        assert!(!Change::point(Field::Step, dvec2(1.0, 0.0), dvec2(1.0, 0.0))
            .recomputed(true)
            .is_noop());
    }
}
