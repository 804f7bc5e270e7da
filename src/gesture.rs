use std::ops::Sub;

use crate::session::Direction;

/// Horizontal drag distance a gesture must exceed to commit a decision
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 100.0;

/// A position reported by the input source, in distance units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Displacement of the card from its resting place
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, origin: Point) -> Offset {
        Offset {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging { origin: Point, offset: Offset },
}

/// What releasing the card resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Dragged past the threshold: commit this decision
    Commit(Direction),
    /// Released inside the threshold: card returns to center
    SnapBack,
    /// No gesture was in progress
    Ignored,
}

/// Idle -> Dragging -> Idle state machine for one card drag.
///
/// Out-of-order input (move or release without a press, a second press while
/// dragging) is dropped silently; stray terminal events are expected.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    state: GestureState,
    threshold: f64,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl GestureTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            state: GestureState::Idle,
            threshold,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    pub fn origin(&self) -> Option<Point> {
        match self.state {
            GestureState::Dragging { origin, .. } => Some(origin),
            GestureState::Idle => None,
        }
    }

    /// Current offset; always zero while idle
    pub fn offset(&self) -> Offset {
        match self.state {
            GestureState::Dragging { offset, .. } => offset,
            GestureState::Idle => Offset::ZERO,
        }
    }

    /// Returns true if a new gesture started
    pub fn begin(&mut self, point: Point) -> bool {
        match self.state {
            GestureState::Idle => {
                self.state = GestureState::Dragging {
                    origin: point,
                    offset: Offset::ZERO,
                };
                true
            }
            GestureState::Dragging { .. } => false,
        }
    }

    /// Returns true if the offset was recomputed
    pub fn update(&mut self, point: Point) -> bool {
        match &mut self.state {
            GestureState::Dragging { origin, offset } => {
                *offset = point - *origin;
                true
            }
            GestureState::Idle => false,
        }
    }

    /// Release the card and decide what the drag meant. Always leaves the
    /// tracker idle.
    pub fn end(&mut self) -> GestureOutcome {
        let offset = match self.state {
            GestureState::Dragging { offset, .. } => offset,
            GestureState::Idle => return GestureOutcome::Ignored,
        };
        self.state = GestureState::Idle;
        self.resolve(offset)
    }

    /// Abandon any drag without deciding
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }

    // Strict inequality: exactly at the threshold the card snaps back.
    fn resolve(&self, offset: Offset) -> GestureOutcome {
        if offset.x.abs() > self.threshold {
            if offset.x > 0.0 {
                GestureOutcome::Commit(Direction::Like)
            } else {
                GestureOutcome::Commit(Direction::Dislike)
            }
        } else {
            GestureOutcome::SnapBack
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(tracker: &mut GestureTracker, dx: f64, dy: f64) -> GestureOutcome {
        tracker.begin(Point::new(0.0, 0.0));
        tracker.update(Point::new(dx, dy));
        tracker.end()
    }

    #[test]
    fn test_begin_update_end_cycle() {
        let mut tracker = GestureTracker::default();
        assert!(!tracker.is_active());
        assert_eq!(tracker.origin(), None);

        assert!(tracker.begin(Point::new(10.0, 20.0)));
        assert!(tracker.is_active());
        assert_eq!(tracker.origin(), Some(Point::new(10.0, 20.0)));
        assert_eq!(tracker.offset(), Offset::ZERO);

        assert!(tracker.update(Point::new(45.0, 5.0)));
        assert_eq!(tracker.offset(), Offset { x: 35.0, y: -15.0 });

        assert_eq!(tracker.end(), GestureOutcome::SnapBack);
        assert_eq!(tracker.state(), GestureState::Idle);
        assert_eq!(tracker.offset(), Offset::ZERO);
    }

    #[test]
    fn test_zero_net_offset_never_commits() {
        let mut tracker = GestureTracker::default();
        let p = Point::new(42.0, 42.0);
        tracker.begin(p);
        tracker.update(p);
        assert_eq!(tracker.end(), GestureOutcome::SnapBack);
        assert_eq!(tracker.offset(), Offset::ZERO);
    }

    #[test]
    fn test_threshold_boundary() {
        let mut tracker = GestureTracker::default();
        assert_eq!(drag(&mut tracker, 100.0, 0.0), GestureOutcome::SnapBack);
        assert_eq!(drag(&mut tracker, -100.0, 0.0), GestureOutcome::SnapBack);
        assert_eq!(
            drag(&mut tracker, 100.01, 0.0),
            GestureOutcome::Commit(Direction::Like)
        );
        assert_eq!(
            drag(&mut tracker, -100.01, 0.0),
            GestureOutcome::Commit(Direction::Dislike)
        );
    }

    #[test]
    fn test_vertical_offset_never_decides() {
        let mut tracker = GestureTracker::default();
        assert_eq!(drag(&mut tracker, 5.0, 900.0), GestureOutcome::SnapBack);
        assert_eq!(drag(&mut tracker, 5.0, -900.0), GestureOutcome::SnapBack);
        assert_eq!(
            drag(&mut tracker, 150.0, -900.0),
            GestureOutcome::Commit(Direction::Like)
        );
    }

    #[test]
    fn test_configurable_threshold() {
        let mut tracker = GestureTracker::new(20.0);
        assert_eq!(tracker.threshold(), 20.0);
        assert_eq!(
            drag(&mut tracker, 25.0, 0.0),
            GestureOutcome::Commit(Direction::Like)
        );
    }

    #[test]
    fn test_stray_events_are_ignored() {
        let mut tracker = GestureTracker::default();
        assert!(!tracker.update(Point::new(500.0, 0.0)));
        assert_eq!(tracker.offset(), Offset::ZERO);
        assert_eq!(tracker.end(), GestureOutcome::Ignored);
        assert_eq!(tracker.state(), GestureState::Idle);
    }

    #[test]
    fn test_second_begin_does_not_reanchor() {
        let mut tracker = GestureTracker::default();
        tracker.begin(Point::new(0.0, 0.0));
        assert!(!tracker.begin(Point::new(300.0, 0.0)));
        tracker.update(Point::new(50.0, 0.0));
        assert_eq!(tracker.offset().x, 50.0);
    }

    #[test]
    fn test_cancel_resets() {
        let mut tracker = GestureTracker::default();
        tracker.begin(Point::new(0.0, 0.0));
        tracker.update(Point::new(400.0, 0.0));
        tracker.cancel();
        assert!(!tracker.is_active());
        assert_eq!(tracker.offset(), Offset::ZERO);
        assert_eq!(tracker.end(), GestureOutcome::Ignored);
    }
}
