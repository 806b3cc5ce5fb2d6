//! Pointer tracking
//!
//! [`PointerTracker`] owns the only copy of [`PointerState`]. Pointer events
//! mutate it; the frame step reads it and then advances the previous
//! position once per frame.

use reveal_paint::{Point, Vec2};
use tracing::trace;

/// Current and previous pointer positions plus viewport-entry state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub position: Point,
    /// Position at the end of the previous frame
    pub previous_position: Point,
    pub has_entered: bool,
}

impl PointerState {
    /// Sentinel position used while the pointer is outside the viewport
    pub const OFFSCREEN: Point = Point::new(-10_000.0, -10_000.0);

    /// The current position, if the pointer is inside the viewport
    pub fn position(&self) -> Option<Point> {
        self.has_entered.then_some(self.position)
    }

    /// Movement since the previous frame (zero outside the viewport)
    pub fn delta(&self) -> Vec2 {
        if self.has_entered {
            self.position - self.previous_position
        } else {
            Vec2::ZERO
        }
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: Self::OFFSCREEN,
            previous_position: Self::OFFSCREEN,
            has_entered: false,
        }
    }
}

/// Records pointer positions from raw pointer events
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    state: PointerState,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PointerState {
        &self.state
    }

    pub fn has_entered(&self) -> bool {
        self.state.has_entered
    }

    /// Handle a pointer move in viewport coordinates.
    ///
    /// The first move after construction or after a leave also snaps the
    /// previous position, so entering the viewport never reads as a jump.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let position = Point::new(x, y);
        if !position.is_finite() {
            trace!(x, y, "ignoring non-finite pointer position");
            return;
        }
        if !self.state.has_entered {
            self.state.previous_position = position;
            self.state.has_entered = true;
        }
        self.state.position = position;
    }

    /// Handle the pointer leaving the viewport
    pub fn on_pointer_leave(&mut self) {
        self.state = PointerState::default();
    }

    /// Close the current frame: the current position becomes the previous one
    pub fn advance_frame(&mut self) {
        if self.state.has_entered {
            self.state.previous_position = self.state.position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_offscreen() {
        let tracker = PointerTracker::new();
        assert!(!tracker.has_entered());
        assert_eq!(tracker.state().position, PointerState::OFFSCREEN);
        assert_eq!(tracker.state().position(), None);
        assert_eq!(tracker.state().delta(), Vec2::ZERO);
    }

    #[test]
    fn test_first_move_snaps_previous() {
        let mut tracker = PointerTracker::new();
        tracker.on_pointer_move(300.0, 200.0);

        let state = tracker.state();
        assert!(state.has_entered);
        assert_eq!(state.previous_position, Point::new(300.0, 200.0));
        assert_eq!(state.delta(), Vec2::ZERO);
    }

    #[test]
    fn test_moves_within_frame_coalesce() {
        let mut tracker = PointerTracker::new();
        tracker.on_pointer_move(0.0, 0.0);
        tracker.advance_frame();

        tracker.on_pointer_move(5.0, 0.0);
        tracker.on_pointer_move(10.0, 0.0);
        tracker.on_pointer_move(30.0, 40.0);

        assert_eq!(tracker.state().delta(), Vec2::new(30.0, 40.0));
        tracker.advance_frame();
        assert_eq!(tracker.state().delta(), Vec2::ZERO);
    }

    #[test]
    fn test_leave_resets_and_reentry_snaps_again() {
        let mut tracker = PointerTracker::new();
        tracker.on_pointer_move(10.0, 10.0);
        tracker.advance_frame();
        tracker.on_pointer_leave();

        assert!(!tracker.has_entered());
        assert_eq!(tracker.state().position, PointerState::OFFSCREEN);

        tracker.on_pointer_move(900.0, 500.0);
        assert_eq!(tracker.state().delta(), Vec2::ZERO);
    }

    #[test]
    fn test_non_finite_positions_are_ignored() {
        let mut tracker = PointerTracker::new();
        tracker.on_pointer_move(f32::NAN, 3.0);
        assert!(!tracker.has_entered());

        tracker.on_pointer_move(1.0, 2.0);
        tracker.on_pointer_move(f32::INFINITY, 2.0);
        assert_eq!(tracker.state().position, Point::new(1.0, 2.0));
    }
}
