//! Event types
//!
//! Pointer events delivered by the host page. Viewport-level events target
//! [`VIEWPORT`]; events on magnetic elements target the element's id.

use reveal_paint::{Point, Size};

/// Identifier of an element owned by the host page
pub type ElementId = u64;

/// Target id for events that concern the whole viewport
pub const VIEWPORT: ElementId = 0;

/// Event type identifier
pub type EventType = u32;

/// Event types understood by the engine
pub mod event_types {
    use super::EventType;

    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const RESIZE: EventType = 40;
}

/// A pointer or viewport event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub target: ElementId,
    pub data: EventData,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer { x: f32, y: f32 },
    Resize { width: f32, height: f32 },
    None,
}

impl Event {
    pub fn pointer_move(target: ElementId, x: f32, y: f32) -> Self {
        Self {
            event_type: event_types::POINTER_MOVE,
            target,
            data: EventData::Pointer { x, y },
        }
    }

    pub fn pointer_enter(target: ElementId) -> Self {
        Self {
            event_type: event_types::POINTER_ENTER,
            target,
            data: EventData::None,
        }
    }

    pub fn pointer_leave(target: ElementId) -> Self {
        Self {
            event_type: event_types::POINTER_LEAVE,
            target,
            data: EventData::None,
        }
    }

    pub fn resize(width: f32, height: f32) -> Self {
        Self {
            event_type: event_types::RESIZE,
            target: VIEWPORT,
            data: EventData::Resize { width, height },
        }
    }

    /// Pointer coordinates, if this event carries them
    pub fn pointer(&self) -> Option<Point> {
        match self.data {
            EventData::Pointer { x, y } => Some(Point::new(x, y)),
            _ => None,
        }
    }

    /// New viewport size, if this is a resize event
    pub fn size(&self) -> Option<Size> {
        match self.data {
            EventData::Resize { width, height } => Some(Size::new(width, height)),
            _ => None,
        }
    }

    pub fn targets_viewport(&self) -> bool {
        self.target == VIEWPORT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let move_event = Event::pointer_move(VIEWPORT, 10.0, 20.0);
        assert!(move_event.targets_viewport());
        assert_eq!(move_event.pointer(), Some(Point::new(10.0, 20.0)));
        assert_eq!(move_event.size(), None);

        let leave = Event::pointer_leave(7);
        assert!(!leave.targets_viewport());
        assert_eq!(leave.pointer(), None);

        let resize = Event::resize(800.0, 600.0);
        assert_eq!(resize.size(), Some(Size::new(800.0, 600.0)));
    }
}
