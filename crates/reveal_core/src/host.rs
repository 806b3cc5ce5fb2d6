//! Host interfaces
//!
//! The engine never touches a document directly. It writes geometry to a
//! [`RevealSurface`] and moves magnetic elements through an [`ElementHost`].

use reveal_paint::{Rect, Vec2};

use crate::emitter::RenderCommand;
use crate::events::ElementId;

/// Receives the geometry for each frame
pub trait RevealSurface {
    fn apply(&mut self, command: &RenderCommand);
}

impl<F> RevealSurface for F
where
    F: FnMut(&RenderCommand),
{
    fn apply(&mut self, command: &RenderCommand) {
        self(command)
    }
}

/// Layout queries and visual offsets for elements owned by the host page
pub trait ElementHost {
    /// Current bounding box, including any offset previously applied with
    /// [`ElementHost::set_offset`]. `None` if the element is unknown.
    fn bounding_rect(&self, element: ElementId) -> Option<Rect>;

    /// Translate an element visually, relative to its layout position
    fn set_offset(&mut self, element: ElementId, offset: Vec2);
}

/// Host with no elements, for engines without magnetic affordances
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHost;

impl ElementHost for NoHost {
    fn bounding_rect(&self, _element: ElementId) -> Option<Rect> {
        None
    }

    fn set_offset(&mut self, _element: ElementId, _offset: Vec2) {}
}
