//! Headless hosts for testing.
//!
//! Lets the engine run without a document, useful for:
//! - Unit and integration tests
//! - Replaying recorded pointer traces from the command line

use std::cell::RefCell;
use std::rc::Rc;

use reveal_paint::{Rect, Vec2};
use rustc_hash::FxHashMap;

use crate::emitter::RenderCommand;
use crate::events::ElementId;
use crate::host::{ElementHost, RevealSurface};

/// A surface that records every command applied to it.
///
/// Clones share the same log, so a test can keep one handle while the
/// engine owns the other.
#[derive(Clone, Debug, Default)]
pub struct HeadlessSurface {
    log: Rc<RefCell<Vec<RenderCommand>>>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands applied so far, oldest first
    pub fn commands(&self) -> Vec<RenderCommand> {
        self.log.borrow().clone()
    }

    /// The most recently applied command
    pub fn last(&self) -> Option<RenderCommand> {
        self.log.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl RevealSurface for HeadlessSurface {
    fn apply(&mut self, command: &RenderCommand) {
        self.log.borrow_mut().push(command.clone());
    }
}

/// A page of statically laid out elements.
///
/// Bounding boxes include the current offset, the way a browser reports
/// the box of a translated element.
#[derive(Clone, Debug, Default)]
pub struct HeadlessPage {
    layout: FxHashMap<ElementId, Rect>,
    offsets: FxHashMap<ElementId, Vec2>,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`HeadlessPage::insert`]
    pub fn with_element(mut self, element: ElementId, rect: Rect) -> Self {
        self.insert(element, rect);
        self
    }

    pub fn insert(&mut self, element: ElementId, rect: Rect) {
        self.layout.insert(element, rect);
    }

    pub fn remove(&mut self, element: ElementId) {
        self.layout.remove(&element);
        self.offsets.remove(&element);
    }

    /// Last offset applied to `element`
    pub fn offset(&self, element: ElementId) -> Vec2 {
        self.offsets.get(&element).copied().unwrap_or(Vec2::ZERO)
    }

    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.layout.keys().copied()
    }
}

impl ElementHost for HeadlessPage {
    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        self.layout
            .get(&element)
            .map(|rect| rect.translate(self.offset(element)))
    }

    fn set_offset(&mut self, element: ElementId, offset: Vec2) {
        if self.layout.contains_key(&element) {
            self.offsets.insert(element, offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RevealConfig;
    use crate::emitter::GeometryEmitter;
    use reveal_paint::Size;

    #[test]
    fn test_surface_clones_share_log() {
        let surface = HeadlessSurface::new();
        let mut handle = surface.clone();
        let command = GeometryEmitter::from_config(&RevealConfig::default())
            .full_cover(Size::new(10.0, 10.0));

        handle.apply(&command);
        assert_eq!(surface.len(), 1);
        assert_eq!(surface.last(), Some(command));

        surface.clear();
        assert!(handle.is_empty());
    }

    #[test]
    fn test_page_reports_offset_rect() {
        let mut page = HeadlessPage::new().with_element(7, Rect::new(10.0, 20.0, 100.0, 50.0));
        page.set_offset(7, Vec2::new(5.0, -5.0));

        assert_eq!(page.offset(7), Vec2::new(5.0, -5.0));
        assert_eq!(page.bounding_rect(7), Some(Rect::new(15.0, 15.0, 100.0, 50.0)));
    }

    #[test]
    fn test_page_ignores_unknown_elements() {
        let mut page = HeadlessPage::new();
        page.set_offset(3, Vec2::new(1.0, 1.0));
        assert_eq!(page.bounding_rect(3), None);
        assert_eq!(page.offset(3), Vec2::ZERO);
    }
}
