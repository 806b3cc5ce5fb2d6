//! Magnetic affordance
//!
//! Registered elements drift towards the pointer while hovered and spring
//! back to their layout position when the pointer leaves. Both motions are
//! tweens advanced by [`MagneticAffordance::tick`]; each new pointer move
//! retargets the follow tween from wherever the element currently is. Each
//! element runs a small state machine:
//!
//! ```text
//! Idle --enter--> Hovering --leave--> Returning --settled--> Idle
//!                     ^                   |
//!                     +------enter--------+
//! ```
//!
//! Pointer moves are only honoured in `Hovering`, so a late move callback
//! from an element the pointer already left has no effect.

use reveal_animation::{Easing, Tween};
use reveal_paint::{Point, Rect, Vec2};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::config::RevealConfig;
use crate::events::{event_types, ElementId, Event};
use crate::fsm::{EventId, StateId, StateMachine};
use crate::host::ElementHost;

/// Magnetic element states
pub mod states {
    use crate::fsm::StateId;

    pub const IDLE: StateId = 0;
    pub const HOVERING: StateId = 1;
    pub const RETURNING: StateId = 2;
}

const ENTER: EventId = event_types::POINTER_ENTER;
const LEAVE: EventId = event_types::POINTER_LEAVE;
/// Fired when the return tween completes
const SETTLED: EventId = 100;

fn element_machine() -> StateMachine {
    StateMachine::builder(states::IDLE)
        .on(states::IDLE, ENTER, states::HOVERING)
        .on(states::HOVERING, LEAVE, states::RETURNING)
        .on(states::RETURNING, SETTLED, states::IDLE)
        .on(states::RETURNING, ENTER, states::HOVERING)
        .build()
}

/// Per-element magnetic state
#[derive(Clone, Debug)]
pub struct MagneticElement {
    element: ElementId,
    /// Layout box without any displacement, captured on hover enter
    origin: Option<Rect>,
    displacement: Vec2,
    machine: StateMachine,
    follow: Option<Tween<Vec2>>,
    release: Option<Tween<Vec2>>,
}

impl MagneticElement {
    fn new(element: ElementId) -> Self {
        Self {
            element,
            origin: None,
            displacement: Vec2::ZERO,
            machine: element_machine(),
            follow: None,
            release: None,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn state(&self) -> StateId {
        self.machine.current_state()
    }

    /// Whether the pointer is currently over the element
    pub fn is_active(&self) -> bool {
        self.machine.is_in(states::HOVERING)
    }

    pub fn is_returning(&self) -> bool {
        self.machine.is_in(states::RETURNING)
    }

    pub fn origin(&self) -> Option<Rect> {
        self.origin
    }

    /// Offset currently applied to the element
    pub fn displacement(&self) -> Vec2 {
        self.displacement
    }

    /// Where the element is heading while it follows the pointer
    pub fn target(&self) -> Vec2 {
        self.follow.as_ref().map_or(self.displacement, |tween| tween.to())
    }

    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }
}

/// Registry of magnetic elements driven by delegated pointer events
#[derive(Clone, Debug)]
pub struct MagneticAffordance {
    elements: FxHashMap<ElementId, MagneticElement>,
    pull_factor: f32,
    follow_duration_ms: f32,
    return_duration_ms: f32,
    easing: Easing,
}

impl MagneticAffordance {
    pub fn from_config(config: &RevealConfig) -> Self {
        let mut affordance = Self {
            elements: FxHashMap::default(),
            pull_factor: 0.0,
            follow_duration_ms: 0.0,
            return_duration_ms: 0.0,
            easing: config.magnetic_return_easing,
        };
        affordance.configure(config);
        affordance
    }

    /// Apply new tuning. Returns already in flight keep their curve.
    pub fn configure(&mut self, config: &RevealConfig) {
        self.pull_factor = config.magnetic_pull_factor;
        self.follow_duration_ms = config.magnetic_follow_duration_ms as f32;
        self.return_duration_ms = config.magnetic_return_duration_ms as f32;
        self.easing = config.magnetic_return_easing;
    }

    pub fn pull_factor(&self) -> f32 {
        self.pull_factor
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, element: ElementId) -> Option<&MagneticElement> {
        self.elements.get(&element)
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.elements.contains_key(&element)
    }

    /// Whether any element is still following the pointer or springing back
    pub fn is_animating(&self) -> bool {
        self.elements
            .values()
            .any(|e| e.follow.is_some() || e.release.is_some())
    }

    /// Start tracking an element. Registering twice keeps the existing state.
    pub fn register(&mut self, element: ElementId) {
        self.elements
            .entry(element)
            .or_insert_with(|| MagneticElement::new(element));
        debug!(element, "registered magnetic element");
    }

    pub fn register_all(&mut self, elements: impl IntoIterator<Item = ElementId>) {
        for element in elements {
            self.register(element);
        }
    }

    /// Stop tracking an element and put it back at its layout position
    pub fn unregister(&mut self, element: ElementId, host: &mut dyn ElementHost) {
        if let Some(state) = self.elements.remove(&element) {
            if state.displacement != Vec2::ZERO {
                host.set_offset(element, Vec2::ZERO);
            }
            debug!(element, "unregistered magnetic element");
        }
    }

    pub fn on_hover_enter(&mut self, element: ElementId, host: &dyn ElementHost) {
        let Some(state) = self.elements.get_mut(&element) else {
            return;
        };
        if !state.machine.can_send(ENTER) {
            return;
        }
        let Some(rect) = host.bounding_rect(element) else {
            trace!(element, "no bounding box, ignoring hover");
            return;
        };
        // The reported box already includes a residual offset from an
        // interrupted return.
        state.origin = Some(rect.translate(state.displacement.scale(-1.0)));
        state.release = None;
        state.follow = None;
        state.machine.send(ENTER);
        trace!(element, "magnetic hover enter");
    }

    pub fn on_hover_move(&mut self, element: ElementId, x: f32, y: f32, host: &mut dyn ElementHost) {
        let Some(state) = self.elements.get_mut(&element) else {
            return;
        };
        if !state.machine.is_in(states::HOVERING) {
            return;
        }
        let Some(origin) = state.origin else {
            return;
        };
        let pointer = Point::new(x, y);
        if !pointer.is_finite() {
            return;
        }
        let target = (pointer - origin.center()).scale(self.pull_factor);
        let follow = Tween::new(
            state.displacement,
            target,
            self.follow_duration_ms,
            Easing::MAGNETIC_FOLLOW,
        );
        if follow.is_finished() {
            state.follow = None;
            state.displacement = target;
            host.set_offset(element, target);
        } else {
            state.follow = Some(follow);
        }
    }

    pub fn on_hover_leave(&mut self, element: ElementId, host: &mut dyn ElementHost) {
        let Some(state) = self.elements.get_mut(&element) else {
            return;
        };
        if !state.machine.can_send(LEAVE) {
            return;
        }
        state.machine.send(LEAVE);
        state.follow = None;

        let tween = Tween::new(
            state.displacement,
            Vec2::ZERO,
            self.return_duration_ms,
            self.easing,
        );
        if tween.is_finished() {
            settle(state, host);
        } else {
            state.release = Some(tween);
        }
        trace!(element, "magnetic hover leave");
    }

    /// Advance follow and return animations by `dt_ms` and apply their
    /// offsets
    pub fn tick(&mut self, dt_ms: f32, host: &mut dyn ElementHost) {
        for state in self.elements.values_mut() {
            if let Some(tween) = state.follow.as_mut() {
                state.displacement = tween.tick(dt_ms);
                if tween.is_finished() {
                    state.follow = None;
                }
                host.set_offset(state.element, state.displacement);
                continue;
            }
            let Some(tween) = state.release.as_mut() else {
                continue;
            };
            state.displacement = tween.tick(dt_ms);
            if tween.is_finished() {
                settle(state, host);
            } else {
                host.set_offset(state.element, state.displacement);
            }
        }
    }

    /// Delegated listener: routes pointer events by target id
    pub fn handle_event(&mut self, event: &Event, host: &mut dyn ElementHost) {
        match event.event_type {
            event_types::POINTER_ENTER => self.on_hover_enter(event.target, host),
            event_types::POINTER_MOVE => {
                if let Some(p) = event.pointer() {
                    self.on_hover_move(event.target, p.x, p.y, host);
                }
            }
            event_types::POINTER_LEAVE => self.on_hover_leave(event.target, host),
            _ => {}
        }
    }

    /// Snap every element back to its layout position and forget hover state
    pub fn release_all(&mut self, host: &mut dyn ElementHost) {
        for state in self.elements.values_mut() {
            if state.displacement != Vec2::ZERO {
                host.set_offset(state.element, Vec2::ZERO);
            }
            *state = MagneticElement::new(state.element);
        }
    }

    /// [`MagneticAffordance::release_all`], then drop every registration
    pub fn clear(&mut self, host: &mut dyn ElementHost) {
        self.release_all(host);
        self.elements.clear();
    }
}

fn settle(state: &mut MagneticElement, host: &mut dyn ElementHost) {
    state.displacement = Vec2::ZERO;
    state.release = None;
    state.origin = None;
    state.machine.send(SETTLED);
    host.set_offset(state.element, Vec2::ZERO);
}
