//! Reveal engine
//!
//! [`RevealEngine`] owns every piece of per-instance state. Pointer events
//! are queued into it between frames; [`RevealEngine::tick`] then runs one
//! frame:
//!
//! 1. estimate velocity from the tracker
//! 2. shape the aperture (or decide there is none)
//! 3. emit geometry from the aperture and earlier trail points, and apply
//!    it to the surface
//! 4. push the pointer position onto the trail
//! 5. advance magnetic return animations
//!
//! Engines share nothing, so any number of them can run side by side.

use reveal_paint::{Point, Size};
use tracing::{debug, trace};

use crate::aperture::{ApertureGeometry, ApertureShaper};
use crate::config::{InitialState, RevealConfig};
use crate::emitter::{GeometryEmitter, RenderCommand};
use crate::events::{event_types, ElementId, Event, VIEWPORT};
use crate::host::{ElementHost, RevealSurface};
use crate::magnetic::MagneticAffordance;
use crate::pointer::{PointerState, PointerTracker};
use crate::trail::{TrailBuffer, TrailPoint};
use crate::velocity::{VelocityEstimator, VelocitySample};

/// Frame-driven reveal engine
pub struct RevealEngine {
    config: RevealConfig,
    viewport: Size,
    tracker: PointerTracker,
    velocity: VelocityEstimator,
    shaper: ApertureShaper,
    trail: TrailBuffer,
    emitter: GeometryEmitter,
    magnetic: MagneticAffordance,
    surface: Option<Box<dyn RevealSurface>>,
    aperture: Option<ApertureGeometry>,
    /// Set once the pointer has entered at least once
    ever_entered: bool,
    disposed: bool,
    frame_count: u64,
}

impl RevealEngine {
    /// Create an engine. The configuration is sanitized first.
    pub fn new(config: RevealConfig, viewport: Size) -> Self {
        let config = config.sanitized();
        debug!(
            strategy = %config.emitter_strategy,
            width = viewport.width,
            height = viewport.height,
            "creating reveal engine"
        );
        Self {
            tracker: PointerTracker::new(),
            velocity: VelocityEstimator::from_config(&config),
            shaper: ApertureShaper::from_config(&config),
            trail: TrailBuffer::new(config.trail_length),
            emitter: GeometryEmitter::from_config(&config),
            magnetic: MagneticAffordance::from_config(&config),
            viewport: viewport.sanitized(),
            surface: None,
            aperture: None,
            ever_entered: false,
            disposed: false,
            frame_count: 0,
            config,
        }
    }

    /// Builder-style [`RevealEngine::attach_surface`]
    pub fn with_surface(mut self, surface: impl RevealSurface + 'static) -> Self {
        self.attach_surface(surface);
        self
    }

    pub fn attach_surface(&mut self, surface: impl RevealSurface + 'static) {
        self.surface = Some(Box::new(surface));
        debug!("surface attached");
    }

    /// Detach and return the current surface
    pub fn detach_surface(&mut self) -> Option<Box<dyn RevealSurface>> {
        let surface = self.surface.take();
        if surface.is_some() {
            debug!("surface detached");
        }
        surface
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Replace the configuration. Trail, velocity and magnetic registrations
    /// are kept; the trail is truncated if its capacity shrinks.
    pub fn reconfigure(&mut self, config: RevealConfig) {
        let config = config.sanitized();
        self.velocity = {
            let mut estimator = VelocityEstimator::from_config(&config);
            if self.tracker.has_entered() {
                // keep the running estimate across tuning changes
                estimator.restore(self.velocity.sample());
            }
            estimator
        };
        self.shaper = ApertureShaper::from_config(&config);
        self.trail.set_capacity(config.trail_length);
        self.emitter = GeometryEmitter::from_config(&config);
        self.magnetic.configure(&config);
        self.config = config;
        debug!(strategy = %self.config.emitter_strategy, "reconfigured reveal engine");
    }

    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport.sanitized();
        debug!(
            width = self.viewport.width,
            height = self.viewport.height,
            "viewport resized"
        );
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if self.disposed {
            return;
        }
        self.tracker.on_pointer_move(x, y);
        if self.tracker.has_entered() && !self.ever_entered {
            self.ever_entered = true;
            debug!(x, y, "pointer entered viewport");
        }
    }

    /// The pointer left the viewport: the hole closes and the trail is
    /// discarded until the pointer comes back.
    pub fn on_pointer_leave(&mut self) {
        if self.disposed {
            return;
        }
        self.tracker.on_pointer_leave();
        self.trail.clear();
        self.velocity.reset();
        debug!("pointer left viewport");
    }

    /// Single entry point for host events. Viewport events drive the pointer
    /// tracker; events targeting other elements drive magnetic affordances.
    pub fn handle_event(&mut self, event: &Event, host: &mut dyn ElementHost) {
        if self.disposed {
            return;
        }
        if !event.targets_viewport() {
            self.magnetic.handle_event(event, host);
            return;
        }
        match event.event_type {
            event_types::POINTER_MOVE | event_types::POINTER_ENTER => {
                if let Some(p) = event.pointer() {
                    self.on_pointer_move(p.x, p.y);
                }
            }
            event_types::POINTER_LEAVE => self.on_pointer_leave(),
            event_types::RESIZE => {
                if let Some(size) = event.size() {
                    self.resize(size);
                }
            }
            other => trace!(event_type = other, "ignoring viewport event"),
        }
    }

    pub fn register_magnetic(&mut self, elements: impl IntoIterator<Item = ElementId>) {
        if self.disposed {
            return;
        }
        self.magnetic.register_all(elements.into_iter().filter(|&e| e != VIEWPORT));
    }

    pub fn unregister_magnetic(&mut self, element: ElementId, host: &mut dyn ElementHost) {
        self.magnetic.unregister(element, host);
    }

    /// Run one frame. `dt_ms` only drives magnetic animations; pointer
    /// physics are measured per frame.
    pub fn tick(&mut self, dt_ms: f32, host: &mut dyn ElementHost) -> RenderCommand {
        if self.disposed {
            return self.emitter.full_cover(self.viewport);
        }

        let state = *self.tracker.state();
        let velocity = self.velocity.update(&state);

        self.aperture = match state.position() {
            Some(center) => Some(self.shaper.shape(center, &velocity)),
            None if self.config.initial_state == InitialState::Centered && !self.ever_entered => {
                Some(self.shaper.rest(self.viewport.center()))
            }
            None => None,
        };

        let command = match self.aperture.as_ref() {
            Some(aperture) => {
                let trail = self.emitter.visible_trail(aperture, &self.trail.snapshot());
                self.emitter.emit(self.viewport, Some(aperture), &trail)
            }
            None => self.emitter.full_cover(self.viewport),
        };
        if let Some(surface) = self.surface.as_mut() {
            surface.apply(&command);
        }

        // Pushed after emission so the drawn trail holds earlier frames only
        if let Some(position) = state.position() {
            self.trail.push(position);
        }
        self.tracker.advance_frame();

        self.magnetic.tick(dt_ms, host);
        self.frame_count += 1;

        trace!(
            frame = self.frame_count,
            speed = velocity.smoothed_speed,
            direction = velocity.direction,
            trail = self.trail.len(),
            exclusions = command.exclusion_count(),
            "frame"
        );
        command
    }

    /// Tear the engine down: clears the trail, puts magnetic elements back
    /// and detaches the surface. Later ticks return the full cover.
    pub fn dispose(&mut self, host: &mut dyn ElementHost) {
        if self.disposed {
            return;
        }
        self.tracker.on_pointer_leave();
        self.velocity.reset();
        self.trail.clear();
        self.aperture = None;
        self.magnetic.clear(host);
        self.surface = None;
        self.disposed = true;
        debug!(frames = self.frame_count, "reveal engine disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Aperture of the most recent frame
    pub fn aperture(&self) -> Option<&ApertureGeometry> {
        self.aperture.as_ref()
    }

    pub fn velocity(&self) -> VelocitySample {
        self.velocity.sample()
    }

    pub fn trail(&self) -> Vec<TrailPoint> {
        self.trail.snapshot()
    }

    pub fn pointer(&self) -> &PointerState {
        self.tracker.state()
    }

    /// Current pointer position, if inside the viewport
    pub fn pointer_position(&self) -> Option<Point> {
        self.tracker.state().position()
    }

    pub fn magnetic(&self) -> &MagneticAffordance {
        &self.magnetic
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl std::fmt::Debug for RevealEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealEngine")
            .field("viewport", &self.viewport)
            .field("strategy", &self.config.emitter_strategy)
            .field("pointer", self.tracker.state())
            .field("aperture", &self.aperture)
            .field("trail", &self.trail.len())
            .field("magnetic", &self.magnetic.len())
            .field("has_surface", &self.surface.is_some())
            .field("disposed", &self.disposed)
            .field("frame_count", &self.frame_count)
            .finish()
    }
}
