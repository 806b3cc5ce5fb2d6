//! Reveal Core Runtime
//!
//! A cursor-driven reveal engine: an opaque cover spans the viewport and a
//! velocity-reactive elliptical hole follows the pointer, leaving a fading
//! trail behind it. Nearby elements can be marked magnetic and lean towards
//! the pointer while hovered.
//!
//! - **Pointer physics**: frame-coalesced tracking, smoothed speed and a
//!   jitter-resistant direction
//! - **Aperture geometry**: speed stretches the hole along the direction of
//!   travel, within fixed bounds
//! - **Emitters**: the same frame rendered as an even-odd SVG path, a single
//!   ellipse's attributes, or a CSS mask
//! - **Magnetic affordance**: per-element state machines with an elastic
//!   return
//!
//! # Example
//!
//! ```rust
//! use reveal_core::{HeadlessSurface, NoHost, RevealConfig, RevealEngine};
//! use reveal_paint::Size;
//!
//! let surface = HeadlessSurface::new();
//! let mut engine = RevealEngine::new(RevealConfig::default(), Size::new(800.0, 600.0))
//!     .with_surface(surface.clone());
//!
//! engine.on_pointer_move(100.0, 100.0);
//! engine.tick(16.0, &mut NoHost);
//! engine.on_pointer_move(500.0, 100.0);
//! let command = engine.tick(16.0, &mut NoHost);
//!
//! assert_eq!(command.exclusion_count(), 2);
//! assert_eq!(surface.len(), 2);
//! ```

pub mod aperture;
pub mod config;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod events;
pub mod fsm;
pub mod headless;
pub mod host;
pub mod magnetic;
pub mod pointer;
pub mod trail;
pub mod velocity;

pub use aperture::{ApertureGeometry, ApertureShaper};
pub use config::{EmitterStrategy, InitialState, RevealConfig};
pub use emitter::{EllipseAttributes, GeometryEmitter, MaskExpression, RenderCommand, SubtractivePath};
pub use engine::RevealEngine;
pub use error::{ConfigError, Result};
pub use events::{ElementId, Event, EventData, EventType, VIEWPORT};
pub use fsm::{StateId, StateMachine, Transition};
pub use headless::{HeadlessPage, HeadlessSurface};
pub use host::{ElementHost, NoHost, RevealSurface};
pub use magnetic::{MagneticAffordance, MagneticElement};
pub use pointer::{PointerState, PointerTracker};
pub use trail::{TrailBuffer, TrailPoint};
pub use velocity::{VelocityEstimator, VelocitySample};
