//! Reveal Animation System
//!
//! Easing curves and time-based tweens used to animate magnetic elements
//! back to rest.
//!
//! # Features
//!
//! - **Easing**: polynomial, cubic-bezier and overshooting curves
//!   (`BackOut`, `ElasticOut`)
//! - **Tweens**: fixed-duration interpolation of scalars and vectors,
//!   advanced explicitly by the frame clock

pub mod easing;
pub mod tween;

pub use easing::Easing;
pub use tween::{Interpolate, Tween};
