//! Reveal Paint primitives
//!
//! Leaf geometry types shared by the reveal engine and its render backends.
//!
//! # Features
//!
//! - Points, vectors, rectangles and rotated ellipses
//! - Path building with elliptical arcs and fill rules
//! - Elliptical radial gradients for image-based masking
//! - Fixed-precision serialization (SVG path data, CSS gradients) so
//!   identical geometry always produces identical strings

pub mod color;
pub mod format;
pub mod gradient;
pub mod path;
pub mod primitives;

pub use color::Color;
pub use format::Precision;
pub use gradient::{Gradient, GradientStop};
pub use path::{FillRule, Path, PathBuilder, PathCommand, Point, Vec2};
pub use primitives::*;
