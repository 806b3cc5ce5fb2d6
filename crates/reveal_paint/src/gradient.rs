//! Gradient fills

use crate::color::Color;
use crate::format::Precision;
use crate::path::Point;

/// A gradient stop
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientStop {
    pub offset: f32, // 0.0 to 1.0
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Gradient type
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Gradient {
    Linear {
        /// Direction in degrees (CSS convention, 180 = top to bottom)
        angle: f32,
        stops: Vec<GradientStop>,
    },
    /// Elliptical radial gradient, axis-aligned
    Radial {
        center: Point,
        radius_x: f32,
        radius_y: f32,
        stops: Vec<GradientStop>,
    },
}

impl Gradient {
    /// Create a simple linear gradient between two colors
    pub fn linear_simple(angle: f32, from: Color, to: Color) -> Self {
        Gradient::Linear {
            angle,
            stops: vec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
        }
    }

    pub fn stops(&self) -> &[GradientStop] {
        match self {
            Gradient::Linear { stops, .. } | Gradient::Radial { stops, .. } => stops,
        }
    }

    /// Serialize as a CSS `<image>` value
    pub fn to_css(&self, precision: Precision) -> String {
        let mut out = String::new();
        match self {
            Gradient::Linear { angle, .. } => {
                out.push_str("linear-gradient(");
                precision.write(&mut out, *angle);
                out.push_str("deg");
            }
            Gradient::Radial {
                center,
                radius_x,
                radius_y,
                ..
            } => {
                out.push_str("radial-gradient(ellipse ");
                precision.write(&mut out, *radius_x);
                out.push_str("px ");
                precision.write(&mut out, *radius_y);
                out.push_str("px at ");
                precision.write(&mut out, center.x);
                out.push_str("px ");
                precision.write(&mut out, center.y);
                out.push_str("px");
            }
        }
        for stop in self.stops() {
            out.push_str(", ");
            out.push_str(&stop.color.to_css(precision));
            out.push(' ');
            precision.write(&mut out, stop.offset.clamp(0.0, 1.0) * 100.0);
            out.push('%');
        }
        out.push(')');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radial_css() {
        let g = Gradient::Radial {
            center: Point::new(100.0, 50.0),
            radius_x: 40.0,
            radius_y: 20.0,
            stops: vec![
                GradientStop::new(0.0, Color::TRANSPARENT),
                GradientStop::new(1.0, Color::BLACK),
            ],
        };
        assert_eq!(
            g.to_css(Precision::new(0)),
            "radial-gradient(ellipse 40px 20px at 100px 50px, transparent 0%, black 100%)"
        );
    }

    #[test]
    fn test_linear_css() {
        let g = Gradient::linear_simple(180.0, Color::BLACK, Color::BLACK);
        assert_eq!(
            g.to_css(Precision::new(0)),
            "linear-gradient(180deg, black 0%, black 100%)"
        );
    }
}
