//! Color types and utilities

use crate::format::Precision;

/// RGBA color with f32 components (0.0 to 1.0)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Convert to u8 array [r, g, b, a]
    pub fn to_rgba8(&self) -> [u8; 4] {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a),
        ]
    }

    /// CSS color value. Mask keywords (`transparent`, `black`) are used
    /// when they match exactly.
    pub fn to_css(&self, precision: Precision) -> String {
        if *self == Self::TRANSPARENT {
            return "transparent".to_string();
        }
        if *self == Self::BLACK {
            return "black".to_string();
        }
        let [r, g, b, _] = self.to_rgba8();
        format!(
            "rgba({r}, {g}, {b}, {})",
            precision.format(self.a.clamp(0.0, 1.0))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_keywords() {
        assert_eq!(Color::TRANSPARENT.to_css(Precision::DEFAULT), "transparent");
        assert_eq!(Color::BLACK.to_css(Precision::DEFAULT), "black");
    }

    #[test]
    fn test_css_rgba() {
        let c = Color {
            r: 1.0,
            g: 0.5,
            b: 0.0,
            a: 0.5,
        };
        assert_eq!(c.to_css(Precision::DEFAULT), "rgba(255, 128, 0, 0.50)");
    }
}
