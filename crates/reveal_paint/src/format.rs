//! Fixed-precision number formatting
//!
//! Serialized geometry is written with a fixed number of decimals so that
//! sub-pixel noise does not change the output string between frames.

use std::fmt::Write;

/// Number of decimal digits used when serializing geometry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Precision(u8);

impl Precision {
    /// Largest supported number of decimals
    pub const MAX_DIGITS: u8 = 6;

    /// Two decimals (sub-pixel accurate, stable across frames)
    pub const DEFAULT: Precision = Precision(2);

    /// Create a precision, clamped to [`Precision::MAX_DIGITS`]
    pub const fn new(digits: u8) -> Self {
        if digits > Self::MAX_DIGITS {
            Self(Self::MAX_DIGITS)
        } else {
            Self(digits)
        }
    }

    pub const fn digits(self) -> u8 {
        self.0
    }

    /// Format a value with this precision.
    ///
    /// Non-finite values are written as zero and negative zero loses its
    /// sign, so `-0.001` at two decimals becomes `0.00`.
    pub fn format(self, value: f32) -> String {
        let mut out = String::new();
        self.write(&mut out, value);
        out
    }

    /// Append a formatted value to `out`
    pub fn write(self, out: &mut String, value: f32) {
        let value = if value.is_finite() { value } else { 0.0 };
        let start = out.len();
        // Writing into a String cannot fail
        let _ = write!(out, "{:.*}", self.0 as usize, value);
        let written = &out[start..];
        if written.starts_with('-') && written[1..].bytes().all(|b| b == b'0' || b == b'.') {
            out.remove(start);
        }
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_decimals() {
        let p = Precision::new(2);
        assert_eq!(p.format(1.0), "1.00");
        assert_eq!(p.format(12.345_6), "12.35");
        assert_eq!(Precision::new(0).format(7.4), "7");
    }

    #[test]
    fn test_negative_zero_is_normalized() {
        let p = Precision::DEFAULT;
        assert_eq!(p.format(-0.0), "0.00");
        assert_eq!(p.format(-0.001), "0.00");
        assert_eq!(p.format(-0.5), "-0.50");
    }

    #[test]
    fn test_non_finite_written_as_zero() {
        assert_eq!(Precision::DEFAULT.format(f32::NAN), "0.00");
        assert_eq!(Precision::DEFAULT.format(f32::INFINITY), "0.00");
    }

    #[test]
    fn test_digits_are_clamped() {
        assert_eq!(Precision::new(40).digits(), Precision::MAX_DIGITS);
    }

    #[test]
    fn test_write_appends() {
        let mut out = String::from("x=");
        Precision::new(1).write(&mut out, -0.04);
        assert_eq!(out, "x=0.0");
    }
}
