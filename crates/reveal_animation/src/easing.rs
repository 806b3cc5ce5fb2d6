//! Easing functions for animations

use std::f32::consts::TAU;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseOutQuad,
    EaseOutQuart,
    /// Overshoots past the target then settles back. `overshoot` of 1.70158
    /// gives the classic ~10% overshoot.
    BackOut { overshoot: f32 },
    /// Decaying oscillation around the target. `amplitude` (≥ 1) scales the
    /// first swing, `period` is the oscillation length in normalized time.
    ElasticOut { amplitude: f32, period: f32 },
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// The spring-back curve used when a magnetic element is released
    pub const MAGNETIC_RELEASE: Easing = Easing::ElasticOut {
        amplitude: 1.0,
        period: 0.4,
    };

    /// Decelerating curve a hovered magnetic element follows the pointer with
    pub const MAGNETIC_FOLLOW: Easing = Easing::EaseOutQuad;

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        // Endpoints are always exact
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::BackOut { overshoot } => {
                let s = *overshoot;
                let u = t - 1.0;
                1.0 + (s + 1.0) * u * u * u + s * u * u
            }
            Easing::ElasticOut { amplitude, period } => elastic_out(t, *amplitude, *period),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
        }
    }

    /// Whether the curve leaves the [0, 1] range before settling
    pub fn overshoots(&self) -> bool {
        match self {
            Easing::BackOut { overshoot } => *overshoot > 0.0,
            Easing::ElasticOut { .. } => true,
            Easing::CubicBezier(_, y1, _, y2) => !(0.0..=1.0).contains(y1) || !(0.0..=1.0).contains(y2),
            _ => false,
        }
    }
}

/// Exponentially decaying sine, starting at 0 and converging on 1.
fn elastic_out(t: f32, amplitude: f32, period: f32) -> f32 {
    let period = if period > 0.0 { period } else { 0.3 };
    let amplitude = amplitude.max(1.0);
    // Phase shift so the curve starts exactly at 0
    let shift = period / TAU * (1.0 / amplitude).asin();
    amplitude * 2f32.powf(-10.0 * t) * ((t - shift) * TAU / period).sin() + 1.0
}

/// Cubic bezier easing calculation (matches browser `cubic-bezier()` timing).
///
/// Uses Newton-Raphson with binary-search fallback for robustness.
/// Computes in f64 internally to avoid f32 precision jitter at 120fps.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let x = t as f64;
    let x1 = x1 as f64;
    let y1 = y1 as f64;
    let x2 = x2 as f64;
    let y2 = y2 as f64;

    // Solve for parameter `p` where bezier_x(p) == x using Newton-Raphson,
    // falling back to binary search if the slope is too flat.
    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2) as f32
}

/// Evaluate cubic bezier at parameter t: B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

/// Derivative of cubic bezier: B'(t) = 3(1-t)²·p1 + 6(1-t)t·(p2-p1) + 3t²·(1-p2)
#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 9] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EaseOutQuad,
        Easing::EaseOutQuart,
        Easing::BackOut { overshoot: 1.70158 },
        Easing::MAGNETIC_RELEASE,
        Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
            assert_eq!(easing.apply(-0.5), 0.0, "{easing:?} below range");
            assert_eq!(easing.apply(1.5), 1.0, "{easing:?} above range");
        }
    }

    #[test]
    fn test_elastic_overshoots_and_settles() {
        let easing = Easing::MAGNETIC_RELEASE;
        let samples: Vec<f32> = (1..100).map(|i| easing.apply(i as f32 / 100.0)).collect();
        let peak = samples.iter().cloned().fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "elastic curve should overshoot, peak was {peak}");
        assert!((easing.apply(0.99) - 1.0).abs() < 0.01);
        assert!(easing.overshoots());
    }

    #[test]
    fn test_back_out_overshoots() {
        let easing = Easing::BackOut { overshoot: 1.70158 };
        assert!(easing.apply(0.6) > 1.0);
        assert!(!Easing::EaseOut.overshoots());
    }

    #[test]
    fn test_cubic_bezier_linear_matches_identity() {
        let easing = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!((easing.apply(t) - t).abs() < 1e-3);
        }
    }
}
