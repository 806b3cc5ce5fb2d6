//! Fixed-duration tweens
//!
//! A tween interpolates from a start value to an end value over a duration,
//! shaped by an [`Easing`] curve. It has no clock of its own: the owner
//! advances it with [`Tween::tick`] once per frame.

use reveal_paint::Vec2;

use crate::easing::Easing;

/// Values a [`Tween`] can interpolate
pub trait Interpolate: Copy {
    /// Interpolate between `self` and `other`. `t` may leave [0, 1] for
    /// overshooting easings.
    fn interpolate(self, other: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Vec2 {
    fn interpolate(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

/// A time-based animation between two values
#[derive(Clone, Debug)]
pub struct Tween<T: Interpolate> {
    from: T,
    to: T,
    duration_ms: f32,
    elapsed_ms: f32,
    easing: Easing,
}

impl<T: Interpolate> Tween<T> {
    /// Create a tween. A non-positive duration produces a tween that is
    /// already finished at `to`.
    pub fn new(from: T, to: T, duration_ms: f32, easing: Easing) -> Self {
        let duration_ms = if duration_ms.is_finite() {
            duration_ms.max(0.0)
        } else {
            0.0
        };
        Self {
            from,
            to,
            duration_ms,
            elapsed_ms: 0.0,
            easing,
        }
    }

    pub fn from(&self) -> T {
        self.from
    }

    pub fn to(&self) -> T {
        self.to
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Linear progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Get the current interpolated value
    pub fn value(&self) -> T {
        if self.is_finished() {
            return self.to;
        }
        let eased = self.easing.apply(self.progress());
        self.from.interpolate(self.to, eased)
    }

    /// Advance the tween by delta time (in milliseconds) and return the new value
    pub fn tick(&mut self, dt_ms: f32) -> T {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
        }
        self.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scalar_tween() {
        let mut tween = Tween::new(0.0f32, 100.0, 100.0, Easing::Linear);
        assert_eq!(tween.value(), 0.0);
        assert_eq!(tween.tick(25.0), 25.0);
        assert_eq!(tween.tick(25.0), 50.0);
        assert!(!tween.is_finished());
        assert_eq!(tween.tick(1000.0), 100.0);
        assert!(tween.is_finished());
    }

    #[test]
    fn test_zero_duration_is_finished() {
        let tween = Tween::new(Vec2::new(5.0, 5.0), Vec2::ZERO, 0.0, Easing::Linear);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), Vec2::ZERO);
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut tween = Tween::new(0.0f32, 10.0, 100.0, Easing::Linear);
        tween.tick(50.0);
        assert_eq!(tween.tick(-20.0), 5.0);
        assert_eq!(tween.tick(f32::NAN), 5.0);
    }

    #[test]
    fn test_vector_tween_ends_exactly_at_target() {
        let mut tween = Tween::new(
            Vec2::new(30.0, -12.0),
            Vec2::ZERO,
            500.0,
            Easing::MAGNETIC_RELEASE,
        );
        let mut crossed_zero = false;
        for _ in 0..40 {
            let v = tween.tick(1000.0 / 60.0);
            if v.x < 0.0 {
                crossed_zero = true;
            }
        }
        assert!(crossed_zero, "elastic release should swing past rest");
        assert_eq!(tween.value(), Vec2::ZERO);
        assert!(tween.is_finished());
    }
}
