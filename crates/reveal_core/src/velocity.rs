//! Velocity estimation
//!
//! Speed is measured in distance per frame and smoothed with an exponential
//! moving average. Direction only follows the pointer once a frame's
//! movement exceeds the jitter threshold, so a nearly still pointer does not
//! make the aperture flicker between orientations.

use crate::config::RevealConfig;
use crate::pointer::PointerState;

/// Smoothed speeds below this are treated as rest
const REST_EPSILON: f32 = 1e-4;

/// Per-frame velocity estimate
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocitySample {
    /// Exponentially smoothed speed, never negative
    pub smoothed_speed: f32,
    /// Unsmoothed distance travelled this frame
    pub instant_speed: f32,
    /// Direction of travel in degrees, measured from +x towards +y
    pub direction: f32,
}

impl VelocitySample {
    pub const REST: VelocitySample = VelocitySample {
        smoothed_speed: 0.0,
        instant_speed: 0.0,
        direction: 0.0,
    };
}

/// Derives smoothed speed and sticky direction from tracker state
#[derive(Clone, Debug)]
pub struct VelocityEstimator {
    smoothing: f32,
    jitter_threshold: f32,
    sample: VelocitySample,
}

impl VelocityEstimator {
    /// `smoothing` must lie in `(0, 1]` and `jitter_threshold` must not be
    /// negative; [`RevealConfig::sanitized`] guarantees both.
    pub fn new(smoothing: f32, jitter_threshold: f32) -> Self {
        Self {
            smoothing,
            jitter_threshold,
            sample: VelocitySample::REST,
        }
    }

    pub fn from_config(config: &RevealConfig) -> Self {
        Self::new(config.velocity_smoothing_factor, config.jitter_threshold)
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    pub fn jitter_threshold(&self) -> f32 {
        self.jitter_threshold
    }

    /// The most recent estimate
    pub fn sample(&self) -> VelocitySample {
        self.sample
    }

    /// Fold one frame of pointer movement into the estimate.
    ///
    /// Call exactly once per frame, before the tracker advances its
    /// previous position.
    pub fn update(&mut self, state: &PointerState) -> VelocitySample {
        let delta = state.delta();
        let instant = delta.length();

        let mut smoothed =
            self.sample.smoothed_speed + self.smoothing * (instant - self.sample.smoothed_speed);
        if !smoothed.is_finite() || smoothed < REST_EPSILON {
            smoothed = 0.0;
        }

        let direction = if instant > self.jitter_threshold {
            delta.angle_degrees()
        } else {
            self.sample.direction
        };

        self.sample = VelocitySample {
            smoothed_speed: smoothed,
            instant_speed: instant,
            direction,
        };
        self.sample
    }

    /// Continue from a previous estimate, e.g. after retuning
    pub fn restore(&mut self, sample: VelocitySample) {
        self.sample = sample;
    }

    /// Forget all motion; direction returns to 0°
    pub fn reset(&mut self) {
        self.sample = VelocitySample::REST;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reveal_paint::Point;

    fn moving(from: Point, to: Point) -> PointerState {
        PointerState {
            position: to,
            previous_position: from,
            has_entered: true,
        }
    }

    #[test]
    fn test_settles_on_constant_speed() {
        let mut estimator = VelocityEstimator::new(0.1, 2.0);
        let state = moving(Point::new(0.0, 0.0), Point::new(100.0, 0.0));

        let mut previous = 0.0;
        for _ in 0..50 {
            let sample = estimator.update(&state);
            assert!(sample.smoothed_speed > previous, "must rise monotonically");
            assert!(sample.smoothed_speed <= 100.0);
            previous = sample.smoothed_speed;
        }

        assert!((previous - 100.0).abs() <= 1.0, "settled at {previous}");
    }

    #[test]
    fn test_direction_sticks_below_threshold() {
        let mut estimator = VelocityEstimator::new(0.1, 2.0);
        let sample = estimator.update(&moving(Point::new(0.0, 0.0), Point::new(0.0, 50.0)));
        assert!((sample.direction - 90.0).abs() < 1e-3);

        for step in 0..10 {
            let jitter = if step % 2 == 0 { 1.5 } else { -1.5 };
            let sample =
                estimator.update(&moving(Point::new(0.0, 50.0), Point::new(jitter, 50.0)));
            assert!((sample.direction - 90.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_horizontal_motion_is_zero_degrees() {
        let mut estimator = VelocityEstimator::new(0.1, 2.0);
        let sample = estimator.update(&moving(Point::new(100.0, 100.0), Point::new(500.0, 100.0)));
        assert_eq!(sample.direction, 0.0);
        assert_eq!(sample.instant_speed, 400.0);
        assert!((sample.smoothed_speed - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_decays_when_outside_viewport() {
        let mut estimator = VelocityEstimator::new(0.5, 2.0);
        estimator.update(&moving(Point::new(0.0, 0.0), Point::new(80.0, 0.0)));
        let before = estimator.sample().smoothed_speed;

        let sample = estimator.update(&PointerState::default());
        assert_eq!(sample.instant_speed, 0.0);
        assert!(sample.smoothed_speed < before);
    }

    #[test]
    fn test_from_sanitized_config() {
        let config = RevealConfig {
            velocity_smoothing_factor: 4.0,
            jitter_threshold: -3.0,
            ..Default::default()
        }
        .sanitized();
        let estimator = VelocityEstimator::from_config(&config);
        assert_eq!(estimator.smoothing(), 1.0);
        assert_eq!(estimator.jitter_threshold(), 0.0);
    }

    #[test]
    fn test_reset_returns_to_rest() {
        let mut estimator = VelocityEstimator::new(0.1, 2.0);
        estimator.update(&moving(Point::new(0.0, 0.0), Point::new(0.0, -40.0)));
        estimator.reset();
        assert_eq!(estimator.sample(), VelocitySample::REST);
    }
}
