//! Engine configuration
//!
//! Every tunable of the engine lives in one [`RevealConfig`]. It loads from
//! TOML with per-field defaults, and [`RevealConfig::sanitized`] clamps
//! out-of-range values to the nearest valid one instead of rejecting them.
//! That is the only place ranges are enforced: components built with
//! `from_config` take the values of a sanitized configuration as given.

use std::fmt;
use std::str::FromStr;

use reveal_animation::Easing;
use reveal_paint::Precision;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, Result};

/// Smallest radius any aperture may have
pub const MIN_RADIUS: f32 = 1.0;

/// Largest supported trail capacity
pub const MAX_TRAIL_LENGTH: usize = 256;

/// Smallest accepted velocity smoothing factor (0 would freeze the estimate)
pub const MIN_SMOOTHING_FACTOR: f32 = 0.001;

/// Which render representation the emitter produces
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmitterStrategy {
    /// Full-viewport path with one even-odd hole per trail point and aperture
    #[default]
    Path,
    /// Center/radius/rotation attributes for a single ellipse primitive
    Attributes,
    /// CSS radial-gradient mask layers
    Mask,
}

impl EmitterStrategy {
    pub const ALL: [EmitterStrategy; 3] = [
        EmitterStrategy::Path,
        EmitterStrategy::Attributes,
        EmitterStrategy::Mask,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EmitterStrategy::Path => "path",
            EmitterStrategy::Attributes => "attributes",
            EmitterStrategy::Mask => "mask",
        }
    }
}

impl fmt::Display for EmitterStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmitterStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "path" => Ok(EmitterStrategy::Path),
            "attributes" | "attrs" => Ok(EmitterStrategy::Attributes),
            "mask" => Ok(EmitterStrategy::Mask),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

/// What the reveal surface shows before the pointer first enters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialState {
    /// Overlay fully covers the surface, no hole
    #[default]
    Covered,
    /// A resting aperture sits at the viewport center
    Centered,
}

impl FromStr for InitialState {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "covered" => Ok(InitialState::Covered),
            "centered" | "centred" => Ok(InitialState::Centered),
            _ => Err(ConfigError::UnknownInitialState(s.to_string())),
        }
    }
}

/// Top-level engine configuration (reveal.toml)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Aperture radius at rest
    pub base_radius: f32,
    /// Floor for the compressed (minor) radius
    pub min_radius: f32,
    /// Largest growth of the major radius
    pub max_stretch: f32,
    /// Stretch per unit of smoothed speed
    pub stretch_gain: f32,
    /// Minor radius shrink per unit of stretch
    pub compression_ratio: f32,
    /// Trail capacity in frames (0 disables the trail)
    pub trail_length: usize,
    /// Scale of the most recent trail point relative to the aperture
    pub trail_decay: f32,
    /// Exponential smoothing factor for pointer speed, in (0, 1]
    pub velocity_smoothing_factor: f32,
    /// Per-frame movement below which the direction is kept
    pub jitter_threshold: f32,
    /// Fraction of the pointer offset applied to magnetic elements
    pub magnetic_pull_factor: f32,
    /// Time a hovered element takes to catch up with the pointer (0 snaps)
    pub magnetic_follow_duration_ms: u32,
    /// Duration of the spring-back after hover ends
    pub magnetic_return_duration_ms: u32,
    pub emitter_strategy: EmitterStrategy,
    pub initial_state: InitialState,
    /// Fraction of the mask radius used for the transparent-to-opaque edge
    pub mask_feather: f32,
    /// Decimals used when serializing geometry
    pub precision: Precision,
    /// Easing of the spring-back after hover ends
    pub magnetic_return_easing: Easing,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            base_radius: 80.0,
            min_radius: 24.0,
            max_stretch: 60.0,
            stretch_gain: 1.5,
            compression_ratio: 0.5,
            trail_length: 20,
            trail_decay: 0.6,
            velocity_smoothing_factor: 0.1,
            jitter_threshold: 2.0,
            magnetic_pull_factor: 0.3,
            magnetic_follow_duration_ms: 250,
            magnetic_return_duration_ms: 500,
            emitter_strategy: EmitterStrategy::Path,
            initial_state: InitialState::Covered,
            mask_feather: 0.15,
            precision: Precision::DEFAULT,
            magnetic_return_easing: Easing::MAGNETIC_RELEASE,
        }
    }
}

impl RevealConfig {
    /// Parse a configuration from TOML text. Missing fields take their
    /// defaults and the result is sanitized.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RevealConfig = toml::from_str(content)?;
        Ok(config.sanitized())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn with_strategy(mut self, strategy: EmitterStrategy) -> Self {
        self.emitter_strategy = strategy;
        self
    }

    pub fn with_initial_state(mut self, state: InitialState) -> Self {
        self.initial_state = state;
        self
    }

    pub fn with_trail_length(mut self, length: usize) -> Self {
        self.trail_length = length;
        self
    }

    pub fn with_base_radius(mut self, radius: f32) -> Self {
        self.base_radius = radius;
        self
    }

    pub fn with_smoothing(mut self, factor: f32) -> Self {
        self.velocity_smoothing_factor = factor;
        self
    }

    pub fn with_pull_factor(mut self, factor: f32) -> Self {
        self.magnetic_pull_factor = factor;
        self
    }

    pub fn with_follow_duration(mut self, duration_ms: u32) -> Self {
        self.magnetic_follow_duration_ms = duration_ms;
        self
    }

    /// Return a copy with every field clamped into its valid range.
    ///
    /// Non-finite values fall back to the default. Each adjusted field is
    /// reported with a `warn!`.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut out = self.clone();

        out.base_radius = clamp_field(
            "base_radius",
            self.base_radius,
            MIN_RADIUS,
            f32::MAX,
            defaults.base_radius,
        );
        out.min_radius = clamp_field(
            "min_radius",
            self.min_radius,
            MIN_RADIUS,
            out.base_radius,
            defaults.min_radius.min(out.base_radius),
        );
        out.max_stretch = clamp_field(
            "max_stretch",
            self.max_stretch,
            0.0,
            f32::MAX,
            defaults.max_stretch,
        );
        out.stretch_gain = clamp_field(
            "stretch_gain",
            self.stretch_gain,
            0.0,
            f32::MAX,
            defaults.stretch_gain,
        );
        out.compression_ratio = clamp_field(
            "compression_ratio",
            self.compression_ratio,
            0.0,
            f32::MAX,
            defaults.compression_ratio,
        );
        if self.trail_length > MAX_TRAIL_LENGTH {
            warn!(
                field = "trail_length",
                value = self.trail_length,
                clamped = MAX_TRAIL_LENGTH,
                "configuration value out of range"
            );
            out.trail_length = MAX_TRAIL_LENGTH;
        }
        out.trail_decay = clamp_field(
            "trail_decay",
            self.trail_decay,
            0.0,
            1.0,
            defaults.trail_decay,
        );
        out.velocity_smoothing_factor = clamp_field(
            "velocity_smoothing_factor",
            self.velocity_smoothing_factor,
            MIN_SMOOTHING_FACTOR,
            1.0,
            defaults.velocity_smoothing_factor,
        );
        out.jitter_threshold = clamp_field(
            "jitter_threshold",
            self.jitter_threshold,
            0.0,
            f32::MAX,
            defaults.jitter_threshold,
        );
        out.magnetic_pull_factor = clamp_field(
            "magnetic_pull_factor",
            self.magnetic_pull_factor,
            0.0,
            1.0,
            defaults.magnetic_pull_factor,
        );
        out.mask_feather = clamp_field(
            "mask_feather",
            self.mask_feather,
            0.0,
            1.0,
            defaults.mask_feather,
        );
        let precision = Precision::new(self.precision.digits());
        if precision != self.precision {
            warn!(
                field = "precision",
                value = self.precision.digits(),
                clamped = precision.digits(),
                "configuration value out of range"
            );
            out.precision = precision;
        }
        out
    }
}

fn clamp_field(name: &'static str, value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    let clamped = if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    };
    // Compare bit patterns so NaN inputs are always reported
    if clamped.to_bits() != value.to_bits() {
        warn!(
            field = name,
            value = %value,
            clamped = %clamped,
            "configuration value out of range"
        );
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_already_sane() {
        let config = RevealConfig::default();
        assert_eq!(config.sanitized(), config);
    }

    #[test]
    fn test_negative_radii_are_clamped() {
        let config = RevealConfig {
            base_radius: -20.0,
            min_radius: -5.0,
            max_stretch: -1.0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(config.base_radius, MIN_RADIUS);
        assert_eq!(config.min_radius, MIN_RADIUS);
        assert_eq!(config.max_stretch, 0.0);
    }

    #[test]
    fn test_min_radius_never_exceeds_base() {
        let config = RevealConfig {
            base_radius: 30.0,
            min_radius: 50.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.min_radius, 30.0);
    }

    #[test]
    fn test_non_finite_values_fall_back_to_defaults() {
        let config = RevealConfig {
            velocity_smoothing_factor: f32::NAN,
            stretch_gain: f32::INFINITY,
            ..Default::default()
        }
        .sanitized();
        let defaults = RevealConfig::default();
        assert_eq!(
            config.velocity_smoothing_factor,
            defaults.velocity_smoothing_factor
        );
        assert_eq!(config.stretch_gain, defaults.stretch_gain);
    }

    #[test]
    fn test_factors_clamped_to_unit_range() {
        let config = RevealConfig {
            velocity_smoothing_factor: 0.0,
            magnetic_pull_factor: 3.0,
            trail_decay: 1.5,
            mask_feather: -0.2,
            trail_length: 10_000,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.velocity_smoothing_factor, MIN_SMOOTHING_FACTOR);
        assert_eq!(config.magnetic_pull_factor, 1.0);
        assert_eq!(config.trail_decay, 1.0);
        assert_eq!(config.mask_feather, 0.0);
        assert_eq!(config.trail_length, MAX_TRAIL_LENGTH);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = RevealConfig::from_toml_str(
            r#"
            base_radius = 120.0
            trail_length = 22
            emitter_strategy = "mask"
            initial_state = "centered"
            "#,
        )
        .unwrap();

        assert_eq!(config.base_radius, 120.0);
        assert_eq!(config.trail_length, 22);
        assert_eq!(config.emitter_strategy, EmitterStrategy::Mask);
        assert_eq!(config.initial_state, InitialState::Centered);
        assert_eq!(config.jitter_threshold, 2.0);
    }

    #[test]
    fn test_from_toml_sanitizes() {
        let config = RevealConfig::from_toml_str("base_radius = -4.0").unwrap();
        assert_eq!(config.base_radius, MIN_RADIUS);
    }

    #[test]
    fn test_from_toml_clamps_precision() {
        let config = RevealConfig::from_toml_str("precision = 200").unwrap();
        assert_eq!(config.precision.digits(), Precision::MAX_DIGITS);
        assert_eq!(config.sanitized(), config);
    }

    #[test]
    fn test_from_toml_rejects_wrong_types() {
        let err = RevealConfig::from_toml_str("trail_length = \"long\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip_keeps_easing() {
        let config = RevealConfig::default().with_strategy(EmitterStrategy::Attributes);
        let text = config.to_toml().unwrap();
        let parsed = RevealConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("Path".parse::<EmitterStrategy>().unwrap(), EmitterStrategy::Path);
        assert_eq!(
            "attrs".parse::<EmitterStrategy>().unwrap(),
            EmitterStrategy::Attributes
        );
        assert!(matches!(
            "svg".parse::<EmitterStrategy>(),
            Err(ConfigError::UnknownStrategy(_))
        ));
        for strategy in EmitterStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<EmitterStrategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_initial_state_from_str() {
        assert_eq!(
            "centred".parse::<InitialState>().unwrap(),
            InitialState::Centered
        );
        assert!("middle".parse::<InitialState>().is_err());
    }
}
