//! Aperture shaping
//!
//! Maps smoothed speed to an anisotropic ellipse: the major radius grows
//! along the direction of travel while the minor radius thins, floored so
//! the hole never collapses to a line.

use reveal_paint::{Ellipse, Point};

use crate::config::RevealConfig;
use crate::velocity::VelocitySample;

/// The hole for the current frame
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ApertureGeometry {
    pub center: Point,
    /// Radius along the direction of travel
    pub radius_major: f32,
    /// Radius perpendicular to the direction of travel
    pub radius_minor: f32,
    /// Direction of the major axis in degrees
    pub rotation: f32,
}

impl ApertureGeometry {
    /// The aperture as a rotated ellipse
    pub fn ellipse(&self) -> Ellipse {
        Ellipse::new(self.center, self.radius_major, self.radius_minor, self.rotation)
    }

    /// Major/minor ratio (1.0 at rest)
    pub fn elongation(&self) -> f32 {
        self.radius_major / self.radius_minor
    }
}

/// Turns velocity estimates into aperture geometry
#[derive(Clone, Debug)]
pub struct ApertureShaper {
    base_radius: f32,
    min_radius: f32,
    max_stretch: f32,
    stretch_gain: f32,
    compression_ratio: f32,
}

impl ApertureShaper {
    /// Build from a sanitized configuration
    pub fn from_config(config: &RevealConfig) -> Self {
        Self {
            base_radius: config.base_radius,
            min_radius: config.min_radius,
            max_stretch: config.max_stretch,
            stretch_gain: config.stretch_gain,
            compression_ratio: config.compression_ratio,
        }
    }

    pub fn base_radius(&self) -> f32 {
        self.base_radius
    }

    pub fn min_radius(&self) -> f32 {
        self.min_radius
    }

    /// Upper bound of the major radius
    pub fn max_major_radius(&self) -> f32 {
        self.base_radius + self.max_stretch
    }

    /// Saturating linear stretch for a smoothed speed
    pub fn stretch_for(&self, smoothed_speed: f32) -> f32 {
        let stretch = smoothed_speed * self.stretch_gain;
        if stretch.is_finite() {
            stretch.clamp(0.0, self.max_stretch)
        } else if stretch > 0.0 {
            self.max_stretch
        } else {
            0.0
        }
    }

    /// Shape the aperture centered on `center` for this frame's velocity
    pub fn shape(&self, center: Point, velocity: &VelocitySample) -> ApertureGeometry {
        let stretch = self.stretch_for(velocity.smoothed_speed);
        ApertureGeometry {
            center,
            radius_major: self.base_radius + stretch,
            radius_minor: (self.base_radius - stretch * self.compression_ratio)
                .max(self.min_radius),
            rotation: velocity.direction,
        }
    }

    /// An unstretched aperture at `center`
    pub fn rest(&self, center: Point) -> ApertureGeometry {
        self.shape(center, &VelocitySample::REST)
    }
}
