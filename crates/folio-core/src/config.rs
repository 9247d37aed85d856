//! Backdrop configuration.
//!
//! Every field has a default that matches the look of the live site, so a
//! host only overrides what it needs.

use crate::constants::{
    DEFAULT_CLOUD_COUNT, DEFAULT_CLOUD_SPEED, DEFAULT_DOT_RADIUS, DEFAULT_DOT_SPACING,
    DEFAULT_MOUSE_ATTRACTION_STRENGTH, MIN_DOT_SPACING,
};
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq)]
pub struct BackdropConfig {
    /// Pixels between lattice points.
    pub dot_spacing: f32,
    /// Radius of every painted dot, in pixels.
    pub dot_radius: f32,
    /// Scales the initial cloud velocity and the attraction speed cap.
    pub cloud_speed: f32,
    pub cloud_count: usize,
    /// Pull clouds toward the last known pointer position.
    pub mouse_attraction: bool,
    pub mouse_attraction_strength: f32,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            dot_spacing: DEFAULT_DOT_SPACING,
            dot_radius: DEFAULT_DOT_RADIUS,
            cloud_speed: DEFAULT_CLOUD_SPEED,
            cloud_count: DEFAULT_CLOUD_COUNT,
            mouse_attraction: false,
            mouse_attraction_strength: DEFAULT_MOUSE_ATTRACTION_STRENGTH,
        }
    }
}

impl BackdropConfig {
    /// Check the numeric fields and hand the config back if they are usable.
    ///
    /// A zero `cloud_count` is accepted: the grid then renders in the base
    /// tone only.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if !(self.dot_spacing.is_finite() && self.dot_spacing >= MIN_DOT_SPACING) {
            return Err(ConfigError::DotSpacing(self.dot_spacing));
        }
        if !(self.dot_radius.is_finite() && self.dot_radius >= 0.0) {
            return Err(ConfigError::DotRadius(self.dot_radius));
        }
        if !(self.cloud_speed.is_finite() && self.cloud_speed >= 0.0) {
            return Err(ConfigError::CloudSpeed(self.cloud_speed));
        }
        if !(self.mouse_attraction_strength.is_finite() && self.mouse_attraction_strength >= 0.0) {
            return Err(ConfigError::AttractionStrength(
                self.mouse_attraction_strength,
            ));
        }
        Ok(self)
    }

    /// Upper bound on cloud speed once attraction has been applied.
    #[inline]
    pub fn max_cloud_speed(&self) -> f32 {
        self.cloud_speed * crate::constants::CLOUD_MAX_SPEED_FACTOR
    }
}
