//! Process-wide configuration.
//!
//! A [`Config`] is built once at startup (defaults, or a JSON file passed on
//! the command line) and is read-only afterwards. Every component borrows the
//! constants it needs from it.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Named constants for field generation, gesture detection and motion.
///
/// Missing keys in a JSON file fall back to the defaults below, so a file can
/// override just the values it cares about:
///
/// ```json
/// { "particle_count": 40000, "spiral_arms": 3 }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Number of particles in the field.
    pub particle_count: usize,
    /// Number of interleaved spiral arms.
    pub spiral_arms: u32,
    /// Spiral tightness. Carried with the generation parameters; the arm
    /// winding is fixed by `spiral_arms`.
    pub spiral_tightness: f32,
    /// Outer radius of the spiral disk.
    pub max_radius: f32,
    /// Half-width of the uniform noise band on the y axis.
    pub vertical_jitter: f32,
    /// Fraction of the remaining distance the scale covers each frame.
    pub expand_ease_rate: f32,
    /// Per-frame multiplicative decay of the spin rate.
    pub rotation_damping: f32,
    /// Spin rate (radians per frame) per unit of palm offset from center.
    pub rotation_gain: f32,
    /// Thumb-to-index distance (normalized image units) below which the hand pinches.
    pub pinch_threshold: f32,
    /// HSL saturation of every particle color.
    pub saturation: f32,
    /// HSL lightness of every particle color.
    pub lightness: f32,
    /// Hue at the spiral core.
    pub hue_base: f32,
    /// Hue shift from the core to the rim.
    pub hue_span: f32,
    /// Hue turns per second of the rainbow sweep while pinching.
    pub color_cycle_rate: f32,
    /// Scale while contracted.
    pub normal_scale: f32,
    /// Scale while expanded.
    pub expanded_scale: f32,
    /// How often the simulated hand reports, in results per second.
    pub tracking_rate_hz: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            particle_count: 15_000,
            spiral_arms: 5,
            spiral_tightness: 0.3,
            max_radius: 3.0,
            vertical_jitter: 0.25,
            expand_ease_rate: 0.05,
            rotation_damping: 0.95,
            rotation_gain: 0.02,
            pinch_threshold: 0.05,
            saturation: 0.8,
            lightness: 0.6,
            hue_base: 0.5,
            hue_span: 0.3,
            color_cycle_rate: 0.1,
            normal_scale: 1.0,
            expanded_scale: 2.0,
            tracking_rate_hz: 30.0,
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Check every value against the range the motion math relies on.
    ///
    /// The easing rate must lie in `(0, 1]` so the scale approaches its
    /// target without overshoot, and damping must lie in `[0, 1)` so spin
    /// always decays.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        }

        if self.particle_count == 0 {
            return invalid("particle_count", "must be at least 1");
        }
        if self.spiral_arms == 0 {
            return invalid("spiral_arms", "must be at least 1");
        }
        if !(self.max_radius.is_finite() && self.max_radius > 0.0) {
            return invalid("max_radius", "must be a positive number");
        }
        if !(self.vertical_jitter.is_finite() && self.vertical_jitter >= 0.0) {
            return invalid("vertical_jitter", "must be zero or positive");
        }
        if !(self.expand_ease_rate > 0.0 && self.expand_ease_rate <= 1.0) {
            return invalid("expand_ease_rate", "must be in (0, 1]");
        }
        if !(self.rotation_damping >= 0.0 && self.rotation_damping < 1.0) {
            return invalid("rotation_damping", "must be in [0, 1)");
        }
        if !self.rotation_gain.is_finite() {
            return invalid("rotation_gain", "must be finite");
        }
        if !(self.pinch_threshold.is_finite() && self.pinch_threshold > 0.0) {
            return invalid("pinch_threshold", "must be a positive number");
        }
        if !(0.0..=1.0).contains(&self.saturation) {
            return invalid("saturation", "must be in [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.lightness) {
            return invalid("lightness", "must be in [0, 1]");
        }
        if !self.color_cycle_rate.is_finite() {
            return invalid("color_cycle_rate", "must be finite");
        }
        if !(self.normal_scale.is_finite() && self.expanded_scale.is_finite()) {
            return invalid("expanded_scale", "scales must be finite");
        }
        if !(self.tracking_rate_hz.is_finite() && self.tracking_rate_hz > 0.0) {
            return invalid("tracking_rate_hz", "must be a positive number");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.particle_count, 15_000);
        assert_eq!(config.spiral_arms, 5);
        assert_eq!(config.pinch_threshold, 0.05);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "spiral_arms": 3, "max_radius": 4.5 }"#).unwrap();
        assert_eq!(config.spiral_arms, 3);
        assert_eq!(config.max_radius, 4.5);
        assert_eq!(config.rotation_damping, 0.95);
        assert_eq!(config.particle_count, 15_000);
    }

    #[test]
    fn test_rejects_out_of_range_damping() {
        let err = Config::from_json(r#"{ "rotation_damping": 1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "rotation_damping",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_ease_rate() {
        let config = Config {
            expand_ease_rate: 0.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Config::from_json("{ particle_count: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("pinchfield-config-{}.json", std::process::id()));
        let config = Config {
            particle_count: 2_000,
            ..Config::default()
        };
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }
}
