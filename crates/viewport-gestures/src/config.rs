//! Recognizer configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors produced while loading or validating a [`GestureConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A field holds a value the recognizer cannot work with.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Error message
        message: String,
    },
}

/// Configuration for gesture recognition.
///
/// Keys use the camelCase option names when loaded from YAML; missing keys
/// take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GestureConfig {
    /// Displacement (per axis, in pixels) that turns a press into a drag.
    pub move_threshold_px: f32,
    /// Window in which a second release becomes a double click.
    pub click_delay_ms: u64,
    /// Percent of the surface dimension a drag must cover before it is reported.
    pub drag_ratio_threshold_percent: u32,
    /// Minimum spacing between drag progress evaluations (0 = every move).
    pub drag_rate_limit_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            move_threshold_px: 5.0,
            click_delay_ms: 200,
            drag_ratio_threshold_percent: 7,
            drag_rate_limit_ms: 0,
        }
    }
}

impl GestureConfig {
    /// Set the drag start threshold.
    #[must_use]
    pub const fn with_move_threshold(mut self, px: f32) -> Self {
        self.move_threshold_px = px;
        self
    }

    /// Set the double click window.
    #[must_use]
    pub const fn with_click_delay_ms(mut self, ms: u64) -> Self {
        self.click_delay_ms = ms;
        self
    }

    /// Set the drag ratio threshold.
    #[must_use]
    pub const fn with_drag_ratio_threshold(mut self, percent: u32) -> Self {
        self.drag_ratio_threshold_percent = percent;
        self
    }

    /// Set the drag rate limit.
    #[must_use]
    pub const fn with_drag_rate_limit_ms(mut self, ms: u64) -> Self {
        self.drag_rate_limit_ms = ms;
        self
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.move_threshold_px.is_finite() || self.move_threshold_px < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "moveThresholdPx",
                message: format!(
                    "must be a non-negative number, got {}",
                    self.move_threshold_px
                ),
            });
        }
        if !(1..=100).contains(&self.drag_ratio_threshold_percent) {
            return Err(ConfigError::InvalidValue {
                field: "dragRatioThresholdPercent",
                message: format!(
                    "must be between 1 and 100, got {}",
                    self.drag_ratio_threshold_percent
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_config_default() {
        let config = GestureConfig::default();
        assert_eq!(config.move_threshold_px, 5.0);
        assert_eq!(config.click_delay_ms, 200);
        assert_eq!(config.drag_ratio_threshold_percent, 7);
        assert_eq!(config.drag_rate_limit_ms, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_gesture_config_builders() {
        let config = GestureConfig::default()
            .with_move_threshold(8.0)
            .with_click_delay_ms(300)
            .with_drag_ratio_threshold(10)
            .with_drag_rate_limit_ms(16);
        assert_eq!(config.move_threshold_px, 8.0);
        assert_eq!(config.click_delay_ms, 300);
        assert_eq!(config.drag_ratio_threshold_percent, 10);
        assert_eq!(config.drag_rate_limit_ms, 16);
    }

    #[test]
    fn test_from_yaml_partial_takes_defaults() {
        let config = GestureConfig::from_yaml_str("clickDelayMs: 250\ndragRateLimitMs: 33\n")
            .unwrap();
        assert_eq!(config.click_delay_ms, 250);
        assert_eq!(config.drag_rate_limit_ms, 33);
        assert_eq!(config.move_threshold_px, 5.0);
        assert_eq!(config.drag_ratio_threshold_percent, 7);
    }

    #[test]
    fn test_from_yaml_rejects_unknown_key() {
        let err = GestureConfig::from_yaml_str("throttleTime: 10\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_validate_ratio_range() {
        let err = GestureConfig::default()
            .with_drag_ratio_threshold(0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for 'dragRatioThresholdPercent': must be between 1 and 100, got 0"
        );
        assert!(GestureConfig::default()
            .with_drag_ratio_threshold(101)
            .validate()
            .is_err());
        assert!(GestureConfig::default()
            .with_drag_ratio_threshold(100)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_move_threshold() {
        assert!(GestureConfig::default()
            .with_move_threshold(-1.0)
            .validate()
            .is_err());
        assert!(GestureConfig::default()
            .with_move_threshold(f32::NAN)
            .validate()
            .is_err());
        assert!(GestureConfig::default()
            .with_move_threshold(0.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_yaml_roundtrip_keys_are_camel_case() {
        let yaml = GestureConfig::default().to_yaml_string().unwrap();
        assert!(yaml.contains("moveThresholdPx"));
        assert!(yaml.contains("dragRatioThresholdPercent"));
        assert_eq!(
            GestureConfig::from_yaml_str(&yaml).unwrap(),
            GestureConfig::default()
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = GestureConfig::load("/nonexistent/gestures.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
