//! Validator configuration

use serde::{Deserialize, Serialize};

/// Penalties and quality thresholds
///
/// Penalties are in points out of 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Points lost per missing required section
    pub missing_field_penalty: f64,

    /// Points lost per error
    pub error_penalty: f64,

    /// Points lost per warning
    pub warning_penalty: f64,

    /// Confidence above which quality is high
    pub high_threshold: f64,

    /// Confidence above which quality is medium
    pub medium_threshold: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            missing_field_penalty: 15.0,
            error_penalty: 10.0,
            warning_penalty: 5.0,
            high_threshold: 0.8,
            medium_threshold: 0.6,
        }
    }
}

impl ValidatorConfig {
    /// Heavier penalties and higher bars
    pub fn strict() -> Self {
        Self {
            missing_field_penalty: 25.0,
            error_penalty: 15.0,
            warning_penalty: 8.0,
            high_threshold: 0.9,
            medium_threshold: 0.7,
        }
    }

    /// Lighter penalties and lower bars
    pub fn lenient() -> Self {
        Self {
            missing_field_penalty: 10.0,
            error_penalty: 5.0,
            warning_penalty: 2.0,
            high_threshold: 0.7,
            medium_threshold: 0.5,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let penalties = [
            self.missing_field_penalty,
            self.error_penalty,
            self.warning_penalty,
        ];
        if penalties.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err("penalties must be finite and non-negative".to_string());
        }
        if !(0.0..=1.0).contains(&self.medium_threshold) || !(0.0..=1.0).contains(&self.high_threshold) {
            return Err("thresholds must be within [0, 1]".to_string());
        }
        if self.medium_threshold > self.high_threshold {
            return Err("medium_threshold cannot exceed high_threshold".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidatorConfig::default();
        assert_eq!(config.missing_field_penalty, 15.0);
        assert_eq!(config.error_penalty, 10.0);
        assert_eq!(config.warning_penalty, 5.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ValidatorConfig::strict().validate().is_ok());
        assert!(ValidatorConfig::lenient().validate().is_ok());
        assert!(ValidatorConfig::strict().error_penalty > ValidatorConfig::lenient().error_penalty);
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let config = ValidatorConfig {
            high_threshold: 0.5,
            medium_threshold: 0.6,
            ..ValidatorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
