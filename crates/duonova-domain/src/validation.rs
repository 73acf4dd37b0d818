//! Validation reports

use crate::Confidence;
use serde::{Deserialize, Serialize};

/// Coarse quality verdict derived from confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    /// Confidence above the high threshold
    High,

    /// Confidence above the medium threshold
    Medium,

    /// Everything else
    Low,
}

impl QualityTier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::High => "high",
            QualityTier::Medium => "medium",
            QualityTier::Low => "low",
        }
    }

    /// Classify with explicit thresholds (both exclusive)
    pub fn classify_with(confidence: Confidence, high: f64, medium: f64) -> Self {
        let value = confidence.value();
        if value > high {
            QualityTier::High
        } else if value > medium {
            QualityTier::Medium
        } else {
            QualityTier::Low
        }
    }

    /// Classify with the standard thresholds: high > 0.8, medium > 0.6
    pub fn classify(confidence: Confidence) -> Self {
        Self::classify_with(confidence, 0.8, 0.6)
    }
}

/// Completeness verdict for one extraction result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// No missing fields and no errors
    pub is_valid: bool,

    /// Required sections that were absent or empty
    pub missing_fields: Vec<String>,

    /// Hard problems
    pub errors: Vec<String>,

    /// Soft problems (affect quality only)
    pub warnings: Vec<String>,

    /// Final confidence
    pub confidence: Confidence,

    /// Quality verdict
    pub quality: QualityTier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_thresholds_are_exclusive() {
        assert_eq!(QualityTier::classify(Confidence::new(0.81)), QualityTier::High);
        assert_eq!(QualityTier::classify(Confidence::new(0.8)), QualityTier::Medium);
        assert_eq!(QualityTier::classify(Confidence::new(0.61)), QualityTier::Medium);
        assert_eq!(QualityTier::classify(Confidence::new(0.6)), QualityTier::Low);
    }
}
