//! Confidence score module

use serde::{Deserialize, Serialize};

/// Extraction confidence, always inside `[0.0, 1.0]`
///
/// Construction clamps instead of panicking: scores are derived from
/// penalty arithmetic and provider self-reports, both of which can drift
/// outside the unit interval.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// No confidence at all
    pub const ZERO: Confidence = Confidence(0.0);

    /// Full confidence
    pub const ONE: Confidence = Confidence(1.0);

    /// Create a confidence score, clamping into `[0, 1]` (NaN becomes 0)
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw score
    pub fn value(&self) -> f64 {
        self.0
    }

    /// The larger of two scores
    pub fn max(self, other: Confidence) -> Confidence {
        if other.0 > self.0 {
            other
        } else {
            self
        }
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
