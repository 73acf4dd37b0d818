//! Extraction results and provenance

use crate::{Confidence, ProviderId, ResumeRecord};
use serde::{Deserialize, Serialize};

/// How a result was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Document bytes submitted to the provider
    DirectFile,

    /// Extracted text submitted to the provider
    TextExtraction,

    /// Local keyword/pattern extraction
    Heuristic,
}

impl ExtractionMethod {
    /// Get the method name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::DirectFile => "direct_file",
            ExtractionMethod::TextExtraction => "text_extraction",
            ExtractionMethod::Heuristic => "heuristic",
        }
    }
}

/// Error marker carried by a failed result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionError {
    /// What went wrong
    pub message: String,

    /// Provider that failed, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderId>,

    /// Upstream payload kept for diagnostics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_payload: Option<String>,
}

impl ExtractionError {
    /// Create an error marker with no payload
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            provider: None,
            raw_payload: None,
        }
    }

    /// Attach the failing provider
    pub fn with_provider(mut self, provider: ProviderId) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Attach the raw upstream payload
    pub fn with_raw_payload(mut self, raw: impl Into<String>) -> Self {
        self.raw_payload = Some(raw.into());
        self
    }
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.provider {
            Some(provider) => write!(f, "{}: {}", provider, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// A structured record, or an error marker, with provenance
///
/// A result carrying an error never carries populated sections; use
/// [`ExtractionResult::failure`] to build one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted sections
    #[serde(flatten)]
    pub record: ResumeRecord,

    /// Producer's self-reported confidence
    pub confidence: Confidence,

    /// Error marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ExtractionError>,

    /// Producing provider (none for heuristic results)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderId>,

    /// Producing method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<ExtractionMethod>,
}

impl ExtractionResult {
    /// Wrap a record with its confidence
    pub fn new(record: ResumeRecord, confidence: impl Into<Confidence>) -> Self {
        Self {
            record,
            confidence: confidence.into(),
            error: None,
            provider: None,
            method: None,
        }
    }

    /// An error-marked result with empty sections and zero confidence
    pub fn failure(error: ExtractionError) -> Self {
        Self {
            record: ResumeRecord::default(),
            confidence: Confidence::ZERO,
            provider: error.provider,
            error: Some(error),
            method: None,
        }
    }

    /// Whether this result is an error marker
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Tag the result with its producer
    pub fn with_provenance(mut self, provider: Option<ProviderId>, method: ExtractionMethod) -> Self {
        self.provider = provider;
        self.method = Some(method);
        self
    }
}
