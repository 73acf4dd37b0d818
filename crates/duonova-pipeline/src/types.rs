//! Request and bookkeeping types

use duonova_domain::{
    Complexity, ExtractionMethod, FileMetadata, FileType, ProcessingMode, ProcessingRule,
    ProviderId, ProviderProfile, ProviderSelection, RequestId, StrategyDecision,
};
use duonova_rules::ResolvedDefaults;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One document to process
#[derive(Debug, Clone)]
pub struct ProcessingRequest {
    /// Raw document bytes
    pub file_bytes: Option<Vec<u8>>,

    /// Document format
    pub file_type: FileType,

    /// Text already extracted by the caller
    pub normalized_text: Option<String>,

    /// Original file name
    pub file_name: String,

    /// Size of the original file
    pub file_size_bytes: u64,

    /// Mode forced for this request, bypassing rules
    pub explicit_mode: Option<ProcessingMode>,

    /// Provider forced for this request
    pub provider: ProviderSelection,

    /// Caller-supplied correlation id
    pub correlation_id: Option<RequestId>,
}

impl ProcessingRequest {
    /// Request carrying the document bytes; size is taken from the bytes
    pub fn from_bytes(file_name: impl Into<String>, file_type: FileType, bytes: Vec<u8>) -> Self {
        Self {
            file_size_bytes: bytes.len() as u64,
            file_bytes: Some(bytes),
            file_type,
            normalized_text: None,
            file_name: file_name.into(),
            explicit_mode: None,
            provider: ProviderSelection::Auto,
            correlation_id: None,
        }
    }

    /// Request carrying only pre-extracted text
    pub fn from_text(
        file_name: impl Into<String>,
        file_type: FileType,
        file_size_bytes: u64,
        text: impl Into<String>,
    ) -> Self {
        Self {
            file_bytes: None,
            file_type,
            normalized_text: Some(text.into()),
            file_name: file_name.into(),
            file_size_bytes,
            explicit_mode: None,
            provider: ProviderSelection::Auto,
            correlation_id: None,
        }
    }

    /// Attach caller-extracted text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.normalized_text = Some(text.into());
        self
    }

    /// Force a processing mode
    pub fn with_mode(mut self, mode: ProcessingMode) -> Self {
        self.explicit_mode = Some(mode);
        self
    }

    /// Force a provider
    pub fn with_provider(mut self, provider: ProviderSelection) -> Self {
        self.provider = provider;
        self
    }

    /// Use a caller-supplied correlation id
    pub fn with_correlation_id(mut self, id: RequestId) -> Self {
        self.correlation_id = Some(id);
        self
    }

    /// Name and size as file metadata
    pub fn metadata(&self) -> FileMetadata {
        FileMetadata::new(self.file_name.clone(), self.file_size_bytes)
    }
}

/// What the orchestrator may submit
#[derive(Debug, Clone, Copy)]
pub struct ExtractionInput<'a> {
    /// Document bytes, when the document itself may be submitted
    pub bytes: Option<&'a [u8]>,

    /// Document format
    pub file_type: FileType,

    /// Text for text paths and the heuristic fallback
    pub text: Option<&'a str>,
}

impl<'a> ExtractionInput<'a> {
    /// Input with neither bytes nor text
    pub fn new(file_type: FileType) -> Self {
        Self {
            bytes: None,
            file_type,
            text: None,
        }
    }

    /// Add document bytes
    pub fn with_bytes(mut self, bytes: &'a [u8]) -> Self {
        self.bytes = Some(bytes);
        self
    }

    /// Add text
    pub fn with_text(mut self, text: &'a str) -> Self {
        self.text = Some(text);
        self
    }

    /// Text that is present and not blank
    pub fn usable_text(&self) -> Option<&'a str> {
        self.text.filter(|text| !text.trim().is_empty())
    }
}

/// One failed adapter call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptFailure {
    /// Provider that was called
    pub provider: ProviderId,

    /// Path that was tried
    pub method: ExtractionMethod,

    /// What went wrong
    pub error: String,

    /// Upstream payload, when the provider answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_payload: Option<String>,
}

/// Cooperative cancellation, checked before every provider call
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create an unset flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// File facts used by selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAnalysis {
    /// File name
    pub name: String,

    /// Size in megabytes, rounded to two decimals
    pub size_mb: f64,

    /// Normalized extension
    pub extension: String,

    /// Estimated complexity
    pub complexity: Complexity,
}

impl From<&FileMetadata> for FileAnalysis {
    fn from(file: &FileMetadata) -> Self {
        Self {
            name: file.file_name.clone(),
            size_mb: (file.size_mb() * 100.0).round() / 100.0,
            extension: file.extension(),
            complexity: file.complexity(),
        }
    }
}

/// A decision together with everything that went into it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyExplanation {
    /// The decision itself
    pub decision: StrategyDecision,

    /// Rule that matched the file, whether or not it was applied
    pub matched_rule: Option<ProcessingRule>,

    /// Profile of the chosen provider
    pub provider: Option<ProviderProfile>,

    /// File facts
    pub file: FileAnalysis,

    /// Resolved configuration
    pub configuration: ResolvedDefaults,

    /// Providers available at decision time
    pub available_providers: Vec<ProviderId>,
}
