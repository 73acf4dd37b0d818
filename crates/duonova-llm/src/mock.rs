//! Mock adapter for deterministic testing
//!
//! Returns scripted responses without network calls and records every call
//! in a [`CallLog`] that can be shared across adapters, so tests can assert
//! the exact order in which providers were tried.

use crate::{ExtractionAdapter, LlmError};
use async_trait::async_trait;
use duonova_domain::{ExtractionMethod, ExtractionResult, FileType, ProviderId, ResumeRecord};
use std::sync::{Arc, Mutex, PoisonError};

/// Which entry point was called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPath {
    /// `extract_from_file`
    File,
    /// `extract_from_text`
    Text,
}

/// One recorded call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockCall {
    /// Adapter that was called
    pub provider: ProviderId,
    /// Entry point used
    pub path: CallPath,
}

/// Shared, ordered record of calls
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<MockCall>>>);

impl CallLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: MockCall) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    /// Calls so far, oldest first
    pub fn calls(&self) -> Vec<MockCall> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of calls so far
    pub fn len(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing was called
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scripted behavior for one entry point
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Succeed with this record
    Record(ResumeRecord),
    /// Fail with a communication error
    Fail(String),
    /// Answer with text that is not a resume
    Malformed(String),
    /// Never answer
    Hang,
}

/// Mock extraction adapter
///
/// # Examples
///
/// ```
/// use duonova_domain::ProviderId;
/// use duonova_llm::{ExtractionAdapter, MockAdapter, MockResponse};
///
/// let adapter = MockAdapter::new(ProviderId::Groq)
///     .text_only()
///     .on_text(MockResponse::Fail("rate limited".into()));
/// assert!(!adapter.supports_file_upload());
/// ```
#[derive(Debug, Clone)]
pub struct MockAdapter {
    provider: ProviderId,
    file_upload: bool,
    text: bool,
    on_file: MockResponse,
    on_text: MockResponse,
    confidence: f64,
    log: CallLog,
}

impl MockAdapter {
    /// Adapter that supports both paths and returns a minimal record
    pub fn new(provider: ProviderId) -> Self {
        let record = sample_record(provider);
        Self {
            provider,
            file_upload: true,
            text: true,
            on_file: MockResponse::Record(record.clone()),
            on_text: MockResponse::Record(record),
            confidence: 0.9,
            log: CallLog::new(),
        }
    }

    /// Disable file upload
    pub fn text_only(mut self) -> Self {
        self.file_upload = false;
        self
    }

    /// Script the file path
    pub fn on_file(mut self, response: MockResponse) -> Self {
        self.on_file = response;
        self
    }

    /// Script the text path
    pub fn on_text(mut self, response: MockResponse) -> Self {
        self.on_text = response;
        self
    }

    /// Script both paths
    pub fn on_both(self, response: MockResponse) -> Self {
        self.on_file(response.clone()).on_text(response)
    }

    /// Confidence reported on success
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Record calls into a shared log
    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    /// This adapter's call log
    pub fn log(&self) -> &CallLog {
        &self.log
    }

    async fn respond(
        &self,
        response: &MockResponse,
        method: ExtractionMethod,
    ) -> Result<ExtractionResult, LlmError> {
        match response {
            MockResponse::Record(record) => Ok(ExtractionResult::new(record.clone(), self.confidence)
                .with_provenance(Some(self.provider), method)),
            MockResponse::Fail(message) => Err(LlmError::Communication(message.clone())),
            MockResponse::Malformed(raw) => Err(LlmError::MalformedResponse {
                reason: "Mock malformed response".to_string(),
                raw: raw.clone(),
            }),
            MockResponse::Hang => {
                std::future::pending::<()>().await;
                Err(LlmError::Communication("unreachable".to_string()))
            }
        }
    }
}

fn sample_record(provider: ProviderId) -> ResumeRecord {
    ResumeRecord {
        professional_summary: Some(format!("Extracted by {}", provider)),
        ..ResumeRecord::default()
    }
}

#[async_trait]
impl ExtractionAdapter for MockAdapter {
    fn provider(&self) -> ProviderId {
        self.provider
    }

    fn supports_file_upload(&self) -> bool {
        self.file_upload
    }

    fn supports_text(&self) -> bool {
        self.text
    }

    async fn extract_from_file(
        &self,
        _bytes: &[u8],
        _file_type: FileType,
    ) -> Result<ExtractionResult, LlmError> {
        self.log.push(MockCall {
            provider: self.provider,
            path: CallPath::File,
        });
        if !self.file_upload {
            return Err(LlmError::Unsupported("mock is text only".to_string()));
        }
        self.respond(&self.on_file, ExtractionMethod::DirectFile).await
    }

    async fn extract_from_text(&self, _text: &str) -> Result<ExtractionResult, LlmError> {
        self.log.push(MockCall {
            provider: self.provider,
            path: CallPath::Text,
        });
        self.respond(&self.on_text, ExtractionMethod::TextExtraction).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_succeeds_on_both_paths() {
        let adapter = MockAdapter::new(ProviderId::OpenAi);
        let from_file = adapter.extract_from_file(b"x", FileType::Pdf).await.unwrap();
        let from_text = adapter.extract_from_text("x").await.unwrap();

        assert_eq!(from_file.method, Some(ExtractionMethod::DirectFile));
        assert_eq!(from_text.method, Some(ExtractionMethod::TextExtraction));
        assert_eq!(from_text.provider, Some(ProviderId::OpenAi));
        assert_eq!(adapter.log().len(), 2);
    }

    #[tokio::test]
    async fn test_scripted_failures() {
        let adapter = MockAdapter::new(ProviderId::Anthropic)
            .on_file(MockResponse::Malformed("<html>".into()))
            .on_text(MockResponse::Fail("boom".into()));

        assert!(matches!(
            adapter.extract_from_file(b"x", FileType::Pdf).await,
            Err(LlmError::MalformedResponse { .. })
        ));
        assert!(matches!(
            adapter.extract_from_text("x").await,
            Err(LlmError::Communication(_))
        ));
    }

    #[tokio::test]
    async fn test_shared_log_orders_calls() {
        let log = CallLog::new();
        let first = MockAdapter::new(ProviderId::Groq).text_only().with_log(log.clone());
        let second = MockAdapter::new(ProviderId::OpenAi).with_log(log.clone());

        first.extract_from_text("x").await.unwrap();
        second.extract_from_file(b"x", FileType::Docx).await.unwrap();

        assert_eq!(
            log.calls(),
            vec![
                MockCall { provider: ProviderId::Groq, path: CallPath::Text },
                MockCall { provider: ProviderId::OpenAi, path: CallPath::File },
            ]
        );
    }

    #[tokio::test]
    async fn test_clone_shares_log() {
        let adapter = MockAdapter::new(ProviderId::Groq);
        let copy = adapter.clone();
        copy.extract_from_text("x").await.unwrap();
        assert_eq!(adapter.log().len(), 1);
    }
}
