//! DuoNova LLM Provider Layer
//!
//! One extraction adapter per external model provider behind a common async
//! trait, plus the typed registry that maps provider ids to adapters.
//!
//! # Architecture
//!
//! Adapters turn a document (bytes or text) into an [`ExtractionResult`] or an
//! [`LlmError`]. They never decide fallback; the pipeline does that.
//!
//! # Providers
//!
//! - `OpenAiAdapter`: chat completions, file upload as a base64 data URL
//! - `GroqAdapter`: OpenAI-compatible endpoint, text only
//! - `AnthropicAdapter`: messages API, PDF document blocks
//! - `MockAdapter`: scripted responses for tests
//!
//! # Examples
//!
//! ```
//! use duonova_domain::ProviderId;
//! use duonova_llm::{Credentials, LlmConfig, ProviderRegistry};
//!
//! let credentials = Credentials::default().with_key(ProviderId::Groq, "gsk-test");
//! let registry = ProviderRegistry::from_credentials(&credentials, &LlmConfig::default()).unwrap();
//! assert_eq!(registry.providers(), vec![ProviderId::Groq]);
//! ```

#![warn(missing_docs)]

pub mod anthropic;
pub mod config;
pub mod credentials;
pub mod groq;
pub mod mock;
pub mod openai;
pub mod parser;
pub mod prompt;
mod registry;

use async_trait::async_trait;
use duonova_domain::{ExtractionResult, FileType, ProviderId};
use std::time::Duration;
use thiserror::Error;

pub use anthropic::AnthropicAdapter;
pub use config::{LlmConfig, ProviderEndpoint};
pub use credentials::Credentials;
pub use groq::GroqAdapter;
pub use mock::{CallLog, CallPath, MockAdapter, MockCall, MockResponse};
pub use openai::OpenAiAdapter;
pub use registry::ProviderRegistry;

/// Errors that can occur during provider calls
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// Provider answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code
        status: u16,
        /// Response body as returned
        body: String,
    },

    /// Response arrived but could not be turned into a resume record
    #[error("Malformed response: {reason}")]
    MalformedResponse {
        /// What was wrong with it
        reason: String,
        /// Upstream payload, kept for diagnosis
        raw: String,
    },

    /// The adapter cannot handle this input
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// No API key for the provider
    #[error("Missing credentials for {0}")]
    MissingCredentials(ProviderId),

    /// Call did not finish in time
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

impl LlmError {
    /// Upstream payload carried by the error, if any
    pub fn raw_payload(&self) -> Option<&str> {
        match self {
            LlmError::MalformedResponse { raw, .. } => Some(raw),
            LlmError::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    pub(crate) fn transport(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            LlmError::Timeout(timeout)
        } else {
            LlmError::Communication(format!("Request failed: {}", error))
        }
    }
}

/// A provider that can extract a resume record
///
/// Implementations are shared across requests and must be thread-safe.
#[async_trait]
pub trait ExtractionAdapter: Send + Sync {
    /// Provider this adapter talks to
    fn provider(&self) -> ProviderId;

    /// Whether whole documents can be submitted
    fn supports_file_upload(&self) -> bool;

    /// Whether plain text can be submitted
    fn supports_text(&self) -> bool;

    /// Extract from the raw document
    async fn extract_from_file(
        &self,
        bytes: &[u8],
        file_type: FileType,
    ) -> Result<ExtractionResult, LlmError>;

    /// Extract from already-extracted text
    async fn extract_from_text(&self, text: &str) -> Result<ExtractionResult, LlmError>;
}
