//! Groq provider: fast, free tier, text only

use crate::config::LlmConfig;
use crate::openai::{ChatCompletionsClient, MessageContent};
use crate::parser::parse_resume_response;
use crate::prompt::PromptBuilder;
use crate::{ExtractionAdapter, LlmError};
use async_trait::async_trait;
use duonova_domain::{ExtractionMethod, ExtractionResult, FileType, ProviderId};
use tracing::debug;

/// Self-reported confidence for text extraction
pub const TEXT_CONFIDENCE: f64 = 0.85;

/// Groq adapter over its OpenAI-compatible endpoint
pub struct GroqAdapter {
    chat: ChatCompletionsClient,
    max_tokens: u32,
}

impl GroqAdapter {
    /// Create an adapter with the configured Groq endpoint
    pub fn new(api_key: impl Into<String>, config: &LlmConfig) -> Result<Self, LlmError> {
        Ok(Self {
            chat: ChatCompletionsClient::new(config.groq.clone(), api_key, config)?,
            max_tokens: config.text_max_tokens,
        })
    }
}

#[async_trait]
impl ExtractionAdapter for GroqAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::Groq
    }

    fn supports_file_upload(&self) -> bool {
        false
    }

    fn supports_text(&self) -> bool {
        true
    }

    async fn extract_from_file(
        &self,
        _bytes: &[u8],
        file_type: FileType,
    ) -> Result<ExtractionResult, LlmError> {
        Err(LlmError::Unsupported(format!(
            "Groq does not accept {} uploads",
            file_type.as_str()
        )))
    }

    async fn extract_from_text(&self, text: &str) -> Result<ExtractionResult, LlmError> {
        debug!("Groq text extraction with {}: {} chars", self.chat.model(), text.len());
        let prompt = PromptBuilder::for_text(text).build();
        let answer = self
            .chat
            .complete(MessageContent::Text(prompt), self.max_tokens)
            .await?;
        let record = parse_resume_response(&answer)?;
        Ok(ExtractionResult::new(record, TEXT_CONFIDENCE)
            .with_provenance(Some(ProviderId::Groq), ExtractionMethod::TextExtraction))
    }
}
