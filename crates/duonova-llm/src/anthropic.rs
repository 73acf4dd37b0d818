//! Anthropic provider over the messages API
//!
//! PDFs are sent as base64 document blocks. The messages API does not take
//! DOCX documents, so DOCX uploads report [`LlmError::Unsupported`] and the
//! caller moves on to text.

use crate::config::{LlmConfig, ProviderEndpoint};
use crate::parser::parse_resume_response;
use crate::prompt::PromptBuilder;
use crate::{ExtractionAdapter, LlmError};
use async_trait::async_trait;
use base64::Engine;
use duonova_domain::{ExtractionMethod, ExtractionResult, FileType, ProviderId};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Self-reported confidence for whole-document extraction
pub const FILE_CONFIDENCE: f64 = 0.93;

/// Self-reported confidence for text extraction
pub const TEXT_CONFIDENCE: f64 = 0.88;

/// API request body
#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: Vec<ContentBlock>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    Document { source: DocumentSource },
}

#[derive(Debug, Serialize)]
struct DocumentSource {
    #[serde(rename = "type")]
    source_type: &'static str,
    media_type: &'static str,
    data: String,
}

/// Content block in API response
#[derive(Deserialize)]
struct ResponseBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

/// API response body
#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ResponseBlock>,
}

/// Anthropic adapter
pub struct AnthropicAdapter {
    endpoint: ProviderEndpoint,
    api_key: String,
    client: reqwest::Client,
    timeout: Duration,
    temperature: f32,
    file_max_tokens: u32,
    text_max_tokens: u32,
}

impl AnthropicAdapter {
    /// Create an adapter with the configured Anthropic endpoint
    pub fn new(api_key: impl Into<String>, config: &LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.anthropic.clone(),
            api_key: api_key.into(),
            client,
            timeout: config.request_timeout(),
            temperature: config.temperature,
            file_max_tokens: config.file_max_tokens,
            text_max_tokens: config.text_max_tokens,
        })
    }

    fn request(&self, content: Vec<ContentBlock>, max_tokens: u32) -> ApiRequest {
        ApiRequest {
            model: self.endpoint.model.clone(),
            max_tokens,
            temperature: self.temperature,
            messages: vec![Message {
                role: "user",
                content,
            }],
        }
    }

    async fn send(&self, content: Vec<ContentBlock>, max_tokens: u32) -> Result<String, LlmError> {
        let response = self
            .client
            .post(&self.endpoint.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.request(content, max_tokens))
            .send()
            .await
            .map_err(|e| LlmError::transport(e, self.timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::transport(e, self.timeout))?;

        if !status.is_success() {
            return Err(LlmError::Http {
                status: status.as_u16(),
                body,
            });
        }

        debug!("{} answered with {} bytes", self.endpoint.model, body.len());
        response_text(&body)
    }
}

/// Concatenate the text blocks of a messages response
fn response_text(body: &str) -> Result<String, LlmError> {
    let parsed: ApiResponse = serde_json::from_str(body).map_err(|e| LlmError::MalformedResponse {
        reason: format!("Failed to parse response: {}", e),
        raw: body.to_string(),
    })?;

    let text: String = parsed
        .content
        .into_iter()
        .filter(|block| block.block_type == "text")
        .filter_map(|block| block.text)
        .collect();

    if text.trim().is_empty() {
        return Err(LlmError::MalformedResponse {
            reason: "Response has no text content".to_string(),
            raw: body.to_string(),
        });
    }
    Ok(text)
}

#[async_trait]
impl ExtractionAdapter for AnthropicAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    fn supports_file_upload(&self) -> bool {
        true
    }

    fn supports_text(&self) -> bool {
        true
    }

    async fn extract_from_file(
        &self,
        bytes: &[u8],
        file_type: FileType,
    ) -> Result<ExtractionResult, LlmError> {
        if file_type != FileType::Pdf {
            return Err(LlmError::Unsupported(format!(
                "Anthropic document blocks do not accept {}",
                file_type.as_str()
            )));
        }

        debug!("Anthropic file extraction: {} bytes", bytes.len());
        let content = vec![
            ContentBlock::Document {
                source: DocumentSource {
                    source_type: "base64",
                    media_type: file_type.mime_type(),
                    data: base64::engine::general_purpose::STANDARD.encode(bytes),
                },
            },
            ContentBlock::Text {
                text: PromptBuilder::for_document(file_type).build(),
            },
        ];
        let answer = self.send(content, self.file_max_tokens).await?;
        let record = parse_resume_response(&answer)?;
        Ok(ExtractionResult::new(record, FILE_CONFIDENCE)
            .with_provenance(Some(ProviderId::Anthropic), ExtractionMethod::DirectFile))
    }

    async fn extract_from_text(&self, text: &str) -> Result<ExtractionResult, LlmError> {
        debug!("Anthropic text extraction: {} chars", text.len());
        let content = vec![ContentBlock::Text {
            text: PromptBuilder::for_text(text).build(),
        }];
        let answer = self.send(content, self.text_max_tokens).await?;
        let record = parse_resume_response(&answer)?;
        Ok(ExtractionResult::new(record, TEXT_CONFIDENCE)
            .with_provenance(Some(ProviderId::Anthropic), ExtractionMethod::TextExtraction))
    }
}
