//! OpenAI Provider Implementation
//!
//! Also home of [`ChatCompletionsClient`], the HTTP client for the
//! OpenAI-compatible chat completions wire format that Groq reuses.
//!
//! # Examples
//!
//! ```no_run
//! use duonova_llm::{ExtractionAdapter, LlmConfig, OpenAiAdapter};
//!
//! # async fn run() -> Result<(), duonova_llm::LlmError> {
//! let adapter = OpenAiAdapter::new("sk-...", &LlmConfig::default())?;
//! let result = adapter.extract_from_text("Jane Doe\nSoftware engineer").await?;
//! println!("confidence {}", result.confidence);
//! # Ok(())
//! # }
//! ```

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

/// Self-reported confidence for whole-document extraction
pub const FILE_CONFIDENCE: f64 = 0.95;

/// Self-reported confidence for text extraction
pub const TEXT_CONFIDENCE: f64 = 0.90;

/// Request body for chat completions
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

/// Either a plain string or a list of typed parts
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageUrl {
    url: String,
    detail: &'static str,
}

/// Response from chat completions
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for an OpenAI-compatible chat completions endpoint
pub struct ChatCompletionsClient {
    endpoint: ProviderEndpoint,
    api_key: String,
    client: reqwest::Client,
    timeout: Duration,
    temperature: f32,
}

impl ChatCompletionsClient {
    /// Create a client for one endpoint
    pub fn new(
        endpoint: ProviderEndpoint,
        api_key: impl Into<String>,
        config: &LlmConfig,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            api_key: api_key.into(),
            client,
            timeout: config.request_timeout(),
            temperature: config.temperature,
        })
    }

    /// Model this client asks
    pub fn model(&self) -> &str {
        &self.endpoint.model
    }

    pub(crate) fn request(&self, content: MessageContent, max_tokens: u32) -> ChatRequest {
        ChatRequest {
            model: self.endpoint.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content,
            }],
            max_tokens,
            temperature: self.temperature,
        }
    }

    /// Send one user message and return the assistant's text
    pub(crate) async fn complete(
        &self,
        content: MessageContent,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let body = self.request(content, max_tokens);

        let response = self
            .client
            .post(&self.endpoint.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::transport(e, self.timeout))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::transport(e, self.timeout))?;

        if !status.is_success() {
            return Err(LlmError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!("{} answered with {} bytes", self.endpoint.model, text.len());
        message_content(&text)
    }
}

/// Pull the first choice's content out of a chat completions body
fn message_content(body: &str) -> Result<String, LlmError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| LlmError::MalformedResponse {
            reason: format!("Failed to parse response: {}", e),
            raw: body.to_string(),
        })?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| LlmError::MalformedResponse {
            reason: "Response has no message content".to_string(),
            raw: body.to_string(),
        })
}

/// OpenAI adapter: whole documents and text
pub struct OpenAiAdapter {
    chat: ChatCompletionsClient,
    file_max_tokens: u32,
    text_max_tokens: u32,
}

impl OpenAiAdapter {
    /// Create an adapter with the configured OpenAI endpoint
    pub fn new(api_key: impl Into<String>, config: &LlmConfig) -> Result<Self, LlmError> {
        Ok(Self {
            chat: ChatCompletionsClient::new(config.openai.clone(), api_key, config)?,
            file_max_tokens: config.file_max_tokens,
            text_max_tokens: config.text_max_tokens,
        })
    }

    fn file_content(bytes: &[u8], file_type: FileType) -> MessageContent {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        MessageContent::Parts(vec![
            ContentPart::Text {
                text: PromptBuilder::for_document(file_type).build(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: format!("data:{};base64,{}", file_type.mime_type(), encoded),
                    detail: "high",
                },
            },
        ])
    }
}

#[async_trait]
impl ExtractionAdapter for OpenAiAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::OpenAi
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
        debug!("OpenAI file extraction: {} bytes of {}", bytes.len(), file_type.as_str());
        let answer = self
            .chat
            .complete(Self::file_content(bytes, file_type), self.file_max_tokens)
            .await?;
        let record = parse_resume_response(&answer)?;
        Ok(ExtractionResult::new(record, FILE_CONFIDENCE)
            .with_provenance(Some(ProviderId::OpenAi), ExtractionMethod::DirectFile))
    }

    async fn extract_from_text(&self, text: &str) -> Result<ExtractionResult, LlmError> {
        debug!("OpenAI text extraction: {} chars", text.len());
        let prompt = PromptBuilder::for_text(text).build();
        let answer = self
            .chat
            .complete(MessageContent::Text(prompt), self.text_max_tokens)
            .await?;
        let record = parse_resume_response(&answer)?;
        Ok(ExtractionResult::new(record, TEXT_CONFIDENCE)
            .with_provenance(Some(ProviderId::OpenAi), ExtractionMethod::TextExtraction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_request_shape() {
        let adapter = OpenAiAdapter::new("sk-test", &LlmConfig::default()).unwrap();
        let request = adapter
            .chat
            .request(OpenAiAdapter::file_content(b"%PDF", FileType::Pdf), 4000);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["max_tokens"], 4000);
        let parts = &value["messages"][0]["content"];
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[1]["type"], "image_url");
        assert_eq!(
            parts[1]["image_url"]["url"],
            "data:application/pdf;base64,JVBERg=="
        );
    }

    #[test]
    fn test_text_request_is_plain_string() {
        let adapter = OpenAiAdapter::new("sk-test", &LlmConfig::default()).unwrap();
        let request = adapter
            .chat
            .request(MessageContent::Text("hello".to_string()), 3000);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["messages"][0], json!({"role": "user", "content": "hello"}));
    }

    #[test]
    fn test_message_content() {
        let body = json!({"choices": [{"message": {"content": "{\"skills\": {}}"}}]}).to_string();
        assert_eq!(message_content(&body).unwrap(), "{\"skills\": {}}");

        let empty = json!({"choices": []}).to_string();
        assert!(matches!(
            message_content(&empty),
            Err(LlmError::MalformedResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_communication_error() {
        let mut config = LlmConfig::default();
        config.openai.url = "http://127.0.0.1:1/v1/chat/completions".to_string();
        let adapter = OpenAiAdapter::new("sk-test", &config).unwrap();

        let result = adapter.extract_from_text("Jane Doe").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
