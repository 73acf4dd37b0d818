//! Provider endpoints and request settings

use duonova_domain::ProviderId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI chat completions endpoint
pub const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Groq OpenAI-compatible endpoint
pub const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Anthropic messages endpoint
pub const ANTHROPIC_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// Where a provider lives and which model to ask
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderEndpoint {
    /// Full request URL
    pub url: String,

    /// Model identifier
    pub model: String,
}

impl ProviderEndpoint {
    /// Create an endpoint
    pub fn new(url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            model: model.into(),
        }
    }
}

/// Settings shared by all HTTP adapters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI endpoint and model
    pub openai: ProviderEndpoint,

    /// Groq endpoint and model
    pub groq: ProviderEndpoint,

    /// Anthropic endpoint and model
    pub anthropic: ProviderEndpoint,

    /// Token budget for file requests
    pub file_max_tokens: u32,

    /// Token budget for text requests
    pub text_max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// HTTP client timeout in seconds
    pub request_timeout_secs: u64,
}

impl LlmConfig {
    /// Endpoint for a provider
    pub fn endpoint(&self, provider: ProviderId) -> &ProviderEndpoint {
        match provider {
            ProviderId::OpenAi => &self.openai,
            ProviderId::Groq => &self.groq,
            ProviderId::Anthropic => &self.anthropic,
        }
    }

    /// HTTP client timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            openai: ProviderEndpoint::new(OPENAI_ENDPOINT, "gpt-4o"),
            groq: ProviderEndpoint::new(GROQ_ENDPOINT, "llama-3.3-70b-versatile"),
            anthropic: ProviderEndpoint::new(ANTHROPIC_ENDPOINT, "claude-sonnet-4-5"),
            file_max_tokens: 4000,
            text_max_tokens: 3000,
            temperature: 0.1,
            request_timeout_secs: 120,
        }
    }
}
