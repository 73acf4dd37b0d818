//! Typed provider registry

use crate::{
    AnthropicAdapter, Credentials, ExtractionAdapter, GroqAdapter, LlmConfig, LlmError,
    OpenAiAdapter,
};
use duonova_domain::{AvailabilityMap, CredentialsRegistry, ProviderId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Maps provider ids to adapters
///
/// Built once at startup and shared read-only across requests.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    adapters: HashMap<ProviderId, Arc<dyn ExtractionAdapter>>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an HTTP adapter for every provider that has a key
    pub fn from_credentials(credentials: &Credentials, config: &LlmConfig) -> Result<Self, LlmError> {
        let mut registry = Self::new();
        for provider in ProviderId::ALL {
            let Some(key) = credentials.api_key(provider) else {
                continue;
            };
            let adapter: Arc<dyn ExtractionAdapter> = match provider {
                ProviderId::OpenAi => Arc::new(OpenAiAdapter::new(key, config)?),
                ProviderId::Groq => Arc::new(GroqAdapter::new(key, config)?),
                ProviderId::Anthropic => Arc::new(AnthropicAdapter::new(key, config)?),
            };
            registry.register(adapter);
        }
        info!("Registered providers: {:?}", registry.providers());
        Ok(registry)
    }

    /// Add or replace the adapter for its provider
    pub fn register(&mut self, adapter: Arc<dyn ExtractionAdapter>) {
        self.adapters.insert(adapter.provider(), adapter);
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_adapter(mut self, adapter: impl ExtractionAdapter + 'static) -> Self {
        self.register(Arc::new(adapter));
        self
    }

    /// Adapter for a provider
    pub fn get(&self, provider: ProviderId) -> Option<Arc<dyn ExtractionAdapter>> {
        self.adapters.get(&provider).cloned()
    }

    /// Registered providers in [`ProviderId::ALL`] order
    pub fn providers(&self) -> Vec<ProviderId> {
        self.available()
    }

    /// Availability: registered here and reported available by `credentials`
    pub fn availability(&self, credentials: &dyn CredentialsRegistry) -> AvailabilityMap {
        ProviderId::ALL
            .into_iter()
            .map(|id| (id, self.adapters.contains_key(&id) && credentials.is_available(id)))
            .collect()
    }

    /// Number of registered adapters
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Whether no adapter is registered
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl CredentialsRegistry for ProviderRegistry {
    fn is_available(&self, provider: ProviderId) -> bool {
        self.adapters.contains_key(&provider)
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.providers())
            .finish()
    }
}
