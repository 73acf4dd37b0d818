//! Provider API keys

use duonova_domain::{CredentialsRegistry, ProviderId};
use std::collections::BTreeMap;
use std::fmt;

/// API keys by provider
///
/// Keys never appear in `Debug` output.
#[derive(Clone, Default)]
pub struct Credentials {
    keys: BTreeMap<ProviderId, String>,
}

impl Credentials {
    /// Environment variable holding a provider's key
    pub fn env_var(provider: ProviderId) -> &'static str {
        match provider {
            ProviderId::OpenAi => "OPENAI_API_KEY",
            ProviderId::Groq => "GROQ_API_KEY",
            ProviderId::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Read keys from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read keys through a lookup function keyed by variable name
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        ProviderId::ALL
            .into_iter()
            .fold(Self::default(), |credentials, provider| {
                match lookup(Self::env_var(provider)) {
                    Some(key) => credentials.with_key(provider, key),
                    None => credentials,
                }
            })
    }

    /// Add a key; blank keys are ignored
    pub fn with_key(mut self, provider: ProviderId, key: impl Into<String>) -> Self {
        let key = key.into();
        if !key.trim().is_empty() {
            self.keys.insert(provider, key.trim().to_string());
        }
        self
    }

    /// Key for a provider
    pub fn api_key(&self, provider: ProviderId) -> Option<&str> {
        self.keys.get(&provider).map(String::as_str)
    }
}

impl CredentialsRegistry for Credentials {
    fn is_available(&self, provider: ProviderId) -> bool {
        self.keys.contains_key(&provider)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for provider in self.keys.keys() {
            map.entry(&provider.as_str(), &"<redacted>");
        }
        map.finish()
    }
}
