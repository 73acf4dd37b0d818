//! Provider identities, profiles and selection

use crate::ProcessingMode;
use serde::{Deserialize, Serialize};

/// A language-model backend known to DuoNova
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// OpenAI chat completions
    OpenAi,

    /// Groq (OpenAI-compatible API)
    Groq,

    /// Anthropic messages API
    Anthropic,
}

impl ProviderId {
    /// Every provider, in registration order
    pub const ALL: [ProviderId; 3] = [ProviderId::OpenAi, ProviderId::Groq, ProviderId::Anthropic];

    /// Get the provider key as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::Groq => "groq",
            ProviderId::Anthropic => "anthropic",
        }
    }

    /// Parse a provider key, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Some(ProviderId::OpenAi),
            "groq" => Some(ProviderId::Groq),
            "anthropic" | "claude" => Some(ProviderId::Anthropic),
            _ => None,
        }
    }

    /// Parse a comma-separated priority list
    ///
    /// Returns the offending entry when any element is not a provider key.
    /// `auto` entries are skipped.
    pub fn parse_list(s: &str) -> Result<Vec<Self>, String> {
        let mut providers = Vec::new();
        for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            if item.eq_ignore_ascii_case("auto") {
                continue;
            }
            let id = Self::parse(item).ok_or_else(|| item.to_string())?;
            if !providers.contains(&id) {
                providers.push(id);
            }
        }
        Ok(providers)
    }
}

impl std::str::FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid provider: {}", s))
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which provider a request should use
///
/// `Auto` lets the selector and orchestrator choose and fall back;
/// `Specific` pins a single provider with no fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProviderSelection {
    /// Let the pipeline decide
    #[default]
    Auto,

    /// Use exactly this provider
    Specific(ProviderId),
}

impl ProviderSelection {
    /// Parse `auto` or a provider key
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Some(ProviderSelection::Auto);
        }
        ProviderId::parse(s).map(ProviderSelection::Specific)
    }
}

impl std::str::FromStr for ProviderSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid provider selection: {}", s))
    }
}

impl TryFrom<String> for ProviderSelection {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ProviderSelection> for String {
    fn from(selection: ProviderSelection) -> Self {
        selection.to_string()
    }
}

impl std::fmt::Display for ProviderSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderSelection::Auto => f.write_str("auto"),
            ProviderSelection::Specific(id) => f.write_str(id.as_str()),
        }
    }
}

/// Usage cost classification, ordered cheapest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostTier {
    /// No usage cost
    Free,

    /// Paid usage
    Premium,
}

impl CostTier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CostTier::Free => "free",
            CostTier::Premium => "premium",
        }
    }
}

/// What a provider can accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Accepts raw document bytes
    #[serde(default)]
    pub file_upload: bool,

    /// Accepts plain text
    #[serde(default = "default_true")]
    pub text: bool,
}

fn default_true() -> bool {
    true
}

impl Capabilities {
    /// Text-only provider
    pub fn text_only() -> Self {
        Self { file_upload: false, text: true }
    }

    /// Provider accepting both documents and text
    pub fn file_and_text() -> Self {
        Self { file_upload: true, text: true }
    }
}

/// Static description of a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderProfile {
    /// Provider identifier
    pub id: ProviderId,

    /// Human-readable name
    pub name: String,

    /// Cost classification
    pub cost_tier: CostTier,

    /// Capability flags
    pub capabilities: Capabilities,

    /// Descriptive strengths (e.g. "speed", "accuracy")
    #[serde(default)]
    pub strengths: Vec<String>,

    /// Documents this provider handles best
    #[serde(default)]
    pub best_for: Vec<String>,
}

impl ProviderProfile {
    /// Whether this provider can serve the given mode
    ///
    /// Hybrid needs text input; complete needs document upload.
    pub fn supports_mode(&self, mode: ProcessingMode) -> bool {
        match mode {
            ProcessingMode::Hybrid => self.capabilities.text,
            ProcessingMode::Complete => self.capabilities.file_upload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse_roundtrip_keys() {
        for id in ProviderId::ALL {
            assert_eq!(ProviderId::parse(id.as_str()), Some(id));
        }
        assert_eq!(ProviderId::parse("OpenAI"), Some(ProviderId::OpenAi));
        assert_eq!(ProviderId::parse("auto"), None);
    }

    #[test]
    fn test_parse_list_skips_auto_and_duplicates() {
        let list = ProviderId::parse_list("groq, auto, openai,groq").unwrap();
        assert_eq!(list, vec![ProviderId::Groq, ProviderId::OpenAi]);
    }

    #[test]
    fn test_parse_list_reports_invalid_entry() {
        let err = ProviderId::parse_list("groq,mistral").unwrap_err();
        assert_eq!(err, "mistral");
    }

    #[test]
    fn test_selection_auto_is_not_a_provider() {
        assert_eq!(ProviderSelection::parse("AUTO"), Some(ProviderSelection::Auto));
        assert_eq!(
            ProviderSelection::parse("groq"),
            Some(ProviderSelection::Specific(ProviderId::Groq))
        );
        let json = serde_json::to_string(&ProviderSelection::Specific(ProviderId::OpenAi)).unwrap();
        assert_eq!(json, "\"openai\"");
    }

    #[test]
    fn test_cost_tier_ordering() {
        assert!(CostTier::Free < CostTier::Premium);
    }

    #[test]
    fn test_supports_mode() {
        let groq = ProviderProfile {
            id: ProviderId::Groq,
            name: "Groq".into(),
            cost_tier: CostTier::Free,
            capabilities: Capabilities::text_only(),
            strengths: vec![],
            best_for: vec![],
        };
        assert!(groq.supports_mode(ProcessingMode::Hybrid));
        assert!(!groq.supports_mode(ProcessingMode::Complete));
    }
}
