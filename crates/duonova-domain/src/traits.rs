//! Trait definitions for external collaborators
//!
//! Credential storage and result persistence are owned by the embedding
//! application; these traits are the only contact points.

use crate::{ProcessingOutcome, ProviderId, RequestId};
use std::collections::BTreeMap;

/// Per-provider credential availability
pub trait CredentialsRegistry {
    /// Whether valid credentials exist for a provider
    fn is_available(&self, provider: ProviderId) -> bool;

    /// All providers with credentials, in [`ProviderId::ALL`] order
    fn available(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|id| self.is_available(*id))
            .collect()
    }
}

/// Plain availability map
pub type AvailabilityMap = BTreeMap<ProviderId, bool>;

impl CredentialsRegistry for AvailabilityMap {
    fn is_available(&self, provider: ProviderId) -> bool {
        self.get(&provider).copied().unwrap_or(false)
    }
}

impl CredentialsRegistry for [ProviderId] {
    fn is_available(&self, provider: ProviderId) -> bool {
        self.contains(&provider)
    }
}

impl CredentialsRegistry for Vec<ProviderId> {
    fn is_available(&self, provider: ProviderId) -> bool {
        self.contains(&provider)
    }
}

/// Receives finished outcomes
///
/// Implemented by the persistence layer of the embedding application.
pub trait ResultSink {
    /// Error type for sink operations
    type Error;

    /// Store the outcome of one request
    fn publish(&self, correlation_id: &RequestId, outcome: &ProcessingOutcome) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_map() {
        let mut map = AvailabilityMap::new();
        map.insert(ProviderId::Groq, true);
        map.insert(ProviderId::OpenAi, false);
        assert!(map.is_available(ProviderId::Groq));
        assert!(!map.is_available(ProviderId::OpenAi));
        assert!(!map.is_available(ProviderId::Anthropic));
        assert_eq!(map.available(), vec![ProviderId::Groq]);
    }

    #[test]
    fn test_slice_registry() {
        let available = vec![ProviderId::Anthropic, ProviderId::OpenAi];
        assert_eq!(
            available.available(),
            vec![ProviderId::OpenAi, ProviderId::Anthropic]
        );
    }
}
