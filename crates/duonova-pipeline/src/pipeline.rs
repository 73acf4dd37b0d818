//! End-to-end request processing

use crate::selector::display_name;
use crate::{
    CancelFlag, ConfigurationTest, ExtractionInput, FallbackOrchestrator, PipelineError,
    ProcessingRequest, SelectionError, StrategyExplanation, StrategySelector,
};
use duonova_domain::{
    AvailabilityMap, CredentialsRegistry, FileMetadata, FileType, ProcessingMode,
    ProcessingOutcome, ProviderId, ProviderSelection, RequestId, ResultSink, StrategyDecision,
};
use duonova_llm::ProviderRegistry;
use duonova_rules::ConfigStore;
use duonova_text::{detect_emails, extract_text, TextNormalizer};
use duonova_validator::ResultValidator;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Sink that discards outcomes
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSink;

impl ResultSink for NoSink {
    type Error = Infallible;

    fn publish(&self, _: &RequestId, _: &ProcessingOutcome) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Selection, extraction with fallback, and validation for one document
///
/// Each request reads a single configuration snapshot, so administrative
/// changes made while it runs only affect later requests.
pub struct Pipeline<K = NoSink> {
    store: Arc<ConfigStore>,
    registry: ProviderRegistry,
    credentials: Arc<dyn CredentialsRegistry + Send + Sync>,
    selector: StrategySelector,
    validator: ResultValidator,
    normalizer: TextNormalizer,
    sink: K,
}

impl Pipeline<NoSink> {
    /// Create a pipeline without a result sink
    pub fn new(
        store: Arc<ConfigStore>,
        registry: ProviderRegistry,
        credentials: impl CredentialsRegistry + Send + Sync + 'static,
    ) -> Self {
        Self {
            store,
            registry,
            credentials: Arc::new(credentials),
            selector: StrategySelector::new(),
            validator: ResultValidator::default_config(),
            normalizer: TextNormalizer::new(),
            sink: NoSink,
        }
    }
}

impl<K> Pipeline<K>
where
    K: ResultSink,
    K::Error: std::fmt::Display,
{
    /// Hand every outcome to `sink`
    pub fn with_sink<S: ResultSink>(self, sink: S) -> Pipeline<S> {
        Pipeline {
            store: self.store,
            registry: self.registry,
            credentials: self.credentials,
            selector: self.selector,
            validator: self.validator,
            normalizer: self.normalizer,
            sink,
        }
    }

    /// Replace the validator
    pub fn with_validator(mut self, validator: ResultValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Configuration store, the administrative override channel
    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    /// Registered adapters
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Providers with credentials and a registered adapter
    pub fn availability(&self) -> AvailabilityMap {
        let credentials: &dyn CredentialsRegistry = self.credentials.as_ref();
        self.registry.availability(credentials)
    }

    /// Explain the decision a file would get
    pub fn explain(
        &self,
        file: &FileMetadata,
        explicit_mode: Option<ProcessingMode>,
    ) -> Result<StrategyExplanation, SelectionError> {
        let snapshot = self.store.snapshot();
        self.selector
            .explain(&snapshot, file, explicit_mode, &self.availability())
    }

    /// Dry-run the current configuration against sample files
    pub fn test_configuration(&self) -> ConfigurationTest {
        let snapshot = self.store.snapshot();
        self.selector
            .test_configuration(&snapshot, &self.availability())
    }

    /// Process one request
    pub async fn process(
        &self,
        request: ProcessingRequest,
    ) -> Result<ProcessingOutcome, PipelineError> {
        self.process_with_cancel(request, &CancelFlag::new()).await
    }

    /// Process one request, stopping between attempts once `cancel` is set
    pub async fn process_with_cancel(
        &self,
        request: ProcessingRequest,
        cancel: &CancelFlag,
    ) -> Result<ProcessingOutcome, PipelineError> {
        let file = request.metadata();
        let correlation_id = request.correlation_id.unwrap_or_default();

        // 1. One snapshot for the whole request
        let snapshot = self.store.snapshot();
        let resolved = snapshot.resolve_defaults();

        // 2. Availability and strategy
        let availability = self.availability();
        if let ProviderSelection::Specific(provider) = request.provider {
            if !availability.is_available(provider) {
                warn!("[{}] Requested provider {} is not available", correlation_id, provider);
                return Err(SelectionError::ProviderUnavailable(provider).into());
            }
        }
        let mut decision =
            self.selector
                .select(&snapshot, &file, request.explicit_mode, &availability)?;
        if let ProviderSelection::Specific(provider) = request.provider {
            decision = force_provider(decision, provider, &display_name(&snapshot, provider));
        }
        info!(
            "[{}] Processing {} in {} mode with {}",
            correlation_id, file.file_name, decision.mode, decision.provider
        );

        // 3. Decide what may be submitted
        let caller_text = request
            .normalized_text
            .as_deref()
            .map(|text| self.normalizer.normalize(text))
            .filter(|text| !text.is_empty());
        let bytes = request.file_bytes.as_deref();

        let (submit_bytes, text) = match decision.mode {
            ProcessingMode::Hybrid => {
                let text = match caller_text {
                    Some(text) => Some(text),
                    None => local_text(bytes, request.file_type).await,
                };
                if text.is_none() && resolved.auto_fallback {
                    info!(
                        "[{}] No text available, submitting the document instead",
                        correlation_id
                    );
                    (bytes, None)
                } else {
                    (None, text)
                }
            }
            ProcessingMode::Complete => {
                let text = match caller_text {
                    Some(text) => Some(text),
                    None if resolved.auto_fallback => local_text(bytes, request.file_type).await,
                    None => None,
                };
                (bytes, text)
            }
        };

        let mut input = ExtractionInput::new(request.file_type);
        if let Some(bytes) = submit_bytes {
            input = input.with_bytes(bytes);
        }
        if let Some(text) = text.as_deref() {
            input = input.with_text(text);
        }

        // 4. Run providers
        let order = fallback_order(&decision, &availability);
        debug!("[{}] Fallback order: {:?}", correlation_id, order);
        let orchestrator = FallbackOrchestrator::new(&self.registry)
            .with_call_timeout(snapshot.call_timeout())
            .with_auto_fallback(resolved.auto_fallback);
        let mut result = orchestrator
            .extract(&input, request.provider, &order, cancel)
            .await?;

        // 5. Fill a missing email from the text
        if !result.is_error() {
            let detected = text
                .as_deref()
                .and_then(|text| detect_emails(text).into_iter().next());
            if let Some(email) = detected {
                if result.record.backfill_email(&email) {
                    debug!("[{}] Backfilled email from text", correlation_id);
                }
            }
        }

        // 6. Validate and publish
        let validation = self.validator.validate(&result);
        info!(
            "[{}] Finished: valid={}, confidence={}, quality={}",
            correlation_id,
            validation.is_valid,
            validation.confidence,
            validation.quality.as_str()
        );

        let outcome = ProcessingOutcome {
            correlation_id,
            decision,
            result,
            validation,
        };
        self.sink
            .publish(&correlation_id, &outcome)
            .map_err(|e| PipelineError::Sink(e.to_string()))?;

        Ok(outcome)
    }
}

/// Decided provider, then the effective priority, then everything else
/// available; duplicates and unavailable providers removed
pub fn fallback_order(
    decision: &StrategyDecision,
    availability: &dyn CredentialsRegistry,
) -> Vec<ProviderId> {
    let candidates = std::iter::once(decision.provider)
        .chain(decision.provider_order.iter().copied())
        .chain(availability.available());

    let mut order = Vec::new();
    for provider in candidates {
        if availability.is_available(provider) && !order.contains(&provider) {
            order.push(provider);
        }
    }
    order
}

/// Pin a decision to a requested provider; no other provider is tried
fn force_provider(mut decision: StrategyDecision, provider: ProviderId, name: &str) -> StrategyDecision {
    if decision.cost_switch.is_some_and(|switch| switch.to != provider) {
        decision.cost_switch = None;
    }
    decision.provider = provider;
    decision.provider_order = vec![provider];
    decision.reasoning.push_str(&format!(" | Provider override: {}", name));
    decision
}

async fn local_text(bytes: Option<&[u8]>, file_type: FileType) -> Option<String> {
    let bytes = bytes?.to_vec();
    match tokio::task::spawn_blocking(move || extract_text(&bytes, file_type)).await {
        Ok(Ok(text)) => Some(text),
        Ok(Err(e)) => {
            warn!("Local text extraction failed: {}", e);
            None
        }
        Err(e) => {
            warn!("Local text extraction task failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duonova_domain::DecisionSource;

    fn decision(provider: ProviderId, order: Vec<ProviderId>) -> StrategyDecision {
        StrategyDecision {
            mode: ProcessingMode::Hybrid,
            provider,
            provider_order: order,
            source: DecisionSource::Defaults,
            cost_switch: None,
            reasoning: String::new(),
        }
    }

    #[test]
    fn test_fallback_order_dedups_and_filters() {
        let decided = decision(
            ProviderId::Groq,
            vec![ProviderId::OpenAi, ProviderId::Groq, ProviderId::Anthropic],
        );
        let available = vec![ProviderId::Groq, ProviderId::Anthropic, ProviderId::OpenAi];
        assert_eq!(
            fallback_order(&decided, &available),
            vec![ProviderId::Groq, ProviderId::OpenAi, ProviderId::Anthropic]
        );

        let available = vec![ProviderId::Groq, ProviderId::Anthropic];
        assert_eq!(
            fallback_order(&decided, &available),
            vec![ProviderId::Groq, ProviderId::Anthropic]
        );
    }

    #[test]
    fn test_fallback_order_appends_unlisted_providers() {
        let decided = decision(ProviderId::OpenAi, vec![ProviderId::OpenAi]);
        let available = ProviderId::ALL.to_vec();
        assert_eq!(
            fallback_order(&decided, &available),
            vec![ProviderId::OpenAi, ProviderId::Groq, ProviderId::Anthropic]
        );
    }

    #[tokio::test]
    async fn test_local_text_rejects_garbage() {
        assert!(local_text(Some(&b"not a pdf"[..]), FileType::Pdf).await.is_none());
        assert!(local_text(None, FileType::Docx).await.is_none());
    }
}
