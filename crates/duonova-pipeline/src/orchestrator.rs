//! Provider fallback execution

use crate::{AttemptFailure, CancelFlag, ExtractionInput, HeuristicExtractor, PipelineError};
use duonova_domain::{
    ExtractionError, ExtractionMethod, ExtractionResult, ProviderId, ProviderSelection,
};
use duonova_llm::{ExtractionAdapter, LlmError, ProviderRegistry};
use duonova_rules::DEFAULT_CALL_TIMEOUT_SECS;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Runs extraction against providers in order until one succeeds
///
/// Calls are sequential and each one is bounded by the call timeout. Within a
/// provider the file path runs before the text path; there are no other
/// retries.
pub struct FallbackOrchestrator<'r> {
    registry: &'r ProviderRegistry,
    call_timeout: Duration,
    auto_fallback: bool,
    heuristic: HeuristicExtractor,
}

impl<'r> FallbackOrchestrator<'r> {
    /// Create an orchestrator with the default timeout and fallback enabled
    pub fn new(registry: &'r ProviderRegistry) -> Self {
        Self {
            registry,
            call_timeout: Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS),
            auto_fallback: true,
            heuristic: HeuristicExtractor::new(),
        }
    }

    /// Bound every adapter call
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Try every provider in order, or only the first
    pub fn with_auto_fallback(mut self, enabled: bool) -> Self {
        self.auto_fallback = enabled;
        self
    }

    /// Extract a record
    ///
    /// `Specific` selections call one adapter and report its failure as an
    /// error-marked result. `Auto` walks `order`, then falls back to the
    /// heuristic extractor when text is available.
    pub async fn extract(
        &self,
        input: &ExtractionInput<'_>,
        selection: ProviderSelection,
        order: &[ProviderId],
        cancel: &CancelFlag,
    ) -> Result<ExtractionResult, PipelineError> {
        match selection {
            ProviderSelection::Specific(provider) => self.extract_specific(input, provider, cancel).await,
            ProviderSelection::Auto => self.extract_auto(input, order, cancel).await,
        }
    }

    async fn extract_specific(
        &self,
        input: &ExtractionInput<'_>,
        provider: ProviderId,
        cancel: &CancelFlag,
    ) -> Result<ExtractionResult, PipelineError> {
        let Some(adapter) = self.registry.get(provider) else {
            warn!("Requested provider {} is not registered", provider);
            return Ok(ExtractionResult::failure(
                ExtractionError::new(format!("Provider {} is not available", provider))
                    .with_provider(provider),
            ));
        };

        let mut failures = Vec::new();
        if let Some(result) = self.try_provider(adapter.as_ref(), input, cancel, &mut failures).await? {
            return Ok(result);
        }

        let last = failures.pop();
        let message = last
            .as_ref()
            .map(|failure| failure.error.clone())
            .unwrap_or_else(|| format!("Provider {} cannot process this input", provider));
        let mut error = ExtractionError::new(message).with_provider(provider);
        if let Some(raw) = last.and_then(|failure| failure.raw_payload) {
            error = error.with_raw_payload(raw);
        }
        Ok(ExtractionResult::failure(error))
    }

    async fn extract_auto(
        &self,
        input: &ExtractionInput<'_>,
        order: &[ProviderId],
        cancel: &CancelFlag,
    ) -> Result<ExtractionResult, PipelineError> {
        let limit = if self.auto_fallback { order.len() } else { order.len().min(1) };
        let mut failures = Vec::new();

        for provider in order.iter().take(limit).copied() {
            let Some(adapter) = self.registry.get(provider) else {
                debug!("Skipping unregistered provider {}", provider);
                continue;
            };
            if let Some(result) = self.try_provider(adapter.as_ref(), input, cancel, &mut failures).await? {
                return Ok(result);
            }
        }

        if let Some(text) = input.usable_text() {
            if cancel.is_cancelled() {
                return Err(PipelineError::Cancelled);
            }
            warn!(
                "All providers failed after {} attempts, using heuristic extraction",
                failures.len()
            );
            return Ok(self.heuristic.extract(text));
        }

        warn!("All providers failed and no text is available");
        Err(PipelineError::AllProvidersExhausted { attempts: failures })
    }

    /// File path, then text path, on one adapter
    async fn try_provider(
        &self,
        adapter: &dyn ExtractionAdapter,
        input: &ExtractionInput<'_>,
        cancel: &CancelFlag,
        failures: &mut Vec<AttemptFailure>,
    ) -> Result<Option<ExtractionResult>, PipelineError> {
        let provider = adapter.provider();

        if let Some(bytes) = input.bytes.filter(|_| adapter.supports_file_upload()) {
            if cancel.is_cancelled() {
                return Err(PipelineError::Cancelled);
            }
            debug!("Submitting {} bytes to {}", bytes.len(), provider);
            let outcome = self
                .call(adapter.extract_from_file(bytes, input.file_type))
                .await;
            match accept(provider, ExtractionMethod::DirectFile, outcome) {
                Ok(result) => return Ok(Some(result)),
                Err(failure) => failures.push(failure),
            }
        }

        if let Some(text) = input.usable_text().filter(|_| adapter.supports_text()) {
            if cancel.is_cancelled() {
                return Err(PipelineError::Cancelled);
            }
            debug!("Submitting {} characters to {}", text.len(), provider);
            let outcome = self.call(adapter.extract_from_text(text)).await;
            match accept(provider, ExtractionMethod::TextExtraction, outcome) {
                Ok(result) => return Ok(Some(result)),
                Err(failure) => failures.push(failure),
            }
        }

        Ok(None)
    }

    async fn call<F>(&self, future: F) -> Result<ExtractionResult, LlmError>
    where
        F: Future<Output = Result<ExtractionResult, LlmError>>,
    {
        tokio::time::timeout(self.call_timeout, future)
            .await
            .map_err(|_| LlmError::Timeout(self.call_timeout))?
    }
}

fn accept(
    provider: ProviderId,
    method: ExtractionMethod,
    outcome: Result<ExtractionResult, LlmError>,
) -> Result<ExtractionResult, AttemptFailure> {
    let failure = match outcome {
        Ok(result) if !result.is_error() => {
            info!("{} succeeded via {}", provider, method.as_str());
            return Ok(result.with_provenance(Some(provider), method));
        }
        Ok(result) => AttemptFailure {
            provider,
            method,
            error: result
                .error
                .as_ref()
                .map(|e| e.message.clone())
                .unwrap_or_default(),
            raw_payload: result.error.and_then(|e| e.raw_payload),
        },
        Err(e) => AttemptFailure {
            provider,
            method,
            raw_payload: e.raw_payload().map(str::to_string),
            error: e.to_string(),
        },
    };
    warn!(
        "{} failed via {}: {}",
        provider,
        method.as_str(),
        failure.error
    );
    Err(failure)
}
