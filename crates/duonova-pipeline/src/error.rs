//! Error types for selection and processing

use crate::AttemptFailure;
use duonova_domain::ProviderId;
use thiserror::Error;

/// Errors from strategy selection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// No provider has credentials and a registered adapter
    #[error("No LLM providers are currently available")]
    NoProviderAvailable,

    /// A specific provider was requested but has no credentials or adapter
    #[error("Provider '{0}' is not available")]
    ProviderUnavailable(ProviderId),
}

/// Errors that end a processing request without a result
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Strategy selection failed
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Every provider failed and no text was left for the heuristic path
    #[error("All providers exhausted after {} attempts", attempts.len())]
    AllProvidersExhausted {
        /// Failures in the order they happened
        attempts: Vec<AttemptFailure>,
    },

    /// The request was cancelled between attempts
    #[error("Processing cancelled")]
    Cancelled,

    /// The result sink rejected the outcome
    #[error("Result sink error: {0}")]
    Sink(String),
}
