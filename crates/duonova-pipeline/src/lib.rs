//! DuoNova Pipeline
//!
//! Picks a processing strategy for a resume and runs it across LLM providers
//! until structured data comes back.
//!
//! # Overview
//!
//! A request names a file, its size and whatever input is at hand (document
//! bytes, pre-extracted text, or both). The pipeline decides a mode and a
//! provider, submits the document or its text, falls back through the other
//! providers and finally to a local heuristic, then validates the record.
//!
//! # Architecture
//!
//! ```text
//! Request → StrategySelector → FallbackOrchestrator → ResultValidator → ResultSink
//!                  ↑                    ↓
//!            ConfigStore        ProviderRegistry → heuristic
//! ```
//!
//! # Key Features
//!
//! - **Rule-Driven Selection**: first matching rule wins; explicit modes bypass rules
//! - **Cost Optimization**: switches to a cheaper provider that can serve the mode
//! - **Fallback**: file path then text path per provider, then the next provider
//! - **Heuristic Safety Net**: never fails while text remains
//! - **Bounded Calls**: every provider call has a timeout; cancellation between attempts
//!
//! # Example Usage
//!
//! ```no_run
//! use duonova_domain::{FileType, ProviderId};
//! use duonova_llm::{MockAdapter, ProviderRegistry};
//! use duonova_pipeline::{Pipeline, ProcessingRequest};
//! use duonova_rules::{ConfigStore, ProcessingConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = ProviderRegistry::new().with_adapter(MockAdapter::new(ProviderId::Groq).text_only());
//! let store = Arc::new(ConfigStore::new(ProcessingConfig::default()));
//! let pipeline = Pipeline::new(store, registry, vec![ProviderId::Groq]);
//!
//! let request = ProcessingRequest::from_text("cv.docx", FileType::Docx, 20_000, "Jane Doe\njane@x.io");
//! let outcome = pipeline.process(request).await?;
//!
//! println!("{}: {}", outcome.decision.provider, outcome.decision.reasoning);
//! println!("valid: {}", outcome.validation.is_valid);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod heuristic;
mod orchestrator;
mod pipeline;
mod selector;
mod types;

#[cfg(test)]
mod tests;

pub use error::{PipelineError, SelectionError};
pub use heuristic::{HeuristicExtractor, HEURISTIC_CONFIDENCE};
pub use orchestrator::FallbackOrchestrator;
pub use pipeline::{fallback_order, NoSink, Pipeline};
pub use selector::{ConfigurationTest, SampleResult, StrategySelector, SAMPLE_FILES};
pub use types::{
    AttemptFailure, CancelFlag, ExtractionInput, FileAnalysis, ProcessingRequest,
    StrategyExplanation,
};
