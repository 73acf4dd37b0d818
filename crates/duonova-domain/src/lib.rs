//! DuoNova Domain Layer
//!
//! Core vocabulary shared by every DuoNova crate: processing modes, provider
//! identities and profiles, routing rules, strategy decisions, extracted resume
//! records and validation reports.
//!
//! ## Key Concepts
//!
//! - **Mode**: `Hybrid` (local text extraction + model call) or `Complete`
//!   (the whole document is submitted to a model)
//! - **Provider**: an external language-model backend, addressed by [`ProviderId`]
//! - **Rule**: a named condition-to-strategy mapping evaluated against file metadata
//! - **Confidence**: a `[0, 1]` score estimating extraction completeness
//! - **Cost tier**: free or premium usage cost, used by cost optimization
//!
//! ## Architecture
//!
//! This crate holds plain data and trait boundaries only. Rule evaluation,
//! provider adapters, validation and orchestration live in other crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod decision;
pub mod extraction;
pub mod file;
pub mod mode;
pub mod outcome;
pub mod provider;
pub mod resume;
pub mod rule;
pub mod traits;
pub mod validation;

// Re-exports for convenience
pub use confidence::Confidence;
pub use decision::{CostSwitch, DecisionSource, StrategyDecision};
pub use extraction::{ExtractionError, ExtractionMethod, ExtractionResult};
pub use file::{Complexity, FileMetadata, FileType};
pub use mode::ProcessingMode;
pub use outcome::{ProcessingOutcome, RequestId};
pub use provider::{Capabilities, CostTier, ProviderId, ProviderProfile, ProviderSelection};
pub use resume::{
    EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeRecord, SkillSet,
};
pub use rule::{ProcessingRule, RuleConditions, SizeCondition, SizeOperator};
pub use traits::{AvailabilityMap, CredentialsRegistry, ResultSink};
pub use validation::{QualityTier, ValidationReport};
