//! DuoNova Validator
//!
//! Scores extraction results for completeness and assigns the final
//! confidence and quality verdict.
//!
//! The validator provides:
//! - Required-section checks (personal info, skills, experience, education)
//! - Per-entry checks for experience and education
//! - Skill structure checks
//! - Penalty-based confidence that never undercuts the provider's own score
//!
//! Validation never fails: problems are reported in the
//! [`ValidationReport`](duonova_domain::ValidationReport).
//!
//! # Examples
//!
//! ```
//! use duonova_domain::{ExtractionResult, PersonalInfo, ResumeRecord};
//! use duonova_validator::ResultValidator;
//!
//! let record = ResumeRecord {
//!     personal_info: Some(PersonalInfo {
//!         name: Some("Jane Doe".into()),
//!         ..PersonalInfo::default()
//!     }),
//!     ..ResumeRecord::default()
//! };
//! let report = ResultValidator::default_config().validate(&ExtractionResult::new(record, 0.5));
//! assert!(!report.is_valid);
//! assert!(report.errors.iter().any(|e| e.contains("email")));
//! ```

#![warn(missing_docs)]

mod config;
mod validator;

pub use config::ValidatorConfig;
pub use validator::ResultValidator;
