//! DuoNova Rules
//!
//! Rule evaluation and the configuration it runs against.
//!
//! # Overview
//!
//! - [`RuleEngine`] scans an ordered rule table and returns the first rule
//!   whose conditions hold for a file.
//! - [`ProcessingConfig`] carries the rule table, provider profiles, built-in
//!   defaults and the override/environment layers.
//! - [`ProcessingConfig::resolve_defaults`] collapses the layers
//!   (override > environment > default) without ever failing.
//! - [`ConfigStore`] hands out immutable snapshots and is the administrative
//!   override channel (last write wins).
//!
//! # Examples
//!
//! ```
//! use duonova_rules::{ConfigStore, ProcessingConfig};
//!
//! let store = ConfigStore::new(ProcessingConfig::default());
//! let snapshot = store.snapshot();
//!
//! let rule = snapshot.rule_engine().evaluate("resume.pdf", 6_000_000).unwrap();
//! assert_eq!(rule.name, "large_files");
//! ```

#![warn(missing_docs)]

mod config;
mod defaults;
mod engine;
mod error;
mod layers;
mod store;

#[cfg(test)]
mod tests;

pub use config::{DefaultSettings, ProcessingConfig, DEFAULT_CALL_TIMEOUT_SECS};
pub use defaults::{builtin_profiles, builtin_rules, DEFAULT_MODE, DEFAULT_PROVIDER_PRIORITY};
pub use engine::RuleEngine;
pub use error::ConfigError;
pub use layers::{
    Layer, LayerValues, Preset, ResolvedDefaults, ENV_AUTO_FALLBACK, ENV_COST_OPTIMIZATION,
    ENV_DEFAULT_MODE, ENV_PROVIDER_PRIORITY,
};
pub use store::{ConfigSnapshot, ConfigStore};
