//! Processing configuration
//!
//! Loaded once per process (optionally from TOML) and then only changed
//! through [`crate::ConfigStore`].

use crate::defaults::{builtin_profiles, builtin_rules, DEFAULT_MODE, DEFAULT_PROVIDER_PRIORITY};
use crate::{ConfigError, LayerValues, RuleEngine};
use duonova_domain::{ProcessingMode, ProcessingRule, ProviderId, ProviderProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Default per-call provider timeout (seconds)
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 120;

/// Built-in defaults, replaceable by a config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSettings {
    /// Mode when no rule or override applies
    #[serde(default = "default_mode")]
    pub mode: ProcessingMode,

    /// Provider order when no rule or override applies
    #[serde(default = "default_priority")]
    pub provider_priority: Vec<ProviderId>,

    /// Prefer cheaper providers when capable
    #[serde(default = "default_true")]
    pub cost_optimization: bool,

    /// Fall back across providers
    #[serde(default = "default_true")]
    pub auto_fallback: bool,
}

fn default_mode() -> ProcessingMode {
    DEFAULT_MODE
}

fn default_priority() -> Vec<ProviderId> {
    DEFAULT_PROVIDER_PRIORITY.to_vec()
}

fn default_true() -> bool {
    true
}

fn default_call_timeout() -> u64 {
    DEFAULT_CALL_TIMEOUT_SECS
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            mode: DEFAULT_MODE,
            provider_priority: default_priority(),
            cost_optimization: true,
            auto_fallback: true,
        }
    }
}

/// Everything a strategy decision reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Per-call provider timeout (seconds)
    #[serde(default = "default_call_timeout")]
    pub call_timeout_secs: u64,

    /// Lowest configuration layer
    #[serde(default)]
    pub defaults: DefaultSettings,

    /// Ordered rule table
    #[serde(default = "builtin_rules")]
    pub rules: Vec<ProcessingRule>,

    /// Provider profiles in declaration order
    #[serde(default = "builtin_profiles")]
    pub providers: Vec<ProviderProfile>,

    /// Environment layer (read at startup, never from files)
    #[serde(skip)]
    pub environment: LayerValues,

    /// Administrative override layer
    #[serde(skip)]
    pub overrides: LayerValues,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            rules: builtin_rules(),
            providers: builtin_profiles(),
            defaults: DefaultSettings::default(),
            call_timeout_secs: DEFAULT_CALL_TIMEOUT_SECS,
            environment: LayerValues::default(),
            overrides: LayerValues::default(),
        }
    }
}

impl ProcessingConfig {
    /// Rule engine over this configuration's rule table
    pub fn rule_engine(&self) -> RuleEngine<'_> {
        RuleEngine::new(&self.rules)
    }

    /// Look up a provider profile
    pub fn profile(&self, id: ProviderId) -> Option<&ProviderProfile> {
        self.providers.iter().find(|profile| profile.id == id)
    }

    /// Per-call timeout as a Duration
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    /// Attach an environment layer
    pub fn with_environment(mut self, environment: LayerValues) -> Self {
        self.environment = environment;
        self
    }

    /// Validate structural invariants
    pub fn validate(&self) -> Result<(), String> {
        let mut names = HashSet::new();
        for rule in &self.rules {
            if rule.name.trim().is_empty() {
                return Err("rule names must not be empty".to_string());
            }
            if !names.insert(rule.name.as_str()) {
                return Err(format!("duplicate rule name '{}'", rule.name));
            }
            if rule.providers.is_empty() {
                return Err(format!("rule '{}' has no providers", rule.name));
            }
        }

        let mut ids = HashSet::new();
        for profile in &self.providers {
            if !ids.insert(profile.id) {
                return Err(format!("duplicate provider profile '{}'", profile.id));
            }
            if !profile.capabilities.text && !profile.capabilities.file_upload {
                return Err(format!("provider '{}' accepts no input", profile.id));
            }
        }

        if self.call_timeout_secs == 0 {
            return Err("call_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ProcessingConfig = toml::from_str(toml_str)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Serialize to a TOML string (layers are not written)
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
