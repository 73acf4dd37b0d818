//! Shared configuration store
//!
//! Read-mostly: every strategy decision takes one [`ConfigSnapshot`] at the
//! start and never observes later updates. Administrative updates copy the
//! current configuration, modify the copy and swap it in (last write wins).

use crate::{ConfigError, LayerValues, Preset, ProcessingConfig};
use duonova_domain::{ProcessingMode, ProcessingRule, ProviderId};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Immutable view of the configuration at one point in time
pub type ConfigSnapshot = Arc<ProcessingConfig>;

/// Holds the live configuration and serves snapshots
#[derive(Debug)]
pub struct ConfigStore {
    current: RwLock<ConfigSnapshot>,
}

impl ConfigStore {
    /// Create a store from an initial configuration
    pub fn new(config: ProcessingConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// Take a consistent snapshot
    pub fn snapshot(&self) -> ConfigSnapshot {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Apply an administrative change atomically
    pub fn update<F>(&self, change: F)
    where
        F: FnOnce(&mut ProcessingConfig),
    {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = ProcessingConfig::clone(&guard);
        change(&mut next);
        *guard = Arc::new(next);
    }

    /// Replace the rule table
    pub fn set_rules(&self, rules: Vec<ProcessingRule>) -> Result<(), ConfigError> {
        let mut candidate = ProcessingConfig::clone(&self.snapshot());
        candidate.rules = rules.clone();
        candidate.validate().map_err(ConfigError::Invalid)?;

        info!("Replacing rule table ({} rules)", rules.len());
        self.update(|config| config.rules = rules);
        Ok(())
    }

    /// Set or clear the mode override (raw value, validated on resolution)
    pub fn set_mode_override(&self, mode: Option<&str>) {
        info!("Mode override set to {:?}", mode);
        let mode = mode.map(str::to_string);
        self.update(|config| config.overrides.default_mode = mode);
    }

    /// Set or clear the provider priority override
    pub fn set_provider_priority(&self, priority: Option<&[ProviderId]>) {
        let joined = priority.map(|ids| {
            ids.iter()
                .map(ProviderId::as_str)
                .collect::<Vec<_>>()
                .join(",")
        });
        info!("Provider priority override set to {:?}", joined);
        self.update(|config| config.overrides.provider_priority = joined);
    }

    /// Set or clear the cost optimization override
    pub fn set_cost_optimization(&self, enabled: Option<bool>) {
        info!("Cost optimization override set to {:?}", enabled);
        self.update(|config| config.overrides.cost_optimization = enabled.map(|b| b.to_string()));
    }

    /// Set or clear the auto-fallback override
    pub fn set_auto_fallback(&self, enabled: Option<bool>) {
        info!("Auto-fallback override set to {:?}", enabled);
        self.update(|config| config.overrides.auto_fallback = enabled.map(|b| b.to_string()));
    }

    /// Apply a preset through the override layer
    pub fn apply_preset(&self, preset: Preset) {
        info!("Applying '{}' preset", preset.as_str());
        self.update(|config| config.overrides = preset.values());
    }

    /// Drop every administrative override
    pub fn clear_overrides(&self) {
        self.update(|config| config.overrides = LayerValues::default());
    }

    /// Convenience: set a typed mode override
    pub fn force_mode(&self, mode: ProcessingMode) {
        self.set_mode_override(Some(mode.as_str()));
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(ProcessingConfig::default())
    }
}
