//! Strategy selection

use crate::{FileAnalysis, SelectionError, StrategyExplanation};
use duonova_domain::{
    CostSwitch, CredentialsRegistry, DecisionSource, FileMetadata, ProcessingMode, ProviderId,
    ProviderProfile, StrategyDecision,
};
use duonova_rules::ProcessingConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Representative files used to dry-run a configuration
pub const SAMPLE_FILES: [(&str, u64); 4] = [
    ("small_resume.docx", 500 * 1024),
    ("large_resume.pdf", 6 * 1024 * 1024),
    ("simple_resume.txt", 50 * 1024),
    ("complex_resume.pdf", 2 * 1024 * 1024),
];

/// Decides mode and provider for a file
///
/// Selection is a pure function of the configuration snapshot, the file and
/// provider availability.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategySelector;

impl StrategySelector {
    /// Create a selector
    pub fn new() -> Self {
        Self
    }

    /// Select a strategy
    ///
    /// `explicit_mode` is a per-request override; it takes precedence over a
    /// mode set through the override or environment layers. Either one
    /// bypasses the rule table.
    pub fn select(
        &self,
        config: &ProcessingConfig,
        file: &FileMetadata,
        explicit_mode: Option<ProcessingMode>,
        availability: &dyn CredentialsRegistry,
    ) -> Result<StrategyDecision, SelectionError> {
        let resolved = config.resolve_defaults();

        // 1. Explicit mode, rule, or defaults
        let (mode, order, source, mut reasoning) =
            if let Some(mode) = explicit_mode.or(resolved.explicit_mode) {
                (
                    mode,
                    resolved.provider_priority.clone(),
                    DecisionSource::ExplicitOverride,
                    format!("Explicit configuration: {} mode (rules bypassed)", mode),
                )
            } else if let Some(rule) = config.rule_engine().evaluate_file(file) {
                let order = if rule.providers.is_empty() {
                    resolved.provider_priority.clone()
                } else {
                    rule.providers.clone()
                };
                (
                    rule.mode,
                    order,
                    DecisionSource::Rule(rule.name.clone()),
                    format!("Rule-based ({}): {}", rule.name, rule.description),
                )
            } else {
                (
                    resolved.mode,
                    resolved.provider_priority.clone(),
                    DecisionSource::Defaults,
                    "Default configuration applied".to_string(),
                )
            };

        // 2. First available provider from the effective order
        let provider = match order.iter().copied().find(|id| availability.is_available(*id)) {
            Some(id) => id,
            None => {
                let fallback = declaration_order(config)
                    .into_iter()
                    .find(|id| availability.is_available(*id))
                    .ok_or(SelectionError::NoProviderAvailable)?;
                reasoning.push_str(&format!(
                    " | Preferred providers unavailable, using {}",
                    display_name(config, fallback)
                ));
                fallback
            }
        };

        // 3. Cost optimization
        let mut cost_switch = None;
        let provider = if resolved.cost_optimization {
            match cheaper_alternative(config, provider, mode, availability) {
                CostCheck::AlreadyCheapest => {
                    reasoning.push_str(" | Already using cost-effective provider");
                    provider
                }
                CostCheck::Switch(cheaper) => {
                    reasoning.push_str(&format!(
                        " | Cost optimization: switched to {}",
                        display_name(config, cheaper)
                    ));
                    cost_switch = Some(CostSwitch {
                        from: provider,
                        to: cheaper,
                    });
                    cheaper
                }
                CostCheck::NoAlternative => {
                    reasoning.push_str(" | No cost-effective alternatives available");
                    provider
                }
            }
        } else {
            provider
        };

        info!(
            "Selected {} mode with {} for {} ({})",
            mode, provider, file.file_name, reasoning
        );

        Ok(StrategyDecision {
            mode,
            provider,
            provider_order: order,
            source,
            cost_switch,
            reasoning,
        })
    }

    /// Select a strategy and report everything that fed into it
    pub fn explain(
        &self,
        config: &ProcessingConfig,
        file: &FileMetadata,
        explicit_mode: Option<ProcessingMode>,
        availability: &dyn CredentialsRegistry,
    ) -> Result<StrategyExplanation, SelectionError> {
        let decision = self.select(config, file, explicit_mode, availability)?;
        let matched_rule = config.rule_engine().evaluate_file(file).cloned();
        let provider = config.profile(decision.provider).cloned();

        Ok(StrategyExplanation {
            decision,
            matched_rule,
            provider,
            file: FileAnalysis::from(file),
            configuration: config.resolve_defaults(),
            available_providers: availability.available(),
        })
    }

    /// Dry-run the configuration against [`SAMPLE_FILES`]
    pub fn test_configuration(
        &self,
        config: &ProcessingConfig,
        availability: &dyn CredentialsRegistry,
    ) -> ConfigurationTest {
        let results = SAMPLE_FILES
            .iter()
            .map(|(name, size)| {
                let file = FileMetadata::new(*name, *size);
                match self.select(config, &file, None, availability) {
                    Ok(decision) => SampleResult {
                        file_name: name.to_string(),
                        size_bytes: *size,
                        mode: Some(decision.mode),
                        provider: Some(decision.provider),
                        reasoning: decision.reasoning,
                        success: true,
                    },
                    Err(e) => SampleResult {
                        file_name: name.to_string(),
                        size_bytes: *size,
                        mode: None,
                        provider: None,
                        reasoning: e.to_string(),
                        success: false,
                    },
                }
            })
            .collect();

        ConfigurationTest {
            results,
            available_providers: availability.available(),
        }
    }
}

/// One sample file's decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleResult {
    /// Sample file name
    pub file_name: String,

    /// Sample file size
    pub size_bytes: u64,

    /// Chosen mode
    pub mode: Option<ProcessingMode>,

    /// Chosen provider
    pub provider: Option<ProviderId>,

    /// Decision reasoning, or the selection error
    pub reasoning: String,

    /// Whether selection succeeded
    pub success: bool,
}

/// Result of a configuration dry run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationTest {
    /// One entry per sample file
    pub results: Vec<SampleResult>,

    /// Providers available during the run
    pub available_providers: Vec<ProviderId>,
}

enum CostCheck {
    AlreadyCheapest,
    Switch(ProviderId),
    NoAlternative,
}

fn cheaper_alternative(
    config: &ProcessingConfig,
    current: ProviderId,
    mode: ProcessingMode,
    availability: &dyn CredentialsRegistry,
) -> CostCheck {
    let Some(current_tier) = config.profile(current).map(|p| p.cost_tier) else {
        return CostCheck::NoAlternative;
    };

    let mut candidates: Vec<&ProviderProfile> = config.providers.iter().collect();
    candidates.sort_by_key(|profile| profile.cost_tier);

    match candidates.first() {
        Some(cheapest) if cheapest.cost_tier >= current_tier => return CostCheck::AlreadyCheapest,
        None => return CostCheck::AlreadyCheapest,
        _ => {}
    }

    let switch = candidates.into_iter().find(|profile| {
        profile.cost_tier < current_tier
            && availability.is_available(profile.id)
            && profile.supports_mode(mode)
    });
    match switch {
        Some(profile) => CostCheck::Switch(profile.id),
        None => {
            debug!("No cheaper {} provider than {} is available", mode, current);
            CostCheck::NoAlternative
        }
    }
}

/// Profiles in declaration order, then any provider without a profile
fn declaration_order(config: &ProcessingConfig) -> Vec<ProviderId> {
    let mut order: Vec<ProviderId> = config.providers.iter().map(|p| p.id).collect();
    for id in ProviderId::ALL {
        if !order.contains(&id) {
            order.push(id);
        }
    }
    order
}

pub(crate) fn display_name(config: &ProcessingConfig, id: ProviderId) -> String {
    config
        .profile(id)
        .map(|profile| profile.name.clone())
        .unwrap_or_else(|| id.to_string())
}
