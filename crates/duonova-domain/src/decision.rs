//! Strategy decisions

use crate::{ProcessingMode, ProviderId};
use serde::{Deserialize, Serialize};

/// Where the decision's mode and provider order came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rule", rename_all = "snake_case")]
pub enum DecisionSource {
    /// An explicit mode override bypassed the rules
    ExplicitOverride,

    /// A named rule matched
    Rule(String),

    /// No rule matched; resolved defaults applied
    Defaults,
}

/// A cost-driven provider switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSwitch {
    /// Provider chosen before cost optimization
    pub from: ProviderId,

    /// Cheaper provider actually used
    pub to: ProviderId,
}

/// The selector's final answer for one request
///
/// Identical inputs and configuration always produce an identical decision,
/// including the reasoning text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyDecision {
    /// Processing mode
    pub mode: ProcessingMode,

    /// Chosen provider (available at decision time)
    pub provider: ProviderId,

    /// Effective provider priority the decision was drawn from
    pub provider_order: Vec<ProviderId>,

    /// Rule, override or defaults
    pub source: DecisionSource,

    /// Cost optimization switch, if one happened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_switch: Option<CostSwitch>,

    /// User-facing explanation
    pub reasoning: String,
}

impl StrategyDecision {
    /// Name of the rule that applied, if any
    pub fn rule_name(&self) -> Option<&str> {
        match &self.source {
            DecisionSource::Rule(name) => Some(name),
            _ => None,
        }
    }
}
