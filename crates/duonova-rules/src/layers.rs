//! Layered defaults: override > environment > built-in
//!
//! Layers hold raw strings exactly as an administrator or the process
//! environment supplied them. Parsing happens only during resolution, where an
//! invalid value is logged and replaced by the built-in default.

use crate::defaults::DEFAULT_PROVIDER_PRIORITY as DEFAULT_PRIORITY;
use crate::ProcessingConfig;
use duonova_domain::{ProcessingMode, ProviderId};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable selecting the processing mode
pub const ENV_DEFAULT_MODE: &str = "DEFAULT_PROCESSING_MODE";

/// Environment variable holding a comma-separated provider priority
pub const ENV_PROVIDER_PRIORITY: &str = "PROVIDER_PRIORITY";

/// Environment variable toggling cost optimization
pub const ENV_COST_OPTIMIZATION: &str = "ENABLE_COST_OPTIMIZATION";

/// Environment variable toggling automatic fallback
pub const ENV_AUTO_FALLBACK: &str = "ENABLE_AUTO_FALLBACK";

/// Which layer supplied a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Administrative override
    Override,

    /// Process environment
    Environment,

    /// Built-in or file-configured default
    Default,
}

impl Layer {
    /// Get the layer name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Override => "override",
            Layer::Environment => "environment",
            Layer::Default => "default",
        }
    }
}

/// Raw, unparsed settings for one layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerValues {
    /// Processing mode (`hybrid` / `complete`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_mode: Option<String>,

    /// Comma-separated provider keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_priority: Option<String>,

    /// `true` / `false`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_optimization: Option<String>,

    /// `true` / `false`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_fallback: Option<String>,
}

impl LayerValues {
    /// Read the environment layer from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a layer from explicit key/value pairs (environment variable names)
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let pairs: Vec<(&str, &str)> = pairs.into_iter().collect();
        Self::from_lookup(|key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            default_mode: lookup(ENV_DEFAULT_MODE),
            provider_priority: lookup(ENV_PROVIDER_PRIORITY),
            cost_optimization: lookup(ENV_COST_OPTIMIZATION),
            auto_fallback: lookup(ENV_AUTO_FALLBACK),
        }
    }

    /// True when no value is set
    pub fn is_empty(&self) -> bool {
        self.default_mode.is_none()
            && self.provider_priority.is_none()
            && self.cost_optimization.is_none()
            && self.auto_fallback.is_none()
    }
}

/// Named configuration bundles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Fast hybrid processing, Groq first
    Speed,

    /// Complete processing with premium providers first
    Accuracy,

    /// Cheapest providers first
    Cost,

    /// Development: Groq and OpenAI only
    Dev,

    /// Production: complete processing with full fallback
    Prod,
}

impl Preset {
    /// Every preset
    pub const ALL: [Preset; 5] = [
        Preset::Speed,
        Preset::Accuracy,
        Preset::Cost,
        Preset::Dev,
        Preset::Prod,
    ];

    /// Get the preset name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Speed => "speed",
            Preset::Accuracy => "accuracy",
            Preset::Cost => "cost",
            Preset::Dev => "dev",
            Preset::Prod => "prod",
        }
    }

    /// Parse a preset name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Layer values this preset applies
    pub fn values(&self) -> LayerValues {
        let (mode, priority, cost) = match self {
            Preset::Speed => ("hybrid", "groq,openai,anthropic", "true"),
            Preset::Accuracy => ("complete", "openai,anthropic,groq", "false"),
            Preset::Cost => ("hybrid", "groq,openai,anthropic", "true"),
            Preset::Dev => ("hybrid", "groq,openai", "true"),
            Preset::Prod => ("complete", "openai,anthropic,groq", "false"),
        };
        LayerValues {
            default_mode: Some(mode.to_string()),
            provider_priority: Some(priority.to_string()),
            cost_optimization: Some(cost.to_string()),
            auto_fallback: Some("true".to_string()),
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown preset: {}", s))
    }
}

/// Fully resolved defaults for one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDefaults {
    /// Mode to use when no rule applies
    pub mode: ProcessingMode,

    /// Provider order, never empty
    pub provider_priority: Vec<ProviderId>,

    /// Prefer cheaper providers when capable
    pub cost_optimization: bool,

    /// Fall back across providers
    pub auto_fallback: bool,

    /// Set when an override or environment layer configured the mode
    pub explicit_mode: Option<ProcessingMode>,

    /// Layer that supplied the mode
    pub mode_layer: Layer,
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_priority(s: &str) -> Option<Vec<ProviderId>> {
    ProviderId::parse_list(s).ok().filter(|list| !list.is_empty())
}

impl ProcessingConfig {
    /// Resolve mode, provider priority and feature flags across layers
    ///
    /// The highest layer that sets a value wins. If that value does not parse,
    /// a warning is logged and the built-in default is used instead. This
    /// never fails.
    pub fn resolve_defaults(&self) -> ResolvedDefaults {
        let defaults = &self.defaults;
        let layers = [(Layer::Override, &self.overrides), (Layer::Environment, &self.environment)];

        let (mode, mode_layer) = resolve(
            "default_mode",
            &layers,
            |values| values.default_mode.as_deref(),
            ProcessingMode::parse,
            defaults.mode,
        );

        let fallback_priority = if defaults.provider_priority.is_empty() {
            DEFAULT_PRIORITY.to_vec()
        } else {
            defaults.provider_priority.clone()
        };
        let (provider_priority, _) = resolve(
            "provider_priority",
            &layers,
            |values| values.provider_priority.as_deref(),
            parse_priority,
            fallback_priority,
        );

        let (cost_optimization, _) = resolve(
            "cost_optimization",
            &layers,
            |values| values.cost_optimization.as_deref(),
            parse_bool,
            defaults.cost_optimization,
        );

        let (auto_fallback, _) = resolve(
            "auto_fallback",
            &layers,
            |values| values.auto_fallback.as_deref(),
            parse_bool,
            defaults.auto_fallback,
        );

        let explicit_mode = match mode_layer {
            Layer::Override | Layer::Environment => Some(mode),
            Layer::Default => None,
        };

        ResolvedDefaults {
            mode,
            provider_priority,
            cost_optimization,
            auto_fallback,
            explicit_mode,
            mode_layer,
        }
    }
}

fn resolve<T>(
    key: &str,
    layers: &[(Layer, &LayerValues)],
    pick: impl Fn(&LayerValues) -> Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
    default: T,
) -> (T, Layer) {
    for (layer, values) in layers {
        if let Some(raw) = pick(values) {
            return match parse(raw) {
                Some(value) => (value, *layer),
                None => {
                    warn!(
                        "Invalid {} value '{}' in {} layer, using default",
                        key,
                        raw,
                        layer.as_str()
                    );
                    (default, *layer)
                }
            };
        }
    }
    (default, Layer::Default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(overrides: LayerValues, environment: LayerValues) -> ProcessingConfig {
        ProcessingConfig {
            overrides,
            environment,
            ..Default::default()
        }
    }

    #[test]
    fn test_builtin_defaults() {
        let resolved = ProcessingConfig::default().resolve_defaults();
        assert_eq!(resolved.mode, ProcessingMode::Hybrid);
        assert_eq!(resolved.provider_priority, DEFAULT_PRIORITY.to_vec());
        assert!(resolved.cost_optimization);
        assert!(resolved.auto_fallback);
        assert_eq!(resolved.explicit_mode, None);
        assert_eq!(resolved.mode_layer, Layer::Default);
    }

    #[test]
    fn test_override_beats_environment() {
        let env = LayerValues::from_pairs([
            (ENV_DEFAULT_MODE, "hybrid"),
            (ENV_PROVIDER_PRIORITY, "groq"),
        ]);
        let overrides = LayerValues {
            default_mode: Some("complete".into()),
            ..Default::default()
        };
        let resolved = config_with(overrides, env).resolve_defaults();
        assert_eq!(resolved.mode, ProcessingMode::Complete);
        assert_eq!(resolved.mode_layer, Layer::Override);
        assert_eq!(resolved.explicit_mode, Some(ProcessingMode::Complete));
        // Priority not overridden: environment applies
        assert_eq!(resolved.provider_priority, vec![ProviderId::Groq]);
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let env = LayerValues::from_pairs([
            (ENV_DEFAULT_MODE, "turbo"),
            (ENV_PROVIDER_PRIORITY, "groq,mistral"),
            (ENV_COST_OPTIMIZATION, "maybe"),
        ]);
        let resolved = config_with(LayerValues::default(), env).resolve_defaults();
        assert_eq!(resolved.mode, ProcessingMode::Hybrid);
        assert_eq!(resolved.provider_priority, DEFAULT_PRIORITY.to_vec());
        assert!(resolved.cost_optimization);
        // An invalid mode still counts as explicitly configured
        assert_eq!(resolved.explicit_mode, Some(ProcessingMode::Hybrid));
    }

    #[test]
    fn test_empty_priority_is_replaced() {
        let env = LayerValues::from_pairs([(ENV_PROVIDER_PRIORITY, " , auto ,")]);
        let resolved = config_with(LayerValues::default(), env).resolve_defaults();
        assert_eq!(resolved.provider_priority, DEFAULT_PRIORITY.to_vec());
    }

    #[test]
    fn test_bool_flags() {
        let env = LayerValues::from_pairs([
            (ENV_COST_OPTIMIZATION, "FALSE"),
            (ENV_AUTO_FALLBACK, "0"),
        ]);
        let resolved = config_with(LayerValues::default(), env).resolve_defaults();
        assert!(!resolved.cost_optimization);
        assert!(!resolved.auto_fallback);
    }

    #[test]
    fn test_presets() {
        assert_eq!(Preset::parse("Accuracy"), Some(Preset::Accuracy));
        assert_eq!(Preset::parse("ludicrous"), None);

        let resolved = config_with(Preset::Dev.values(), LayerValues::default()).resolve_defaults();
        assert_eq!(resolved.provider_priority, vec![ProviderId::Groq, ProviderId::OpenAi]);

        let resolved =
            config_with(Preset::Prod.values(), LayerValues::default()).resolve_defaults();
        assert_eq!(resolved.mode, ProcessingMode::Complete);
        assert!(!resolved.cost_optimization);
    }
}
