//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use duonova_domain::{AvailabilityMap, ProcessingOutcome, ProviderId};
use duonova_pipeline::{ConfigurationTest, StrategyExplanation};
use duonova_rules::{Preset, ProcessingConfig};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the outcome of one processed resume.
    pub fn format_outcome(&self, outcome: &ProcessingOutcome) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(outcome)?);
        }

        let result = &outcome.result;
        let record = &result.record;
        let person = record.personal_info.as_ref();
        let method = result.method.map(|m| m.as_str()).unwrap_or("-");
        let producer = result
            .provider
            .map(|p| p.to_string())
            .unwrap_or_else(|| "local".to_string());

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Correlation ID".to_string(), outcome.correlation_id.to_string()]);
        builder.push_record(["Mode".to_string(), outcome.decision.mode.to_string()]);
        builder.push_record(["Provider".to_string(), producer]);
        builder.push_record(["Method".to_string(), method.to_string()]);
        builder.push_record([
            "Name".to_string(),
            person.and_then(|p| p.name.clone()).unwrap_or_default(),
        ]);
        builder.push_record([
            "Email".to_string(),
            person.and_then(|p| p.email.clone()).unwrap_or_default(),
        ]);
        builder.push_record(["Experience".to_string(), record.experience.len().to_string()]);
        builder.push_record(["Education".to_string(), record.education.len().to_string()]);
        builder.push_record(["Projects".to_string(), record.projects.len().to_string()]);
        builder.push_record([
            "Confidence".to_string(),
            format!("{:.2}", outcome.validation.confidence.value()),
        ]);
        builder.push_record([
            "Quality".to_string(),
            outcome.validation.quality.as_str().to_string(),
        ]);

        let mut lines = vec![
            self.info(&outcome.decision.reasoning),
            Self::render(builder),
        ];

        if let Some(error) = &result.error {
            lines.push(self.error(&format!("Extraction failed: {}", error)));
        } else if outcome.validation.is_valid {
            lines.push(self.success("Resume extracted"));
        } else {
            lines.push(self.warning("Resume extracted with gaps"));
        }
        for missing in &outcome.validation.missing_fields {
            lines.push(self.warning(&format!("Missing: {}", missing)));
        }
        for error in &outcome.validation.errors {
            lines.push(self.warning(error));
        }
        for warning in &outcome.validation.warnings {
            lines.push(self.colorize(&format!("  {}", warning), "yellow"));
        }

        Ok(lines.join("\n"))
    }

    /// Format a strategy explanation.
    pub fn format_explanation(&self, explanation: &StrategyExplanation) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(explanation)?);
        }

        let file = &explanation.file;
        let mut file_table = Builder::default();
        file_table.push_record(["File", "Size (MB)", "Extension", "Complexity"]);
        file_table.push_record([
            file.name.clone(),
            format!("{:.2}", file.size_mb),
            file.extension.clone(),
            file.complexity.as_str().to_string(),
        ]);

        let decision = &explanation.decision;
        let mut decision_table = Builder::default();
        decision_table.push_record(["Field", "Value"]);
        decision_table.push_record(["Mode".to_string(), decision.mode.to_string()]);
        decision_table.push_record(["Provider".to_string(), decision.provider.to_string()]);
        decision_table.push_record(["Order".to_string(), join_providers(&decision.provider_order)]);
        decision_table.push_record([
            "Rule".to_string(),
            decision.rule_name().unwrap_or("-").to_string(),
        ]);
        if let Some(switch) = decision.cost_switch {
            decision_table.push_record([
                "Cost switch".to_string(),
                format!("{} -> {}", switch.from, switch.to),
            ]);
        }

        let mut sections = vec![
            self.colorize("File analysis", "cyan"),
            Self::render(file_table),
            self.colorize("Decision", "cyan"),
            Self::render(decision_table),
            self.info(&decision.reasoning),
        ];

        if let Some(rule) = &explanation.matched_rule {
            sections.push(self.colorize("Matched rule", "cyan"));
            sections.push(format!("  {}: {}", rule.name, rule.description));
        }

        if let Some(profile) = &explanation.provider {
            sections.push(self.colorize("Provider", "cyan"));
            sections.push(format!(
                "  {} ({} cost)",
                profile.name,
                profile.cost_tier.as_str()
            ));
            if !profile.strengths.is_empty() {
                sections.push(format!("  Strengths: {}", profile.strengths.join(", ")));
            }
            if !profile.best_for.is_empty() {
                sections.push(format!("  Best for: {}", profile.best_for.join(", ")));
            }
        }

        let config = &explanation.configuration;
        sections.push(self.colorize("Configuration", "cyan"));
        sections.push(format!(
            "  default mode {} ({}), priority {}, cost optimization {}, auto fallback {}",
            config.mode,
            config.mode_layer.as_str(),
            join_providers(&config.provider_priority),
            on_off(config.cost_optimization),
            on_off(config.auto_fallback),
        ));
        sections.push(format!(
            "  available: {}",
            join_providers(&explanation.available_providers)
        ));

        Ok(sections.join("\n"))
    }

    /// Format the resolved configuration.
    pub fn format_config(&self, config: &ProcessingConfig, availability: &AvailabilityMap) -> Result<String> {
        let resolved = config.resolve_defaults();

        if self.format == OutputFormat::Json {
            let value = serde_json::json!({
                "defaults": resolved,
                "call_timeout_secs": config.call_timeout_secs,
                "rules": config.rules,
                "providers": config.providers,
                "availability": availability,
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        let mut settings = Builder::default();
        settings.push_record(["Setting", "Value"]);
        settings.push_record([
            "Default mode".to_string(),
            format!("{} ({})", resolved.mode, resolved.mode_layer.as_str()),
        ]);
        settings.push_record([
            "Provider priority".to_string(),
            join_providers(&resolved.provider_priority),
        ]);
        settings.push_record([
            "Cost optimization".to_string(),
            on_off(resolved.cost_optimization).to_string(),
        ]);
        settings.push_record(["Auto fallback".to_string(), on_off(resolved.auto_fallback).to_string()]);
        settings.push_record([
            "Call timeout".to_string(),
            format!("{}s", config.call_timeout_secs),
        ]);

        let mut rules = Builder::default();
        rules.push_record(["#", "Rule", "Mode", "Providers", "Extensions", "Size", "Complexity"]);
        for (index, rule) in config.rules.iter().enumerate() {
            let conditions = &rule.conditions;
            rules.push_record([
                (index + 1).to_string(),
                rule.name.clone(),
                rule.mode.to_string(),
                join_providers(&rule.providers),
                conditions.extensions.join(", "),
                conditions.size.map(|s| s.to_string()).unwrap_or_default(),
                conditions
                    .complexity
                    .map(|c| c.as_str().to_string())
                    .unwrap_or_default(),
            ]);
        }

        let mut providers = Builder::default();
        providers.push_record(["Provider", "Name", "Cost", "File upload", "Text", "Available"]);
        for profile in &config.providers {
            let available = availability.get(&profile.id).copied().unwrap_or(false);
            providers.push_record([
                profile.id.to_string(),
                profile.name.clone(),
                profile.cost_tier.as_str().to_string(),
                yes_no(profile.capabilities.file_upload).to_string(),
                yes_no(profile.capabilities.text).to_string(),
                if available {
                    self.colorize("yes", "green")
                } else {
                    self.colorize("no", "red")
                },
            ]);
        }

        Ok([
            self.colorize("Settings", "cyan"),
            Self::render(settings),
            self.colorize("Rules (first match wins)", "cyan"),
            Self::render(rules),
            self.colorize("Providers", "cyan"),
            Self::render(providers),
        ]
        .join("\n"))
    }

    /// Format a configuration dry run.
    pub fn format_test(&self, test: &ConfigurationTest) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(test)?);
        }

        let mut builder = Builder::default();
        builder.push_record(["Sample", "Size (KB)", "Mode", "Provider", "Reasoning"]);
        for result in &test.results {
            builder.push_record([
                result.file_name.clone(),
                (result.size_bytes / 1024).to_string(),
                result.mode.map(|m| m.to_string()).unwrap_or_else(|| "-".into()),
                result
                    .provider
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "-".into()),
                result.reasoning.clone(),
            ]);
        }

        let failures = test.results.iter().filter(|r| !r.success).count();
        let summary = if failures == 0 {
            self.success(&format!("{} sample(s) resolved", test.results.len()))
        } else {
            self.error(&format!("{} sample(s) could not be resolved", failures))
        };

        Ok([
            Self::render(builder),
            self.info(&format!(
                "Available providers: {}",
                join_providers(&test.available_providers)
            )),
            summary,
        ]
        .join("\n"))
    }

    /// Format the preset catalogue.
    pub fn format_presets(&self) -> Result<String> {
        if self.format == OutputFormat::Json {
            let presets: Vec<serde_json::Value> = Preset::ALL
                .iter()
                .map(|preset| {
                    let values = preset.values();
                    serde_json::json!({
                        "name": preset.as_str(),
                        "default_mode": values.default_mode,
                        "provider_priority": values.provider_priority,
                        "cost_optimization": values.cost_optimization,
                        "auto_fallback": values.auto_fallback,
                    })
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&presets)?);
        }

        let mut builder = Builder::default();
        builder.push_record(["Preset", "Mode", "Priority", "Cost optimization", "Auto fallback"]);
        for preset in Preset::ALL {
            let values = preset.values();
            builder.push_record([
                preset.as_str().to_string(),
                values.default_mode.unwrap_or_default(),
                values.provider_priority.unwrap_or_default(),
                values.cost_optimization.unwrap_or_default(),
                values.auto_fallback.unwrap_or_default(),
            ]);
        }

        Ok(Self::render(builder))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn join_providers(providers: &[ProviderId]) -> String {
    if providers.is_empty() {
        return "none".to_string();
    }
    providers
        .iter()
        .map(ProviderId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
