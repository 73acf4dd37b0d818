//! Built-in rule table and provider profiles

use duonova_domain::{
    Capabilities, Complexity, CostTier, ProcessingMode, ProcessingRule, ProviderId,
    ProviderProfile, RuleConditions, SizeCondition,
};

/// Mode used when nothing else decides
pub const DEFAULT_MODE: ProcessingMode = ProcessingMode::Hybrid;

/// Provider order used when nothing else decides
pub const DEFAULT_PROVIDER_PRIORITY: [ProviderId; 3] =
    [ProviderId::Groq, ProviderId::OpenAi, ProviderId::Anthropic];

fn rule(
    name: &str,
    description: &str,
    mode: ProcessingMode,
    providers: &[ProviderId],
    conditions: RuleConditions,
) -> ProcessingRule {
    ProcessingRule {
        name: name.to_string(),
        description: description.to_string(),
        mode,
        providers: providers.to_vec(),
        conditions,
    }
}

/// The default rule table, in evaluation order
pub fn builtin_rules() -> Vec<ProcessingRule> {
    use ProviderId::{Anthropic, Groq, OpenAi};

    vec![
        rule(
            "large_files",
            "Large files (>5MB) benefit from direct document processing",
            ProcessingMode::Complete,
            &[OpenAi, Anthropic],
            RuleConditions {
                size: Some(SizeCondition::greater_than(5.0)),
                ..Default::default()
            },
        ),
        rule(
            "pdf_files",
            "PDF layouts are preserved best by direct document processing",
            ProcessingMode::Complete,
            &[OpenAi, Anthropic],
            RuleConditions {
                extensions: vec![".pdf".to_string()],
                ..Default::default()
            },
        ),
        rule(
            "docx_files",
            "DOCX text extracts cleanly; hybrid processing is cheaper",
            ProcessingMode::Hybrid,
            &[Groq, OpenAi],
            RuleConditions {
                extensions: vec![".docx".to_string()],
                ..Default::default()
            },
        ),
        rule(
            "small_text_files",
            "Small plain-text files only need fast text processing",
            ProcessingMode::Hybrid,
            &[Groq],
            RuleConditions {
                extensions: vec![".txt".to_string()],
                size: Some(SizeCondition::less_than(1.0)),
                ..Default::default()
            },
        ),
        rule(
            "complex_resumes",
            "Complex resumes need comprehensive analysis",
            ProcessingMode::Complete,
            &[OpenAi, Anthropic],
            RuleConditions {
                complexity: Some(Complexity::High),
                ..Default::default()
            },
        ),
    ]
}

fn tags(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The default provider profiles, in declaration order
pub fn builtin_profiles() -> Vec<ProviderProfile> {
    vec![
        ProviderProfile {
            id: ProviderId::Groq,
            name: "Groq".to_string(),
            cost_tier: CostTier::Free,
            capabilities: Capabilities::text_only(),
            strengths: tags(&["speed", "cost_effective", "text_processing"]),
            best_for: tags(&["simple_resumes", "text_extraction", "bulk_processing"]),
        },
        ProviderProfile {
            id: ProviderId::OpenAi,
            name: "OpenAI GPT-4".to_string(),
            cost_tier: CostTier::Premium,
            capabilities: Capabilities::file_and_text(),
            strengths: tags(&["file_upload", "comprehensive_analysis", "accuracy"]),
            best_for: tags(&["complex_resumes", "pdf_files", "detailed_extraction"]),
        },
        ProviderProfile {
            id: ProviderId::Anthropic,
            name: "Claude".to_string(),
            cost_tier: CostTier::Premium,
            capabilities: Capabilities::file_and_text(),
            strengths: tags(&["large_context", "detailed_analysis", "file_upload"]),
            best_for: tags(&["long_documents", "complex_analysis"]),
        },
    ]
}
