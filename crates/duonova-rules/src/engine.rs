//! Ordered rule evaluation

use duonova_domain::{FileMetadata, ProcessingRule};
use tracing::debug;

/// Evaluates file metadata against an ordered rule table
///
/// The first rule whose conditions all hold wins. Later rules are never
/// consulted once a match is found, so declaration order breaks ties.
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine<'a> {
    rules: &'a [ProcessingRule],
}

impl<'a> RuleEngine<'a> {
    /// Create an engine over a rule table
    pub fn new(rules: &'a [ProcessingRule]) -> Self {
        Self { rules }
    }

    /// Find the first rule matching a file name and size
    pub fn evaluate(&self, file_name: &str, size_bytes: u64) -> Option<&'a ProcessingRule> {
        self.evaluate_file(&FileMetadata::new(file_name, size_bytes))
    }

    /// Find the first rule matching file metadata
    pub fn evaluate_file(&self, file: &FileMetadata) -> Option<&'a ProcessingRule> {
        let matched = self.rules.iter().find(|rule| rule.matches(file));
        debug!(
            "Rule evaluation for '{}' ({} bytes, ext '{}'): {}",
            file.file_name,
            file.size_bytes,
            file.extension(),
            matched.map_or("no match", |rule| rule.name.as_str())
        );
        matched
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &'a [ProcessingRule] {
        self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin_rules;
    use duonova_domain::{ProcessingMode, ProviderId, RuleConditions};

    fn named(name: &str, ext: &str) -> ProcessingRule {
        ProcessingRule {
            name: name.to_string(),
            description: String::new(),
            mode: ProcessingMode::Hybrid,
            providers: vec![ProviderId::Groq],
            conditions: RuleConditions {
                extensions: vec![ext.to_string()],
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_earlier_rule_wins() {
        let rules = vec![named("first", ".pdf"), named("second", ".pdf")];
        let engine = RuleEngine::new(&rules);
        assert_eq!(engine.evaluate("cv.pdf", 10).unwrap().name, "first");

        let reversed = vec![named("second", ".pdf"), named("first", ".pdf")];
        let engine = RuleEngine::new(&reversed);
        assert_eq!(engine.evaluate("cv.pdf", 10).unwrap().name, "second");
    }

    #[test]
    fn test_no_match_returns_none() {
        let rules = builtin_rules();
        let engine = RuleEngine::new(&rules);
        assert!(engine.evaluate("resume.rtf", 100_000).is_none());
    }

    #[test]
    fn test_builtin_table() {
        let rules = builtin_rules();
        let engine = RuleEngine::new(&rules);

        assert_eq!(engine.evaluate("resume.pdf", 6_000_000).unwrap().name, "large_files");
        assert_eq!(engine.evaluate("resume.PDF", 200_000).unwrap().name, "pdf_files");
        assert_eq!(engine.evaluate("resume.docx", 200_000).unwrap().name, "docx_files");
        assert_eq!(engine.evaluate("notes.txt", 50_000).unwrap().name, "small_text_files");
        // 1.5 MB text file fails the "<1" size condition
        assert!(engine.evaluate("notes.txt", 1_572_864).is_none());
    }

    #[test]
    fn test_threshold_boundary_does_not_match() {
        let rules = builtin_rules();
        let engine = RuleEngine::new(&rules);

        // Exactly 5 MB is not "> 5": falls through to the extension rule
        let exactly_five = 5 * 1024 * 1024;
        assert_eq!(engine.evaluate("cv.pdf", exactly_five).unwrap().name, "pdf_files");
        // Exactly 1 MB is not "< 1"
        assert!(engine.evaluate("notes.txt", 1024 * 1024).is_none());
    }
}
