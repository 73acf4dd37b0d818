//! Result validation logic

use crate::ValidatorConfig;
use duonova_domain::{
    Confidence, ExtractionResult, PersonalInfo, QualityTier, SkillSet, ValidationReport,
};
use tracing::debug;

/// Validates extraction results and assigns the final verdict
#[derive(Debug, Clone)]
pub struct ResultValidator {
    config: ValidatorConfig,
}

impl ResultValidator {
    /// Create a validator with the given configuration
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Create a validator with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidatorConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate one extraction result
    pub fn validate(&self, result: &ExtractionResult) -> ValidationReport {
        // Error markers carry nothing to score
        if let Some(error) = &result.error {
            return ValidationReport {
                is_valid: false,
                missing_fields: Vec::new(),
                errors: vec![error.message.clone()],
                warnings: Vec::new(),
                confidence: Confidence::ZERO,
                quality: QualityTier::Low,
            };
        }

        let record = &result.record;
        let mut missing_fields = Vec::new();
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        // 1. Required sections
        if record.personal_info.as_ref().map_or(true, PersonalInfo::is_empty) {
            missing_fields.push("personal_info".to_string());
        }
        if record.skills.as_ref().map_or(true, SkillSet::is_empty) {
            missing_fields.push("skills".to_string());
        }
        if record.experience.is_empty() {
            missing_fields.push("experience".to_string());
        }
        if record.education.is_empty() {
            missing_fields.push("education".to_string());
        }

        // 2. Personal info needs a name and an email; an empty section is
        // already counted as missing
        if let Some(info) = record.personal_info.as_ref().filter(|info| !info.is_empty()) {
            if !info.has_name() {
                errors.push("Missing name in personal_info".to_string());
            }
            if !info.has_email() {
                errors.push("Missing email in personal_info".to_string());
            }
        }

        // 3. Experience entries
        for (index, entry) in record.experience.iter().enumerate() {
            check_identity(
                "experience",
                index,
                ("company", entry.has_company()),
                ("position", entry.has_position()),
                &mut errors,
                &mut warnings,
            );
        }

        // 4. Education entries
        for (index, entry) in record.education.iter().enumerate() {
            check_identity(
                "education",
                index,
                ("institution", entry.has_institution()),
                ("degree", entry.has_degree()),
                &mut errors,
                &mut warnings,
            );
        }

        // 5. Skill structure
        match &record.skills {
            Some(SkillSet::Flat(list)) if !list.is_empty() => {
                errors.push("Skills must be grouped by category, found a flat list".to_string());
            }
            Some(skills @ SkillSet::Categorized(map)) if !map.is_empty() => {
                if skills.recognized_count() == 0 {
                    warnings.push("No skills found in any recognized category".to_string());
                }
            }
            _ => {}
        }

        // 6. Confidence and verdict
        let confidence = self.score(
            missing_fields.len(),
            errors.len(),
            warnings.len(),
            result.confidence,
        );
        let quality = QualityTier::classify_with(
            confidence,
            self.config.high_threshold,
            self.config.medium_threshold,
        );
        let is_valid = missing_fields.is_empty() && errors.is_empty();

        debug!(
            "Validated result: {} missing, {} errors, {} warnings, confidence {}",
            missing_fields.len(),
            errors.len(),
            warnings.len(),
            confidence
        );

        ValidationReport {
            is_valid,
            missing_fields,
            errors,
            warnings,
            confidence,
            quality,
        }
    }

    /// Penalty score, never below the provider's own confidence
    pub fn score(
        &self,
        missing: usize,
        errors: usize,
        warnings: usize,
        reported: Confidence,
    ) -> Confidence {
        let points = 100.0
            - self.config.missing_field_penalty * missing as f64
            - self.config.error_penalty * errors as f64
            - self.config.warning_penalty * warnings as f64;
        Confidence::new(points / 100.0).max(reported)
    }
}

impl Default for ResultValidator {
    fn default() -> Self {
        Self::default_config()
    }
}

fn check_identity(
    section: &str,
    index: usize,
    first: (&str, bool),
    second: (&str, bool),
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    let position = index + 1;
    match (first.1, second.1) {
        (false, false) => errors.push(format!(
            "Missing {}/{} in {} {}",
            first.0, second.0, section, position
        )),
        (false, true) => warnings.push(format!("Missing {} in {} {}", first.0, section, position)),
        (true, false) => warnings.push(format!("Missing {} in {} {}", second.0, section, position)),
        (true, true) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duonova_domain::{
        EducationEntry, ExperienceEntry, ExtractionError, ProviderId, ResumeRecord,
    };
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn complete_record() -> ResumeRecord {
        let mut skills = BTreeMap::new();
        skills.insert("programming_languages".to_string(), vec!["Rust".to_string()]);
        ResumeRecord {
            personal_info: Some(PersonalInfo {
                name: Some("Jane Doe".to_string()),
                email: Some("jane@x.io".to_string()),
                ..PersonalInfo::default()
            }),
            skills: Some(SkillSet::Categorized(skills)),
            experience: vec![ExperienceEntry {
                company: Some("Acme".to_string()),
                position: Some("Engineer".to_string()),
                ..ExperienceEntry::default()
            }],
            education: vec![EducationEntry {
                institution: Some("MIT".to_string()),
                degree: Some("BSc".to_string()),
                ..EducationEntry::default()
            }],
            ..ResumeRecord::default()
        }
    }

    fn validate(record: ResumeRecord, reported: f64) -> ValidationReport {
        ResultValidator::default_config().validate(&ExtractionResult::new(record, reported))
    }

    #[test]
    fn test_complete_record_is_valid() {
        let report = validate(complete_record(), 0.5);
        assert!(report.is_valid);
        assert!(report.missing_fields.is_empty());
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(report.confidence.value(), 1.0);
        assert_eq!(report.quality, QualityTier::High);
    }

    #[test]
    fn test_missing_email_is_error() {
        let mut record = complete_record();
        record.personal_info.as_mut().unwrap().email = Some("  ".to_string());

        let report = validate(record, 0.95);
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["Missing email in personal_info"]);
        // Provider confidence is kept when higher than the penalty score
        assert_eq!(report.confidence.value(), 0.95);
    }

    #[test]
    fn test_missing_sections_penalized() {
        let report = validate(ResumeRecord::default(), 0.0);
        assert_eq!(
            report.missing_fields,
            vec!["personal_info", "skills", "experience", "education"]
        );
        assert!((report.confidence.value() - 0.4).abs() < 1e-9);
        assert_eq!(report.quality, QualityTier::Low);
    }

    #[test]
    fn test_empty_personal_info_scores_like_absent() {
        let mut present = complete_record();
        present.personal_info = Some(PersonalInfo::default());
        let mut absent = complete_record();
        absent.personal_info = None;

        let present = validate(present, 0.0);
        let absent = validate(absent, 0.0);
        assert_eq!(present.missing_fields, vec!["personal_info"]);
        assert!(present.errors.is_empty());
        assert_eq!(present, absent);
        assert!((present.confidence.value() - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_entry_identity_checks() {
        let mut record = complete_record();
        record.experience.push(ExperienceEntry::default());
        record.education.push(EducationEntry {
            degree: Some("MSc".to_string()),
            ..EducationEntry::default()
        });

        let report = validate(record, 0.0);
        assert_eq!(report.errors, vec!["Missing company/position in experience 2"]);
        assert_eq!(report.warnings, vec!["Missing institution in education 2"]);
        assert!(!report.is_valid);
        // 100 - 10 - 5
        assert!((report.confidence.value() - 0.85).abs() < 1e-9);
        assert_eq!(report.quality, QualityTier::High);
    }

    #[test]
    fn test_flat_skills_is_error() {
        let mut record = complete_record();
        record.skills = Some(SkillSet::Flat(vec!["Rust".to_string()]));
        let report = validate(record, 0.0);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("flat list"));
    }

    #[test]
    fn test_unrecognized_skill_categories_warn() {
        let mut record = complete_record();
        let mut skills = BTreeMap::new();
        skills.insert("hobbies".to_string(), vec!["chess".to_string()]);
        record.skills = Some(SkillSet::Categorized(skills));

        let report = validate(record, 0.0);
        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 1);
        assert!((report.confidence.value() - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_error_marked_result() {
        let error = ExtractionError::new("All providers failed").with_provider(ProviderId::Groq);
        let report = ResultValidator::default_config().validate(&ExtractionResult::failure(error));
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["All providers failed"]);
        assert_eq!(report.confidence, Confidence::ZERO);
        assert_eq!(report.quality, QualityTier::Low);
    }

    #[test]
    fn test_quality_thresholds_are_exclusive() {
        let validator = ResultValidator::default_config();
        // Two missing sections and one error: exactly 0.6
        let confidence = validator.score(2, 1, 0, Confidence::ZERO);
        assert!((confidence.value() - 0.6).abs() < 1e-9);
        assert_eq!(QualityTier::classify(Confidence::new(0.6)), QualityTier::Low);
        assert_eq!(QualityTier::classify(Confidence::new(0.8)), QualityTier::Medium);
    }

    #[test]
    fn test_strict_preset_scores_lower() {
        let strict = ResultValidator::new(ValidatorConfig::strict());
        let default = ResultValidator::default_config();
        assert!(strict.score(1, 1, 1, Confidence::ZERO) < default.score(1, 1, 1, Confidence::ZERO));
    }

    proptest! {
        #[test]
        fn prop_confidence_in_bounds(
            missing in 0usize..50,
            errors in 0usize..50,
            warnings in 0usize..50,
            reported in -2.0f64..3.0,
        ) {
            let validator = ResultValidator::default_config();
            let confidence = validator.score(missing, errors, warnings, Confidence::new(reported));
            prop_assert!((0.0..=1.0).contains(&confidence.value()));
            prop_assert!(confidence >= Confidence::new(reported));
        }
    }
}
