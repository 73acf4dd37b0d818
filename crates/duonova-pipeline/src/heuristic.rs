//! Keyword and pattern extraction used when every provider has failed

use duonova_domain::{ExtractionMethod, ExtractionResult, PersonalInfo, ResumeRecord, SkillSet};
use duonova_text::{
    detect_emails, detect_phone_numbers, detect_profile_links, detect_urls, TextNormalizer,
    SECTION_HEADINGS,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Confidence reported for heuristic results
pub const HEURISTIC_CONFIDENCE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Summary,
    Skills,
    Certifications,
    Achievements,
    Languages,
    Other,
}

impl Section {
    fn from_heading(heading: &str) -> Self {
        match heading {
            "professional summary" | "summary" | "profile" | "objective" | "career objective" => {
                Section::Summary
            }
            "technical skills" | "skills" => Section::Skills,
            "certifications" => Section::Certifications,
            "achievements" | "accomplishments" | "awards" => Section::Achievements,
            "languages" => Section::Languages,
            _ => Section::Other,
        }
    }
}

/// Builds a partial record from plain text without any provider
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicExtractor {
    normalizer: TextNormalizer,
}

impl HeuristicExtractor {
    /// Create an extractor
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract what the text reveals through headings and contact patterns
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let text = self.normalizer.normalize(text);
        let mut header: Vec<&str> = Vec::new();
        let mut sections: Vec<(Section, Vec<String>)> = Vec::new();

        for line in text.lines().filter(|line| !line.trim().is_empty()) {
            if let Some((section, rest)) = self.heading(line) {
                let mut body = Vec::new();
                if !rest.is_empty() {
                    body.push(rest.to_string());
                }
                sections.push((section, body));
            } else if let Some((_, body)) = sections.last_mut() {
                body.push(line.to_string());
            } else {
                header.push(line);
            }
        }

        let mut record = ResumeRecord {
            personal_info: personal_info(&text, &header),
            ..ResumeRecord::default()
        };
        let mut skills: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (section, body) in sections {
            match section {
                Section::Summary if record.professional_summary.is_none() && !body.is_empty() => {
                    record.professional_summary = Some(body.join(" "));
                }
                Section::Skills => {
                    skills
                        .entry("technical_skills".to_string())
                        .or_default()
                        .extend(body.iter().flat_map(|line| split_items(line)));
                }
                Section::Certifications => {
                    skills
                        .entry("certifications".to_string())
                        .or_default()
                        .extend(body.iter().map(|line| strip_bullet(line)));
                }
                Section::Achievements => {
                    record
                        .achievements
                        .extend(body.iter().map(|line| strip_bullet(line)));
                }
                Section::Languages => {
                    record.languages.extend(
                        body.iter()
                            .flat_map(|line| split_items(line))
                            .map(serde_json::Value::String),
                    );
                }
                _ => {}
            }
        }

        skills.retain(|_, items| !items.is_empty());
        if !skills.is_empty() {
            record.skills = Some(SkillSet::Categorized(skills));
        }

        debug!(
            "Heuristic extraction found {} sections",
            ResumeRecord::SECTIONS.len() - missing_sections(&record)
        );

        ExtractionResult::new(record, HEURISTIC_CONFIDENCE)
            .with_provenance(None, ExtractionMethod::Heuristic)
    }

    fn heading<'a>(&self, line: &'a str) -> Option<(Section, &'a str)> {
        if !self.normalizer.is_heading_line(line) {
            return None;
        }
        let lower = line.to_ascii_lowercase();
        let heading = SECTION_HEADINGS
            .iter()
            .find(|heading| lower.starts_with(*heading))?;
        let rest = line
            .get(heading.len()..)
            .unwrap_or_default()
            .trim_start()
            .trim_start_matches(':')
            .trim();
        Some((Section::from_heading(heading), rest))
    }
}

fn personal_info(text: &str, header: &[&str]) -> Option<PersonalInfo> {
    let header_text = header.join("\n");
    let mut info = PersonalInfo {
        name: header.iter().find(|line| looks_like_name(line)).map(|s| s.to_string()),
        email: detect_emails(text).into_iter().next(),
        phone: detect_phone_numbers(&header_text).into_iter().next(),
        ..PersonalInfo::default()
    };

    for link in detect_profile_links(text) {
        let lower = link.to_lowercase();
        if lower.contains("linkedin.com") && info.linkedin.is_none() {
            info.linkedin = Some(link);
        } else if lower.contains("github.com") && info.github.is_none() {
            info.github = Some(link);
        }
    }

    for url in detect_urls(text) {
        let lower = url.to_lowercase();
        if lower.contains("linkedin.com") || lower.contains("github.com") {
            continue;
        }
        if info.portfolio.is_none() {
            info.portfolio = Some(url);
        } else {
            info.other_links.push(url);
        }
    }

    (!info.is_empty()).then_some(info)
}

/// Two to five words of letters, no contact details
fn looks_like_name(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    (2..=5).contains(&words.len())
        && words.iter().all(|word| {
            word.chars()
                .all(|c| c.is_alphabetic() || c == '.' || c == '-' || c == '\'')
        })
}

fn strip_bullet(line: &str) -> String {
    line.trim_start_matches(['-', '*', '•', '·'])
        .trim()
        .to_string()
}

fn split_items(line: &str) -> Vec<String> {
    line.split([',', '|', ';', '•'])
        .map(strip_bullet)
        .filter(|item| !item.is_empty())
        .collect()
}

fn missing_sections(record: &ResumeRecord) -> usize {
    [
        record.personal_info.is_none(),
        record.professional_summary.is_none(),
        record.skills.is_none(),
        record.experience.is_empty(),
        record.education.is_empty(),
        record.projects.is_empty(),
        record.achievements.is_empty(),
        record.languages.is_empty(),
    ]
    .into_iter()
    .filter(|missing| *missing)
    .count()
}
