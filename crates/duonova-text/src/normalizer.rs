//! Section-aware text normalization

use crate::StructuredDocument;
use regex::Regex;
use std::sync::LazyLock;

/// Section headings recognized in resumes, longest phrases first
pub const SECTION_HEADINGS: [&str; 22] = [
    "professional experience",
    "volunteer experience",
    "work experience",
    "employment history",
    "professional summary",
    "technical skills",
    "career objective",
    "experience",
    "employment",
    "education",
    "skills",
    "projects",
    "achievements",
    "accomplishments",
    "certifications",
    "awards",
    "publications",
    "languages",
    "interests",
    "summary",
    "objective",
    "profile",
];

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = SECTION_HEADINGS
        .iter()
        .map(|heading| heading.replace(' ', r"\s"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?P<word>{})\b(?P<colon>\s?:)?", alternatives))
        .expect("section heading pattern is valid")
});

/// Normalizes extracted document text
///
/// Steps, in order:
/// 1. canonical newlines, whitespace runs collapsed, lines trimmed
/// 2. hyphenated line breaks merged (`engi-` + `neer` → `engineer`)
/// 3. headings written in capitals or followed by a colon start a new line
/// 4. one blank line before every heading line; blank runs collapsed
///
/// The output is a fixed point: normalizing it again changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Create a normalizer
    pub fn new() -> Self {
        Self
    }

    /// Normalize plain text
    pub fn normalize(&self, text: &str) -> String {
        let canonical = text.replace("\r\n", "\n").replace('\r', "\n");

        let lines: Vec<String> = canonical.split('\n').map(collapse_whitespace).collect();
        let lines = merge_hyphenation(lines);
        let lines: Vec<String> = lines.iter().flat_map(|line| split_headings(line)).collect();

        assemble(lines)
    }

    /// Normalize a positioned document
    ///
    /// Lines are put in reading order, each link anchor is appended once to
    /// the nearest line on its page as ` (uri)`, then the text is normalized.
    pub fn normalize_document(&self, document: &StructuredDocument) -> String {
        let mut lines = document.reading_order();

        for anchor in &document.anchors {
            let uri = anchor.uri.trim();
            if uri.is_empty() {
                continue;
            }
            let owner = lines
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    let da = (a.page.abs_diff(anchor.page), (a.top - anchor.top).abs());
                    let db = (b.page.abs_diff(anchor.page), (b.top - anchor.top).abs());
                    da.0.cmp(&db.0).then(da.1.total_cmp(&db.1))
                })
                .map(|(index, _)| index);

            match owner {
                Some(index) if !lines[index].text.contains(uri) => {
                    lines[index].text.push_str(&format!(" ({})", uri));
                }
                Some(_) => {}
                None => lines.push(crate::LayoutLine::new(anchor.page, anchor.top, 0.0, uri)),
            }
        }

        let joined = lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.normalize(&joined)
    }

    /// Whether a normalized line opens a section
    pub fn is_heading_line(&self, line: &str) -> bool {
        is_heading_line(line)
    }
}

fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn ends_with_soft_hyphen(line: &str) -> bool {
    let mut chars = line.chars().rev();
    matches!(
        (chars.next(), chars.next()),
        (Some('-'), Some(c)) if c.is_alphabetic()
    )
}

fn starts_lowercase(line: &str) -> bool {
    line.chars().next().is_some_and(|c| c.is_lowercase())
}

fn merge_hyphenation(lines: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        if let Some(previous) = merged.last_mut() {
            if ends_with_soft_hyphen(previous) && starts_lowercase(&line) {
                previous.pop();
                previous.push_str(&line);
                continue;
            }
        }
        merged.push(line);
    }
    merged
}

fn qualifies(line: &str, word: regex::Match<'_>, has_colon: bool) -> bool {
    let text = &line[word.start()..word.end()];
    has_colon || !text.chars().any(|c| c.is_lowercase())
}

fn split_headings(line: &str) -> Vec<String> {
    let mut cuts = Vec::new();
    for caps in HEADING.captures_iter(line) {
        let Some(word) = caps.name("word") else { continue };
        if word.start() > 0 && qualifies(line, word, caps.name("colon").is_some()) {
            cuts.push(word.start());
        }
    }

    if cuts.is_empty() {
        return vec![line.to_string()];
    }

    let mut pieces = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts.into_iter().chain(std::iter::once(line.len())) {
        let piece = line[start..cut].trim();
        if !piece.is_empty() {
            pieces.push(piece.to_string());
        }
        start = cut;
    }
    pieces
}

fn is_heading_line(line: &str) -> bool {
    let Some(caps) = HEADING.captures(line) else {
        return false;
    };
    let Some(word) = caps.name("word") else {
        return false;
    };
    if word.start() != 0 {
        return false;
    }
    let whole = caps.get(0).map_or(false, |m| m.end() == line.len());
    whole || qualifies(line, word, caps.name("colon").is_some())
}

fn assemble(lines: Vec<String>) -> String {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        let previous_has_text = out.last().is_some_and(|last| !last.is_empty());
        if line.is_empty() {
            if previous_has_text {
                out.push(String::new());
            }
            continue;
        }
        if previous_has_text && is_heading_line(&line) {
            out.push(String::new());
        }
        out.push(line);
    }
    while out.last().is_some_and(|last| last.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Anchor, LayoutLine};
    use proptest::prelude::*;

    fn normalize(text: &str) -> String {
        TextNormalizer::new().normalize(text)
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(normalize("  Jane \t Doe  \r\n\r\n\r\n  Engineer "), "Jane Doe\n\nEngineer");
    }

    #[test]
    fn test_hyphenation_merged() {
        assert_eq!(normalize("manage-\nment of data-\nbases"), "management of databases");
    }

    #[test]
    fn test_real_hyphen_kept() {
        // Next line starts uppercase: not a broken word
        assert_eq!(normalize("Full-\nStack"), "Full-\nStack");
        // Number before the hyphen
        assert_eq!(normalize("2019-\npresent"), "2019-\npresent");
    }

    #[test]
    fn test_headings_case_insensitive() {
        let text = normalize("Jane Doe\nexperience\nAcme Corp\nEducation:\nMIT");
        assert_eq!(text, "Jane Doe\n\nexperience\nAcme Corp\n\nEducation:\nMIT");
    }

    #[test]
    fn test_inline_headings_split() {
        let text = normalize("Jane Doe jane@x.io SKILLS Rust, Go Work Experience: Acme");
        assert_eq!(text, "Jane Doe jane@x.io\n\nSKILLS Rust, Go\n\nWork Experience: Acme");
    }

    #[test]
    fn test_prose_mentions_not_split() {
        let input = "Five years of experience in education technology";
        assert_eq!(normalize(input), input);
    }

    #[test]
    fn test_heading_word_inside_longer_word_ignored() {
        assert_eq!(normalize("Experienced PROFILES team"), "Experienced PROFILES team");
    }

    #[test]
    fn test_anchor_attached_to_nearest_line() {
        let document = StructuredDocument {
            lines: vec![
                LayoutLine::new(0, 30.0, 0.0, "GitHub"),
                LayoutLine::new(0, 10.0, 0.0, "Jane Doe"),
                LayoutLine::new(1, 5.0, 0.0, "Portfolio"),
            ],
            anchors: vec![
                Anchor::new(0, 31.5, "https://github.com/jane"),
                Anchor::new(1, 4.0, "https://jane.dev"),
            ],
        };
        let text = TextNormalizer::new().normalize_document(&document);
        assert_eq!(
            text,
            "Jane Doe\nGitHub (https://github.com/jane)\nPortfolio (https://jane.dev)"
        );
    }

    #[test]
    fn test_anchor_not_duplicated() {
        let document = StructuredDocument {
            lines: vec![LayoutLine::new(0, 0.0, 0.0, "https://jane.dev")],
            anchors: vec![Anchor::new(0, 0.0, "https://jane.dev")],
        };
        assert_eq!(TextNormalizer::new().normalize_document(&document), "https://jane.dev");
    }

    #[test]
    fn test_anchor_without_lines_kept() {
        let document = StructuredDocument {
            lines: vec![],
            anchors: vec![Anchor::new(0, 0.0, "https://jane.dev")],
        };
        assert_eq!(TextNormalizer::new().normalize_document(&document), "https://jane.dev");
    }

    #[test]
    fn test_normalize_is_idempotent_on_sample() {
        let sample = "JANE DOE\nSUMMARY Backend engi-\nneer.  Skills: Rust\n\n\nEDUCATION\nMIT   2015";
        let once = normalize(sample);
        assert_eq!(normalize(&once), once);
    }

    proptest! {
        #[test]
        fn prop_normalize_idempotent(text in "[a-zA-Z :\\-\\n\\t]{0,200}") {
            let once = normalize(&text);
            let twice = normalize(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_normalize_idempotent_with_headings(
            words in proptest::collection::vec(
                prop_oneof![
                    Just("SKILLS".to_string()),
                    Just("education:".to_string()),
                    Just("Work Experience".to_string()),
                    Just("engi-".to_string()),
                    Just("\n".to_string()),
                    "[a-z]{1,6}",
                    "[A-Z][a-z]{1,6}",
                ],
                0..40,
            )
        ) {
            let text = words.join(" ");
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
