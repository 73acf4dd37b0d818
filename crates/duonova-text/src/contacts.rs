//! Contact detail patterns

use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email pattern is valid")
});

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+\d{1,3}[\s.-]?)?(?:\(\d{2,4}\)[\s.-]?)?\d{3,4}[\s.-]?\d{3,4}(?:[\s.-]?\d{2,4})?")
        .expect("phone pattern is valid")
});

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s<>()"']+"#).expect("url pattern is valid")
});

static PROFILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://)?(?:www\.)?(?:linkedin\.com/in|github\.com)/[A-Za-z0-9_-]+")
        .expect("profile pattern is valid")
});

fn unique(matches: impl Iterator<Item = String>) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for item in matches {
        if !found.contains(&item) {
            found.push(item);
        }
    }
    found
}

/// Email addresses in order of first appearance, without duplicates
pub fn detect_emails(text: &str) -> Vec<String> {
    unique(EMAIL.find_iter(text).map(|m| m.as_str().to_string()))
}

/// Phone-number-like digit groups (at least 7 digits)
pub fn detect_phone_numbers(text: &str) -> Vec<String> {
    unique(
        PHONE
            .find_iter(text)
            .map(|m| m.as_str().trim().to_string())
            .filter(|candidate| candidate.chars().filter(char::is_ascii_digit).count() >= 7),
    )
}

/// Absolute http(s) URLs, trailing punctuation removed
pub fn detect_urls(text: &str) -> Vec<String> {
    unique(
        URL.find_iter(text)
            .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ':']).to_string()),
    )
}

/// LinkedIn and GitHub profile links, with or without a scheme
pub fn detect_profile_links(text: &str) -> Vec<String> {
    unique(PROFILE.find_iter(text).map(|m| m.as_str().to_string()))
}
