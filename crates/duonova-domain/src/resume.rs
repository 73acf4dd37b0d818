//! Structured resume records
//!
//! Every section is optional. Providers return partial data routinely and the
//! validator, not deserialization, decides what counts as complete. JSON
//! `null` is accepted wherever a list is expected, text fields take numbers,
//! and list fields take a comma-separated string or a list of objects.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Skill categories recognized when scoring completeness
pub const SKILL_CATEGORIES: [&str; 7] = [
    "technical_skills",
    "soft_skills",
    "programming_languages",
    "frameworks",
    "tools",
    "databases",
    "certifications",
];

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Text for any scalar; lists joined with ", ", objects by their values
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.into_iter().filter_map(value_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Object(map) => {
            let parts: Vec<String> = map.into_iter().filter_map(|(_, v)| value_text(v)).collect();
            (!parts.is_empty()).then(|| parts.join(" - "))
        }
    }
}

fn value_list(value: Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(items) => items.into_iter().filter_map(value_text).collect(),
        other => value_text(other).into_iter().collect(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(Value::deserialize(deserializer)?))
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_list(Value::deserialize(deserializer)?))
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Contact and identity details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    /// Full name
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Primary email address
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Postal address or city
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// LinkedIn profile URL
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,

    /// GitHub profile URL
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,

    /// Personal site
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,

    /// Any further links
    #[serde(deserialize_with = "lenient_strings", skip_serializing_if = "Vec::is_empty")]
    pub other_links: Vec<String>,
}

impl PersonalInfo {
    /// Name present and non-blank
    pub fn has_name(&self) -> bool {
        !is_blank(&self.name)
    }

    /// Email present and non-blank
    pub fn has_email(&self) -> bool {
        !is_blank(&self.email)
    }

    /// No field carries a value
    pub fn is_empty(&self) -> bool {
        is_blank(&self.name)
            && is_blank(&self.email)
            && is_blank(&self.phone)
            && is_blank(&self.address)
            && is_blank(&self.linkedin)
            && is_blank(&self.github)
            && is_blank(&self.portfolio)
            && self.other_links.is_empty()
    }
}

/// Skills, ideally grouped by category
///
/// Objects deserialize as categories and anything else as a flat list.
/// Category values go through the same coercion as other list fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SkillSet {
    /// Category name to skill list
    Categorized(BTreeMap<String, Vec<String>>),

    /// A bare list with no categories
    Flat(Vec<String>),
}

impl<'de> Deserialize<'de> for SkillSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Object(map) => SkillSet::Categorized(
                map.into_iter()
                    .map(|(category, skills)| (category, value_list(skills)))
                    .collect(),
            ),
            other => SkillSet::Flat(value_list(other)),
        })
    }
}

impl SkillSet {
    /// No categories, or an empty flat list
    pub fn is_empty(&self) -> bool {
        match self {
            SkillSet::Categorized(map) => map.is_empty(),
            SkillSet::Flat(list) => list.is_empty(),
        }
    }

    /// Number of non-blank skills across the recognized categories
    pub fn recognized_count(&self) -> usize {
        match self {
            SkillSet::Categorized(map) => SKILL_CATEGORIES
                .iter()
                .filter_map(|category| map.get(*category))
                .flatten()
                .filter(|skill| !skill.trim().is_empty())
                .count(),
            SkillSet::Flat(_) => 0,
        }
    }
}

/// One position held
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    /// Employer
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Job title
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    /// Location
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Start date as written
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// End date as written
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    /// Duration as written
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    /// Free-form description
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Notable results
    #[serde(deserialize_with = "lenient_strings", skip_serializing_if = "Vec::is_empty")]
    pub achievements: Vec<String>,

    /// Technologies used
    #[serde(deserialize_with = "lenient_strings", skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<String>,

    /// Duties
    #[serde(deserialize_with = "lenient_strings", skip_serializing_if = "Vec::is_empty")]
    pub responsibilities: Vec<String>,
}

impl ExperienceEntry {
    /// Company present and non-blank
    pub fn has_company(&self) -> bool {
        !is_blank(&self.company)
    }

    /// Position present and non-blank
    pub fn has_position(&self) -> bool {
        !is_blank(&self.position)
    }
}

/// One course of study
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    /// School or university
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,

    /// Degree or qualification
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,

    /// Location
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Graduation date as written
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub graduation_date: Option<String>,

    /// Grade average; providers send strings or numbers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<Value>,

    /// Courses listed
    #[serde(deserialize_with = "lenient_strings", skip_serializing_if = "Vec::is_empty")]
    pub relevant_coursework: Vec<String>,

    /// Honors and distinctions
    #[serde(deserialize_with = "lenient_strings", skip_serializing_if = "Vec::is_empty")]
    pub honors: Vec<String>,

    /// Thesis title
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub thesis: Option<String>,
}

impl EducationEntry {
    /// Institution present and non-blank
    pub fn has_institution(&self) -> bool {
        !is_blank(&self.institution)
    }

    /// Degree present and non-blank
    pub fn has_degree(&self) -> bool {
        !is_blank(&self.degree)
    }
}

/// A project the candidate worked on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    /// Project name
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// What it was
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Technologies used
    #[serde(deserialize_with = "lenient_strings", skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<String>,

    /// Link
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Duration as written
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    /// Candidate's role
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Results
    #[serde(deserialize_with = "lenient_strings", skip_serializing_if = "Vec::is_empty")]
    pub outcomes: Vec<String>,
}

/// Structured resume content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeRecord {
    /// Identity and contact details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,

    /// Summary paragraph
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub professional_summary: Option<String>,

    /// Skills
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<SkillSet>,

    /// Work history
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub experience: Vec<ExperienceEntry>,

    /// Education history
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<EducationEntry>,

    /// Projects
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<ProjectEntry>,

    /// Standalone achievements
    #[serde(deserialize_with = "lenient_strings", skip_serializing_if = "Vec::is_empty")]
    pub achievements: Vec<String>,

    /// Spoken languages, kept as the provider sent them
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<Value>,

    /// Sections outside the known schema
    #[serde(flatten)]
    pub additional: BTreeMap<String, Value>,
}

impl ResumeRecord {
    /// Top-level keys this record type understands
    pub const SECTIONS: [&'static str; 8] = [
        "personal_info",
        "professional_summary",
        "skills",
        "experience",
        "education",
        "projects",
        "achievements",
        "languages",
    ];

    /// True when no known section carries data
    pub fn is_empty(&self) -> bool {
        self.personal_info.as_ref().map_or(true, PersonalInfo::is_empty)
            && is_blank(&self.professional_summary)
            && self.skills.as_ref().map_or(true, SkillSet::is_empty)
            && self.experience.is_empty()
            && self.education.is_empty()
            && self.projects.is_empty()
            && self.achievements.is_empty()
            && self.languages.is_empty()
    }

    /// Fill a missing email address, leaving an existing one untouched
    ///
    /// Returns true when the record changed.
    pub fn backfill_email(&mut self, email: &str) -> bool {
        let info = self.personal_info.get_or_insert_with(PersonalInfo::default);
        if info.has_email() {
            return false;
        }
        info.email = Some(email.to_string());
        true
    }
}
