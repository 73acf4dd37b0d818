//! Processing rules
//!
//! A rule maps file metadata to a suggested mode and provider order. Rules are
//! held in an ordered collection and the first match wins, so declaration
//! order is part of a rule table's meaning.

use crate::file::normalize_extension;
use crate::{Complexity, FileMetadata, ProcessingMode, ProviderId};
use serde::{Deserialize, Serialize};

/// Comparison used by a size condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeOperator {
    /// Strictly greater than
    #[serde(rename = ">")]
    GreaterThan,

    /// Strictly less than
    #[serde(rename = "<")]
    LessThan,
}

/// Size threshold in megabytes with a strict comparison
///
/// Written as `">5"` or `"<1"` in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SizeCondition {
    /// Comparison operator
    pub operator: SizeOperator,

    /// Threshold in megabytes
    pub megabytes: f64,
}

impl SizeCondition {
    /// Size strictly above `megabytes`
    pub fn greater_than(megabytes: f64) -> Self {
        Self { operator: SizeOperator::GreaterThan, megabytes }
    }

    /// Size strictly below `megabytes`
    pub fn less_than(megabytes: f64) -> Self {
        Self { operator: SizeOperator::LessThan, megabytes }
    }

    /// Check a size against the threshold (open interval)
    pub fn holds(&self, size_mb: f64) -> bool {
        match self.operator {
            SizeOperator::GreaterThan => size_mb > self.megabytes,
            SizeOperator::LessThan => size_mb < self.megabytes,
        }
    }

    /// Parse `">5"`, `"< 1.5"` and similar
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (operator, rest) = if let Some(rest) = s.strip_prefix('>') {
            (SizeOperator::GreaterThan, rest)
        } else if let Some(rest) = s.strip_prefix('<') {
            (SizeOperator::LessThan, rest)
        } else {
            return None;
        };
        let megabytes: f64 = rest.trim().parse().ok()?;
        if !megabytes.is_finite() {
            return None;
        }
        Some(Self { operator, megabytes })
    }
}

impl TryFrom<String> for SizeCondition {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s).ok_or_else(|| format!("Invalid size condition: {}", s))
    }
}

impl From<SizeCondition> for String {
    fn from(condition: SizeCondition) -> Self {
        condition.to_string()
    }
}

impl std::fmt::Display for SizeCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self.operator {
            SizeOperator::GreaterThan => ">",
            SizeOperator::LessThan => "<",
        };
        write!(f, "{}{}", op, self.megabytes)
    }
}

/// Conditions that must all hold for a rule to match
///
/// An empty condition set matches every file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleConditions {
    /// Allowed extensions (any spelling; compared normalized)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,

    /// Size threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeCondition>,

    /// Required estimated complexity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Complexity>,
}

impl RuleConditions {
    /// Check every condition against a file
    pub fn matches(&self, file: &FileMetadata) -> bool {
        let extension = file.extension();

        if !self.extensions.is_empty()
            && !self
                .extensions
                .iter()
                .any(|allowed| normalize_rule_extension(allowed) == extension)
        {
            return false;
        }

        if let Some(size) = &self.size {
            if !size.holds(file.size_mb()) {
                return false;
            }
        }

        if let Some(complexity) = self.complexity {
            if file.complexity() != complexity {
                return false;
            }
        }

        true
    }
}

fn normalize_rule_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.starts_with('.') {
        ext.to_lowercase()
    } else {
        normalize_extension(&format!("file.{}", ext))
    }
}

/// A named condition-to-strategy mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingRule {
    /// Rule name, cited in decision reasoning
    pub name: String,

    /// Why the rule exists
    #[serde(default)]
    pub description: String,

    /// Mode to use when the rule matches
    pub mode: ProcessingMode,

    /// Preferred providers, best first
    pub providers: Vec<ProviderId>,

    /// Conditions that must all hold
    #[serde(default)]
    pub conditions: RuleConditions,
}

impl ProcessingRule {
    /// Check whether this rule applies to a file
    pub fn matches(&self, file: &FileMetadata) -> bool {
        self.conditions.matches(file)
    }
}
