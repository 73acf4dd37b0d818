//! Processing mode module

use serde::{Deserialize, Serialize};

/// How a document reaches the language model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    /// Text is extracted locally, then sent to the model
    Hybrid,

    /// The document itself is submitted to the model
    #[serde(alias = "complete_llm")]
    Complete,
}

impl ProcessingMode {
    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingMode::Hybrid => "hybrid",
            ProcessingMode::Complete => "complete",
        }
    }

    /// Parse a mode from a string, case-insensitively
    ///
    /// `complete_llm` is accepted as a legacy spelling of `complete`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hybrid" => Some(ProcessingMode::Hybrid),
            "complete" | "complete_llm" => Some(ProcessingMode::Complete),
            _ => None,
        }
    }

    /// Whether the mode submits raw document bytes
    pub fn submits_document(&self) -> bool {
        matches!(self, ProcessingMode::Complete)
    }
}

impl std::str::FromStr for ProcessingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid processing mode: {}", s))
    }
}

impl std::fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
