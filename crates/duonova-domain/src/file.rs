//! Uploaded file metadata

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bytes per megabyte used by size conditions
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Document formats the pipeline accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Portable Document Format
    Pdf,

    /// Office Open XML word document
    Docx,
}

impl FileType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Docx => "docx",
        }
    }

    /// MIME type sent to providers alongside file bytes
    pub fn mime_type(&self) -> &'static str {
        match self {
            FileType::Pdf => "application/pdf",
            FileType::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// Parse a type name or extension (with or without the dot)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Some(FileType::Pdf),
            "docx" => Some(FileType::Docx),
            _ => None,
        }
    }

    /// Infer the type from a file name
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::parse(&normalize_extension(name))
    }
}

impl std::str::FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unsupported file type: {}", s))
    }
}

/// Coarse processing-difficulty estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    /// Small, simple documents
    Low,

    /// Mid-sized documents or PDFs
    Medium,

    /// Very large documents
    High,
}

impl Complexity {
    /// Get the complexity name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }

    /// Parse a complexity tag
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Complexity::Low),
            "medium" => Some(Complexity::Medium),
            "high" => Some(Complexity::High),
            _ => None,
        }
    }

    /// Estimate from size and normalized extension
    ///
    /// High above 5 MB; medium above 2 MB or for any PDF; low otherwise.
    pub fn estimate(size_mb: f64, extension: &str) -> Self {
        if size_mb > 5.0 {
            Complexity::High
        } else if size_mb > 2.0 || extension == ".pdf" {
            Complexity::Medium
        } else {
            Complexity::Low
        }
    }
}

/// Name and size of an uploaded document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Original file name
    pub file_name: String,

    /// Size in bytes
    pub size_bytes: u64,
}

impl FileMetadata {
    /// Create file metadata
    pub fn new(file_name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            size_bytes,
        }
    }

    /// Lowercased, dot-prefixed extension (empty when the name has none)
    pub fn extension(&self) -> String {
        normalize_extension(&self.file_name)
    }

    /// Size in megabytes (`bytes / 1024²`)
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / BYTES_PER_MB
    }

    /// Estimated complexity of the document
    pub fn complexity(&self) -> Complexity {
        Complexity::estimate(self.size_mb(), &self.extension())
    }
}

/// Lowercase and dot-prefix the extension of a file name
pub fn normalize_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_normalized() {
        assert_eq!(FileMetadata::new("Resume.PDF", 1).extension(), ".pdf");
        assert_eq!(FileMetadata::new("cv.final.docx", 1).extension(), ".docx");
        assert_eq!(FileMetadata::new("README", 1).extension(), "");
    }

    #[test]
    fn test_size_mb() {
        let file = FileMetadata::new("a.pdf", 5 * 1024 * 1024);
        assert_eq!(file.size_mb(), 5.0);
    }

    #[test]
    fn test_complexity_estimate() {
        assert_eq!(FileMetadata::new("a.pdf", 6_000_000).complexity(), Complexity::High);
        assert_eq!(FileMetadata::new("a.docx", 3_000_000).complexity(), Complexity::Medium);
        assert_eq!(FileMetadata::new("a.pdf", 10_000).complexity(), Complexity::Medium);
        assert_eq!(FileMetadata::new("a.txt", 10_000).complexity(), Complexity::Low);
    }

    #[test]
    fn test_file_type_from_name() {
        assert_eq!(FileType::from_file_name("x.PDF"), Some(FileType::Pdf));
        assert_eq!(FileType::from_file_name("x.docx"), Some(FileType::Docx));
        assert_eq!(FileType::from_file_name("x.txt"), None);
        assert_eq!(FileType::Pdf.mime_type(), "application/pdf");
    }
}
