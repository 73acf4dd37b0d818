//! Error types for local text extraction

use thiserror::Error;

/// Errors that can occur while reading a document locally
#[derive(Error, Debug)]
pub enum TextError {
    /// File extension is not a supported document type
    #[error("Unsupported document type: {0}")]
    UnsupportedType(String),

    /// PDF could not be read
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    /// DOCX could not be read
    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    /// Document parsed but contained no text
    #[error("Document contains no extractable text")]
    Empty,
}
