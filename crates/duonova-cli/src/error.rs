//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rule table or processing configuration error
    #[error(transparent)]
    Rules(#[from] duonova_rules::ConfigError),

    /// Provider setup error
    #[error("Provider error: {0}")]
    Llm(#[from] duonova_llm::LlmError),

    /// Local document reading error
    #[error(transparent)]
    Text(#[from] duonova_text::TextError),

    /// Processing error
    #[error(transparent)]
    Pipeline(#[from] duonova_pipeline::PipelineError),

    /// Strategy selection error
    #[error(transparent)]
    Selection(#[from] duonova_pipeline::SelectionError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
