//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use duonova_llm::LlmConfig;
use duonova_rules::{LayerValues, ProcessingConfig};
use duonova_validator::ValidatorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
///
/// Every table is optional; missing tables fall back to built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Display settings
    #[serde(default)]
    pub settings: Settings,

    /// Rule table, provider profiles and defaults
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Provider endpoints and request settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Validation penalties and thresholds
    #[serde(default)]
    pub validation: ValidatorConfig,
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".duonova").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. The default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.processing
            .validate()
            .map_err(|e| CliError::Config(format!("processing: {}", e)))?;
        self.validation
            .validate()
            .map_err(|e| CliError::Config(format!("validation: {}", e)))?;
        Ok(())
    }

    /// Processing configuration with the environment layer attached.
    pub fn processing_with_env(&self) -> ProcessingConfig {
        self.processing.clone().with_environment(LayerValues::from_env())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use duonova_domain::ProcessingMode;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.processing.rules.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[settings]
format = "json"

[processing.defaults]
mode = "complete"

[llm]
temperature = 0.0

[validation]
missing_field_penalty = 20.0
error_penalty = 10.0
warning_penalty = 5.0
high_threshold = 0.8
medium_threshold = 0.6
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert_eq!(config.processing.defaults.mode, ProcessingMode::Complete);
        assert_eq!(config.processing.rules.len(), 5);
        assert_eq!(config.llm.temperature, 0.0);
        assert_eq!(config.validation.missing_field_penalty, 20.0);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_invalid_rule_table_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[processing.rules]]
name = "nothing"
mode = "hybrid"
providers = []
"#
        )
        .unwrap();

        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(CliError::Config(message)) if message.starts_with("processing")));
    }
}
