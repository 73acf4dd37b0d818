//! Configuration errors

use thiserror::Error;

/// Errors raised while loading or replacing configuration
///
/// Invalid layered values (modes, priorities, flags) never produce these;
/// they are logged and replaced by defaults during resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize config TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Structurally invalid configuration
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
