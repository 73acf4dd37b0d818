//! Command implementations.

pub mod config;
pub mod explain;
pub mod process;

pub use self::config::execute_config;
pub use self::explain::execute_explain;
pub use self::process::execute_process;

use crate::config::Config;
use crate::error::{CliError, Result};
use duonova_llm::{Credentials, ProviderRegistry};
use duonova_pipeline::Pipeline;
use duonova_rules::{ConfigStore, Preset};
use duonova_validator::ResultValidator;
use std::sync::Arc;
use tracing::info;

/// Build a pipeline from the loaded configuration and process environment.
pub fn build_pipeline(config: &Config, preset: Option<&str>) -> Result<Pipeline> {
    let credentials = Credentials::from_env();
    let registry = ProviderRegistry::from_credentials(&credentials, &config.llm)?;

    let store = Arc::new(ConfigStore::new(config.processing_with_env()));
    if let Some(name) = preset {
        let preset: Preset = name.parse().map_err(CliError::InvalidInput)?;
        info!("Applying preset {}", preset.as_str());
        store.apply_preset(preset);
    }

    Ok(Pipeline::new(store, registry, credentials)
        .with_validator(ResultValidator::new(config.validation.clone())))
}
