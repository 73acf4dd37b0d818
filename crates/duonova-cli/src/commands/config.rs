//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::Result;
use crate::output::Formatter;
use duonova_pipeline::Pipeline;

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, pipeline: &Pipeline, formatter: &Formatter) -> Result<()> {
    let output = match args.action {
        ConfigAction::Show => {
            let snapshot = pipeline.store().snapshot();
            formatter.format_config(&snapshot, &pipeline.availability())?
        }
        ConfigAction::Test => formatter.format_test(&pipeline.test_configuration())?,
        ConfigAction::Presets => formatter.format_presets()?,
    };
    println!("{}", output);

    Ok(())
}
