//! Explain command implementation.

use crate::cli::ExplainArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use duonova_domain::FileMetadata;
use duonova_pipeline::Pipeline;
use std::fs;

/// Execute the explain command.
pub fn execute_explain(args: ExplainArgs, pipeline: &Pipeline, formatter: &Formatter) -> Result<()> {
    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::InvalidInput(format!("Not a file: {}", args.file.display())))?;

    // The file only has to exist when no size is given
    let size = match args.size {
        Some(size) => size,
        None => fs::metadata(&args.file)?.len(),
    };

    let explanation = pipeline.explain(&FileMetadata::new(file_name, size), args.mode.map(Into::into))?;
    println!("{}", formatter.format_explanation(&explanation)?);

    Ok(())
}
