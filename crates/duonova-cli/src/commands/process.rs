//! Process command implementation.

use crate::cli::ProcessArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::sink::JsonDirSink;
use duonova_domain::{ProviderSelection, RequestId, ResultSink};
use duonova_pipeline::{CancelFlag, Pipeline, ProcessingRequest};
use duonova_text::detect_file_type;
use std::fmt::Display;
use tracing::{info, warn};

/// Execute the process command.
pub async fn execute_process(args: ProcessArgs, pipeline: Pipeline, formatter: &Formatter) -> Result<()> {
    let request = build_request(&args).await?;

    match &args.output_dir {
        Some(dir) => {
            let sink = JsonDirSink::create(dir)?;
            info!("Writing outcomes to {}", sink.dir().display());
            run(&pipeline.with_sink(sink), request, formatter).await
        }
        None => run(&pipeline, request, formatter).await,
    }
}

/// Read the document and turn the arguments into a request.
pub async fn build_request(args: &ProcessArgs) -> Result<ProcessingRequest> {
    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::InvalidInput(format!("Not a file: {}", args.file.display())))?;
    let file_type = detect_file_type(&file_name)?;

    let provider = ProviderSelection::parse(&args.provider).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "Unknown provider '{}' (expected auto, openai, groq or anthropic)",
            args.provider
        ))
    })?;

    let bytes = tokio::fs::read(&args.file).await?;
    let mut request = ProcessingRequest::from_bytes(file_name, file_type, bytes).with_provider(provider);

    if let Some(path) = &args.text {
        request = request.with_text(tokio::fs::read_to_string(path).await?);
    }
    if let Some(mode) = args.mode {
        request = request.with_mode(mode.into());
    }
    if let Some(id) = &args.correlation_id {
        let id: RequestId = id.parse().map_err(CliError::InvalidInput)?;
        request = request.with_correlation_id(id);
    }

    Ok(request)
}

async fn run<K>(pipeline: &Pipeline<K>, request: ProcessingRequest, formatter: &Formatter) -> Result<()>
where
    K: ResultSink,
    K::Error: Display,
{
    let cancel = CancelFlag::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, stopping after the current attempt");
                cancel.cancel();
            }
        })
    };

    let outcome = pipeline.process_with_cancel(request, &cancel).await;
    watcher.abort();

    println!("{}", formatter.format_outcome(&outcome?)?);
    Ok(())
}
