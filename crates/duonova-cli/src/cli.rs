//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use duonova_domain::ProcessingMode;
use std::path::PathBuf;

/// DuoNova - Resume extraction with rule-driven LLM provider selection.
#[derive(Debug, Parser)]
#[command(name = "duonova")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DUONOVA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Apply a named preset (speed, accuracy, cost, dev, prod)
    #[arg(long, global = true)]
    pub preset: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract a structured record from a resume
    Process(ProcessArgs),

    /// Show which strategy a resume would get, without calling any provider
    Explain(ExplainArgs),

    /// Inspect the processing configuration
    Config(ConfigArgs),
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Resume file (.pdf or .docx)
    pub file: PathBuf,

    /// Force a processing mode, bypassing the rules
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Provider to use: auto, openai, groq or anthropic
    #[arg(short, long, default_value = "auto")]
    pub provider: String,

    /// Text already extracted from the document
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// Correlation id to attach to the outcome
    #[arg(long)]
    pub correlation_id: Option<String>,

    /// Write each outcome as JSON into this directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for the explain command.
#[derive(Debug, Parser)]
pub struct ExplainArgs {
    /// Resume file name or path
    pub file: PathBuf,

    /// File size in bytes (read from the file when omitted)
    #[arg(short, long)]
    pub size: Option<u64>,

    /// Force a processing mode, bypassing the rules
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,
}

/// Arguments for configuration inspection.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show resolved settings, rules and providers
    Show,

    /// Dry-run the configuration against sample files
    Test,

    /// List the available presets
    Presets,
}

/// Processing mode argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ModeArg {
    /// Extract text locally, send text to the provider
    Hybrid,
    /// Send the document itself to the provider
    Complete,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl From<ModeArg> for ProcessingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Hybrid => ProcessingMode::Hybrid,
            ModeArg::Complete => ProcessingMode::Complete,
        }
    }
}
