//! DuoNova CLI - Resume extraction from the command line.

use clap::Parser;
use duonova_cli::commands;
use duonova_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> duonova_cli::Result<()> {
    // Provider keys and layer settings may live in .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let pipeline = commands::build_pipeline(&config, cli.preset.as_deref())?;

    match cli.command {
        Command::Process(args) => commands::execute_process(args, pipeline, &formatter).await?,
        Command::Explain(args) => commands::execute_explain(args, &pipeline, &formatter)?,
        Command::Config(args) => commands::execute_config(args, &pipeline, &formatter)?,
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
