//! SentiChain CLI
//!
//! Sentiment analysis from the command line over OpenAI-compatible LLM
//! services.

use anyhow::Result;
use clap::Parser;
use sentichain_core::error::exit_codes;
use sentichain_core::{Config, SentiChainError};

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<SentiChainError>()
            .map(SentiChainError::exit_code)
            .unwrap_or(exit_codes::GENERAL_ERROR);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load_from(&config_path)?;

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args, config, cli.format, cli.verbose).await,
        Commands::Extract(args) => commands::extract::run(args, config, cli.format),
        Commands::Prompt(args) => commands::prompt::run(args, config),
        Commands::Config(args) => commands::config::run(args, config, &config_path, cli.format),
    }
}
