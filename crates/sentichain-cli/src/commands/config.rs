//! Config command

use crate::app::{ConfigAction, ConfigArgs, OutputFormat};
use anyhow::{bail, Result};
use sentichain_core::Config;
use std::path::Path;

pub fn run(args: ConfigArgs, config: Config, path: &Path, format: OutputFormat) -> Result<()> {
    match args.action {
        ConfigAction::Show => run_show(config, format),
        ConfigAction::Init { force } => run_init(path, force),
    }
}

fn run_show(mut config: Config, format: OutputFormat) -> Result<()> {
    if config.llm_service.api_key.is_some() {
        config.llm_service.api_key = Some("***".to_string());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Cli => print!("{}", serde_yaml::to_string(&config)?),
    }
    Ok(())
}

fn run_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save_to(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
