//! Prompt command

use crate::app::PromptArgs;
use anyhow::{Context, Result};
use sentichain_core::{Config, PromptTemplate};

pub fn run(args: PromptArgs, config: Config) -> Result<()> {
    let template = match args.prompt_file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read prompt file {}", path.display()))?,
        None => config.sentiment.prompt_template,
    };

    let prompt = PromptTemplate::new(template)?;
    println!("{}", prompt.format(&args.text));
    Ok(())
}
