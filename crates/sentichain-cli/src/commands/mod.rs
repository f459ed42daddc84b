//! CLI command handlers

pub mod analyze;
pub mod config;
pub mod extract;
pub mod prompt;

use crate::app::ChainOverrides;
use anyhow::{Context, Result};
use sentichain_core::ChainConfig;

/// Apply per-invocation flags on top of the configured chain settings
pub fn apply_overrides(config: &mut ChainConfig, overrides: &ChainOverrides) -> Result<()> {
    if let Some(ref format) = overrides.output_format {
        config.output_format = format.clone();
    }
    if overrides.no_score {
        config.include_score = false;
    }
    for (from, to) in &overrides.label_map {
        config.label_mapping.insert(from.clone(), to.clone());
    }
    if let Some(ref path) = overrides.prompt_file {
        config.prompt_template = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompt file {}", path.display()))?;
    }
    Ok(())
}
