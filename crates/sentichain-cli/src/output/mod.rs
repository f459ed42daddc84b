//! Output formatters

pub mod json;
pub mod terminal;

use crate::app::OutputFormat;
use sentichain_core::{ChainOutput, SentimentResult};

/// Format a chain run
pub fn format_chain_output(output: &ChainOutput, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_output(output),
        OutputFormat::Cli => terminal::format_output(output),
    }
}

/// Format a bare extraction result
pub fn format_sentiment(result: &SentimentResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_sentiment(result),
        OutputFormat::Cli => terminal::format_sentiment(result),
    }
}
