//! JSON output formatter

use sentichain_core::{ChainOutput, SentimentResult};

pub fn format_output(output: &ChainOutput) -> String {
    serde_json::to_string_pretty(output).unwrap_or_else(|_| "null".to_string()) + "\n"
}

pub fn format_sentiment(result: &SentimentResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string()) + "\n"
}
