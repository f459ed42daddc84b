//! Terminal output formatter

use sentichain_core::{BatchEntry, ChainOutput, FormattedSentiment, SentimentResult};

pub fn format_output(output: &ChainOutput) -> String {
    match output {
        ChainOutput::Single(formatted) => format_formatted(formatted) + "\n",
        ChainOutput::Batch(entries) => {
            let mut out = String::new();
            for (i, entry) in entries.iter().enumerate() {
                let body = match entry {
                    BatchEntry::Sentiment(formatted) => format_formatted(formatted),
                    BatchEntry::Error { error } => format!("error: {}", error),
                };
                out.push_str(&format!("[{}] {}\n", i + 1, indent_continuation(&body)));
            }
            out
        }
    }
}

pub fn format_sentiment(result: &SentimentResult) -> String {
    serde_json::to_string(result).unwrap_or_else(|_| "{}".to_string()) + "\n"
}

fn format_formatted(formatted: &FormattedSentiment) -> String {
    match formatted {
        FormattedSentiment::Text(text) => text.clone(),
        FormattedSentiment::Json(value) => value.to_string(),
    }
}

// Keeps multi-line text results aligned under their "[n] " prefix
fn indent_continuation(body: &str) -> String {
    body.replace('\n', "\n    ")
}
