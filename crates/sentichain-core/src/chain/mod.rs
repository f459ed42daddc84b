//! Chains
//!
//! A chain maps a keyed input record to an output by prompting a language
//! model and post-processing what comes back.

mod extract;
mod llm_chain;
mod prompt;
mod sentiment;

pub use extract::{find_sentiment, SentimentExtractor, SentimentMatch, SentimentResult};
pub use llm_chain::LlmChain;
pub use prompt::{PromptTemplate, DEFAULT_SENTIMENT_PROMPT, QUESTION_SLOT};
pub use sentiment::{
    BatchEntry, ChainOutput, FormattedSentiment, OutputFormat, SentimentChain,
    SentimentChainOptions,
};

use crate::error::Result;
use async_trait::async_trait;

/// Keyed chain input
pub type ChainInputs = serde_json::Map<String, serde_json::Value>;

/// Common surface of runnable chains
#[async_trait]
pub trait Chain: Send + Sync {
    /// Keys the chain reads from its input
    fn input_keys(&self) -> Vec<String>;

    /// Keys the chain writes to its output
    fn output_keys(&self) -> Vec<String>;

    /// Stable identifier of the chain kind
    fn chain_type(&self) -> &'static str;

    /// Run the chain
    async fn call(&self, inputs: &ChainInputs) -> Result<ChainOutput>;
}
