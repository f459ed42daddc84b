//! SentiChain Core Library
//!
//! Sentiment analysis as a prompt-and-parse chain over an external
//! language model.
//!
//! # Features
//! - Prompt templates with a `{question}` slot
//! - Regex extraction of `Sentiment: <label> (Score: <score>)` replies
//! - Label remapping, JSON or text output, ordered batch runs
//! - OpenAI-compatible HTTP client with response caching
//! - Pluggable run tracking

pub mod callbacks;
pub mod chain;
pub mod config;
pub mod error;
pub mod llm;

pub use callbacks::{NoopTracker, RecordingTracker, RunEvent, RunTracker, TextStyle, TracingTracker};
pub use chain::{
    find_sentiment, BatchEntry, Chain, ChainInputs, ChainOutput, FormattedSentiment, LlmChain,
    OutputFormat, PromptTemplate, SentimentChain, SentimentChainOptions, SentimentExtractor,
    SentimentResult, DEFAULT_SENTIMENT_PROMPT,
};
pub use config::{ChainConfig, Config, LLMServiceConfig};
pub use error::{Error, Result, SentiChainError};
pub use llm::{
    ChatMessage, ChatModel, LLMClient, LanguageModel, MetricsSnapshot, ScriptedModel, VLLMClient,
};

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "sentichain";
