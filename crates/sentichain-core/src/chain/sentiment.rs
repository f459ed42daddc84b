//! Sentiment analysis chain

use super::{Chain, ChainInputs, LlmChain, PromptTemplate, SentimentExtractor, SentimentResult};
use crate::callbacks::{NoopTracker, RunTracker, TextStyle};
use crate::config::ChainConfig;
use crate::error::{Result, SentiChainError};
use crate::llm::LanguageModel;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Placeholder for a missing label or score in text output
const MISSING: &str = "N/A";

/// Result shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = SentiChainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => Err(SentiChainError::Config(format!(
                "Unsupported output format: {}",
                s
            ))),
        }
    }
}

/// One analyzed text, shaped per `OutputFormat`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormattedSentiment {
    /// `{output_key: {sentiment_label, sentiment_score}}`
    Json(Value),
    /// `Sentiment Label: ..\nSentiment Score: ..`
    Text(String),
}

/// One element of a batch run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Sentiment(FormattedSentiment),
    Error { error: String },
}

impl BatchEntry {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Output of a chain run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChainOutput {
    Single(FormattedSentiment),
    Batch(Vec<BatchEntry>),
}

/// Overrides accepted by `SentimentChain::from_llm`
#[derive(Debug, Clone)]
pub struct SentimentChainOptions {
    pub custom_prompt_template: Option<String>,
    pub include_score: bool,
    pub output_format: String,
    pub label_mapping: HashMap<String, String>,
    pub batch_processing: bool,
}

impl Default for SentimentChainOptions {
    fn default() -> Self {
        let defaults = ChainConfig::default();
        Self {
            custom_prompt_template: None,
            include_score: defaults.include_score,
            output_format: defaults.output_format,
            label_mapping: defaults.label_mapping,
            batch_processing: defaults.batch_processing,
        }
    }
}

/// Prompts a model for each text and parses a sentiment label and score
/// out of the reply.
///
/// ```no_run
/// use sentichain_core::{ChatModel, SentimentChain, SentimentChainOptions};
/// use std::sync::Arc;
///
/// # async fn demo() -> sentichain_core::Result<()> {
/// let model = Arc::new(ChatModel::from_env()?);
/// let chain = SentimentChain::from_llm(model, SentimentChainOptions::default())?;
/// let result = chain.analyze("The update fixed every crash I had.").await?;
/// println!("{:?}", result);
/// # Ok(())
/// # }
/// ```
pub struct SentimentChain {
    llm_chain: LlmChain,
    config: Arc<ChainConfig>,
    extractor: SentimentExtractor,
    tracker: Arc<dyn RunTracker>,
}

impl SentimentChain {
    /// Create from a prompt/model pairing.
    ///
    /// The pairing's prompt is authoritative; `config.prompt_template` is
    /// overwritten with it.
    pub fn new(llm_chain: LlmChain, mut config: ChainConfig) -> Result<Self> {
        if config.max_concurrency == 0 {
            return Err(SentiChainError::Config(
                "max_concurrency must be at least 1".to_string(),
            ));
        }
        config.prompt_template = llm_chain.prompt().template().to_string();

        let extractor = SentimentExtractor::new(config.label_mapping.clone(), config.include_score);

        Ok(Self {
            llm_chain,
            config: Arc::new(config),
            extractor,
            tracker: Arc::new(NoopTracker),
        })
    }

    /// Build a chain around `llm` with the given overrides
    pub fn from_llm(llm: Arc<dyn LanguageModel>, options: SentimentChainOptions) -> Result<Self> {
        let prompt = match options.custom_prompt_template {
            Some(template) => PromptTemplate::new(template)?,
            None => PromptTemplate::default(),
        };

        let config = ChainConfig {
            include_score: options.include_score,
            output_format: options.output_format,
            label_mapping: options.label_mapping,
            batch_processing: options.batch_processing,
            ..ChainConfig::default()
        };

        Self::new(LlmChain::new(llm, prompt), config)
    }

    /// Build a chain from a bare model and `config.prompt_template`.
    #[deprecated(note = "construct an `LlmChain` and call `SentimentChain::new`, or use `SentimentChain::from_llm`")]
    pub fn from_bare_llm(llm: Arc<dyn LanguageModel>, config: ChainConfig) -> Result<Self> {
        tracing::warn!(
            "Building a SentimentChain from a bare model is deprecated; \
             pass an LlmChain or use SentimentChain::from_llm"
        );
        let prompt = PromptTemplate::new(config.prompt_template.clone())?;
        Self::new(LlmChain::new(llm, prompt), config)
    }

    /// Attach a run tracker
    pub fn with_tracker(mut self, tracker: Arc<dyn RunTracker>) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn llm_chain(&self) -> &LlmChain {
        &self.llm_chain
    }

    /// Validated output format
    pub fn output_format(&self) -> Result<OutputFormat> {
        self.config.output_format.parse()
    }

    /// Run over a keyed input record.
    ///
    /// The value under `input_key` is a string, or with batch processing
    /// enabled, a list of strings analyzed element by element in input order.
    pub async fn run(&self, inputs: &ChainInputs) -> Result<ChainOutput> {
        let format = self.output_format()?;
        let key = &self.config.input_key;
        let value = inputs
            .get(key)
            .ok_or_else(|| SentiChainError::MissingInput(key.clone()))?;

        match value {
            Value::Array(items) if self.config.batch_processing => {
                self.tracker.on_text(&value.to_string(), None);
                let jobs = items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| match item {
                        Value::String(text) => Ok(text.clone()),
                        other => Err(SentiChainError::InvalidInput(format!(
                            "Batch element {} is not a string: {}",
                            idx, other
                        ))),
                    })
                    .collect();
                Ok(ChainOutput::Batch(self.run_batch(jobs, format).await?))
            }
            Value::String(text) => {
                self.tracker.on_text(text, None);
                Ok(ChainOutput::Single(self.process_single(text, format).await?))
            }
            other => Err(SentiChainError::InvalidInput(format!(
                "Expected {} at '{}', got {}",
                if self.config.batch_processing {
                    "a string or a list of strings"
                } else {
                    "a string"
                },
                key,
                other
            ))),
        }
    }

    /// Analyze one text
    pub async fn analyze(&self, text: &str) -> Result<FormattedSentiment> {
        let format = self.output_format()?;
        self.tracker.on_text(text, None);
        self.process_single(text, format).await
    }

    /// Analyze several texts; per-text failures are reported inline
    pub async fn analyze_batch(&self, texts: &[String]) -> Result<Vec<BatchEntry>> {
        let format = self.output_format()?;
        self.run_batch(texts.iter().cloned().map(Ok).collect(), format)
            .await
    }

    /// Parse a raw model response with this chain's label mapping and score
    /// setting applied. No model call is made.
    pub fn extract(&self, response: &str) -> Result<SentimentResult> {
        self.extractor.extract(response)
    }

    async fn run_batch(
        &self,
        jobs: Vec<Result<String>>,
        format: OutputFormat,
    ) -> Result<Vec<BatchEntry>> {
        let total = jobs.len();
        let concurrency = self.config.max_concurrency.max(1);
        tracing::info!("Analyzing {} texts ({} concurrent)", total, concurrency);

        let mut results: Vec<(usize, Result<FormattedSentiment>)> = stream::iter(jobs)
            .enumerate()
            .map(|(idx, job)| self.batch_job(idx, job, format))
            .buffer_unordered(concurrency)
            .collect()
            .await;

        // Restore input order
        results.sort_by_key(|(idx, _)| *idx);

        let mut entries = Vec::with_capacity(total);
        for (idx, result) in results {
            match result {
                Ok(formatted) => entries.push(BatchEntry::Sentiment(formatted)),
                Err(e) if e.is_per_text() => {
                    tracing::warn!("Text {}/{} failed: {}", idx + 1, total, e);
                    entries.push(BatchEntry::Error {
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(entries)
    }

    async fn batch_job(
        &self,
        idx: usize,
        job: Result<String>,
        format: OutputFormat,
    ) -> (usize, Result<FormattedSentiment>) {
        let result = match job {
            Ok(text) => self.process_single(&text, format).await,
            Err(e) => Err(e),
        };
        (idx, result)
    }

    async fn process_single(&self, text: &str, format: OutputFormat) -> Result<FormattedSentiment> {
        let tracker = self.tracker.as_ref();
        tracker.on_text(text, None);

        let timeout = self.config.timeout_secs.map(Duration::from_secs);
        let output = self.llm_chain.predict(text, Some(tracker), timeout).await?;
        tracker.on_text(&output, Some(TextStyle::Green));
        tracing::debug!("LLM output: {}", output);

        let result = self.extractor.extract(&output)?;

        if result.is_empty() {
            tracing::warn!("No sentiment found in model output");
        } else if self.config.verbose {
            tracker.on_text("\nSentiment: ", None);
            tracker.on_text(&serde_json::to_string(&result)?, Some(TextStyle::Yellow));
        }

        self.format(result, format)
    }

    fn format(&self, result: SentimentResult, format: OutputFormat) -> Result<FormattedSentiment> {
        match format {
            OutputFormat::Json => {
                let mut keyed = serde_json::Map::new();
                keyed.insert(self.config.output_key.clone(), serde_json::to_value(result)?);
                Ok(FormattedSentiment::Json(Value::Object(keyed)))
            }
            OutputFormat::Text => Ok(FormattedSentiment::Text(format_text(&result))),
        }
    }
}

#[async_trait]
impl Chain for SentimentChain {
    fn input_keys(&self) -> Vec<String> {
        vec![self.config.input_key.clone()]
    }

    fn output_keys(&self) -> Vec<String> {
        vec![self.config.output_key.clone()]
    }

    fn chain_type(&self) -> &'static str {
        "SentimentAnalysisChain"
    }

    async fn call(&self, inputs: &ChainInputs) -> Result<ChainOutput> {
        self.run(inputs).await
    }
}

fn format_text(result: &SentimentResult) -> String {
    format!(
        "Sentiment Label: {}\nSentiment Score: {}",
        result.label.as_deref().unwrap_or(MISSING),
        result
            .score
            .map(format_score)
            .unwrap_or_else(|| MISSING.to_string())
    )
}

/// Whole numbers keep one decimal place (`1.0`), others print shortest.
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.1}", score)
    } else {
        score.to_string()
    }
}
