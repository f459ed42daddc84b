//! Configuration management

use crate::chain::DEFAULT_SENTIMENT_PROMPT;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// LLM service configuration
    #[serde(default)]
    pub llm_service: LLMServiceConfig,

    /// Sentiment chain configuration
    #[serde(default)]
    pub sentiment: ChainConfig,
}

/// LLM service configuration for external inference
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LLMServiceConfig {
    /// Base URL of the LLM service for chat/completions
    pub url: String,

    /// Model name for chat completions
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// API key (optional, for authenticated services)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Sampling temperature sent with every completion request
    #[serde(default)]
    pub temperature: f32,

    /// Completion length cap
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for LLMServiceConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("SENTICHAIN_LLM_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            model: default_chat_model(),
            api_key: std::env::var("SENTICHAIN_LLM_API_KEY").ok(),
            timeout_secs: default_timeout(),
            temperature: 0.0,
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_chat_model() -> String {
    std::env::var("SENTICHAIN_LLM_MODEL")
        .unwrap_or_else(|_| "meta-llama/Llama-3.1-8B-Instruct".to_string())
}

fn default_timeout() -> u64 {
    30
}

fn default_max_tokens() -> u32 {
    256
}

/// Sentiment chain configuration.
///
/// Built once and shared read-only between invocations. `output_format` is
/// kept as written and checked when the chain runs, so a bad value surfaces
/// as a configuration error on the first call rather than at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChainConfig {
    /// Input field carrying the text (or texts) to analyze
    pub input_key: String,

    /// Output field the structured result is keyed under
    pub output_key: String,

    /// Prompt template; must contain the `{question}` slot
    pub prompt_template: String,

    /// Include the numeric score in results
    pub include_score: bool,

    /// `json` or `text`, case-insensitive
    pub output_format: String,

    /// Raw label -> display label
    pub label_mapping: HashMap<String, String>,

    /// Treat list-valued input as a batch of texts
    pub batch_processing: bool,

    /// Per-text model calls in flight during a batch
    pub max_concurrency: usize,

    /// Per-text deadline for the model call
    pub timeout_secs: Option<u64>,

    /// Also report each extracted sentiment to the run tracker; input and
    /// raw model output are reported either way
    pub verbose: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            input_key: "question".to_string(),
            output_key: "sentiment".to_string(),
            prompt_template: DEFAULT_SENTIMENT_PROMPT.to_string(),
            include_score: true,
            output_format: "json".to_string(),
            label_mapping: HashMap::new(),
            batch_processing: false,
            max_concurrency: 1,
            timeout_secs: None,
            verbose: false,
        }
    }
}

impl Config {
    /// Load config from an explicit path, falling back to defaults when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            tracing::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path (`SENTICHAIN_CONFIG` overrides)
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("SENTICHAIN_CONFIG") {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_chain_defaults() {
        let config = ChainConfig::default();
        assert_eq!(config.input_key, "question");
        assert_eq!(config.output_key, "sentiment");
        assert_eq!(config.output_format, "json");
        assert!(config.include_score);
        assert!(!config.batch_processing);
        assert_eq!(config.max_concurrency, 1);
        assert!(config.prompt_template.contains("{question}"));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
llm_service:
  url: http://inference.local:9000
sentiment:
  output_format: text
  label_mapping:
    Positive: POS
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.llm_service.url, "http://inference.local:9000");
        assert_eq!(config.llm_service.timeout_secs, 30);
        assert_eq!(config.sentiment.output_format, "text");
        assert_eq!(config.sentiment.input_key, "question");
        assert_eq!(
            config.sentiment.label_mapping.get("Positive").map(String::as_str),
            Some("POS")
        );
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let yaml = "sentiment:\n  include_scores: false\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yml");

        let mut config = Config::default();
        config.sentiment.batch_processing = true;
        config.sentiment.max_concurrency = 4;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.sentiment, config.sentiment);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.yml")).unwrap();
        assert_eq!(loaded.sentiment, ChainConfig::default());
    }
}
