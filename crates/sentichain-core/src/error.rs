//! Error types for sentichain

use thiserror::Error;

/// Result type alias using SentiChainError
pub type Result<T> = std::result::Result<T, SentiChainError>;

/// Error type alias for convenience
pub type Error = SentiChainError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const MODEL_ERROR: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
}

/// Main error type for sentichain
#[derive(Debug, Error)]
pub enum SentiChainError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model invocation error: {0}")]
    ModelInvocation(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Missing input key: {0}")]
    MissingInput(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("External service error: {0}")]
    ExternalError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl SentiChainError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::MissingInput(_) | Self::InvalidInput(_) | Self::Yaml(_) => {
                exit_codes::INVALID_INPUT
            }
            Self::ModelInvocation(_) | Self::Llm(_) | Self::ExternalError(_) | Self::Http(_) => {
                exit_codes::MODEL_ERROR
            }
            _ => exit_codes::GENERAL_ERROR,
        }
    }

    /// Whether this error is confined to a single text of a batch
    pub fn is_per_text(&self) -> bool {
        matches!(
            self,
            Self::ModelInvocation(_) | Self::Parse(_) | Self::InvalidInput(_)
        )
    }
}
