//! Prompt templates

use crate::error::{Result, SentiChainError};

/// Substitution slot for the input text
pub const QUESTION_SLOT: &str = "{question}";

/// Built-in sentiment prompt
pub const DEFAULT_SENTIMENT_PROMPT: &str = r#"Analyze the sentiment of the text below.

Answer with exactly one line in this form:
Sentiment: <label> (Score: <score>)

<label> is Positive, Negative, or Neutral.
<score> is your confidence from 0.0 to 1.0.

Text: {question}

Answer:"#;

/// Validated prompt template with a `{question}` slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Build a template, rejecting one without the input slot
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(QUESTION_SLOT) {
            return Err(SentiChainError::Config(format!(
                "Prompt template is missing the {} slot",
                QUESTION_SLOT
            )));
        }
        Ok(Self { template })
    }

    /// Substitute `text` into every slot
    pub fn format(&self, text: &str) -> String {
        self.template.replace(QUESTION_SLOT, text)
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_SENTIMENT_PROMPT.to_string(),
        }
    }
}
