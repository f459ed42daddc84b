//! Prompt + model pairing

use super::PromptTemplate;
use crate::callbacks::RunTracker;
use crate::error::{Result, SentiChainError};
use crate::llm::LanguageModel;
use std::sync::Arc;
use std::time::Duration;

/// Renders a prompt for each text and sends it to the model
#[derive(Clone)]
pub struct LlmChain {
    llm: Arc<dyn LanguageModel>,
    prompt: PromptTemplate,
}

impl LlmChain {
    pub fn new(llm: Arc<dyn LanguageModel>, prompt: PromptTemplate) -> Self {
        Self { llm, prompt }
    }

    pub fn prompt(&self) -> &PromptTemplate {
        &self.prompt
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Complete the prompt rendered for `text`.
    ///
    /// Any model failure, including an elapsed `timeout`, is reported as
    /// `ModelInvocation`.
    pub async fn predict(
        &self,
        text: &str,
        tracker: Option<&dyn RunTracker>,
        timeout: Option<Duration>,
    ) -> Result<String> {
        let prompt = self.prompt.format(text);
        let call = self.llm.predict(&prompt, tracker);

        let outcome = match timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                SentiChainError::ModelInvocation(format!(
                    "{} timed out after {:?}",
                    self.llm.model_name(),
                    limit
                ))
            })?,
            None => call.await,
        };

        outcome.map_err(|e| match e {
            SentiChainError::ModelInvocation(_) => e,
            other => SentiChainError::ModelInvocation(other.to_string()),
        })
    }
}
