//! LLM trait definitions

use crate::callbacks::RunTracker;
use crate::error::Result;
use async_trait::async_trait;

/// Text-completion capability consumed by chains
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete a rendered prompt.
    ///
    /// `tracker` is the child handle of the calling chain run; models may
    /// report progress to it but must not depend on it.
    async fn predict(&self, prompt: &str, tracker: Option<&dyn RunTracker>) -> Result<String>;

    /// Get model name
    fn model_name(&self) -> &str;
}
