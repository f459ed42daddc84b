//! Deterministic in-process model

use super::LanguageModel;
use crate::callbacks::RunTracker;
use crate::error::{Result, SentiChainError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Model that answers from a script instead of a service.
///
/// Lookup order per prompt: a rule whose needle occurs in the prompt, then
/// the next queued response, then the fallback. With none of those the call
/// fails like an unreachable service would.
#[derive(Default)]
pub struct ScriptedModel {
    rules: Vec<(String, Reply)>,
    queue: Mutex<VecDeque<Reply>>,
    fallback: Option<Reply>,
    prompts: Mutex<Vec<String>>,
}

#[derive(Clone)]
enum Reply {
    Text(String),
    Fail(String),
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `response` whenever the prompt contains `needle`
    pub fn when(mut self, needle: impl Into<String>, response: impl Into<String>) -> Self {
        self.rules
            .push((needle.into(), Reply::Text(response.into())));
        self
    }

    /// Fail whenever the prompt contains `needle`
    pub fn fail_when(mut self, needle: impl Into<String>, message: impl Into<String>) -> Self {
        self.rules.push((needle.into(), Reply::Fail(message.into())));
        self
    }

    /// Queue a one-shot response
    pub fn then(self, response: impl Into<String>) -> Self {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back(Reply::Text(response.into()));
        }
        self
    }

    /// Response used when nothing else matches
    pub fn otherwise(mut self, response: impl Into<String>) -> Self {
        self.fallback = Some(Reply::Text(response.into()));
        self
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    fn reply_for(&self, prompt: &str) -> Option<Reply> {
        if let Some((_, reply)) = self.rules.iter().find(|(needle, _)| prompt.contains(needle)) {
            return Some(reply.clone());
        }
        if let Some(reply) = self.queue.lock().ok().and_then(|mut q| q.pop_front()) {
            return Some(reply);
        }
        self.fallback.clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn predict(&self, prompt: &str, _tracker: Option<&dyn RunTracker>) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match self.reply_for(prompt) {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail(message)) => Err(SentiChainError::Llm(message)),
            None => Err(SentiChainError::Llm(
                "No scripted response for prompt".to_string(),
            )),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}
