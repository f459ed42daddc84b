//! Adapter from chat-completion clients to the `LanguageModel` trait

use super::{ChatMessage, LLMClient, LanguageModel, VLLMClient};
use crate::callbacks::RunTracker;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Sends each rendered prompt as a single user turn
pub struct ChatModel {
    client: Arc<dyn LLMClient>,
    system_prompt: Option<String>,
}

impl ChatModel {
    /// Create from LLM client
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self {
            client,
            system_prompt: None,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Arc::new(VLLMClient::from_env()?)))
    }

    /// Prepend a system turn to every request
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    fn messages(&self, prompt: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(ref system) = self.system_prompt {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.push(ChatMessage::user(prompt));
        messages
    }
}

#[async_trait]
impl LanguageModel for ChatModel {
    async fn predict(&self, prompt: &str, _tracker: Option<&dyn RunTracker>) -> Result<String> {
        self.client.chat_completion(self.messages(prompt)).await
    }

    fn model_name(&self) -> &str {
        self.client.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct EchoClient {
        seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    #[async_trait]
    impl LLMClient for EchoClient {
        async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
            let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            self.seen.lock().unwrap().push(messages);
            Ok(last)
        }

        fn model_name(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_prompt_sent_as_user_turn() {
        let client = Arc::new(EchoClient {
            seen: Mutex::new(Vec::new()),
        });
        let model = ChatModel::new(client.clone()).with_system_prompt("Be terse.");

        let out = model.predict("hello", None).await.unwrap();
        assert_eq!(out, "hello");
        assert_eq!(model.model_name(), "echo");

        let seen = client.seen.lock().unwrap();
        assert_eq!(
            seen[0],
            vec![ChatMessage::system("Be terse."), ChatMessage::user("hello")]
        );
    }
}
