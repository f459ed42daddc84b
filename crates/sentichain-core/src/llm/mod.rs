//! LLM integration
//!
//! Provides traits and implementations for:
//! - Chat completion via external services (vLLM, OpenAI, etc.)
//! - Response caching
//! - Deterministic scripted models for tests and demos

mod cache;
mod chat_model;
mod client;
mod scripted;
mod traits;

pub use cache::{CacheStats, ResponseCache};
pub use chat_model::ChatModel;
pub use client::{APIMetrics, ChatMessage, LLMClient, MetricsSnapshot, VLLMClient};
pub use scripted::ScriptedModel;
pub use traits::*;
