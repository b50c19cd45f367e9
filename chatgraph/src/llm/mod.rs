//! LLM client abstraction for the respond node.
//!
//! `RespondNode` depends on a callable that turns the conversation into assistant text;
//! this module defines the trait, a mock implementation, and (feature `openai`) an
//! OpenAI-compatible client.

mod mock;

#[cfg(feature = "openai")]
mod openai;

pub use mock::MockLlm;

#[cfg(feature = "openai")]
pub use openai::{ChatOpenAI, DEFAULT_MODEL};

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;

/// Response from an LLM completion.
///
/// **Interaction**: Returned by `LlmClient::invoke()`; `RespondNode` writes `content` into a
/// new assistant message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmResponse {
    /// Assistant message content (plain text).
    pub content: String,
}

/// LLM client: given the conversation and its context, returns assistant text.
///
/// Shared by every concurrent run of a graph, so implementations must be safe for
/// concurrent use and keep no per-conversation state.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Invoke one turn. `context` is the free-form conversation context (may be empty).
    async fn invoke(&self, messages: &[Message], context: &str) -> Result<LlmResponse, AgentError>;
}

#[async_trait]
impl<T> LlmClient for Arc<T>
where
    T: LlmClient + ?Sized,
{
    async fn invoke(&self, messages: &[Message], context: &str) -> Result<LlmResponse, AgentError> {
        (**self).invoke(messages, context).await
    }
}
