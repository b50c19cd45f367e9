//! Mock LLM for tests and offline runs.
//!
//! Returns a fixed reply, echoes the last user message, or fails; an optional delay makes
//! the call suspend like a real network request (used by cancellation and concurrency
//! tests).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;

#[derive(Debug, Clone)]
enum Reply {
    Fixed(String),
    Echo,
    Fail(String),
}

/// Mock LLM: fixed reply, echo, or failure.
///
/// Counts calls started and calls that ran to completion, so tests can tell whether an
/// in-flight call was cut short.
///
/// **Interaction**: Implements `LlmClient`; used by `RespondNode` and the CLI's `--mock`.
#[derive(Debug)]
pub struct MockLlm {
    reply: Reply,
    delay: Option<Duration>,
    started: AtomicUsize,
    completed: AtomicUsize,
}

impl MockLlm {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            delay: None,
            started: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    /// Always replies with `content`.
    pub fn fixed(content: impl Into<String>) -> Self {
        Self::with_reply(Reply::Fixed(content.into()))
    }

    /// Replies with the content of the last user message (empty if there is none).
    pub fn echo() -> Self {
        Self::with_reply(Reply::Echo)
    }

    /// Always fails with `AgentError::ExecutionFailed(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(Reply::Fail(message.into()))
    }

    /// Waits `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of invoke calls started.
    pub fn call_count(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Number of invoke calls that ran to the end (success or failure).
    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message], _context: &str) -> Result<LlmResponse, AgentError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        let content = match &self.reply {
            Reply::Fixed(s) => s.clone(),
            Reply::Echo => messages
                .iter()
                .rev()
                .find(|m| m.is_user())
                .map(|m| m.content.clone())
                .unwrap_or_default(),
            Reply::Fail(msg) => return Err(AgentError::ExecutionFailed(msg.clone())),
        };
        Ok(LlmResponse { content })
    }
}
