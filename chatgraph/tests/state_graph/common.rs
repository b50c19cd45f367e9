//! Shared nodes and helpers for state graph integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use chatgraph::state::MESSAGES;
use chatgraph::{
    AgentError, ConversationState, Message, Next, Node, StateSchema, StateUpdate,
};

/// Appends one assistant message with a fixed text, optionally after a delay.
pub struct SayNode {
    text: String,
    delay: Option<Duration>,
}

impl SayNode {
    pub fn new(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            text: text.into(),
            delay: None,
        })
    }

    pub fn slow(text: impl Into<String>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            text: text.into(),
            delay: Some(delay),
        })
    }
}

#[async_trait]
impl Node for SayNode {
    async fn run(&self, _state: &ConversationState) -> Result<(StateUpdate, Next), AgentError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok((StateUpdate::assistant(self.text.clone()), Next::Continue))
    }
}

/// Always fails with ExecutionFailed.
pub struct FailNode;

#[async_trait]
impl Node for FailNode {
    async fn run(&self, _state: &ConversationState) -> Result<(StateUpdate, Next), AgentError> {
        Err(AgentError::ExecutionFailed("node broke".into()))
    }
}

/// Initial state with a single user message.
pub fn start(schema: &StateSchema, text: &str) -> ConversationState {
    schema
        .initial_state([(MESSAGES, json!([Message::user(text).to_value()]))])
        .unwrap()
}

/// Message contents of `state`, in order.
pub fn contents(state: &ConversationState) -> Vec<String> {
    state
        .messages()
        .unwrap()
        .into_iter()
        .map(|m| m.content)
        .collect()
}
