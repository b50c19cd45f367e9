//! Chat agent facade: build the respond graph once, run it per message.

use std::sync::Arc;

use serde_json::json;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::error::AgentError;
use crate::graph::{
    BuildError, CompiledStateGraph, GraphValidationError, RunnableConfig, StateGraph, END,
};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::{ConversationState, StateSchema, CONTEXT, MESSAGES};

use super::RespondNode;

/// Node id of the single respond node.
pub const RESPOND_NODE: &str = "respond";

/// Error while building the agent's graph. Stops initialization; never raised by a run.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("graph build failed: {0}")]
    Build(#[from] BuildError),
    #[error("graph validation failed: {0}")]
    Validation(#[from] GraphValidationError),
}

/// Chat agent: one compiled graph shared by every `chat` call.
///
/// Each call builds its own `ConversationState` (`messages: [user(message)]` plus
/// `context`), runs the graph and returns the content of the last message. Cloning is
/// cheap and clones share the graph.
///
/// **Interaction**: Wraps `CompiledStateGraph`; the CLI builds one per process.
#[derive(Debug, Clone)]
pub struct ChatAgent {
    graph: Arc<CompiledStateGraph>,
    config: RunnableConfig,
}

impl ChatAgent {
    /// Uncompiled `respond → END` graph around `llm`, for callers that add middleware or
    /// extra nodes before compiling.
    pub fn graph_builder(llm: Box<dyn LlmClient>) -> Result<StateGraph, BuildError> {
        let mut graph = StateGraph::new(StateSchema::conversation());
        graph
            .add_node(RESPOND_NODE, Arc::new(RespondNode::new(llm)))?
            .add_edge(RESPOND_NODE, END);
        graph.set_entry(RESPOND_NODE)?;
        Ok(graph)
    }

    /// Builds and compiles the standard single-node graph.
    pub fn new(llm: Box<dyn LlmClient>) -> Result<Self, SetupError> {
        let graph = Self::graph_builder(llm)?.compile()?;
        Ok(Self::from_graph(graph))
    }

    /// Wraps any compiled graph whose schema has `messages` and `context`.
    pub fn from_graph(graph: CompiledStateGraph) -> Self {
        Self {
            graph: Arc::new(graph),
            config: RunnableConfig::default(),
        }
    }

    /// Sets the run config (recursion limit, timeout) used by every call.
    pub fn with_config(mut self, config: RunnableConfig) -> Self {
        self.config = config;
        self
    }

    pub fn graph(&self) -> &CompiledStateGraph {
        &self.graph
    }

    pub fn config(&self) -> &RunnableConfig {
        &self.config
    }

    /// Initial state for one call: the user message and the context string.
    pub fn initial_state(
        &self,
        message: &str,
        context: &str,
    ) -> Result<ConversationState, AgentError> {
        let state = self.graph.schema().initial_state([
            (MESSAGES, json!([Message::user(message).to_value()])),
            (CONTEXT, json!(context)),
        ])?;
        Ok(state)
    }

    /// Runs the graph for one message and returns the final state.
    pub async fn run(
        &self,
        message: &str,
        context: &str,
        cancel: CancellationToken,
    ) -> Result<ConversationState, AgentError> {
        let state = self.initial_state(message, context)?;
        self.graph
            .invoke_with_cancel(state, Some(self.config.clone()), cancel)
            .await
    }

    /// Sends one message and returns the reply text.
    pub async fn chat(&self, message: &str, context: &str) -> Result<String, AgentError> {
        self.chat_with_cancel(message, context, CancellationToken::new())
            .await
    }

    /// Like [`chat`](Self::chat), but stops with `Cancelled` once `cancel` fires.
    pub async fn chat_with_cancel(
        &self,
        message: &str,
        context: &str,
        cancel: CancellationToken,
    ) -> Result<String, AgentError> {
        let state = self.run(message, context, cancel).await?;
        state
            .last_message()?
            .map(|m| m.content)
            .ok_or(AgentError::EmptyResponse)
    }
}
