//! Respond node: read messages and context, call the LLM, append one assistant message.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::state::{ConversationState, StateUpdate};

/// Respond node: one LLM turn over the conversation so far.
///
/// Reads `messages` and `context` from the snapshot, calls the LLM, and returns a partial
/// update holding only the new assistant message; the `messages` append reducer adds it to
/// the history.
///
/// **Interaction**: Implements `Node`; registered by `ChatAgent` as `"respond"`. Consumes
/// `LlmClient` (e.g. `MockLlm`, `ChatOpenAI`).
pub struct RespondNode {
    llm: Box<dyn LlmClient>,
}

impl RespondNode {
    /// Creates a respond node with the given LLM client.
    pub fn new(llm: Box<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node for RespondNode {
    async fn run(&self, state: &ConversationState) -> Result<(StateUpdate, Next), AgentError> {
        let messages = state.messages()?;
        let response = self.llm.invoke(&messages, state.context()).await?;
        Ok((StateUpdate::assistant(response.content), Next::Continue))
    }
}
