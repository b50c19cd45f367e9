//! Graph node trait: one named step in a StateGraph.
//!
//! A node receives a read-only snapshot of the conversation state and returns a partial
//! update plus routing. It never mutates shared state; the executor merges the update.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::state::{ConversationState, StateUpdate};

use super::Next;

/// One step in a graph: state snapshot in, (partial update, next step) out.
///
/// Implementations may hold long-lived resources (e.g. an LLM client) but must not keep
/// conversation state between calls; the same node serves concurrent runs.
///
/// **Interaction**: Registered via `StateGraph::add_node`; called by
/// `CompiledStateGraph::invoke`.
#[async_trait]
pub trait Node: Send + Sync {
    /// Return `Next::Continue` to follow declared edges, `Next::Node(id)` to jump, or
    /// `Next::End` to stop this branch.
    async fn run(&self, state: &ConversationState) -> Result<(StateUpdate, Next), AgentError>;
}
