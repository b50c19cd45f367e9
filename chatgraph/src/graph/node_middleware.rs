//! Node middleware: wraps every node call of a compiled graph.
//!
//! Attached with `StateGraph::with_middleware`. Used for cross-cutting concerns such as
//! enter/exit logging; the middleware decides when (and whether) to call the node.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::error::AgentError;
use crate::state::{ConversationState, StateUpdate};

use super::Next;

/// Result of one node call.
pub type NodeResult = Result<(StateUpdate, Next), AgentError>;

/// The wrapped node call, handed to [`NodeMiddleware::around_run`].
pub type NodeCall = Box<dyn FnOnce(Arc<ConversationState>) -> BoxFuture<'static, NodeResult> + Send>;

/// Wraps each node run. Must call `inner(state)` to actually run the node.
#[async_trait]
pub trait NodeMiddleware: Send + Sync {
    async fn around_run(
        &self,
        node_id: &str,
        state: Arc<ConversationState>,
        inner: NodeCall,
    ) -> NodeResult;
}
