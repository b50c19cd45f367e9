//! Logging middleware that records node enter/exit around each node run.

use std::sync::Arc;

use async_trait::async_trait;

use chatgraph::graph::{NodeCall, NodeResult};
use chatgraph::{ConversationState, NodeMiddleware};

/// Middleware that logs node enter/exit around each node run.
///
/// Events go to `tracing` at debug level; the CLI's subscriber writes them to stderr so the
/// reply on stdout stays clean.
pub struct LoggingMiddleware;

#[async_trait]
impl NodeMiddleware for LoggingMiddleware {
    async fn around_run(
        &self,
        node_id: &str,
        state: Arc<ConversationState>,
        inner: NodeCall,
    ) -> NodeResult {
        let messages = state.messages().map(|m| m.len()).unwrap_or(0);
        tracing::debug!(node = node_id, messages, "node enter");
        let result = inner(state).await;
        match &result {
            Ok((update, next)) => {
                tracing::debug!(node = node_id, next = ?next, fields = update.len(), "node exit")
            }
            Err(e) => tracing::debug!(node = node_id, error = %e, "node exit with error"),
        }
        result
    }
}
