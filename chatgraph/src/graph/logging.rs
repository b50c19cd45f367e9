//! Logging utilities for graph execution.
//!
//! Structured events for run start/finish, node execution and state merges. Uses `tracing`
//! when the `tracing` feature is on, plain stderr lines otherwise.

use crate::error::AgentError;
use crate::graph::Next;

/// Log node execution start.
pub fn log_node_start(node_id: &str) {
    #[cfg(feature = "tracing")]
    tracing::debug!(node_id = node_id, "Starting node execution");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[DEBUG] Starting node execution: {}", node_id);
}

/// Log node execution completion with its routing decision.
pub fn log_node_complete(node_id: &str, next: &Next) {
    #[cfg(feature = "tracing")]
    tracing::debug!(node_id = node_id, ?next, "Node execution complete");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[DEBUG] Node execution complete: {} -> {:?}", node_id, next);
}

/// Log a merged partial update.
pub fn log_state_update(node_id: &str, fields: usize) {
    #[cfg(feature = "tracing")]
    tracing::debug!(node_id = node_id, fields = fields, "State updated");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[DEBUG] State updated after node: {} ({} fields)", node_id, fields);
}

/// Log graph execution start.
pub fn log_graph_start(entry: &str) {
    #[cfg(feature = "tracing")]
    tracing::info!(entry = entry, "Starting graph execution");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[INFO] Starting graph execution at {}", entry);
}

/// Log graph execution completion.
pub fn log_graph_complete(steps: usize) {
    #[cfg(feature = "tracing")]
    tracing::info!(steps = steps, "Graph execution complete");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[INFO] Graph execution complete after {} steps", steps);
}

/// Log graph execution error.
pub fn log_graph_error(error: &AgentError) {
    #[cfg(feature = "tracing")]
    tracing::error!(%error, "Graph execution error");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[ERROR] Graph execution error: {}", error);
}

/// Log a run that was cancelled or timed out before finishing.
pub fn log_graph_cancelled(reason: &str) {
    #[cfg(feature = "tracing")]
    tracing::warn!(reason = reason, "Graph execution cancelled");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[WARN] Graph execution cancelled: {}", reason);
}
