//! Run-time error types.
//!
//! Returned by `Node::run`, `CompiledStateGraph::invoke` and `ChatAgent::chat`. Build and
//! compile errors live in [`crate::graph`]; they never reach a run.

use std::time::Duration;

use thiserror::Error;

use crate::state::SchemaViolation;

/// Error from one run of a compiled graph.
///
/// A run-time error aborts only the current run. The state accumulated before the failure is
/// dropped, never returned.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. LLM call failed). Nodes return this for their
    /// own failures.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// A node failed; wraps the node's own error with the node name.
    #[error("node '{node}' failed: {source}")]
    NodeExecution {
        node: String,
        source: Box<AgentError>,
    },

    /// A node's update (or the initial state) does not fit the schema.
    #[error("schema violation: {0}")]
    Schema(#[from] SchemaViolation),

    /// A node or router picked a destination that is not a registered node.
    #[error("node '{from}' routed to unknown node '{to}'")]
    InvalidRoute { from: String, to: String },

    /// The run took more super-steps than allowed without reaching END.
    #[error("recursion limit of {0} steps reached without reaching END")]
    RecursionLimit(usize),

    /// The caller cancelled the run before it finished.
    #[error("run cancelled")]
    Cancelled,

    /// The run did not finish within the configured timeout.
    #[error("run timed out after {0:?}")]
    Timeout(Duration),

    /// The run finished with no message to reply with.
    #[error("graph produced no messages")]
    EmptyResponse,
}

impl AgentError {
    /// Name of the failing node for `NodeExecution`, if any.
    pub fn node(&self) -> Option<&str> {
        match self {
            AgentError::NodeExecution { node, .. } => Some(node),
            _ => None,
        }
    }
}
