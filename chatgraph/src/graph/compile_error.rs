//! Graph build and compilation errors.
//!
//! [`BuildError`] is returned by `StateGraph` builder calls; [`GraphValidationError`] by
//! `StateGraph::compile` when the graph is structurally invalid. Both are caller mistakes:
//! a graph that fails here must never reach the executor.

use thiserror::Error;

/// Builder-time error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    /// `add_node` with a name that is already registered.
    #[error("duplicate node: {0}")]
    DuplicateNode(String),

    /// `set_entry` with a name that is not registered.
    #[error("unknown node: {0}")]
    UnknownNode(String),
}

/// Compile-time structural defect. Each variant names the rule that was violated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphValidationError {
    /// No entry point was set.
    #[error("graph has no entry point")]
    MissingEntry,

    /// The entry point does not refer to a registered node.
    #[error("entry point refers to unknown node: {0}")]
    UnknownEntry(String),

    /// An edge endpoint (or conditional target) is not a registered node.
    #[error("edge {from} -> {to} refers to unknown node: {missing}")]
    NodeNotFound {
        from: String,
        to: String,
        missing: String,
    },

    /// Registered nodes that cannot be reached from the entry point.
    #[error("nodes unreachable from entry: {}", .0.join(", "))]
    Unreachable(Vec<String>),

    /// No path from the entry point reaches END.
    #[error("no path from entry reaches END")]
    NoPathToEnd,

    /// A node has no outgoing edge, so a run could strand there.
    #[error("node has no outgoing edge: {0}")]
    DeadEnd(String),
}

impl GraphValidationError {
    /// Short name of the violated rule, for logs and diagnostics.
    pub fn rule(&self) -> &'static str {
        match self {
            GraphValidationError::MissingEntry | GraphValidationError::UnknownEntry(_) => "entry",
            GraphValidationError::NodeNotFound { .. } => "edges",
            GraphValidationError::Unreachable(_) => "reachability",
            GraphValidationError::NoPathToEnd => "termination",
            GraphValidationError::DeadEnd(_) => "dead-end",
        }
    }
}
