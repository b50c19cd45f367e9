//! State graph: nodes + edges, compile and invoke.
//!
//! Build a [`StateGraph`] over a [`StateSchema`](crate::state::StateSchema), compile it into
//! an immutable [`CompiledStateGraph`], then invoke it once per conversational turn.

mod compile_error;
mod compiled;
mod fn_node;
pub mod logging;
mod next;
mod node;
mod node_middleware;
mod run_config;
mod state_graph;

pub use compile_error::{BuildError, GraphValidationError};
pub use compiled::CompiledStateGraph;
pub use fn_node::FnNode;
pub use next::Next;
pub use node::Node;
pub use node_middleware::{NodeCall, NodeMiddleware, NodeResult};
pub use run_config::{RunnableConfig, DEFAULT_RECURSION_LIMIT};
pub use state_graph::{Router, StateGraph, END};
