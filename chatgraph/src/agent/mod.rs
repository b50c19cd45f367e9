//! Chat agent: a one-node state graph that answers a user message with an LLM reply.
//!
//! [`RespondNode`] is the node; [`ChatAgent`] builds and compiles the graph once and runs
//! it per message.

mod chat;
mod respond_node;

pub use chat::{ChatAgent, SetupError, RESPOND_NODE};
pub use respond_node::RespondNode;
