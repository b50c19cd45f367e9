//! # chatgraph
//!
//! A small state-graph engine for conversational agents. One dynamic state record flows
//! through nodes; each node returns a partial update that the schema's reducers merge in.
//!
//! ## Design Principles
//!
//! - **Declared state**: A [`StateSchema`] names every field with a value kind and a reducer
//!   (overwrite or append). Updates outside the schema are rejected, never merged.
//! - **Build, compile, invoke**: [`StateGraph`] collects nodes and edges; `compile` checks
//!   the structure once; [`CompiledStateGraph`] is immutable and shared by concurrent runs.
//! - **Super-steps**: Nodes reached in the same step run concurrently on one snapshot;
//!   their updates merge in declaration order before routing.
//!
//! ## Main Modules
//!
//! - [`graph`]: `StateGraph`, `CompiledStateGraph`, `Node`, `Next`, middleware and run config.
//! - [`state`]: `StateSchema`, `ConversationState`, `StateUpdate`, reducers.
//! - [`llm`]: `LlmClient` trait, `MockLlm`, and optional `ChatOpenAI` (feature `openai`).
//! - [`agent`]: `RespondNode` and the `ChatAgent` facade.
//!
//! ## Features
//!
//! - `tracing` (default): node and run events go to `tracing`; otherwise to stderr.
//! - `openai`: OpenAI Chat Completions client via `async-openai`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatgraph::{ChatAgent, MockLlm};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let agent = ChatAgent::new(Box::new(MockLlm::fixed("Hi there"))).unwrap();
//! let reply = agent.chat("hello", "").await.unwrap();
//! assert_eq!(reply, "Hi there");
//! # }
//! ```

pub mod agent;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod state;

pub use agent::{ChatAgent, RespondNode, SetupError, RESPOND_NODE};
pub use error::AgentError;
pub use graph::{
    BuildError, CompiledStateGraph, GraphValidationError, Next, Node, NodeMiddleware,
    RunnableConfig, StateGraph, END,
};
pub use llm::{LlmClient, LlmResponse, MockLlm};
#[cfg(feature = "openai")]
pub use llm::ChatOpenAI;
pub use message::{Message, Role};
pub use state::{ConversationState, SchemaViolation, StateSchema, StateUpdate};
pub use tokio_util::sync::CancellationToken;
