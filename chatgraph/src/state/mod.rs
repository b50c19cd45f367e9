//! Shared conversation state: schema, reducers, state values and partial updates.
//!
//! Nodes read a [`ConversationState`] snapshot and return a [`StateUpdate`]; the
//! executor merges the update through the [`StateSchema`] reducers.

mod conversation;
mod schema;
mod update;
mod violation;

pub use conversation::ConversationState;
pub use schema::{FieldSpec, Reducer, StateSchema, ValueKind};
pub use update::StateUpdate;
pub use violation::SchemaViolation;

/// Field holding the ordered list of messages (append reducer).
pub const MESSAGES: &str = "messages";

/// Field holding free-form conversation context (overwrite reducer).
pub const CONTEXT: &str = "context";
