//! Partial state update returned by a node.

use serde_json::{Map, Value};

use crate::message::Message;

use super::MESSAGES;

/// Subset of fields a node wants to change. Merged into the accumulated state by the
/// schema's reducers; a node never writes the shared state directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    values: Map<String, Value>,
}

impl StateUpdate {
    /// Empty update (no field changes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the partial value for `field`, replacing any earlier value in this update.
    pub fn set(mut self, field: impl Into<String>, value: Value) -> Self {
        self.values.insert(field.into(), value);
        self
    }

    /// Adds messages to the `messages` partial value, after any already in this update.
    ///
    /// A `messages` value that is not an array is left untouched, so merging the update
    /// fails with a `SchemaViolation` instead of losing it.
    pub fn append_messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        let entry = self
            .values
            .entry(MESSAGES.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(items) = entry {
            items.extend(messages.into_iter().map(|m| m.to_value()));
        }
        self
    }

    /// Shorthand for appending one assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new().append_messages([Message::assistant(content)])
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
