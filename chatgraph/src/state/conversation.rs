//! Conversation state: the accumulated value of every schema field for one run.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::message::Message;

use super::{SchemaViolation, CONTEXT, MESSAGES};

/// Field name → current value. Created fresh for each run and owned by that run only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationState {
    values: Map<String, Value>,
}

impl ConversationState {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub(crate) fn insert(&mut self, field: String, value: Value) {
        self.values.insert(field, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Decodes the `messages` field. A missing field is an empty conversation.
    pub fn messages(&self) -> Result<Vec<Message>, SchemaViolation> {
        match self.values.get(MESSAGES) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(v) => serde_json::from_value(v.clone()).map_err(|e| SchemaViolation::Decode {
                field: MESSAGES.to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// Last message of the conversation, if any.
    pub fn last_message(&self) -> Result<Option<Message>, SchemaViolation> {
        Ok(self.messages()?.pop())
    }

    /// The `context` field as text; empty when unset.
    pub fn context(&self) -> &str {
        self.values
            .get(CONTEXT)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn into_values(self) -> Map<String, Value> {
        self.values
    }
}
