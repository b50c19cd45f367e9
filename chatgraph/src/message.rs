//! Conversation message records.
//!
//! A message is a role-tagged piece of text. Messages live in the `messages` field of the
//! conversation state as JSON objects (`{"role": "user", "content": "..."}`) and are never
//! mutated after creation; nodes add new ones through an append update.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Input from the person chatting with the agent.
    User,
    /// Reply produced by the agent (usually an LLM).
    Assistant,
}

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Builds a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Builds an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }

    /// JSON form stored in the `messages` state field.
    pub fn to_value(&self) -> Value {
        // a unit enum plus a String always serializes
        serde_json::to_value(self).unwrap_or_default()
    }
}
