//! Chat message and history-entry types.
//!
//! These are the transient wire types exchanged with a
//! [`ChatBackend`](crate::llms::base_backend::ChatBackend) and the
//! recorded pairs kept by the generator's history buffer.

use serde::{Deserialize, Serialize};

/// Role tag of a single conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instruction turn set by the integrating application.
    System,
    /// Turn authored by the caller (inputs, instructions, corrections).
    User,
    /// Turn authored by the backend model.
    Assistant,
}

impl MessageRole {
    /// Wire name of the role as used by chat-completion style APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single role-tagged message in a conversation.
///
/// Constructed fresh per turn; the engine never mutates a message after
/// building it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who authored the turn.
    pub role: MessageRole,
    /// The text content of the turn.
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// One completed, successful exchange: the user turn that carried the
/// input and the assistant turn that answered it.
///
/// Entries are replayed into future prompts to give the backend
/// continuity across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The user turn of the exchange.
    pub user: ChatMessage,
    /// The assistant turn of the exchange.
    pub assistant: ChatMessage,
}

impl HistoryEntry {
    /// Create a history entry from a user turn and the assistant reply.
    pub fn new(user: ChatMessage, assistant: ChatMessage) -> Self {
        Self { user, assistant }
    }
}
