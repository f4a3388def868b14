//! Type definitions shared across the crate.

pub mod messages;

pub use messages::{ChatMessage, HistoryEntry, MessageRole};
