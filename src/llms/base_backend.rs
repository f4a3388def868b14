//! Base chat-backend abstraction.
//!
//! Everything the generation engine needs from a language model is "send
//! an ordered list of role-tagged messages, receive one role-tagged
//! reply". Concrete adapters (hosted APIs, local model runners) implement
//! [`ChatBackend`] and own their wire protocol, credentials, timeouts,
//! and any transport-level retry policy.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::types::messages::ChatMessage;

/// Adapter-level failure.
///
/// The engine never interprets or retries these; they surface to the
/// caller unmodified.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The HTTP request itself failed (connectivity, TLS, timeout).
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend API error {status}: {detail}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Response body or status text.
        detail: String,
    },

    /// No API key was configured or found in the environment.
    #[error("missing API key: set {env_var} or pass a key explicitly")]
    MissingApiKey {
        /// Environment variable that was consulted.
        env_var: &'static str,
    },

    /// The backend's envelope did not contain a usable reply message.
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
}

/// A chat-capable backend.
///
/// Implementations must be cheap to share behind an `Arc`; the engine
/// holds one for its whole lifetime and calls it sequentially.
#[async_trait]
pub trait ChatBackend: Send + Sync + fmt::Debug {
    /// Send an ordered message list and await the single reply message.
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<ChatMessage, BackendError>;
}

/// Generate a fresh correlation id for one logical generation call.
///
/// The id ties together the log lines of every round-trip the call
/// issues, including repair round-trips.
pub fn generate_call_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_ids_are_unique() {
        let a = generate_call_id();
        let b = generate_call_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn test_api_error_display() {
        let err = BackendError::Api {
            status: 429,
            detail: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "backend API error 429: rate limited");
    }

    #[test]
    fn test_missing_key_display() {
        let err = BackendError::MissingApiKey {
            env_var: "OPENAI_API_KEY",
        };
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
