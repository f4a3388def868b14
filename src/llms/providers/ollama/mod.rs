//! Local-model-runner backend adapter.
//!
//! Talks to an Ollama-style server (`/api/chat`, non-streaming) over
//! HTTP via `reqwest`. Useful for driving structured generation against
//! models running on localhost without any credentials.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::llms::base_backend::{BackendError, ChatBackend};
use crate::types::messages::ChatMessage;

/// Default base URL of a local Ollama server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Local-model-runner backend.
///
/// # Example
///
/// ```ignore
/// let backend = OllamaBackend::new(None, "llama3");
/// let reply = backend.chat(vec![ChatMessage::user("hi")]).await?;
/// ```
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    base_url: String,
    /// Model name as known to the runner.
    pub model: String,
    client: reqwest::Client,
}

impl OllamaBackend {
    /// Create a new local backend. `base_url` defaults to
    /// `http://localhost:11434`.
    pub fn new(base_url: Option<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    /// The base URL in effect.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check whether the runner is reachable.
    pub async fn check_health(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn build_request(&self, messages: &[ChatMessage]) -> WireRequest {
        WireRequest {
            model: self.model.clone(),
            messages: messages.iter().map(WireMessage::from).collect(),
            stream: false,
        }
    }
}

#[async_trait]
impl ChatBackend for OllamaBackend {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<ChatMessage, BackendError> {
        let url = format!("{}/api/chat", self.base_url);
        let body = self.build_request(&messages);

        log::debug!(
            "ollama backend: POST {} ({} messages, model {})",
            url,
            messages.len(),
            self.model
        );

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response.text().await.unwrap_or_default();
            return Err(BackendError::Api { status, detail });
        }

        let envelope: WireResponse = response
            .json()
            .await
            .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;

        Ok(ChatMessage::assistant(envelope.message.content))
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for WireMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_string(),
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    message: WireMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let backend = OllamaBackend::new(None, "llama3");
        assert_eq!(backend.base_url(), DEFAULT_BASE_URL);

        let backend = OllamaBackend::new(Some("http://192.168.1.50:11434".into()), "llama3");
        assert_eq!(backend.base_url(), "http://192.168.1.50:11434");
    }

    #[test]
    fn test_request_is_non_streaming() {
        let backend = OllamaBackend::new(None, "llama3");
        let request = backend.build_request(&[ChatMessage::user("hello")]);
        assert!(!request.stream);
        assert_eq!(request.model, "llama3");
        assert_eq!(request.messages[0].role, "user");
    }

    #[test]
    fn test_role_mapping() {
        let backend = OllamaBackend::new(None, "llama3");
        let request = backend.build_request(&[
            ChatMessage::system("s"),
            ChatMessage::user("u"),
            ChatMessage::assistant("a"),
        ]);
        let roles: Vec<&str> = request.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant"]);
    }

    /// Requires a running Ollama server.
    #[tokio::test]
    #[ignore]
    async fn test_live_health_check() {
        let backend = OllamaBackend::new(None, "llama3");
        let healthy = backend.check_health().await;
        println!("ollama health: {}", healthy);
    }
}
