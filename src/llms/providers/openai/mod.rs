//! Hosted chat-completions backend adapter.
//!
//! Talks to an OpenAI-style `/v1/chat/completions` endpoint over HTTPS
//! via `reqwest`. The adapter owns authentication (explicit key or the
//! `OPENAI_API_KEY` environment variable), request formatting, and
//! envelope parsing; the engine sees only [`ChatBackend`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::llms::base_backend::{BackendError, ChatBackend};
use crate::types::messages::ChatMessage;

/// Environment variable consulted when no API key is passed explicitly.
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Hosted chat-completions backend.
///
/// # Example
///
/// ```ignore
/// let backend = OpenAiBackend::new("gpt-4o-mini", None, None);
/// let reply = backend.chat(vec![ChatMessage::user("hi")]).await?;
/// ```
#[derive(Clone)]
pub struct OpenAiBackend {
    /// Model identifier sent with every request.
    pub model: String,
    api_key: Option<String>,
    base_url: Option<String>,
    temperature: Option<f64>,
    client: reqwest::Client,
}

impl OpenAiBackend {
    /// Create a new hosted backend.
    ///
    /// `api_key` falls back to the `OPENAI_API_KEY` environment variable;
    /// a missing key is reported on the first call, not at construction.
    pub fn new(
        model: impl Into<String>,
        api_key: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        let api_key = api_key.or_else(|| std::env::var(API_KEY_ENV_VAR).ok());
        Self {
            model: model.into(),
            api_key,
            base_url,
            temperature: None,
            client: reqwest::Client::new(),
        }
    }

    /// Set the sampling temperature sent with every request.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// The API base URL in effect.
    pub fn api_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    fn build_request(&self, messages: &[ChatMessage]) -> WireRequest {
        WireRequest {
            model: self.model.clone(),
            messages: messages.iter().map(WireMessage::from).collect(),
            temperature: self.temperature,
        }
    }
}

impl std::fmt::Debug for OpenAiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiBackend")
            .field("model", &self.model)
            .field("base_url", &self.api_base_url())
            .field("has_api_key", &self.api_key.is_some())
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<ChatMessage, BackendError> {
        let api_key = self.api_key.as_deref().ok_or(BackendError::MissingApiKey {
            env_var: API_KEY_ENV_VAR,
        })?;

        let url = format!("{}/v1/chat/completions", self.api_base_url());
        let body = self.build_request(&messages);

        log::debug!(
            "openai backend: POST {} ({} messages, model {})",
            url,
            messages.len(),
            self.model
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response.text().await.unwrap_or_default();
            return Err(BackendError::Api { status, detail });
        }

        let envelope: WireResponse = response
            .json()
            .await
            .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;

        extract_reply(envelope)
    }
}

/// Pull the first choice's message out of a response envelope.
fn extract_reply(envelope: WireResponse) -> Result<ChatMessage, BackendError> {
    let choice = envelope
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| BackendError::MalformedResponse("response contained no choices".into()))?;
    Ok(ChatMessage::assistant(choice.message.content))
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
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
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}
