//! Upstream Groq client
//!
//! Issues a single non-streaming POST to Groq's OpenAI-compatible
//! chat-completions endpoint. No retry, no backoff, no timeout override:
//! one attempt with the HTTP client's defaults, exactly one outbound call
//! per inbound request.

use crate::error::{AppError, AppResult};
use serde::Serialize;
use serde_json::Value;

/// Production chat-completions endpoint
pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// One entry of the upstream `messages` array
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    /// A user-role message carrying the client prompt
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Request payload for the chat-completions endpoint
///
/// Matches the OpenAI-compatible request shape; only the fields the relay
/// contract depends on are present.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub stream: bool,
}

/// HTTP client for the upstream completion API
///
/// The endpoint URL is fixed at construction; tests point it at a local mock
/// server. The bearer key is passed per call so a missing key can be rejected
/// before any request is built.
#[derive(Debug, Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GroqClient {
    /// Client targeting the production Groq endpoint
    pub fn new() -> Self {
        Self::with_endpoint(GROQ_API_URL)
    }

    /// Client targeting an explicit endpoint URL
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint this client targets
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one completion request and return the raw response body
    ///
    /// # Errors
    ///
    /// - [`AppError::Transport`] if the request cannot be sent or the body is
    ///   not parseable JSON
    /// - [`AppError::Upstream`] if the upstream answered with status >= 400;
    ///   the upstream status and body are carried for the client to inspect
    pub async fn complete(&self, api_key: &str, request: &CompletionRequest) -> AppResult<Value> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

impl Default for GroqClient {
    fn default() -> Self {
        Self::new()
    }
}
