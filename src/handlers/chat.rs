//! Chat relay endpoint handler
//!
//! Handles POST /api/chat and POST /api/generate: one inbound request maps to
//! exactly one upstream completion call and a reshaped response.

use crate::error::{AppError, AppResult};
use crate::extract::{extract_reply, finish_reason, tokens_used};
use crate::groq::{ChatMessage, CompletionRequest};
use crate::handlers::AppState;
use crate::middleware::RequestId;
use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Canonical sampling temperature when the caller supplies none
pub const DEFAULT_TEMPERATURE: f64 = 0.85;
/// Canonical completion budget when the caller supplies none
pub const DEFAULT_MAX_TOKENS: u32 = 900;
/// Nucleus sampling parameter, fixed for all requests
pub const TOP_P: f64 = 0.95;

/// Chat request from client
///
/// Deserialization is deliberately tolerant: a missing, non-string, or empty
/// prompt must surface as the handler's 400 validation error, not as a serde
/// rejection. The prompt may arrive under `prompt` or the legacy `text` key.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    prompt: Option<String>,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
}

impl ChatRequest {
    /// The prompt, if one was supplied as a non-blank string
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// Caller-supplied temperature override
    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    /// Caller-supplied max_tokens override
    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }
}

impl<'de> Deserialize<'de> for ChatRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;

        let prompt = raw
            .get("prompt")
            .or_else(|| raw.get("text"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned);

        let temperature = raw.get("temperature").and_then(Value::as_f64);

        let max_tokens = raw
            .get("max_tokens")
            .or_else(|| raw.get("maxTokens"))
            .and_then(Value::as_u64)
            .map(|tokens| tokens.min(u64::from(u32::MAX)) as u32);

        Ok(ChatRequest {
            prompt,
            temperature,
            max_tokens,
        })
    }
}

/// Successful relay response
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub ok: bool,
    pub reply: String,
    pub metadata: ReplyMetadata,
}

/// Diagnostic metadata accompanying a successful reply
#[derive(Debug, Clone, Serialize)]
pub struct ReplyMetadata {
    /// Model identifier the payload was sent with
    pub model: String,
    /// Whitespace-delimited token count of the reply
    pub word_count: usize,
    /// Upstream finish reason, when provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    /// Total tokens per the upstream usage block, 0 when absent
    pub tokens_used: u64,
}

/// POST /api/chat and /api/generate handler
///
/// Linear pass with early-exit failure branches: validate the prompt, check
/// the key, forward to the upstream, extract the reply, reshape. Suspends
/// only while awaiting the upstream call; no shared mutable state is touched.
pub async fn handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ChatRequest>,
) -> AppResult<impl IntoResponse> {
    let prompt = request
        .prompt()
        .ok_or_else(|| AppError::Validation("Missing 'prompt' in request body".to_string()))?;

    let api_key = state
        .config()
        .api_key
        .as_deref()
        .ok_or_else(|| AppError::Config("GROQ_API_KEY not configured".to_string()))?;

    let temperature = request.temperature().unwrap_or(DEFAULT_TEMPERATURE);
    let max_tokens = request.max_tokens().unwrap_or(DEFAULT_MAX_TOKENS);

    tracing::debug!(
        request_id = %request_id,
        prompt_prefix = %preview(prompt, 80),
        temperature,
        max_tokens,
        model = %state.config().model,
        "Relaying chat request"
    );

    let payload = CompletionRequest {
        model: state.config().model.clone(),
        messages: vec![ChatMessage::user(prompt)],
        temperature,
        max_tokens,
        top_p: TOP_P,
        stream: false,
    };

    let body = state.groq().complete(api_key, &payload).await?;

    let reply = extract_reply(&body).ok_or(AppError::EmptyReply)?;

    tracing::info!(
        request_id = %request_id,
        reply_preview = %preview(&reply, 120),
        reply_length = reply.len(),
        "Upstream reply extracted"
    );

    let metadata = ReplyMetadata {
        model: payload.model,
        word_count: reply.split_whitespace().count(),
        finish_reason: finish_reason(&body),
        tokens_used: tokens_used(&body),
    };

    Ok(Json(ChatReply {
        ok: true,
        reply,
        metadata,
    }))
}

/// First `max_chars` characters of a string, for log lines
///
/// Counts characters rather than bytes so multi-byte text is never split
/// mid-codepoint.
fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
