//! Text-to-speech endpoint (stub)
//!
//! Deliberately answers 501 instead of silently no-opping so clients can
//! detect the missing capability and fall back to client-side synthesis.
//! Never makes an upstream call.

use crate::error::{AppError, AppResult};
use axum::Json;
use serde::Deserialize;

/// TTS request from client
#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    #[serde(default)]
    text: Option<String>,
}

/// POST /api/tts handler
///
/// Missing `text` is a 400 validation error; a present `text` always gets the
/// 501 stub response regardless of configuration.
pub async fn handler(Json(request): Json<TtsRequest>) -> AppResult<()> {
    let _text = request
        .text
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| AppError::Validation("Missing 'text' in request body".to_string()))?;

    Err(AppError::TtsNotImplemented)
}
