//! Error types for the chat relay
//!
//! All errors implement `IntoResponse` for Axum handlers. Every failure mode
//! is recovered at the handler boundary and serialized as
//! `{"ok": false, "error": ...}` with the status the relay contract requires;
//! none are fatal to the process.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    /// Client sent a request the relay cannot forward (HTTP 400)
    #[error("{0}")]
    Validation(String),

    /// Server-side configuration is missing or invalid (HTTP 500)
    #[error("{0}")]
    Config(String),

    /// The upstream API reported a failure status (HTTP 502)
    ///
    /// The upstream status and body are echoed to the client for diagnosis.
    #[error("Groq API error (upstream status {status})")]
    Upstream {
        status: u16,
        body: serde_json::Value,
    },

    /// The upstream call failed before producing a parseable response
    /// (network error or malformed body, HTTP 500)
    #[error("Server error calling Groq: {0}")]
    Transport(String),

    /// The upstream succeeded but produced no usable text (HTTP 500)
    #[error("Empty response from model")]
    EmptyReply,

    /// Endpoint is an explicit stub (HTTP 501)
    #[error("TTS not implemented on backend")]
    TtsNotImplemented,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "ok": false, "error": msg }),
            ),
            Self::Config(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "ok": false, "error": msg }),
            ),
            Self::Upstream {
                status: upstream_status,
                body,
            } => (
                StatusCode::BAD_GATEWAY,
                serde_json::json!({
                    "ok": false,
                    "error": "Groq API error",
                    "status": upstream_status,
                    "body": body,
                }),
            ),
            Self::Transport(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({
                    "ok": false,
                    "error": "Server error calling Groq",
                    "details": details,
                }),
            ),
            Self::EmptyReply => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "ok": false, "error": "Empty response from model" }),
            ),
            Self::TtsNotImplemented => (
                StatusCode::NOT_IMPLEMENTED,
                serde_json::json!({
                    "ok": false,
                    "error": "TTS not implemented on backend",
                    "suggestion": "Use browser speechSynthesis",
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_400() {
        let err = AppError::Validation("Missing 'prompt' in request body".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_config_error_maps_to_500() {
        let err = AppError::Config("GROQ_API_KEY not configured".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upstream_error_maps_to_502() {
        let err = AppError::Upstream {
            status: 429,
            body: serde_json::json!({"error": "rate limited"}),
        };
        assert_eq!(err.to_string(), "Groq API error (upstream status 429)");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_transport_error_maps_to_500() {
        let err = AppError::Transport("connection refused".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_empty_reply_maps_to_500() {
        let response = AppError::EmptyReply.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_tts_stub_maps_to_501() {
        let response = AppError::TtsNotImplemented.into_response();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }
}
