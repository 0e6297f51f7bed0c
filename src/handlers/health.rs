//! Health check endpoint
//!
//! Reports process-wide readiness: whether the upstream key is configured and
//! which model is active. No side effects, no network access.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::handlers::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub message: &'static str,
    pub provider: &'static str,
    /// Active upstream model identifier
    pub model: String,
    /// Whether GROQ_API_KEY is present; chat requests fail 500 without it
    pub key_configured: bool,
}

/// GET / handler
pub async fn handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            ok: true,
            message: "chat relay is running",
            provider: "groq",
            model: state.config().model.clone(),
            key_configured: state.config().api_key.is_some(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_health_without_key() {
        let state = AppState::new(Config::default());
        let (status, Json(body)) = handler(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.ok);
        assert_eq!(body.provider, "groq");
        assert!(!body.key_configured);
    }

    #[tokio::test]
    async fn test_health_reports_configured_key_and_model() {
        let config = Config {
            api_key: Some("gsk-test".to_string()),
            model: "llama-3.3-70b-versatile".to_string(),
            ..Config::default()
        };
        let (status, Json(body)) = handler(State(AppState::new(config))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.key_configured);
        assert_eq!(body.model, "llama-3.3-70b-versatile");
    }
}
