//! Integration tests for the text-to-speech stub

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chat_relay::{
    config::Config,
    handlers::{self, AppState},
};
use serde_json::{Value, json};
use tower::ServiceExt;

fn post_tts(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/tts")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_tts_always_answers_not_implemented() {
    let app = handlers::app(AppState::new(Config::default()));

    let response = app
        .oneshot(post_tts(&json!({"text": "hi"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    let body = body_json(response).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "TTS not implemented on backend");
    assert_eq!(body["suggestion"], "Use browser speechSynthesis");
}

#[tokio::test]
async fn test_tts_answers_not_implemented_even_with_key_configured() {
    let config = Config {
        api_key: Some("gsk-test".to_string()),
        ..Config::default()
    };
    let app = handlers::app(AppState::new(config));

    let response = app
        .oneshot(post_tts(&json!({"text": "hi"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn test_tts_missing_text_is_bad_request() {
    let app = handlers::app(AppState::new(Config::default()));

    let response = app.oneshot(post_tts(&json!({}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "Missing 'text' in request body");
}
