//! HTTP request handlers for the chat relay API

use crate::config::Config;
use crate::groq::GroqClient;
use crate::middleware::request_id_middleware;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use axum::{Router, middleware};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod chat;
pub mod health;
pub mod tts;

/// Application state shared across all handlers
///
/// Contains the immutable configuration and the upstream client. Both are
/// Arc'd for cheap cloning across Axum handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    groq: Arc<GroqClient>,
}

impl AppState {
    /// Create an AppState targeting the production Groq endpoint
    pub fn new(config: Config) -> Self {
        Self::with_client(config, GroqClient::new())
    }

    /// Create an AppState with an explicit upstream client
    ///
    /// Used by tests to point the relay at a local mock server.
    pub fn with_client(config: Config, groq: GroqClient) -> Self {
        Self {
            config: Arc::new(config),
            groq: Arc::new(groq),
        }
    }

    /// Get reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get reference to the upstream client
    pub fn groq(&self) -> &GroqClient {
        &self.groq
    }
}

/// Build the application router
///
/// This is the single routing surface for both deployment shapes: standalone
/// mode serves it from `main`, embedded mode mounts it from a host runtime.
/// `/api/chat` and `/api/generate` route to the same handler for client
/// compatibility.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(state.config());

    let mut router = Router::new()
        .route("/", get(health::handler))
        .route("/api/chat", post(chat::handler))
        .route("/api/generate", post(chat::handler))
        .route("/api/tts", post(tts::handler));

    if let Some(audio_dir) = &state.config().audio_dir {
        router = router.nest_service("/audio", ServeDir::new(audio_dir));
    }

    router
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS layer from the configured allow-list
///
/// An empty allow-list means any origin; browsers require the preflight
/// OPTIONS request to succeed before they send the real POST. Origins that do
/// not parse as header values are skipped with a warning rather than taking
/// the process down.
fn cors_layer(config: &Config) -> CorsLayer {
    let origin = if config.allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Skipping unparseable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
