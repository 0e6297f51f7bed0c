//! chat-relay HTTP server
//!
//! Starts an Axum web server that relays chat prompts to the upstream Groq
//! API. With SERVERLESS set, the process skips binding a socket; the router
//! is mounted by the host runtime via the library's `handlers::app`.

use chat_relay::{
    config::Config,
    handlers::{self, AppState},
    telemetry,
};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize telemetry
    telemetry::init(&config.log_level);

    if config.api_key.is_none() {
        tracing::warn!("GROQ_API_KEY not set; chat requests will fail until it is configured");
    }

    let addr = SocketAddr::from((
        config
            .host
            .parse::<std::net::IpAddr>()
            .unwrap_or_else(|_| std::net::IpAddr::from([0, 0, 0, 0])),
        config.port,
    ));
    let serverless = config.serverless;

    tracing::info!(model = %config.model, "Starting chat relay");

    // Build router
    let app = handlers::app(AppState::new(config));

    if serverless {
        tracing::info!("SERVERLESS set; not binding a socket, host runtime serves the router");
        return Ok(());
    }

    tracing::info!("Listening on {}", addr);
    tracing::info!("Health check available at http://{}/", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
