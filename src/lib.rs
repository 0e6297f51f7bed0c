//! chat-relay - HTTP relay for Groq's OpenAI-compatible completions API
//!
//! Accepts a text prompt over HTTP, forwards it to the upstream
//! chat-completions endpoint, and returns the extracted reply text. The
//! router built by [`handlers::app`] is the embedding surface for serverless
//! deployments; the binary serves the same router standalone.

pub mod config;
pub mod error;
pub mod extract;
pub mod groq;
pub mod handlers;
pub mod middleware;
pub mod telemetry;
