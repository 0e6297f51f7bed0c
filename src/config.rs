//! Configuration management for the chat relay
//!
//! All settings are read from the process environment exactly once at startup
//! and frozen into an immutable `Config`. Handlers receive the config through
//! application state instead of reading environment variables themselves.

use crate::error::{AppError, AppResult};
use std::path::PathBuf;

/// Default upstream model identifier
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Default listening port
pub const DEFAULT_PORT: u16 = 4000;

/// Immutable process configuration
///
/// Constructed via [`Config::from_env`] in production. Tests build instances
/// directly with struct literal syntax.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer key for the upstream Groq API. `None` means chat requests fail
    /// with a configuration error; the health endpoint still works.
    pub api_key: Option<String>,
    /// Upstream model identifier sent in every completion payload
    pub model: String,
    /// Listen address for standalone mode
    pub host: String,
    /// Listen port for standalone mode
    pub port: u16,
    /// CORS allow-list. Empty means any origin is allowed.
    pub allowed_origins: Vec<String>,
    /// When true the process never binds a listening socket; the router is
    /// expected to be mounted by a host runtime instead.
    pub serverless: bool,
    /// Optional directory served read-only under /audio
    pub audio_dir: Option<PathBuf>,
    /// Default log level when RUST_LOG is not set
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if `PORT` is set but not a valid port
    /// number.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a `Config` from an arbitrary variable lookup
    ///
    /// Separated from [`Config::from_env`] so tests can inject variables
    /// without mutating process-global environment state.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::Config(format!("invalid PORT value: {raw:?}")))?,
            None => DEFAULT_PORT,
        };

        let allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            api_key: get("GROQ_API_KEY").filter(|key| !key.trim().is_empty()),
            model: get("GROQ_MODEL")
                .filter(|model| !model.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            allowed_origins,
            serverless: get("SERVERLESS").is_some_and(|flag| truthy(&flag)),
            audio_dir: get("AUDIO_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}

impl Default for Config {
    /// A config with no API key, the default model, and permissive CORS
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            allowed_origins: Vec::new(),
            serverless: false,
            audio_dir: None,
            log_level: "info".to_string(),
        }
    }
}

/// Interpret an environment flag value as a boolean
fn truthy(value: &str) -> bool {
    !matches!(value.trim(), "" | "0" | "false" | "no")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_defaults_with_empty_environment() {
        let config = Config::from_lookup(lookup(&[])).expect("should load");
        assert_eq!(config.api_key, None);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.allowed_origins.is_empty());
        assert!(!config.serverless);
        assert_eq!(config.audio_dir, None);
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("GROQ_API_KEY", "gsk-test"),
            ("GROQ_MODEL", "llama-3.3-70b-versatile"),
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
        ]))
        .expect("should load");
        assert_eq!(config.api_key.as_deref(), Some("gsk-test"));
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_blank_api_key_treated_as_unset() {
        let config = Config::from_lookup(lookup(&[("GROQ_API_KEY", "  ")])).expect("should load");
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = Config::from_lookup(lookup(&[("PORT", "not-a-port")]))
            .expect_err("should reject bad port");
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_allowed_origins_are_split_and_trimmed() {
        let config = Config::from_lookup(lookup(&[(
            "CORS_ALLOWED_ORIGINS",
            "https://a.example.com, https://b.example.com ,",
        )]))
        .expect("should load");
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example.com", "https://b.example.com"]
        );
    }

    #[test]
    fn test_serverless_flag_truthiness() {
        for (value, expected) in [("1", true), ("true", true), ("0", false), ("false", false)] {
            let config =
                Config::from_lookup(lookup(&[("SERVERLESS", value)])).expect("should load");
            assert_eq!(config.serverless, expected, "SERVERLESS={value}");
        }
    }
}
