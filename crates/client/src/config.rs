//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GAME_HARBOR_API_URL` - Base URL of the storefront backend
//!   (default: `http://localhost:8080`)
//! - `GAME_HARBOR_SESSION_FILE` - Path of the persisted session file used by
//!   shells that want the session to survive restarts. When unset, callers
//!   typically fall back to an in-memory store.

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default backend location for local development.
const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Configuration for a [`GameHarborApi`](crate::GameHarborApi) instance.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the storefront backend. Resource paths are appended to
    /// this verbatim, so it should not carry a trailing slash.
    pub api_url: Url,
    /// Where the file-backed session store keeps its data, if any.
    pub session_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `GAME_HARBOR_API_URL` is set but not a valid
    /// absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_env_or_default("GAME_HARBOR_API_URL", DEFAULT_API_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("GAME_HARBOR_API_URL".to_string(), e.to_string())
            })?;
        let session_file = std::env::var("GAME_HARBOR_SESSION_FILE")
            .ok()
            .map(PathBuf::from);

        Ok(Self {
            api_url,
            session_file,
        })
    }

    /// Build a configuration pointing at an explicit backend URL.
    ///
    /// Used by tests and by shells that resolve the URL themselves.
    #[must_use]
    pub const fn new(api_url: Url) -> Self {
        Self {
            api_url,
            session_file: None,
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_session_file() {
        let config = ClientConfig::new("http://localhost:9999".parse().unwrap());
        assert!(config.session_file.is_none());
        assert_eq!(config.api_url.as_str(), "http://localhost:9999/");
    }

    #[test]
    fn test_default_url_parses() {
        let url = DEFAULT_API_URL.parse::<Url>().unwrap();
        assert_eq!(url.port(), Some(8080));
    }
}
