//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `THREAD_SAINTS_API_URL` - Store API base URL (default: `http://localhost:5000`)
//! - `THREAD_SAINTS_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `THREAD_SAINTS_CREDENTIAL_FILE` - Durable credential path
//!   (default: `$HOME/.thread-saints/credential.json`, falling back to
//!   `./.thread-saints-credential.json` when `HOME` is unset)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client SDK configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the store's REST API.
    pub api_url: Url,
    /// Per-request timeout. The original client left this to the transport
    /// default; an explicit bound is set here so a dead backend fails a call
    /// instead of hanging it. No retries happen anywhere in this crate.
    pub http_timeout: Duration,
    /// Path of the durable credential file (the client-storage analogue).
    pub credential_file: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present. Every
    /// variable has a default, so loading only fails on malformed values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_env_or_default("THREAD_SAINTS_API_URL", DEFAULT_API_URL);
        let api_url = Url::parse(&api_url).map_err(|e| {
            ConfigError::InvalidEnvVar("THREAD_SAINTS_API_URL".to_owned(), e.to_string())
        })?;

        let timeout_secs = get_env_or_default(
            "THREAD_SAINTS_HTTP_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("THREAD_SAINTS_HTTP_TIMEOUT_SECS".to_owned(), e.to_string())
        })?;

        let credential_file = std::env::var("THREAD_SAINTS_CREDENTIAL_FILE")
            .map_or_else(|_| default_credential_file(), PathBuf::from);

        Ok(Self {
            api_url,
            http_timeout: Duration::from_secs(timeout_secs),
            credential_file,
        })
    }
}

#[cfg(test)]
impl ClientConfig {
    /// Fixed localhost configuration for unit tests; nothing is contacted.
    pub(crate) fn for_tests() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).unwrap_or_else(|_| unreachable!()),
            http_timeout: Duration::from_secs(1),
            credential_file: PathBuf::from(".thread-saints-credential.json"),
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn default_credential_file() -> PathBuf {
    std::env::var_os("HOME").map_or_else(
        || PathBuf::from(".thread-saints-credential.json"),
        |home| {
            let mut path = PathBuf::from(home);
            path.push(".thread-saints");
            path.push("credential.json");
            path
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url_parses() {
        let url = Url::parse(DEFAULT_API_URL).unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.port(), Some(5000));
    }

    #[test]
    fn test_get_env_or_default_falls_back() {
        assert_eq!(
            get_env_or_default("THREAD_SAINTS_TEST_UNSET_VAR", "fallback"),
            "fallback"
        );
    }

    #[test]
    fn test_default_credential_file_without_home() {
        // Only checks the fallback shape; HOME handling depends on the env.
        let path = default_credential_file();
        assert!(path.to_string_lossy().contains("thread-saints"));
    }
}
