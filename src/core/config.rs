//! Run configuration.
//!
//! Built once by the CLI after flag, environment, and prompt resolution, then
//! handed to the updater by reference. Nothing in `core` reads flags or the
//! environment directly.

use std::fmt;
use std::time::Duration;

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants;
use crate::core::types::RepoSlug;
use crate::error::{ConfigError, Result};

/// Immutable settings for a single run.
#[derive(Clone)]
pub struct Config {
    repo: RepoSlug,
    token: Zeroizing<String>,
    api_url: String,
    timeout: Duration,
}

impl Config {
    /// Create a configuration with the default API URL and timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the token is blank.
    pub fn new(repo: RepoSlug, token: impl Into<String>) -> Result<Self> {
        let token = Zeroizing::new(token.into().trim().to_string());
        if token.is_empty() {
            return Err(ConfigError::Missing { field: "token" }.into());
        }

        Ok(Self {
            repo,
            token,
            api_url: constants::DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(constants::DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Override the API base URL (GitHub Enterprise, tests).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` unless the URL is http(s).
    pub fn with_api_url(mut self, url: &str) -> Result<Self> {
        let url = url.trim().trim_end_matches('/');
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: "api-url",
                reason: format!("'{}' is not an http(s) URL", url),
            }
            .into());
        }
        debug!(api_url = url, "using custom API URL");
        self.api_url = url.to_string();
        Ok(self)
    }

    /// Override the per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "timeout",
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// Target repository.
    pub fn repo(&self) -> &RepoSlug {
        &self.repo
    }

    /// Access token, sent as a bearer credential.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// API base URL without a trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("repo", &self.repo)
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
