//! Configuration Management
//!
//! Connection settings for an Artifactory client. Applications may embed
//! [`ClientConfig`] in their own configuration files (it is serde-friendly) or
//! build it from the environment.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the Artifactory base URL
pub const ENV_BASE_URL: &str = "ARTIFACTORY_URL";
/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "ARTIFACTORY_API_KEY";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT: &str = "ARTIFACTORY_TIMEOUT";

/// Timeout applied to delete and statistics requests unless overridden
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL, e.g. `https://example.jfrog.io/artifactory`
    pub base_url: String,
    /// API key sent in the `X-JFrog-Art-Api` header
    pub api_key: String,
    /// Per-request timeout in milliseconds; `0` disables it
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Custom User-Agent header
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_ms: None,
            user_agent: None,
        }
    }

    /// Load configuration from `ARTIFACTORY_URL`, `ARTIFACTORY_API_KEY` and
    /// the optional `ARTIFACTORY_TIMEOUT`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::InvalidConfig {
                    message: format!("{} is not set", name),
                })
        };

        let base_url = required(ENV_BASE_URL)?;
        let api_key = required(ENV_API_KEY)?;

        let timeout_ms = match lookup(ENV_TIMEOUT) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .ok()
                    .and_then(|secs| secs.checked_mul(1000))
                    .ok_or_else(|| Error::InvalidConfig {
                        message: format!(
                            "{} must be a whole number of seconds, got {:?}",
                            ENV_TIMEOUT, raw
                        ),
                    })?,
            ),
            None => None,
        };

        Ok(Self {
            base_url,
            api_key,
            timeout_ms,
            user_agent: None,
        })
    }

    /// Set the per-request timeout
    /// Sub-millisecond durations round up so a non-zero timeout never turns
    /// into "disabled"
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let mut millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        if millis == 0 && !timeout.is_zero() {
            millis = 1;
        }
        self.timeout_ms = Some(millis);
        self
    }

    /// Remove the per-request timeout
    pub fn without_timeout(mut self) -> Self {
        self.timeout_ms = Some(0);
        self
    }

    /// Effective timeout (config > default)
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS) {
            0 => None,
            millis => Some(Duration::from_millis(millis)),
        }
    }

    /// Effective User-Agent (config > crate default)
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("artifactory-storage/{}", crate::VERSION))
    }
}
