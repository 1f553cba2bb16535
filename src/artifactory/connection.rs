//! Artifactory Connection
//!
//! Pairs an authenticated HTTP client with the instance base URL. Every
//! resource object holds a clone; clones share the same underlying client.

use super::auth::ApiKey;
use super::http::ArtifactoryHttpClient;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// Connection to one Artifactory instance
#[derive(Clone)]
pub struct Connection {
    http: ArtifactoryHttpClient,
    base_url: String,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Connection {
    /// Create a connection from client configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;
        let api_key = ApiKey::new(config.api_key.as_str());
        let http = ArtifactoryHttpClient::new(&api_key, &config.effective_user_agent())?;

        Ok(Self {
            http,
            base_url,
            timeout: config.timeout(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Timeout applied to delete and statistics requests
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Make a GET request to the Artifactory API
    pub async fn get(&self, url: &str) -> Result<Value> {
        self.http.get(url, None).await
    }

    /// Make a GET request bounded by the connection timeout
    pub async fn get_with_timeout(&self, url: &str) -> Result<Value> {
        self.http.get(url, self.timeout).await
    }

    /// Make a POST request with a plain-text body
    pub async fn post_text(&self, url: &str, body: String) -> Result<Value> {
        self.http.post_text(url, body).await
    }

    /// Make a DELETE request bounded by the connection timeout
    pub async fn delete(&self, url: &str) -> Result<StatusCode> {
        self.http.delete(url, self.timeout).await
    }

    // =========================================================================
    // URL helpers
    // =========================================================================

    /// Build an Artifactory REST API URL
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// Build a storage API URL for a repository path
    /// e.g. `{base}/api/storage/libs-release/org/acme`
    pub fn storage_url(&self, repository_key: &str, path: &str) -> String {
        self.api_url(&format!("storage/{}", repository_path(repository_key, path)))
    }

    /// Build the repositories listing URL
    pub fn repositories_url(&self) -> String {
        self.api_url("repositories")
    }

    /// Build the AQL search URL
    pub fn aql_url(&self) -> String {
        self.api_url("search/aql")
    }

    /// Build the direct URL of an item (used for deletes)
    pub fn item_url(&self, repository_key: &str, path: &str) -> String {
        format!("{}/{}", self.base_url, repository_path(repository_key, path))
    }
}

/// Validate a base URL and strip trailing slashes
fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');

    let parsed = url::Url::parse(trimmed).map_err(|e| Error::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {}", parsed.scheme()),
        });
    }

    Ok(trimmed.to_string())
}

/// Join a repository key and a path into percent-encoded URL segments
fn repository_path(repository_key: &str, path: &str) -> String {
    let mut segments = vec![urlencoding::encode(repository_key).into_owned()];
    segments.extend(
        path.split('/')
            .filter(|s| !s.is_empty())
            .map(|s| urlencoding::encode(s).into_owned()),
    );
    segments.join("/")
}
