//! Artifactory Authentication
//!
//! API-key authentication. The key is attached as a default header on the
//! HTTP client when the connection is built, so every request carries it.

use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue};

/// Header Artifactory reads the API key from
pub const API_KEY_HEADER: &str = "X-JFrog-Art-Api";

/// Artifactory API key
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Default headers for an authenticated client
    /// Security: the header value is marked sensitive so it never shows up in
    /// reqwest's debug output
    pub fn header_map(&self) -> Result<HeaderMap> {
        let mut value = HeaderValue::from_str(self.0.trim()).map_err(|_| Error::InvalidConfig {
            message: "API key contains characters that are not valid in an HTTP header"
                .to_string(),
        })?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, value);
        Ok(headers)
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}
