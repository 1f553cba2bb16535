//! HTTP utilities for Artifactory REST API calls

use super::auth::ApiKey;
use crate::error::{Error, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for Artifactory API calls
#[derive(Clone)]
pub struct ArtifactoryHttpClient {
    client: Client,
}

impl ArtifactoryHttpClient {
    /// Create a new HTTP client that sends the API key on every request
    pub fn new(api_key: &ApiKey, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(api_key.header_map()?)
            .build()?;

        Ok(Self { client })
    }

    /// Make a GET request and parse the JSON reply
    pub async fn get(&self, url: &str, timeout: Option<Duration>) -> Result<Value> {
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        self.send_json(request, url).await
    }

    /// Make a POST request with a plain-text body and parse the JSON reply
    pub async fn post_text(&self, url: &str, body: String) -> Result<Value> {
        tracing::debug!("POST {}", url);

        let request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(body);

        self.send_json(request, url).await
    }

    /// Make a DELETE request
    /// Non-2xx replies are returned as a status, not an error
    pub async fn delete(&self, url: &str, timeout: Option<Duration>) -> Result<StatusCode> {
        tracing::debug!("DELETE {}", url);

        let mut request = self.client.delete(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("DELETE {} returned {} - {}", url, status, sanitize_for_log(&body));
        }

        Ok(status)
    }

    async fn send_json(&self, request: RequestBuilder, url: &str) -> Result<Value> {
        let response = request.send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            let message = sanitize_for_log(&body);
            tracing::error!("API error: {} - {}", status, message);
            return Err(Error::Api {
                status,
                url: url.to_string(),
                message,
            });
        }

        // Handle empty response
        if body.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Format an Artifactory API error for display
/// Security: maps errors to generic messages instead of echoing server replies
pub fn format_api_error(error: &Error) -> String {
    match error {
        Error::StatisticsUnsupported { .. }
        | Error::UnknownAttribute { .. }
        | Error::MissingAttribute { .. }
        | Error::RepositoryNotFound { .. }
        | Error::AmbiguousRepository { .. }
        | Error::EmptyQuery
        | Error::InvalidConfig { .. }
        | Error::InvalidBaseUrl { .. } => return error.to_string(),
        _ => {}
    }

    if let Some(status) = error.status() {
        return match status.as_u16() {
            400 => "Invalid request. Check your query or parameters.".to_string(),
            401 => "Authentication failed. Check your Artifactory API key.".to_string(),
            403 => "Permission denied. Check your Artifactory permissions.".to_string(),
            404 => "Resource not found.".to_string(),
            409 => "Resource conflict. The item may be locked or in use.".to_string(),
            429 => "Rate limit exceeded. Please try again later.".to_string(),
            500..=599 => "Artifactory is temporarily unavailable. Please try again.".to_string(),
            _ => "Request failed. Check your network connection and try again.".to_string(),
        };
    }

    if let Error::Transport(e) = error {
        if e.is_timeout() {
            return "Request timed out.".to_string();
        }
        if e.is_connect() {
            return "Could not connect to Artifactory.".to_string();
        }
    }

    // Truncate long error messages and remove potential sensitive data
    let error_str = error.to_string();
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(80)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16) -> Error {
        Error::Api {
            status: StatusCode::from_u16(status).unwrap(),
            url: "http://rt/api/storage/x".to_string(),
            message: "{\"errors\":[]}".to_string(),
        }
    }

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(sanitized.contains("[truncated, 500 bytes total]"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("a\nb\tc d"), "abc d");
    }

    #[test]
    fn test_format_api_error_maps_status_codes() {
        assert!(format_api_error(&api_error(401)).contains("API key"));
        assert!(format_api_error(&api_error(403)).contains("Permission denied"));
        assert_eq!(format_api_error(&api_error(404)), "Resource not found.");
        assert!(format_api_error(&api_error(503)).contains("temporarily unavailable"));
    }

    #[test]
    fn test_format_api_error_keeps_local_messages() {
        let err = Error::RepositoryNotFound {
            key: "libs-release".to_string(),
        };
        assert_eq!(format_api_error(&err), "Repository not found: libs-release");
    }
}
