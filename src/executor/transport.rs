//! The network transport collaborator.
//!
//! The dispatcher hands a fully interpolated [`TransportCall`] to a
//! [`Transport`] and gets back either a raw response or a
//! [`TransportError`]. [`ReqwestTransport`] is the production
//! implementation; tests substitute stubs to observe exactly what would go
//! on the wire.

use super::error::TransportError;
use crate::models::HttpMethod;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// One fully prepared outbound call: method, interpolated URL, interpolated
/// headers, and body text (already dropped for body-less methods).
#[derive(Debug, Clone, PartialEq)]
pub struct TransportCall {
    /// HTTP method.
    pub method: HttpMethod,

    /// Target URL, placeholders already resolved.
    pub url: String,

    /// Header key/value pairs, placeholders already resolved.
    pub headers: HashMap<String, String>,

    /// Body text, or `None` when there is nothing to send.
    pub body: Option<String>,
}

/// The raw result of a completed HTTP exchange, before normalization.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,

    /// HTTP status text (e.g., "OK", "Not Found").
    pub status_text: String,

    /// Response body decoded as text (lossy for non-UTF-8 bytes).
    pub body_text: String,

    /// Raw response body length in bytes.
    pub byte_length: usize,
}

/// Performs one HTTP call.
///
/// May suspend indefinitely; any timeout is the implementation's own policy.
/// Cancellation is not supported — once started, a call runs to completion
/// or failure.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes the call and returns the raw response.
    async fn perform(&self, call: TransportCall) -> Result<TransportResponse, TransportError>;
}

/// Production transport backed by reqwest.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with reqwest's default client (no timeout).
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Creates a transport whose requests time out after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn perform(&self, call: TransportCall) -> Result<TransportResponse, TransportError> {
        validate_url(&call.url)?;

        let method = match call.method {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::DELETE => reqwest::Method::DELETE,
            HttpMethod::PATCH => reqwest::Method::PATCH,
            HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
            HttpMethod::HEAD => reqwest::Method::HEAD,
            HttpMethod::TRACE => reqwest::Method::TRACE,
            HttpMethod::CONNECT => reqwest::Method::CONNECT,
        };

        let mut builder = self.client.request(method, &call.url);
        for (name, value) in &call.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = call.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(TransportError::from)?;

        let status = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let byte_length = bytes.len();
        let body_text = String::from_utf8_lossy(&bytes).into_owned();

        Ok(TransportResponse {
            status,
            status_text,
            body_text,
            byte_length,
        })
    }
}

/// Validates that the URL is well-formed and uses a supported protocol.
fn validate_url(url: &str) -> Result<(), TransportError> {
    let parsed = url::Url::parse(url).map_err(|e| TransportError::InvalidUrl(e.to_string()))?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(TransportError::UnsupportedProtocol(format!(
            "Only HTTP and HTTPS are supported, got: {}",
            scheme
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_valid_http() {
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url("http://example.com/path").is_ok());
        assert!(validate_url("http://example.com:8080").is_ok());
    }

    #[test]
    fn test_validate_url_valid_https() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("https://api.example.com/v1/users").is_ok());
    }

    #[test]
    fn test_validate_url_invalid() {
        assert!(validate_url("not a url").is_err());
        assert!(validate_url("").is_err());
        assert!(validate_url("://missing-scheme").is_err());
    }

    #[test]
    fn test_validate_url_unsupported_protocol() {
        let result = validate_url("ftp://example.com");
        match result {
            Err(TransportError::UnsupportedProtocol(msg)) => {
                assert!(msg.contains("ftp"));
            }
            other => panic!("Expected UnsupportedProtocol error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_url_fails_before_any_network() {
        let transport = ReqwestTransport::new();
        let call = TransportCall {
            method: HttpMethod::GET,
            url: "not-a-valid-url".to_string(),
            headers: HashMap::new(),
            body: None,
        };

        let result = transport.perform(call).await;
        assert!(matches!(result, Err(TransportError::InvalidUrl(_))));
    }
}
