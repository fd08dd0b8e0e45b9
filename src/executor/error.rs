//! Transport-level error types.
//!
//! A `TransportError` means the request never produced an HTTP response:
//! DNS failure, connection refused, timeout, malformed URL. HTTP-level
//! failure (4xx/5xx) is not an error here — it is a normal response the
//! dispatcher reports as a succeeded outcome.

use std::fmt;

/// Errors that can occur before or below the HTTP response.
#[derive(Debug)]
pub enum TransportError {
    /// Network error occurred during request execution.
    ///
    /// This includes connection failures, DNS resolution errors,
    /// and other network-level issues.
    Network(String),

    /// Request timed out before completion.
    ///
    /// Whether and when a timeout fires is the transport's own policy; the
    /// core imposes none.
    Timeout,

    /// The URL could not be parsed or is malformed.
    InvalidUrl(String),

    /// The URL scheme is not HTTP or HTTPS.
    UnsupportedProtocol(String),

    /// TLS/SSL error occurred during HTTPS connection.
    Tls(String),

    /// The outbound request could not be constructed.
    Build(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network(msg) => write!(f, "Network error: {}", msg),
            TransportError::Timeout => write!(f, "Request timed out"),
            TransportError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            TransportError::UnsupportedProtocol(protocol) => {
                write!(f, "Unsupported protocol: {}", protocol)
            }
            TransportError::Tls(msg) => write!(f, "TLS/SSL error: {}", msg),
            TransportError::Build(msg) => write!(f, "Request build error: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

/// Convert reqwest errors to TransportError.
///
/// Maps reqwest's error types to our variants for consistent reporting in
/// failed dispatch outcomes.
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() || err.is_request() {
            TransportError::Network(err.to_string())
        } else if err.is_builder() {
            TransportError::Build(err.to_string())
        } else if err.to_string().contains("certificate")
            || err.to_string().contains("TLS")
            || err.to_string().contains("SSL")
        {
            TransportError::Tls(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

/// Convert URL parsing errors to TransportError.
impl From<url::ParseError> for TransportError {
    fn from(err: url::ParseError) -> Self {
        TransportError::InvalidUrl(err.to_string())
    }
}
