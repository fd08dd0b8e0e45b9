//! HTTP request data models.
//!
//! This module defines the HTTP method enum and the composer payload: the
//! method, URL, header text, and body text a user has typed into the request
//! composer. Header and body text stay opaque strings until dispatch time so
//! that `{{variable}}` placeholders and non-JSON content survive untouched.

use serde::{Deserialize, Serialize};

/// HTTP request method.
///
/// Represents all standard HTTP methods as defined in RFC 7231 and RFC 5789.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
    /// HTTP TRACE method - perform a message loop-back test
    TRACE,
    /// HTTP CONNECT method - establish a tunnel to the server
    CONNECT,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::TRACE => "TRACE",
            HttpMethod::CONNECT => "CONNECT",
        }
    }

    /// Parses a string into an HttpMethod.
    ///
    /// # Arguments
    ///
    /// * `s` - A string slice representing the HTTP method
    ///
    /// # Returns
    ///
    /// `Some(HttpMethod)` if the string is a valid HTTP method, `None` otherwise.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "PATCH" => Some(HttpMethod::PATCH),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            "HEAD" => Some(HttpMethod::HEAD),
            "TRACE" => Some(HttpMethod::TRACE),
            "CONNECT" => Some(HttpMethod::CONNECT),
            _ => None,
        }
    }

    /// Whether this method never carries a request body.
    ///
    /// Many servers reject `GET` and `HEAD` requests that include a body, so
    /// the dispatcher silently drops any composed body for these methods.
    pub fn is_bodyless(&self) -> bool {
        matches!(self, HttpMethod::GET | HttpMethod::HEAD)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request as composed by the user, before interpolation and dispatch.
///
/// `headers` and `body` are the raw editor text: `headers` is expected to be
/// a JSON object of key/value pairs once interpolated, `body` may be JSON or
/// any raw text. Both may contain `{{variable}}` placeholders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComposedRequest {
    /// HTTP method (GET, POST, PUT, DELETE, etc.).
    pub method: HttpMethod,

    /// Target URL for the request.
    ///
    /// May contain variables in the format `{{variableName}}` that will be
    /// resolved before execution.
    pub url: String,

    /// Request header text as a serialized JSON object.
    ///
    /// Parsed only at dispatch time; an empty string means no headers.
    #[serde(default)]
    pub headers: String,

    /// Request body text, serialized JSON or raw text.
    ///
    /// An empty string (or the JSON literal `null`) means no body.
    #[serde(default)]
    pub body: String,
}

impl ComposedRequest {
    /// Creates a new ComposedRequest with no headers or body.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: String::new(),
            body: String::new(),
        }
    }

    /// Checks if the request has a non-empty body.
    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }
}
