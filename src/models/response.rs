//! Normalized dispatch outcome models.
//!
//! Every dispatch resolves to a [`DispatchOutcome`] rather than raising: an
//! HTTP-level failure (4xx/5xx) is still a `Succeeded` outcome carrying its
//! status code, while `Failed` is reserved for transport-level failure (DNS,
//! connection refused, timeout). The caller never needs error handling around
//! a dispatch — every outcome is representable as data.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The result of one dispatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum DispatchOutcome {
    /// The transport produced a response, whatever its status code.
    Succeeded(DispatchSuccess),

    /// The transport failed before a response existed. No partial data.
    Failed {
        /// Human-readable description of the failure.
        message: String,
    },
}

impl DispatchOutcome {
    /// Returns the success payload, or `None` for a failed dispatch.
    pub fn succeeded(&self) -> Option<&DispatchSuccess> {
        match self {
            DispatchOutcome::Succeeded(success) => Some(success),
            DispatchOutcome::Failed { .. } => None,
        }
    }

    /// Checks if this outcome is a transport-level failure.
    pub fn is_failed(&self) -> bool {
        matches!(self, DispatchOutcome::Failed { .. })
    }
}

/// A completed HTTP exchange, normalized for presentation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DispatchSuccess {
    /// HTTP status code (e.g., 200, 404, 500).
    pub status: u16,

    /// HTTP status text (e.g., "OK", "Not Found").
    pub status_text: String,

    /// Wall-clock time from send to complete response, in milliseconds.
    pub elapsed_ms: u64,

    /// Raw response body length in bytes, before any text decoding.
    pub byte_length: usize,

    /// The response body, parsed when it is valid JSON.
    pub body: ResponseBody,
}

impl DispatchSuccess {
    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Checks if the response status indicates a redirection (3xx).
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// Checks if the response status indicates a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Checks if the response status indicates a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

/// A response body, parsed as JSON when possible.
///
/// The parse attempt happens exactly once, at normalization time; a body that
/// is not valid JSON is carried verbatim as text, never dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ResponseBody {
    /// The body parsed as JSON.
    Structured(Value),

    /// The body as raw text.
    Text(String),
}

impl ResponseBody {
    /// Whether the body parsed as JSON.
    pub fn is_structured(&self) -> bool {
        matches!(self, ResponseBody::Structured(_))
    }

    /// Returns the parsed JSON value, if the body is structured.
    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            ResponseBody::Structured(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn success_with_status(status: u16) -> DispatchSuccess {
        DispatchSuccess {
            status,
            status_text: "test".to_string(),
            elapsed_ms: 12,
            byte_length: 0,
            body: ResponseBody::Text(String::new()),
        }
    }

    #[test]
    fn test_status_checks() {
        assert!(success_with_status(200).is_success());
        assert!(success_with_status(204).is_success());
        assert!(!success_with_status(200).is_client_error());

        assert!(success_with_status(301).is_redirect());
        assert!(success_with_status(404).is_client_error());
        assert!(success_with_status(500).is_server_error());
        assert!(!success_with_status(500).is_success());
    }

    #[test]
    fn test_outcome_accessors() {
        let succeeded = DispatchOutcome::Succeeded(success_with_status(404));
        assert!(!succeeded.is_failed());
        assert_eq!(succeeded.succeeded().unwrap().status, 404);

        let failed = DispatchOutcome::Failed {
            message: "connection refused".to_string(),
        };
        assert!(failed.is_failed());
        assert!(failed.succeeded().is_none());
    }

    #[test]
    fn test_response_body_structured() {
        let body = ResponseBody::Structured(json!({"id": 1}));
        assert!(body.is_structured());
        assert_eq!(body.as_structured().unwrap()["id"], 1);

        let text = ResponseBody::Text("<html>".to_string());
        assert!(!text.is_structured());
        assert!(text.as_structured().is_none());
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = DispatchOutcome::Succeeded(DispatchSuccess {
            status: 200,
            status_text: "OK".to_string(),
            elapsed_ms: 42,
            byte_length: 13,
            body: ResponseBody::Structured(json!({"ok": true})),
        });

        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"outcome\":\"succeeded\""));
        assert!(json.contains("\"status\":200"));

        let deserialized: DispatchOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, outcome);
    }

    #[test]
    fn test_failed_serialization() {
        let outcome = DispatchOutcome::Failed {
            message: "dns error".to_string(),
        };

        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"outcome\":\"failed\""));

        let deserialized: DispatchOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, outcome);
    }
}
