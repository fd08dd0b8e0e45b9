//! Request dispatch.
//!
//! One dispatch turns a composed request plus the current variable map into
//! a single outbound call and a normalized result: Preparing (interpolate
//! URL, headers, body), InFlight (the transport call), then Succeeded or
//! Failed. There is no state across dispatches, no retry, and no timeout
//! imposed here — the transport's own policy bounds the wait.
//!
//! HTTP-level failure is not dispatch failure: a 404 with a JSON body is a
//! `Succeeded` outcome carrying status 404. Only transport-level failure
//! (DNS, connection, timeout, malformed URL) produces `Failed`, and it is
//! returned as data, never raised.

pub mod error;
pub mod transport;

pub use error::TransportError;
pub use transport::{ReqwestTransport, Transport, TransportCall, TransportResponse};

use crate::error::ValidationError;
use crate::models::{ComposedRequest, DispatchOutcome, DispatchSuccess, ResponseBody};
use crate::variables::{substitute, substitute_shallow, VariableMap, VariableSource};
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Orchestrates interpolation and transport for one request at a time.
///
/// The variable source is consulted fresh on every dispatch, so edits to the
/// user's variables take effect on the next send.
pub struct RequestDispatcher<T: Transport, V: VariableSource> {
    transport: T,
    variables: V,
}

impl<T: Transport, V: VariableSource> RequestDispatcher<T, V> {
    /// Creates a dispatcher over a transport and a variable source.
    pub fn new(transport: T, variables: V) -> Self {
        Self {
            transport,
            variables,
        }
    }

    /// Executes one composed request.
    ///
    /// # Errors
    ///
    /// `ValidationError` when the composed header text is not a JSON object
    /// — a caller precondition, reported immediately and without any network
    /// activity. Transport failure is not an `Err`: it resolves to
    /// `Ok(DispatchOutcome::Failed { .. })`.
    pub async fn dispatch(
        &self,
        request: &ComposedRequest,
    ) -> Result<DispatchOutcome, ValidationError> {
        let variables = self.variables.variable_map();
        let call = prepare(request, &variables)?;

        let started = Instant::now();
        match self.transport.perform(call).await {
            Ok(response) => Ok(DispatchOutcome::Succeeded(normalize(
                response,
                started.elapsed(),
            ))),
            Err(error) => Ok(DispatchOutcome::Failed {
                message: error.to_string(),
            }),
        }
    }
}

/// Builds the outbound call: interpolates the URL, parses and interpolates
/// headers, stages the body, and enforces the body-less method policy.
///
/// Each stage is independent: a body that is not JSON does not affect header
/// or URL handling, it is simply sent as interpolated raw text.
pub fn prepare(
    request: &ComposedRequest,
    variables: &VariableMap,
) -> Result<TransportCall, ValidationError> {
    let url = substitute(&request.url, variables);
    let headers = prepare_headers(&request.headers, variables)?;

    // GET and HEAD never carry a body, regardless of what was composed;
    // many servers reject bodies on these methods.
    let body = if request.method.is_bodyless() {
        None
    } else {
        prepare_body(&request.body, variables)
    };

    Ok(TransportCall {
        method: request.method,
        url,
        headers,
        body,
    })
}

/// Parses header text as a JSON object and interpolates its string values.
///
/// Empty text means no headers. Non-string values are kept and serialized
/// compactly (a numeric header value becomes its digit string).
fn prepare_headers(
    text: &str,
    variables: &VariableMap,
) -> Result<HashMap<String, String>, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(HashMap::new());
    }

    let parsed: Value = serde_json::from_str(trimmed)
        .map_err(|e| ValidationError::MalformedHeaders(e.to_string()))?;
    let object = match parsed {
        Value::Object(map) => map,
        other => {
            return Err(ValidationError::MalformedHeaders(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            )))
        }
    };

    Ok(substitute_shallow(&object, variables)
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                Value::String(text) => text,
                other => other.to_string(),
            };
            (name, value)
        })
        .collect())
}

/// Stages the body text for transport.
///
/// A body that parses as JSON is interpolated over its canonical
/// serialization, so placeholders inside nested fields resolve even though
/// the body is stored as one opaque string. Anything else is interpolated as
/// raw text — a non-JSON body is data, not an error. The JSON literal
/// `null` (the composer's "no body") and empty text send nothing.
fn prepare_body(text: &str, variables: &VariableMap) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Null) => None,
        Ok(value) => {
            let canonical = serde_json::to_string(&value).unwrap_or_else(|_| trimmed.to_string());
            Some(substitute(&canonical, variables))
        }
        Err(_) => Some(substitute(trimmed, variables)),
    }
}

/// Normalizes a raw transport response for presentation.
///
/// The body is parsed as JSON exactly once; failure to parse means the raw
/// text is carried instead. Status codes pass through untouched.
fn normalize(response: TransportResponse, elapsed: Duration) -> DispatchSuccess {
    let body = match serde_json::from_str::<Value>(&response.body_text) {
        Ok(value) => ResponseBody::Structured(value),
        Err(_) => ResponseBody::Text(response.body_text),
    };

    DispatchSuccess {
        status: response.status,
        status_text: response.status_text,
        elapsed_ms: elapsed.as_millis() as u64,
        byte_length: response.byte_length,
        body,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
