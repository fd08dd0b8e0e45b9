//! Integration tests for the reqwest transport against a local mock server.

use api_preview::executor::{
    ReqwestTransport, RequestDispatcher, Transport, TransportCall, TransportError,
};
use api_preview::models::{ComposedRequest, HttpMethod};
use api_preview::variables::VariableMap;
use std::collections::HashMap;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn call(method: HttpMethod, url: String) -> TransportCall {
    TransportCall {
        method,
        url,
        headers: HashMap::new(),
        body: None,
    }
}

#[tokio::test]
async fn test_get_returns_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"users": [{"name": "Alice"}]}"#),
        )
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new();
    let response = transport
        .perform(call(HttpMethod::GET, format!("{}/users", server.uri())))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.status_text, "OK");
    assert!(response.body_text.contains("Alice"));
    assert_eq!(response.byte_length, response.body_text.len());
}

#[tokio::test]
async fn test_404_is_a_response_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error": "missing"}"#))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new();
    let response = transport
        .perform(call(HttpMethod::GET, format!("{}/nope", server.uri())))
        .await
        .unwrap();

    assert_eq!(response.status, 404);
    assert_eq!(response.status_text, "Not Found");
}

#[tokio::test]
async fn test_headers_and_body_are_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("X-Token", "t1"))
        .and(body_json(serde_json::json!({"u": "t1"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut outbound = call(HttpMethod::POST, format!("{}/login", server.uri()));
    outbound
        .headers
        .insert("X-Token".to_string(), "t1".to_string());
    outbound.body = Some(r#"{"u":"t1"}"#.to_string());

    let transport = ReqwestTransport::new();
    let response = transport.perform(outbound).await.unwrap();
    assert_eq!(response.status, 201);
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Nothing listens on port 1.
    let transport = ReqwestTransport::new();
    let result = transport
        .perform(call(HttpMethod::GET, "http://127.0.0.1:1/".to_string()))
        .await;

    assert!(matches!(result, Err(TransportError::Network(_))));
}

#[tokio::test]
async fn test_unsupported_scheme_rejected() {
    let transport = ReqwestTransport::new();
    let result = transport
        .perform(call(HttpMethod::GET, "ftp://example.com/".to_string()))
        .await;

    assert!(matches!(result, Err(TransportError::UnsupportedProtocol(_))));
}

#[tokio::test]
async fn test_full_dispatch_against_live_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(header("X-Token", "t1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"session": "s-1"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let mut variables = VariableMap::new();
    variables.insert("base".to_string(), server.uri());
    variables.insert("tok".to_string(), "t1".to_string());

    let dispatcher = RequestDispatcher::new(ReqwestTransport::new(), variables);

    let mut request = ComposedRequest::new(HttpMethod::POST, "{{base}}/api/login");
    request.headers = r#"{"X-Token": "{{tok}}"}"#.to_string();
    request.body = r#"{"u": "{{tok}}"}"#.to_string();

    let outcome = dispatcher.dispatch(&request).await.unwrap();
    let success = outcome.succeeded().expect("mock server responded");

    assert_eq!(success.status, 200);
    assert!(success.body.is_structured());
    assert_eq!(
        success.body.as_structured().unwrap()["session"],
        serde_json::json!("s-1")
    );
}
