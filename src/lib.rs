//! API Preview core engine.
//!
//! This crate is the engine behind an in-editor HTTP request composer: it
//! owns the persistent hierarchy of saved requests, the `{{variable}}`
//! interpolation pass, and the dispatch of composed requests through a
//! network transport. The editor-facing surface (webview rendering, command
//! wiring, naming prompts) is a thin shim that calls into this crate and
//! renders what comes back.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - **models**: Core data structures for composed requests and normalized
//!   dispatch outcomes
//! - **collection**: The durable folder/request hierarchy and its mutation
//!   API ([`collection::ItemTree`])
//! - **variables**: The variable map and `{{name}}` substitution engine
//! - **executor**: Request dispatch through a pluggable transport
//!   ([`executor::RequestDispatcher`], [`executor::Transport`])
//! - **storage**: Durable key-value storage backing the collection and
//!   history ([`storage::DurableStore`])
//! - **config**: Composer settings and the fresh-on-every-send variable
//!   source
//! - **history**: The flat, capped list of recently sent requests
//!
//! # Dispatch flow
//!
//! The presentation layer reads a saved request from the tree (by value),
//! loads it into the composer, and hands a [`models::ComposedRequest`] to a
//! [`executor::RequestDispatcher`]. The dispatcher snapshots the current
//! variable map, interpolates URL, headers, and body, drops the body for
//! GET/HEAD, performs the transport call, and resolves to a
//! [`models::DispatchOutcome`] — a 4xx/5xx response is a succeeded outcome
//! with that status; only transport failure is a failed one. On an explicit
//! "save", the presentation layer upserts the request into the tree,
//! optionally nested in a chosen folder.
//!
//! # Example
//!
//! ```no_run
//! use api_preview::collection::{ItemTree, SavedRequest};
//! use api_preview::executor::{ReqwestTransport, RequestDispatcher};
//! use api_preview::models::{ComposedRequest, HttpMethod};
//! use api_preview::storage::MemoryStore;
//! use api_preview::variables::VariableMap;
//!
//! # async fn example() {
//! let mut tree = ItemTree::new(MemoryStore::new());
//! let folder = tree.create_folder("Auth").unwrap();
//!
//! let mut request = SavedRequest::new("Login", HttpMethod::POST, "https://{{host}}/login");
//! request.body = r#"{"user": "{{user}}"}"#.to_string();
//! let saved = tree.upsert_request(request, Some(&folder.id)).unwrap();
//!
//! let mut variables = VariableMap::new();
//! variables.insert("host".to_string(), "api.example.com".to_string());
//! variables.insert("user".to_string(), "alice".to_string());
//!
//! let dispatcher = RequestDispatcher::new(ReqwestTransport::new(), variables);
//! let composed = ComposedRequest::from(&saved);
//! let outcome = dispatcher.dispatch(&composed).await.unwrap();
//! # let _ = outcome;
//! # }
//! ```

pub mod collection;
pub mod config;
pub mod error;
pub mod executor;
pub mod history;
pub mod models;
pub mod storage;
pub mod variables;
