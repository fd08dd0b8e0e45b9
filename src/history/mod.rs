//! Recent-request history.
//!
//! Separate from the saved-item tree, the composer auto-records every sent
//! request into a flat, capped, newest-first list so the user can re-load a
//! recent composition without having saved it. Exact `(method, url)`
//! duplicates are suppressed — re-sending the same request does not push a
//! new entry.

use crate::models::{ComposedRequest, HttpMethod};
use crate::storage::{DurableStore, StorageError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage key for the serialized recent-request list.
pub const HISTORY_KEY: &str = "api-preview.recentRequests";

/// Default cap on the recent-request list.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// One recorded request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// HTTP method.
    pub method: HttpMethod,

    /// Target URL as composed (placeholders not resolved).
    pub url: String,

    /// Header text as composed.
    #[serde(default)]
    pub headers: String,

    /// Body text as composed.
    #[serde(default)]
    pub body: String,

    /// When this request was recorded, in UTC.
    pub saved_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Records a composed request with the current timestamp.
    pub fn new(request: &ComposedRequest) -> Self {
        Self {
            method: request.method,
            url: request.url.clone(),
            headers: request.headers.clone(),
            body: request.body.clone(),
            saved_at: Utc::now(),
        }
    }
}

/// The flat, capped recent-request list.
pub struct RecentRequests<S: DurableStore> {
    store: S,
    key: String,
    limit: usize,
}

impl<S: DurableStore> RecentRequests<S> {
    /// Creates a list under the default key with the default cap.
    pub fn new(store: S) -> Self {
        Self::with_limit(store, DEFAULT_HISTORY_LIMIT)
    }

    /// Creates a list with an explicit cap (e.g. from user settings).
    pub fn with_limit(store: S, limit: usize) -> Self {
        Self {
            store,
            key: HISTORY_KEY.to_string(),
            limit,
        }
    }

    /// Records a request at the front of the list.
    ///
    /// Returns `false` when an entry with the same method and URL already
    /// exists (the list is left untouched), `true` when the entry was added.
    /// Adding past the cap drops the oldest entries.
    pub fn record(&mut self, request: &ComposedRequest) -> Result<bool, StorageError> {
        let mut entries = self.load();

        if entries
            .iter()
            .any(|entry| entry.method == request.method && entry.url == request.url)
        {
            return Ok(false);
        }

        entries.insert(0, HistoryEntry::new(request));
        entries.truncate(self.limit);
        self.persist(&entries)?;
        Ok(true)
    }

    /// Lists recorded requests, newest first.
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.load()
    }

    /// Removes all recorded requests.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.set(&self.key, "[]")
    }

    fn load(&self) -> Vec<HistoryEntry> {
        let blob = match self.store.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(err) => {
                eprintln!("Warning: failed to read recent requests: {}", err);
                return Vec::new();
            }
        };

        match serde_json::from_str(&blob) {
            Ok(entries) => entries,
            Err(err) => {
                eprintln!("Warning: Skipping corrupted recent-request data: {}", err);
                Vec::new()
            }
        }
    }

    fn persist(&mut self, entries: &[HistoryEntry]) -> Result<(), StorageError> {
        let blob = serde_json::to_string(entries)?;
        self.store.set(&self.key, &blob)
    }
}
