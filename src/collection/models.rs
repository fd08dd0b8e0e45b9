//! Node types of the saved-request hierarchy.
//!
//! An [`Item`] is either a folder (with ordered children) or a saved
//! request. Ids are UUID strings, unique across the whole tree and shared
//! between both variants; ordering of children is insertion order and is
//! meaningful to the presentation layer.

use crate::models::{ComposedRequest, HttpMethod};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A node in the saved-request hierarchy.
///
/// Serialized with a `kind` tag (`"folder"` / `"request"`) so the persisted
/// blob matches what a webview or tree view consumes directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Item {
    /// A named folder containing an ordered sequence of child items.
    Folder(Folder),

    /// A saved request.
    Request(SavedRequest),
}

impl Item {
    /// The node's id, whichever variant it is.
    pub fn id(&self) -> &str {
        match self {
            Item::Folder(folder) => &folder.id,
            Item::Request(request) => &request.id,
        }
    }

    /// The node's display label.
    pub fn label(&self) -> &str {
        match self {
            Item::Folder(folder) => &folder.label,
            Item::Request(request) => &request.label,
        }
    }

    /// Checks if this item is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, Item::Folder(_))
    }
}

/// A folder in the saved-request hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Folder {
    /// Unique id, immutable once assigned.
    pub id: String,

    /// Display label.
    pub label: String,

    /// Ordered children; insertion order is display order.
    #[serde(default)]
    pub children: Vec<Item>,
}

impl Folder {
    /// Creates an empty folder with a fresh unique id.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
            children: Vec::new(),
        }
    }
}

/// A request saved into the hierarchy.
///
/// `headers` and `body` are stored as opaque strings (serialized JSON or raw
/// text) so templated placeholders and non-JSON content survive round-trips
/// untouched; parsing happens only at dispatch time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedRequest {
    /// Unique id. An empty id means "not yet saved"; the tree assigns a
    /// fresh UUID on first upsert.
    #[serde(default)]
    pub id: String,

    /// Display label.
    pub label: String,

    /// HTTP method.
    pub method: HttpMethod,

    /// Target URL, possibly containing `{{variable}}` placeholders.
    pub url: String,

    /// Header text as a serialized JSON object.
    #[serde(default)]
    pub headers: String,

    /// Body text, serialized JSON or raw text.
    #[serde(default)]
    pub body: String,
}

impl SavedRequest {
    /// Creates an unsaved request (empty id) from label, method, and URL.
    pub fn new(label: impl Into<String>, method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            label: label.into(),
            method,
            url: url.into(),
            headers: String::new(),
            body: String::new(),
        }
    }
}

impl From<&SavedRequest> for ComposedRequest {
    /// Loads a saved request back into composer form (by value; the tree
    /// keeps ownership of its own nodes).
    fn from(saved: &SavedRequest) -> Self {
        ComposedRequest {
            method: saved.method,
            url: saved.url.clone(),
            headers: saved.headers.clone(),
            body: saved.body.clone(),
        }
    }
}

/// A flattened folder reference for presentation pickers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FolderSummary {
    /// The folder's id.
    pub id: String,

    /// The folder's display label.
    pub label: String,
}
