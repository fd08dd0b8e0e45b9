//! Saved-request collection.
//!
//! This module owns the durable hierarchy of folders and saved requests
//! shown in the composer's sidebar: the node types, and the [`ItemTree`]
//! store that performs all mutation against durable storage.

pub mod models;
pub mod tree;

pub use models::{Folder, FolderSummary, Item, SavedRequest};
pub use tree::{ItemTree, TreeError, STORAGE_KEY};
