//! The persistent item tree.
//!
//! All mutation is transactional at the granularity of "read full tree,
//! mutate in memory, write full tree back": the backing store holds a single
//! serialized blob, not record-level rows. Tree-wide operations (delete,
//! find, move) are single recursive depth-first walks, O(n) in total node
//! count — workspace-scale collections are tens to low hundreds of nodes,
//! so there is no index to maintain.
//!
//! Unknown ids never raise: an unknown parent lists no children, an unknown
//! destination folder falls back to the root (losing a save is worse than
//! misplacing it), and deleting an unknown id is a no-op.

use super::models::{Folder, FolderSummary, Item, SavedRequest};
use crate::error::ValidationError;
use crate::storage::{DurableStore, StorageError};
use std::fmt;
use uuid::Uuid;

/// Storage key for the serialized item tree.
pub const STORAGE_KEY: &str = "api-preview.savedItems";

/// Errors raised by tree mutations.
///
/// Read operations never fail; they degrade to empty results instead.
#[derive(Debug)]
pub enum TreeError {
    /// Caller input violated a precondition; nothing was mutated.
    Validation(ValidationError),

    /// The durable store rejected the write-back.
    Storage(StorageError),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::Validation(err) => write!(f, "{}", err),
            TreeError::Storage(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TreeError::Validation(err) => Some(err),
            TreeError::Storage(err) => Some(err),
        }
    }
}

impl From<ValidationError> for TreeError {
    fn from(err: ValidationError) -> Self {
        TreeError::Validation(err)
    }
}

impl From<StorageError> for TreeError {
    fn from(err: StorageError) -> Self {
        TreeError::Storage(err)
    }
}

/// The durable hierarchy of folders and saved requests.
///
/// The tree exclusively owns its nodes: reads return structural clones, and
/// all mutation flows through this API. Registered change listeners fire
/// once after every successful write-back, mirroring a tree-view refresh.
pub struct ItemTree<S: DurableStore> {
    store: S,
    key: String,
    listeners: Vec<Box<dyn Fn() + Send>>,
}

impl<S: DurableStore> ItemTree<S> {
    /// Creates a tree persisted under the default storage key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    /// Creates a tree persisted under an explicit storage key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            listeners: Vec::new(),
        }
    }

    /// Registers a change listener, called after every successful mutation.
    pub fn subscribe(&mut self, listener: Box<dyn Fn() + Send>) {
        self.listeners.push(listener);
    }

    /// Lists direct children.
    ///
    /// Root items when `parent_id` is `None`, else the named folder's
    /// children. An unknown folder id yields an empty list, not an error.
    pub fn list(&self, parent_id: Option<&str>) -> Vec<Item> {
        let items = self.load();
        match parent_id {
            None => items,
            Some(folder_id) => find_folder_in(&items, folder_id)
                .map(|folder| folder.children.clone())
                .unwrap_or_default(),
        }
    }

    /// Creates an empty folder at the root and persists the tree.
    ///
    /// # Errors
    ///
    /// `ValidationError::EmptyLabel` if the label is empty after trimming.
    pub fn create_folder(&mut self, label: &str) -> Result<Folder, TreeError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(ValidationError::EmptyLabel.into());
        }

        let folder = Folder::new(label);
        let mut items = self.load();
        items.push(Item::Folder(folder.clone()));
        self.persist(&items)?;
        Ok(folder)
    }

    /// Inserts or updates a saved request, optionally into a folder.
    ///
    /// An empty `request.id` gets a fresh UUID (first save); a known id is
    /// detached from wherever it currently lives first, so upsert doubles as
    /// move. The node is appended as the last child of the destination
    /// folder, or at the root when the destination is absent or does not
    /// resolve to an existing folder.
    ///
    /// Returns the stored request with its final id.
    pub fn upsert_request(
        &mut self,
        request: SavedRequest,
        destination_folder_id: Option<&str>,
    ) -> Result<SavedRequest, TreeError> {
        let mut request = request;
        if request.id.is_empty() {
            request.id = Uuid::new_v4().to_string();
        }

        let mut items = self.load();
        detach(&mut items, &request.id);
        attach(&mut items, destination_folder_id, Item::Request(request.clone()));
        self.persist(&items)?;
        Ok(request)
    }

    /// Deletes the item with this id wherever it occurs, together with its
    /// entire subtree if it is a folder. Unknown ids are a no-op: nothing is
    /// written and no change notification fires.
    pub fn delete_item(&mut self, id: &str) -> Result<(), TreeError> {
        let mut items = self.load();
        if detach(&mut items, id).is_some() {
            self.persist(&items)?;
        }
        Ok(())
    }

    /// Finds a folder anywhere in the tree, depth-first.
    pub fn find_folder(&self, id: &str) -> Option<Folder> {
        let items = self.load();
        find_folder_in(&items, id).cloned()
    }

    /// Flattens all folders into a stable pre-order list for pickers.
    pub fn list_all_folders(&self) -> Vec<FolderSummary> {
        let items = self.load();
        let mut folders = Vec::new();
        collect_folders(&items, &mut folders);
        folders
    }

    /// Reads the full tree from the store.
    ///
    /// A missing key is an empty tree. A blob that fails to parse is
    /// reported and treated as empty rather than blocking the user; there is
    /// no repair pass.
    fn load(&self) -> Vec<Item> {
        let blob = match self.store.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(err) => {
                eprintln!("Warning: failed to read saved items: {}", err);
                return Vec::new();
            }
        };

        match serde_json::from_str(&blob) {
            Ok(items) => items,
            Err(err) => {
                eprintln!("Warning: Skipping corrupted saved-item data: {}", err);
                Vec::new()
            }
        }
    }

    /// Writes the full tree back and notifies listeners.
    fn persist(&mut self, items: &[Item]) -> Result<(), TreeError> {
        let blob = serde_json::to_string(items).map_err(StorageError::from)?;
        self.store.set(&self.key, &blob)?;
        for listener in &self.listeners {
            listener();
        }
        Ok(())
    }
}

/// Removes the item with `id` from wherever it occurs, returning it.
fn detach(items: &mut Vec<Item>, id: &str) -> Option<Item> {
    if let Some(index) = items.iter().position(|item| item.id() == id) {
        return Some(items.remove(index));
    }
    for item in items.iter_mut() {
        if let Item::Folder(folder) = item {
            if let Some(found) = detach(&mut folder.children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Appends `node` to the destination folder's children, or to the root when
/// no destination is given or it does not resolve to a folder.
fn attach(items: &mut Vec<Item>, destination_folder_id: Option<&str>, node: Item) {
    if let Some(folder_id) = destination_folder_id {
        if let Some(folder) = find_folder_mut(items, folder_id) {
            folder.children.push(node);
            return;
        }
    }
    items.push(node);
}

/// Depth-first search for a folder; ids are unique, so first match wins.
fn find_folder_in<'a>(items: &'a [Item], id: &str) -> Option<&'a Folder> {
    for item in items {
        if let Item::Folder(folder) = item {
            if folder.id == id {
                return Some(folder);
            }
            if let Some(found) = find_folder_in(&folder.children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn find_folder_mut<'a>(items: &'a mut [Item], id: &str) -> Option<&'a mut Folder> {
    for item in items.iter_mut() {
        if let Item::Folder(folder) = item {
            if folder.id == id {
                return Some(folder);
            }
            if let Some(found) = find_folder_mut(&mut folder.children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Pre-order traversal: each folder is visited, then its subtree, before the
/// next sibling.
fn collect_folders(items: &[Item], folders: &mut Vec<FolderSummary>) {
    for item in items {
        if let Item::Folder(folder) = item {
            folders.push(FolderSummary {
                id: folder.id.clone(),
                label: folder.label.clone(),
            });
            collect_folders(&folder.children, folders);
        }
    }
}
