//! Variable map and interpolation.
//!
//! This module provides the user-defined variable map and the pure
//! substitution pass that rewrites `{{variable}}` placeholders in composed
//! request text before dispatch.

pub mod substitution;

pub use substitution::{substitute, substitute_shallow};

use std::collections::HashMap;

/// Flat mapping from variable name to string value.
pub type VariableMap = HashMap<String, String>;

/// Source of the current variable map.
///
/// Implementations are queried fresh on every dispatch so that edits to the
/// user's variables take effect on the next send without a reload.
pub trait VariableSource {
    /// Returns a snapshot of the current variable map.
    fn variable_map(&self) -> VariableMap;
}

/// A plain map is its own source; useful for tests and embedding.
impl VariableSource for VariableMap {
    fn variable_map(&self) -> VariableMap {
        self.clone()
    }
}
