//! Settings schema for the composer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The settings section key this crate reads from host settings JSON.
pub const SETTINGS_SECTION: &str = "api-preview";

/// User-configurable composer settings.
///
/// Parsed from the `api-preview` section of the host's settings JSON; every
/// field is optional and missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ComposerSettings {
    /// User-defined variable map for `{{name}}` interpolation.
    pub variables: HashMap<String, String>,

    /// Maximum number of entries kept in the recent-request list.
    pub history_limit: usize,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            variables: HashMap::new(),
            history_limit: crate::history::DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ComposerSettings {
    /// Validates settings values.
    ///
    /// # Returns
    ///
    /// `Ok(())` when valid, or a message describing the first problem.
    pub fn validate(&self) -> Result<(), String> {
        if self.history_limit == 0 {
            return Err("historyLimit must be greater than 0".to_string());
        }
        Ok(())
    }
}
