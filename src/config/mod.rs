//! Configuration loading.
//!
//! Settings live under the `api-preview` section of the host's settings
//! JSON, the same place the editor surfaces them to the user. Malformed user
//! settings never block the composer: loading warns and falls back to
//! defaults. There is no global settings state — the caller constructs what
//! it needs and passes it along.

pub mod schema;

pub use schema::{ComposerSettings, SETTINGS_SECTION};

use crate::variables::{VariableMap, VariableSource};
use serde_json::Value;
use std::path::PathBuf;

/// Extracts composer settings from host settings JSON.
///
/// Reads the `api-preview` section, merges it with defaults, and validates
/// the result. Parse or validation failures are reported on stderr and
/// yield defaults — user settings degrade, they never fail the caller.
///
/// # Example
///
/// ```
/// use api_preview::config::load_settings;
/// use serde_json::json;
///
/// let settings_json = json!({
///     "api-preview": {
///         "variables": { "host": "api.example.com" },
///         "historyLimit": 50
///     }
/// });
///
/// let settings = load_settings(Some(&settings_json));
/// assert_eq!(settings.history_limit, 50);
/// ```
pub fn load_settings(settings_json: Option<&Value>) -> ComposerSettings {
    let mut settings = ComposerSettings::default();

    if let Some(section) = settings_json.and_then(|root| root.get(SETTINGS_SECTION)) {
        match serde_json::from_value::<ComposerSettings>(section.clone()) {
            Ok(user_settings) => settings = user_settings,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to parse {} settings: {}. Using defaults.",
                    SETTINGS_SECTION, e
                );
            }
        }
    }

    if let Err(e) = settings.validate() {
        eprintln!(
            "Warning: Invalid {} settings: {}. Using defaults.",
            SETTINGS_SECTION, e
        );
        settings = ComposerSettings::default();
    }

    settings
}

/// Settings are a variable source: the map is whatever the user configured.
impl VariableSource for ComposerSettings {
    fn variable_map(&self) -> VariableMap {
        self.variables.clone()
    }
}

/// A settings file read fresh on every use.
///
/// Re-reads and re-parses the file each time the variable map is requested,
/// so edits to variables take effect on the next send without a restart.
/// A missing file simply means default settings.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    /// Points at a settings JSON file; the file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads current settings from the file.
    pub fn load(&self) -> ComposerSettings {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(_) => return ComposerSettings::default(),
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(root) => load_settings(Some(&root)),
            Err(e) => {
                eprintln!(
                    "Warning: Settings file {} is not valid JSON: {}. Using defaults.",
                    self.path.display(),
                    e
                );
                ComposerSettings::default()
            }
        }
    }
}

impl VariableSource for SettingsFile {
    fn variable_map(&self) -> VariableMap {
        self.load().variables
    }
}
