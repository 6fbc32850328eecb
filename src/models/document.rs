use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Hide My Applist configuration document.
///
/// Only `templates` and `scope` are interpreted. Every other top-level key
/// (`configVersion`, `detailLog`, ...) is carried through `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationDocument {
    #[serde(default)]
    pub templates: IndexMap<String, TemplateDefinition>,

    #[serde(default)]
    pub scope: IndexMap<String, AppConfig>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named application list. Whitelists are the ones with `isWhitelist` set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDefinition {
    #[serde(default)]
    pub is_whitelist: bool,

    #[serde(default)]
    pub app_list: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-application configuration stored under `scope`.
///
/// Kept as the JSON object read from the document, so keys are never
/// invented, reordered or dropped. Only the keys a rewrite touches change;
/// an entry the run leaves alone serializes back exactly as it was read.
/// The boolean flags are opaque here: they are copied or overwritten as a
/// whole, never interpreted one by one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppConfig {
    fields: Map<String, Value>,
}

impl AppConfig {
    pub const USE_WHITELIST: &'static str = "useWhitelist";
    pub const EXCLUDE_SYSTEM_APPS: &'static str = "excludeSystemApps";
    pub const HIDE_INSTALLATION_SOURCE: &'static str = "hideInstallationSource";
    pub const HIDE_SYSTEM_INSTALLATION_SOURCE: &'static str = "hideSystemInstallationSource";
    pub const EXCLUDE_TARGET_INSTALLATION_SOURCE: &'static str = "excludeTargetInstallationSource";
    pub const INVERT_ACTIVITY_LAUNCH_PROTECTION: &'static str = "invertActivityLaunchProtection";
    pub const APPLY_TEMPLATES: &'static str = "applyTemplates";
    pub const APPLY_PRESETS: &'static str = "applyPresets";
    pub const APPLY_SETTINGS_PRESETS: &'static str = "applySettingsPresets";
    pub const EXTRA_APP_LIST: &'static str = "extraAppList";

    /// Raw value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Boolean flag `key`; `None` when missing or not a boolean.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.fields.get(key).and_then(Value::as_bool)
    }

    pub fn set_flag(&mut self, key: &str, value: bool) {
        self.fields.insert(key.to_string(), Value::Bool(value));
    }

    /// Whether the app is in whitelist mode. A missing flag counts as blacklist mode.
    pub fn use_whitelist(&self) -> bool {
        self.flag(Self::USE_WHITELIST).unwrap_or(false)
    }

    /// String members of list `key`; empty when missing.
    pub fn list(&self, key: &str) -> IndexSet<String> {
        self.fields
            .get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Overwrite list `key` with `values`.
    pub fn set_list(&mut self, key: &str, values: &IndexSet<String>) {
        let items = values.iter().cloned().map(Value::String).collect();
        self.fields.insert(key.to_string(), Value::Array(items));
    }

    /// Append the `values` not yet in list `key`, keeping existing items as they are.
    ///
    /// When nothing is missing the entry is left untouched, so a missing key
    /// is only created if there is something to add.
    pub fn extend_list(&mut self, key: &str, values: &IndexSet<String>) {
        let existing = self.list(key);
        let missing: Vec<Value> = values
            .iter()
            .filter(|value| !existing.contains(*value))
            .cloned()
            .map(Value::String)
            .collect();
        if missing.is_empty() {
            return;
        }

        match self.fields.get_mut(key) {
            Some(Value::Array(items)) => items.extend(missing),
            _ => {
                self.fields.insert(key.to_string(), Value::Array(missing));
            }
        }
    }
}

impl ConfigurationDocument {
    /// Parse a document from JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Serialize the document, compact unless `pretty` is set.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
