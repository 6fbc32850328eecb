use crate::models::AppConfig;
use indexmap::IndexSet;

/// A requested override of a set-valued preset field.
///
/// `Absent` must never touch the field. A requested override with no values
/// is still an override: `Replace` clears the field, `Union` leaves it as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListOverride {
    #[default]
    Absent,
    Replace(IndexSet<String>),
    Union(IndexSet<String>),
}

impl ListOverride {
    /// Build from a command-line list where `None` means the flag was not given.
    pub fn from_request(values: Option<Vec<String>>, merge: bool) -> Self {
        match values {
            None => Self::Absent,
            Some(values) if merge => Self::Union(values.into_iter().collect()),
            Some(values) => Self::Replace(values.into_iter().collect()),
        }
    }

    /// Apply the override to list `key` of `config`.
    pub fn apply_to(&self, config: &mut AppConfig, key: &str) {
        match self {
            Self::Absent => {}
            Self::Replace(values) => config.set_list(key, values),
            Self::Union(values) => config.extend_list(key, values),
        }
    }
}

/// Independent overrides for `applyPresets` and `applySettingsPresets`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetOverrides {
    pub presets: ListOverride,
    pub settings_presets: ListOverride,
}
