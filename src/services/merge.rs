use crate::models::{AppConfig, PresetOverrides};
use indexmap::{IndexMap, IndexSet};

/// How targeted apps receive the whitelist, chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Overwrite every target with the settings template.
    #[default]
    Replace,
    /// Only add the whitelists to targets already in whitelist mode.
    Selective,
}

impl MergePolicy {
    pub fn from_merge_flag(merge: bool) -> Self {
        if merge { Self::Selective } else { Self::Replace }
    }
}

/// What happened to a single app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Replaced,
    Merged,
    /// Left as it was (apart from preset overrides): missing or not in whitelist mode.
    Unchanged,
}

/// Computes the stored configuration of each targeted app.
#[derive(Debug, Clone)]
pub struct SettingsMerger {
    policy: MergePolicy,
    whitelists: IndexSet<String>,
    template: AppConfig,
    overrides: PresetOverrides,
}

impl SettingsMerger {
    /// Create a merger for one run.
    ///
    /// Under [`MergePolicy::Replace`] the preset overrides are folded into the
    /// template once, since every target receives an identical copy.
    pub fn new(
        policy: MergePolicy,
        whitelists: IndexSet<String>,
        mut template: AppConfig,
        overrides: PresetOverrides,
    ) -> Self {
        if policy == MergePolicy::Replace {
            apply_overrides(&overrides, &mut template);
        }

        Self {
            policy,
            whitelists,
            template,
            overrides,
        }
    }

    pub fn template(&self) -> &AppConfig {
        &self.template
    }

    /// Update the `scope` entry of `app_id`.
    pub fn merge_app(&self, scope: &mut IndexMap<String, AppConfig>, app_id: &str) -> MergeOutcome {
        match self.policy {
            MergePolicy::Replace => {
                scope.insert(app_id.to_string(), self.template.clone());
                MergeOutcome::Replaced
            }
            MergePolicy::Selective => {
                let Some(existing) = scope.get_mut(app_id) else {
                    return MergeOutcome::Unchanged;
                };

                apply_overrides(&self.overrides, existing);

                if !existing.use_whitelist() {
                    return MergeOutcome::Unchanged;
                }

                existing.extend_list(AppConfig::APPLY_TEMPLATES, &self.whitelists);
                MergeOutcome::Merged
            }
        }
    }
}

fn apply_overrides(overrides: &PresetOverrides, config: &mut AppConfig) {
    overrides.presets.apply_to(config, AppConfig::APPLY_PRESETS);
    overrides
        .settings_presets
        .apply_to(config, AppConfig::APPLY_SETTINGS_PRESETS);
}
