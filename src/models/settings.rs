use crate::models::AppConfig;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Tool settings from `hma-rewriter.yaml` and `HMA_REWRITER__*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriterSettings {
    /// Whitelist applied when `--name` is not given
    #[serde(default = "default_whitelist")]
    pub default_whitelist: String,

    #[serde(default)]
    pub template: TemplateDefaults,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for RewriterSettings {
    fn default() -> Self {
        Self {
            default_whitelist: default_whitelist(),
            template: TemplateDefaults::default(),
            logging: LoggingSettings::default(),
        }
    }
}

fn default_whitelist() -> String {
    "cnapps".to_string()
}

/// Field values of the settings template written to every replaced app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDefaults {
    #[serde(default = "default_true")]
    pub use_whitelist: bool,

    #[serde(default = "default_true")]
    pub exclude_system_apps: bool,

    #[serde(default)]
    pub hide_installation_source: bool,

    #[serde(default)]
    pub hide_system_installation_source: bool,

    #[serde(default)]
    pub exclude_target_installation_source: bool,

    #[serde(default)]
    pub invert_activity_launch_protection: bool,

    #[serde(default)]
    pub apply_presets: Vec<String>,

    #[serde(default = "default_settings_presets")]
    pub apply_settings_presets: Vec<String>,
}

impl Default for TemplateDefaults {
    fn default() -> Self {
        Self {
            use_whitelist: true,
            exclude_system_apps: true,
            hide_installation_source: false,
            hide_system_installation_source: false,
            exclude_target_installation_source: false,
            invert_activity_launch_protection: false,
            apply_presets: Vec::new(),
            apply_settings_presets: default_settings_presets(),
        }
    }
}

impl TemplateDefaults {
    /// Build the settings template for a run applying `whitelists`.
    ///
    /// `applyTemplates` is exactly `whitelists`; `extraAppList` starts empty.
    pub fn to_app_config(&self, whitelists: &IndexSet<String>) -> AppConfig {
        let mut config = AppConfig::default();
        config.set_flag(AppConfig::USE_WHITELIST, self.use_whitelist);
        config.set_flag(AppConfig::EXCLUDE_SYSTEM_APPS, self.exclude_system_apps);
        config.set_flag(AppConfig::HIDE_INSTALLATION_SOURCE, self.hide_installation_source);
        config.set_flag(
            AppConfig::HIDE_SYSTEM_INSTALLATION_SOURCE,
            self.hide_system_installation_source,
        );
        config.set_flag(
            AppConfig::EXCLUDE_TARGET_INSTALLATION_SOURCE,
            self.exclude_target_installation_source,
        );
        config.set_flag(
            AppConfig::INVERT_ACTIVITY_LAUNCH_PROTECTION,
            self.invert_activity_launch_protection,
        );
        config.set_list(AppConfig::APPLY_TEMPLATES, whitelists);
        config.set_list(
            AppConfig::APPLY_PRESETS,
            &self.apply_presets.iter().cloned().collect::<IndexSet<_>>(),
        );
        config.set_list(
            AppConfig::APPLY_SETTINGS_PRESETS,
            &self.apply_settings_presets.iter().cloned().collect::<IndexSet<_>>(),
        );
        config.set_list(AppConfig::EXTRA_APP_LIST, &IndexSet::new());
        config
    }
}

fn default_true() -> bool {
    true
}

fn default_settings_presets() -> Vec<String> {
    vec![
        "accessibility".to_string(),
        "dev_options".to_string(),
        "input_method".to_string(),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Console level when `RUST_LOG` is unset (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily-rotated log files; no file logging when unset
    #[serde(default)]
    pub dir: Option<String>,

    #[serde(default = "default_log_prefix")]
    pub prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
            prefix: default_log_prefix(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_prefix() -> String {
    "hma-rewriter".to_string()
}
