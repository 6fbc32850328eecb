use crate::models::{ConfigurationDocument, RewriterSettings};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Settings file looked up in the working directory when `--settings` is not given.
pub const SETTINGS_FILE_NAME: &str = "hma-rewriter.yaml";

/// Prefix of environment variables overriding settings, e.g. `HMA_REWRITER__DEFAULT_WHITELIST`.
pub const ENV_PREFIX: &str = "HMA_REWRITER";

/// Configuration manager for the tool settings file.
///
/// Settings come from an optional YAML file, overridden by `HMA_REWRITER__*`
/// environment variables (`__` separates nested keys).
#[derive(Debug, Clone)]
pub struct ConfigManager {
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager for an explicit settings file.
    ///
    /// # Arguments
    /// * `settings_path` - Path to the YAML settings file; it does not have to exist
    pub fn new<P: AsRef<Utf8Path>>(settings_path: P) -> Self {
        Self {
            settings_path: settings_path.as_ref().to_path_buf(),
        }
    }

    /// Load the effective settings.
    ///
    /// The file is optional; `HMA_REWRITER__*` variables override what it sets.
    ///
    /// # Returns
    /// The loaded settings, or defaults for whatever the file and environment leave unset
    pub fn load_settings(&self) -> Result<RewriterSettings> {
        config::Config::builder()
            .add_source(
                config::File::new(self.settings_path.as_str(), config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to load settings: {}", self.settings_path))?
            .try_deserialize::<RewriterSettings>()
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))
    }

    /// Save settings as YAML, replacing the settings file.
    ///
    /// # Arguments
    /// * `settings` - Settings to write
    pub fn save_settings(&self, settings: &RewriterSettings) -> Result<()> {
        let yaml_string = to_yaml(settings)?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Get the settings file path.
    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }

    /// The settings file, if it exists; `None` means only defaults and the
    /// environment were used.
    pub fn settings_source(&self) -> Option<&Utf8Path> {
        self.settings_path
            .is_file()
            .then_some(self.settings_path.as_path())
    }
}

/// Render settings as YAML.
pub fn to_yaml(settings: &RewriterSettings) -> Result<String> {
    serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")
}

/// Read and parse a Hide My Applist configuration document (UTF-8 JSON).
///
/// # Arguments
/// * `path` - Path of the exported config
///
/// # Returns
/// The parsed document, with unrecognised keys kept for writing back
pub fn load_document(path: &Utf8Path) -> Result<ConfigurationDocument> {
    let file_contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read config: {}", path))?;

    let document = ConfigurationDocument::from_json(&file_contents)
        .with_context(|| format!("Failed to parse config: {}", path))?;

    tracing::info!(
        "Loaded config from {} ({} templates, {} scoped apps)",
        path,
        document.templates.len(),
        document.scope.len()
    );
    Ok(document)
}
