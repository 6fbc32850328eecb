//! Data models for the rewriter.
//!
//! - [`ConfigurationDocument`]: the Hide My Applist config being rewritten (`templates` + `scope`)
//! - [`TemplateDefinition`]: a named app list, optionally flagged as a whitelist
//! - [`AppConfig`]: one app's entry under `scope`; also the shape of the settings template
//! - [`RewriterSettings`]: the tool's own settings, including [`TemplateDefaults`]
//! - [`ListOverride`] / [`PresetOverrides`]: requested preset overrides, absent or present
//!
//! Document structs keep unrecognised keys so a rewrite never drops data it does not own.

pub mod document;
pub mod overrides;
pub mod settings;

pub use document::{AppConfig, ConfigurationDocument, TemplateDefinition};
pub use overrides::{ListOverride, PresetOverrides};
pub use settings::{LoggingSettings, RewriterSettings, TemplateDefaults};
