// HMA Rewriter - bulk-apply Hide My Applist whitelist templates
//
// This is the library crate containing the rewrite engine and data structures.
// The binary crate (main.rs) provides the command-line entry point.

pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{AppConfig, ConfigurationDocument, RewriterSettings, TemplateDefinition};
pub use services::{ApplyReport, ApplyRequest, RewriteError, WhitelistApplier};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
