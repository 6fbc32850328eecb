//! Services module - the rewrite engine.
//!
//! Everything here works on an in-memory [`ConfigurationDocument`](crate::models::ConfigurationDocument)
//! and has no knowledge of the command line, prompts or output destinations.
//!
//! # Components
//!
//! - [`TemplateCatalog`]: read-only lookups over the document's named app lists
//! - [`IgnoreRuleResolver`]: turns ignore rules (app ids, `#list` references, rule
//!   files) into the set of apps to skip, following nested rule files
//! - [`SettingsMerger`]: decides what each targeted app's config becomes, under either
//!   [`MergePolicy`], with independent preset overrides
//! - [`WhitelistApplier`]: validates the request, resolves targets and runs the merger
//!   over them, reporting apps left unchanged
//!
//! # Usage Example
//!
//! ```ignore
//! use hma_rewriter::services::{ApplyRequest, FsRuleReader, WhitelistApplier};
//!
//! let applier = WhitelistApplier::new(&settings.template, &FsRuleReader);
//! let report = applier.apply(&mut document, &ApplyRequest {
//!     whitelist_name: "cnapps".to_string(),
//!     ignore_rules: vec!["#banking".to_string()],
//!     ..Default::default()
//! })?;
//! ```

pub mod apply;
pub mod catalog;
pub mod error;
pub mod ignore_rules;
pub mod merge;

pub use apply::{ApplyReport, ApplyRequest, WhitelistApplier};
pub use catalog::TemplateCatalog;
pub use error::RewriteError;
pub use ignore_rules::{FsRuleReader, IgnoreRule, IgnoreRuleResolver, RuleFileReader};
pub use merge::{MergeOutcome, MergePolicy, SettingsMerger};
