use crate::models::{ConfigurationDocument, PresetOverrides, TemplateDefaults};
use crate::services::ignore_rules::{IgnoreRuleResolver, RuleFileReader};
use crate::services::merge::{MergeOutcome, MergePolicy, SettingsMerger};
use crate::services::{RewriteError, TemplateCatalog};
use indexmap::IndexSet;

/// Parameters of one apply run.
#[derive(Debug, Clone, Default)]
pub struct ApplyRequest {
    pub whitelist_name: String,
    pub extra_whitelists: Vec<String>,
    pub ignore_rules: Vec<String>,
    pub policy: MergePolicy,
    pub overrides: PresetOverrides,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Apps written or merged, in whitelist order
    pub applied: IndexSet<String>,

    /// Apps left as they were; always empty under [`MergePolicy::Replace`]
    pub unapplied: IndexSet<String>,

    /// Whitelist members skipped by ignore rules
    pub ignored: usize,
}

/// Applies a whitelist to every app listed in it.
pub struct WhitelistApplier<'a, R> {
    defaults: &'a TemplateDefaults,
    reader: &'a R,
}

impl<'a, R: RuleFileReader> WhitelistApplier<'a, R> {
    pub fn new(defaults: &'a TemplateDefaults, reader: &'a R) -> Self {
        Self { defaults, reader }
    }

    /// Apply `request` to `document`.
    ///
    /// Validation, ignore resolution and target selection all happen before
    /// the first write, so on error `document` is unchanged. `scope` entries
    /// that are not targeted keep their exact JSON.
    ///
    /// # Arguments
    /// * `document` - The Hide My Applist config to rewrite in place
    /// * `request` - Whitelist names, ignore rules, merge policy and preset overrides
    ///
    /// # Returns
    /// Which apps were written, which were left unchanged, and how many whitelist
    /// members the ignore rules skipped
    ///
    /// # Errors
    /// [`RewriteError::Validation`] when a requested name is not a whitelist, or the
    /// first error met while resolving ignore rules
    pub fn apply(
        &self,
        document: &mut ConfigurationDocument,
        request: &ApplyRequest,
    ) -> Result<ApplyReport, RewriteError> {
        let (targets, ignored, merger) = self.prepare(document, request)?;

        let mut report = ApplyReport {
            ignored,
            ..Default::default()
        };

        for app_id in targets {
            match merger.merge_app(&mut document.scope, &app_id) {
                MergeOutcome::Replaced | MergeOutcome::Merged => {
                    report.applied.insert(app_id);
                }
                MergeOutcome::Unchanged => {
                    tracing::warn!(
                        "Keep original config for app `{}`: merge is only available for apps in whitelist mode",
                        app_id
                    );
                    report.unapplied.insert(app_id);
                }
            }
        }

        tracing::info!(
            "Applied whitelist `{}` to {} app(s), {} unchanged, {} ignored",
            request.whitelist_name,
            report.applied.len(),
            report.unapplied.len(),
            report.ignored
        );

        Ok(report)
    }

    fn prepare(
        &self,
        document: &ConfigurationDocument,
        request: &ApplyRequest,
    ) -> Result<(IndexSet<String>, usize, SettingsMerger), RewriteError> {
        let catalog = TemplateCatalog::new(&document.templates);

        let whitelists: IndexSet<String> = std::iter::once(&request.whitelist_name)
            .chain(&request.extra_whitelists)
            .cloned()
            .collect();

        let missing: Vec<String> = whitelists
            .iter()
            .filter(|name| !catalog.is_whitelist(name))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(RewriteError::Validation(missing));
        }

        let template = self.defaults.to_app_config(&whitelists);

        let excluded =
            IgnoreRuleResolver::new(catalog, self.reader).resolve(request.ignore_rules.as_slice())?;

        let members = catalog.members(&request.whitelist_name)?;
        let total = members.len();
        let targets: IndexSet<String> = members
            .into_iter()
            .filter(|app_id| !excluded.contains(app_id))
            .collect();

        tracing::debug!(
            "Whitelist `{}`: {} member(s), {} target(s), policy {:?}",
            request.whitelist_name,
            total,
            targets.len(),
            request.policy
        );

        let ignored = total - targets.len();
        let merger = SettingsMerger::new(
            request.policy,
            whitelists,
            template,
            request.overrides.clone(),
        );
        Ok((targets, ignored, merger))
    }
}
