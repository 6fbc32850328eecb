//! Property tests for ignore-rule resolution and the replace policy.

use hma_rewriter::models::{AppConfig, TemplateDefaults, TemplateDefinition};
use hma_rewriter::services::{
    FsRuleReader, IgnoreRuleResolver, MergePolicy, TemplateCatalog, WhitelistApplier,
};
use hma_rewriter::{ApplyRequest, ConfigurationDocument};
use indexmap::IndexSet;
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

fn arb_app_id() -> impl Strategy<Value = String> {
    "[a-e]\\.[a-c]"
}

/// Literal app ids and `#list` references; no file paths so nothing touches the disk.
fn arb_rule() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_app_id(),
        arb_app_id().prop_map(|id| format!("{} // note", id)),
        Just("#blocked".to_string()),
        Just("#cnapps".to_string()),
        Just("// comment only".to_string()),
    ]
}

fn document_with(members: Vec<String>, extras: &[String]) -> ConfigurationDocument {
    let mut doc = ConfigurationDocument::default();
    doc.templates.insert(
        "cnapps".to_string(),
        TemplateDefinition {
            is_whitelist: true,
            app_list: members,
            ..Default::default()
        },
    );
    doc.templates.insert(
        "blocked".to_string(),
        TemplateDefinition {
            is_whitelist: false,
            app_list: vec!["a.a".to_string(), "b.b".to_string()],
            ..Default::default()
        },
    );
    for extra in extras {
        doc.templates.insert(
            extra.clone(),
            TemplateDefinition {
                is_whitelist: true,
                ..Default::default()
            },
        );
    }
    doc
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: resolving the same rules twice yields the same exclusion set.
    #[test]
    fn prop_resolution_is_idempotent(
        members in prop::collection::vec(arb_app_id(), 0..8),
        rules in prop::collection::vec(arb_rule(), 0..10),
    ) {
        let doc = document_with(members, &[]);
        let resolver = IgnoreRuleResolver::new(TemplateCatalog::new(&doc.templates), &FsRuleReader);

        let first = resolver.resolve(&rules).unwrap();
        let second = resolver.resolve(&rules).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: rule order does not affect the exclusion set.
    #[test]
    fn prop_resolution_is_order_independent(
        members in prop::collection::vec(arb_app_id(), 0..8),
        rules in prop::collection::vec(arb_rule(), 0..10),
    ) {
        let doc = document_with(members, &[]);
        let resolver = IgnoreRuleResolver::new(TemplateCatalog::new(&doc.templates), &FsRuleReader);

        let mut reversed = rules.clone();
        reversed.reverse();

        prop_assert_eq!(resolver.resolve(&rules).unwrap(), resolver.resolve(&reversed).unwrap());
    }

    /// Property: a literal rule excludes exactly that identifier.
    #[test]
    fn prop_literal_rule_excludes_itself(id in arb_app_id()) {
        let doc = document_with(Vec::new(), &[]);
        let resolver = IgnoreRuleResolver::new(TemplateCatalog::new(&doc.templates), &FsRuleReader);

        let excluded = resolver.resolve(&[id.clone()]).unwrap();
        prop_assert_eq!(excluded.len(), 1);
        prop_assert!(excluded.contains(&id));
    }

    /// Property: with merge disabled every target's applyTemplates is exactly
    /// the whitelist plus the extra names, and nothing outside the whitelist is written.
    #[test]
    fn prop_replace_sets_exact_templates(
        members in prop::collection::vec(arb_app_id(), 0..8),
        extras in prop::collection::vec("[x-z]{1,2}", 0..4),
        rules in prop::collection::vec(arb_rule(), 0..5),
    ) {
        let mut doc = document_with(members.clone(), &extras);
        let defaults = TemplateDefaults::default();
        let request = ApplyRequest {
            whitelist_name: "cnapps".to_string(),
            extra_whitelists: extras.clone(),
            ignore_rules: rules,
            policy: MergePolicy::Replace,
            ..Default::default()
        };

        let report = WhitelistApplier::new(&defaults, &FsRuleReader)
            .apply(&mut doc, &request)
            .unwrap();

        let expected: IndexSet<String> = std::iter::once("cnapps".to_string())
            .chain(extras)
            .collect();
        prop_assert!(report.unapplied.is_empty());
        for (app_id, app) in &doc.scope {
            prop_assert!(members.contains(app_id));
            prop_assert_eq!(app.list(AppConfig::APPLY_TEMPLATES), expected.clone());
        }
        prop_assert_eq!(doc.scope.len(), report.applied.len());
    }
}
