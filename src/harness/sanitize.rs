//! Removing the need for type information.
//!
//! Snippets are analyzed in isolation, with no project for a type checker
//! to load. Before analysis the configuration is rewritten so it never asks
//! for one:
//!
//! 1. parser options requesting type information ([`TYPE_INFORMATION_OPTIONS`])
//!    are removed from every fragment;
//! 2. a trailing fragment turns every rule on the type-aware allow-list off;
//! 3. the fragments are recomposed.

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::{compose, EffectiveConfig, Fragment, RuleId, RuleSetting};
use crate::error::Result;

/// Parser options that make the parser load whole-program type information.
pub const TYPE_INFORMATION_OPTIONS: &[&str] = &["projectService", "project"];

/// Rules that cannot run without type information.
pub const TYPE_AWARE_RULES: &[&str] = &[
    "@typescript-eslint/no-floating-promises",
    "@typescript-eslint/await-thenable",
    "@typescript-eslint/no-misused-promises",
    "@typescript-eslint/require-await",
    "@typescript-eslint/prefer-nullish-coalescing",
    "@typescript-eslint/prefer-optional-chain",
    "@typescript-eslint/no-unnecessary-condition",
    "@typescript-eslint/strict-boolean-expressions",
    "@typescript-eslint/switch-exhaustiveness-check",
    "functional/prefer-immutable-types",
    "functional/immutable-data",
];

/// Name of the fragment appended by [`sanitize`].
pub const SANITIZER_FRAGMENT: &str = "lintstack/no-type-information";

/// The built-in allow-list as rule ids.
pub fn default_type_aware_rules() -> BTreeSet<RuleId> {
    TYPE_AWARE_RULES.iter().copied().map(RuleId::from).collect()
}

/// Rewrite `config` so it never requests type information.
pub fn sanitize(
    config: &EffectiveConfig,
    type_aware_rules: &BTreeSet<RuleId>,
) -> Result<EffectiveConfig> {
    let mut fragments: Vec<Fragment> = config
        .fragments
        .iter()
        .map(|fragment| {
            let mut fragment = fragment.clone();
            if let Some(options) = &fragment.language_options {
                let stripped = options.without_parser_options(TYPE_INFORMATION_OPTIONS);
                fragment.language_options = Some(stripped);
            }
            fragment
        })
        .collect();

    let disabled = type_aware_rules
        .iter()
        .fold(Fragment::named(SANITIZER_FRAGMENT), |fragment, id| {
            fragment.with_rule(id.clone(), RuleSetting::off())
        });
    fragments.push(disabled);

    debug!(
        "Sanitized {} fragment(s), disabled {} type-aware rule(s)",
        config.fragments.len(),
        type_aware_rules.len()
    );

    compose(&fragments)
}
