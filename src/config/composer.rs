//! Fragment composition.
//!
//! [`compose`] folds an ordered fragment sequence into one
//! [`EffectiveConfig`]. The merge rules:
//!
//! - `plugins` and `rules` overwrite key-wise; a later fragment's value
//!   replaces the earlier one entirely (rule settings are atomic)
//! - `languageOptions` merge shallowly, with globals unioned
//!   (see [`LanguageOptions::merge`])
//! - `settings` overwrite key-wise
//! - `ignores` are never merged; they stay on their fragment
//! - `files` scopes are not applied here; the effective configuration is
//!   the view for a TypeScript source, which every built-in scope matches.
//!   Rendered modules keep each fragment's `files` for the engine
//!
//! Composition is order-sensitive on purpose: `[A, B]` and `[B, A]` may
//! disagree, and the later fragment always wins.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::fragment::{Fragment, LanguageOptions, PluginHandle, RuleId, RuleSetting};
use crate::error::{LintstackError, Result};

/// Two fragments registered the same plugin name to different handles.
///
/// The later handle wins; the conflict is kept as an advisory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginConflict {
    pub plugin: String,
    pub previous: PluginHandle,
    pub replacement: PluginHandle,
    /// Fragment that registered the replacement.
    pub fragment: String,
}

/// The flattened result of composing fragments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    pub plugins: BTreeMap<String, PluginHandle>,
    pub rules: BTreeMap<RuleId, RuleSetting>,
    pub language_options: LanguageOptions,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub settings: Map<String, Value>,
    /// Source fragments in composition order.
    pub fragments: Vec<Fragment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<PluginConflict>,
}

impl EffectiveConfig {
    /// Setting of a rule after composition.
    pub fn rule(&self, id: &str) -> Option<&RuleSetting> {
        self.rules.get(&RuleId::new(id))
    }

    /// Whether a rule is present and not turned off.
    pub fn is_rule_enabled(&self, id: &str) -> bool {
        self.rule(id).is_some_and(RuleSetting::is_enabled)
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Rule ids that are enabled, in sorted order.
    pub fn enabled_rules(&self) -> impl Iterator<Item = &RuleId> {
        self.rules
            .iter()
            .filter(|(_, setting)| setting.is_enabled())
            .map(|(id, _)| id)
    }

    /// Whether a global-ignore fragment excludes `path`.
    pub fn is_ignored(&self, path: &Path) -> Result<bool> {
        for fragment in self.fragments.iter().filter(|f| f.is_global_ignore()) {
            if fragment.ignores_path(path)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Compose an ordered, non-empty fragment sequence.
pub fn compose(fragments: &[Fragment]) -> Result<EffectiveConfig> {
    if fragments.is_empty() {
        return Err(LintstackError::EmptyComposition);
    }

    let mut plugins: BTreeMap<String, PluginHandle> = BTreeMap::new();
    let mut rules = BTreeMap::new();
    let mut language_options = LanguageOptions::default();
    let mut settings = Map::new();
    let mut conflicts = Vec::new();

    for fragment in fragments {
        for (name, handle) in &fragment.plugins {
            if let Some(previous) = plugins.insert(name.clone(), handle.clone()) {
                if &previous != handle {
                    debug!(
                        "Plugin '{}' re-registered by '{}': {} replaces {}",
                        name,
                        fragment.label(),
                        handle,
                        previous
                    );
                    conflicts.push(PluginConflict {
                        plugin: name.clone(),
                        previous,
                        replacement: handle.clone(),
                        fragment: fragment.label().to_string(),
                    });
                }
            }
        }

        for (id, setting) in &fragment.rules {
            rules.insert(id.clone(), setting.clone());
        }

        if let Some(options) = &fragment.language_options {
            language_options.merge(options);
        }

        for (key, value) in &fragment.settings {
            settings.insert(key.clone(), value.clone());
        }
    }

    debug!(
        "Composed {} fragment(s): {} plugin(s), {} rule(s)",
        fragments.len(),
        plugins.len(),
        rules.len()
    );

    Ok(EffectiveConfig {
        plugins,
        rules,
        language_options,
        settings,
        fragments: fragments.to_vec(),
        conflicts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fragment::{GlobalAccess, Severity};
    use serde_json::json;

    fn rule_fragment(name: &str, rule: &str, setting: RuleSetting) -> Fragment {
        Fragment::named(name).with_rule(rule, setting)
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let err = compose(&[]).unwrap_err();
        assert!(matches!(err, LintstackError::EmptyComposition));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn later_fragment_wins_rule_collision() {
        let a = rule_fragment("a", "no-console", RuleSetting::warn());
        let b = rule_fragment("b", "no-console", RuleSetting::error());

        let ab = compose(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(ab.rule("no-console"), Some(&RuleSetting::error()));

        let ba = compose(&[b, a]).unwrap();
        assert_eq!(ba.rule("no-console"), Some(&RuleSetting::warn()));
    }

    #[test]
    fn rule_settings_are_replaced_not_merged() {
        let a = rule_fragment(
            "a",
            "prettier/prettier",
            RuleSetting::with_options(Severity::Error, vec![json!({"semi": false})]),
        );
        let b = rule_fragment("b", "prettier/prettier", RuleSetting::warn());

        let composed = compose(&[a, b]).unwrap();
        let setting = composed.rule("prettier/prettier").unwrap();
        assert_eq!(setting.level(), Severity::Warn);
        assert!(setting.options().is_empty());
    }

    #[test]
    fn rules_from_all_fragments_are_kept() {
        let composed = compose(&[
            rule_fragment("a", "no-undef", RuleSetting::error()),
            rule_fragment("b", "no-console", RuleSetting::warn()),
        ])
        .unwrap();

        assert_eq!(composed.rules.len(), 2);
        assert!(composed.is_rule_enabled("no-undef"));
        assert!(composed.is_rule_enabled("no-console"));
    }

    #[test]
    fn composition_is_deterministic() {
        let fragments = vec![
            rule_fragment("a", "no-undef", RuleSetting::error()),
            Fragment::named("b").with_plugin(
                "functional",
                PluginHandle::package("eslint-plugin-functional"),
            ),
        ];
        assert_eq!(compose(&fragments).unwrap(), compose(&fragments).unwrap());
    }

    #[test]
    fn plugin_conflict_is_recorded_and_later_handle_wins() {
        let a = Fragment::named("a")
            .with_plugin("prettier", PluginHandle::package("eslint-plugin-prettier"));
        let b = Fragment::named("b")
            .with_plugin("prettier", PluginHandle::package("eslint-plugin-prettier-fork"));

        let composed = compose(&[a, b]).unwrap();

        assert_eq!(
            composed.plugins["prettier"],
            PluginHandle::package("eslint-plugin-prettier-fork")
        );
        assert_eq!(composed.conflicts.len(), 1);
        assert_eq!(composed.conflicts[0].plugin, "prettier");
        assert_eq!(composed.conflicts[0].fragment, "b");
    }

    #[test]
    fn same_plugin_handle_twice_is_not_a_conflict() {
        let handle = PluginHandle::package("eslint-plugin-functional");
        let a = Fragment::named("a").with_plugin("functional", handle.clone());
        let b = Fragment::named("b").with_plugin("functional", handle);

        let composed = compose(&[a, b]).unwrap();
        assert!(composed.conflicts.is_empty());
    }

    #[test]
    fn language_options_globals_accumulate() {
        let browser = Fragment::named("browser").with_language_options(LanguageOptions {
            globals: BTreeMap::from([("window".to_string(), GlobalAccess::Readonly)]),
            ..Default::default()
        });
        let node = Fragment::named("node").with_language_options(LanguageOptions {
            ecma_version: Some(2020),
            globals: BTreeMap::from([("process".to_string(), GlobalAccess::Readonly)]),
            ..Default::default()
        });

        let composed = compose(&[browser, node]).unwrap();

        assert_eq!(composed.language_options.globals.len(), 2);
        assert_eq!(composed.language_options.ecma_version, Some(2020));
    }

    #[test]
    fn settings_merge_key_wise() {
        let a = Fragment::named("a")
            .with_setting("import/resolver", json!({"node": {}}))
            .with_setting("react", json!({"version": "18"}));
        let b = Fragment::named("b").with_setting("react", json!({"version": "19"}));

        let composed = compose(&[a, b]).unwrap();
        assert_eq!(composed.settings["react"]["version"], "19");
        assert!(composed.settings.contains_key("import/resolver"));
    }

    #[test]
    fn fragments_are_retained_in_order() {
        let fragments = vec![
            Fragment::named("ignores").with_ignores(["**/dist-ssr"]),
            rule_fragment("rules", "no-undef", RuleSetting::error()),
        ];

        let composed = compose(&fragments).unwrap();

        assert_eq!(composed.fragments, fragments);
    }

    #[test]
    fn is_ignored_only_applies_global_ignore_fragments() {
        let composed = compose(&[
            Fragment::named("ignores").with_ignores(["**/node_modules"]),
            Fragment::named("scoped")
                .with_ignores(["**/*.spec.ts"])
                .with_rule("no-console", RuleSetting::off()),
        ])
        .unwrap();

        assert!(composed
            .is_ignored(Path::new("node_modules/zod/index.js"))
            .unwrap());
        assert!(!composed.is_ignored(Path::new("src/app.spec.ts")).unwrap());
        assert!(!composed.is_ignored(Path::new("src/app.ts")).unwrap());
    }
}
