//! Plugin re-registration detection.

use crate::conformance::{CheckContext, CheckId, ConformanceDiagnostic, ConformanceRule, Severity};

/// Reports plugin names registered twice with different handles.
///
/// Composition keeps the later handle; rules written against the earlier
/// one may silently stop resolving.
pub struct PluginConflictRule;

impl ConformanceRule for PluginConflictRule {
    fn id(&self) -> CheckId {
        CheckId::new("plugin-conflict")
    }

    fn name(&self) -> &str {
        "Plugin Conflict"
    }

    fn description(&self) -> &str {
        "Detects a plugin name bound to different packages within one layer"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Vec<ConformanceDiagnostic> {
        ctx.registry
            .iter()
            .flat_map(|definition| {
                definition.effective.conflicts.iter().map(move |conflict| {
                    ConformanceDiagnostic::new(
                        self.id(),
                        self.default_severity(),
                        format!(
                            "Plugin '{}' re-registered as '{}' (was '{}')",
                            conflict.plugin, conflict.replacement, conflict.previous
                        ),
                    )
                    .with_layer(definition.layer)
                    .with_fragment(conflict.fragment.clone())
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Fragment, Layer, LayerRegistry, PluginHandle, RuleCatalog};
    use crate::conformance::rules::test_support::registry;
    use std::collections::BTreeSet;

    fn run(registry: &LayerRegistry) -> Vec<ConformanceDiagnostic> {
        let rules = BTreeSet::new();
        PluginConflictRule.check(&CheckContext {
            registry,
            type_aware_rules: &rules,
        })
    }

    #[test]
    fn passes_for_builtin_layers() {
        assert!(run(LayerRegistry::builtin().unwrap()).is_empty());
    }

    #[test]
    fn reports_each_conflicting_layer() {
        let a = Fragment::named("a").with_plugin("prettier", PluginHandle::package("one"));
        let b = Fragment::named("b").with_plugin("prettier", PluginHandle::package("two"));

        let registry = registry(
            vec![a.clone()],
            vec![a.clone(), b.clone()],
            vec![a, b],
            RuleCatalog::default(),
        );
        let diagnostics = run(&registry);

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].layer, Some(Layer::Functional));
        assert_eq!(diagnostics[0].fragment.as_deref(), Some("b"));
        assert!(diagnostics[0].message.contains("'two'"));
    }
}
