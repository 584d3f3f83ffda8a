//! Registry of conformance checks.

use std::collections::BTreeMap;

use super::diagnostic::ConformanceDiagnostic;
use super::rule::{CheckContext, CheckId, ConformanceRule};
use super::rules::{
    ExtensionInvariantRule, InheritedRuleDisabledRule, PluginConflictRule, TypeAwareAllowListRule,
};

/// Registry of available conformance checks, keyed and run in id order.
pub struct CheckRegistry {
    rules: BTreeMap<CheckId, Box<dyn ConformanceRule>>,
}

impl CheckRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Create a registry with all built-in checks.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ExtensionInvariantRule));
        registry.register(Box::new(PluginConflictRule));
        registry.register(Box::new(InheritedRuleDisabledRule));
        registry.register(Box::new(TypeAwareAllowListRule));
        registry
    }

    /// Register a check, replacing any check with the same id.
    pub fn register(&mut self, rule: Box<dyn ConformanceRule>) {
        self.rules.insert(rule.id(), rule);
    }

    pub fn get(&self, id: &CheckId) -> Option<&dyn ConformanceRule> {
        self.rules.get(id).map(|r| r.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ConformanceRule> {
        self.rules.values().map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every check, most severe findings first.
    pub fn check_all(&self, ctx: &CheckContext<'_>) -> Vec<ConformanceDiagnostic> {
        let mut diagnostics: Vec<_> = self.iter().flat_map(|rule| rule.check(ctx)).collect();
        diagnostics.sort_by(|a, b| b.severity.cmp(&a.severity));
        diagnostics
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayerRegistry;
    use crate::conformance::Severity;
    use crate::harness::default_type_aware_rules;

    struct MockRule {
        id: CheckId,
        severity: Severity,
    }

    impl ConformanceRule for MockRule {
        fn id(&self) -> CheckId {
            self.id.clone()
        }
        fn name(&self) -> &str {
            "Mock Rule"
        }
        fn description(&self) -> &str {
            "A mock rule for testing"
        }
        fn default_severity(&self) -> Severity {
            self.severity
        }
        fn check(&self, _ctx: &CheckContext<'_>) -> Vec<ConformanceDiagnostic> {
            vec![ConformanceDiagnostic::new(
                self.id(),
                self.severity,
                "mock finding",
            )]
        }
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = CheckRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_register_and_get() {
        let mut registry = CheckRegistry::new();
        registry.register(Box::new(MockRule {
            id: CheckId::new("mock"),
            severity: Severity::Hint,
        }));

        assert!(registry.get(&CheckId::new("mock")).is_some());
        assert!(registry.get(&CheckId::new("unknown")).is_none());
    }

    #[test]
    fn registry_with_builtins_has_checks() {
        let registry = CheckRegistry::with_builtins();
        assert_eq!(registry.len(), 4);
        for id in [
            "extension-invariant",
            "plugin-conflict",
            "inherited-rule-disabled",
            "type-aware-allow-list",
        ] {
            assert!(registry.get(&CheckId::new(id)).is_some(), "{id} missing");
        }
    }

    #[test]
    fn check_all_sorts_by_severity() {
        let mut registry = CheckRegistry::new();
        registry.register(Box::new(MockRule {
            id: CheckId::new("a-hint"),
            severity: Severity::Hint,
        }));
        registry.register(Box::new(MockRule {
            id: CheckId::new("b-error"),
            severity: Severity::Error,
        }));

        let rules = default_type_aware_rules();
        let diagnostics = registry.check_all(&CheckContext {
            registry: LayerRegistry::builtin().unwrap(),
            type_aware_rules: &rules,
        });

        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[1].severity, Severity::Hint);
    }

    #[test]
    fn builtin_layers_pass_all_checks() {
        let rules = default_type_aware_rules();
        let diagnostics = CheckRegistry::with_builtins().check_all(&CheckContext {
            registry: LayerRegistry::builtin().unwrap(),
            type_aware_rules: &rules,
        });
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
    }
}
