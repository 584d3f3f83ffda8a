//! Type-aware allow-list coverage.
//!
//! The harness turns off a fixed list of rules that need type information.
//! The rule catalog records the same fact independently; any catalog entry
//! missing from the list would reach the engine without type information.

use crate::conformance::{CheckContext, CheckId, ConformanceDiagnostic, ConformanceRule, Severity};

/// Compares the harness allow-list with the rule catalog.
pub struct TypeAwareAllowListRule;

impl ConformanceRule for TypeAwareAllowListRule {
    fn id(&self) -> CheckId {
        CheckId::new("type-aware-allow-list")
    }

    fn name(&self) -> &str {
        "Type-Aware Allow-List"
    }

    fn description(&self) -> &str {
        "Every cataloged type-aware rule is on the harness allow-list"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Vec<ConformanceDiagnostic> {
        let catalog = ctx.registry.catalog();
        let mut diagnostics = Vec::new();

        for id in catalog.type_aware_rules() {
            if !ctx.type_aware_rules.contains(id) {
                diagnostics.push(
                    ConformanceDiagnostic::new(
                        self.id(),
                        self.default_severity(),
                        format!("Type-aware rule '{id}' is not on the harness allow-list"),
                    )
                    .with_suggestion(format!("Add '{id}' to type_aware_rules")),
                );
            }
        }

        for id in ctx.type_aware_rules {
            if !catalog.requires_type_information(id) {
                diagnostics.push(ConformanceDiagnostic::new(
                    self.id(),
                    Severity::Hint,
                    format!("Allow-listed rule '{id}' is not cataloged as type-aware"),
                ));
            }
        }

        diagnostics
    }
}
