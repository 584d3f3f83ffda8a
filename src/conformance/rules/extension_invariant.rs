//! Layer extension invariant.
//!
//! Every layer must extend the one beneath it: its fragment list starts
//! with the parent's fragments, and its rule and plugin keys are a
//! superset of the parent's.

use crate::config::Layer;
use crate::conformance::{CheckContext, CheckId, ConformanceDiagnostic, ConformanceRule, Severity};

/// Detects layers that do not extend their parent.
pub struct ExtensionInvariantRule;

impl ExtensionInvariantRule {
    fn diag(&self, layer: Layer, message: String) -> ConformanceDiagnostic {
        ConformanceDiagnostic::new(self.id(), self.default_severity(), message).with_layer(layer)
    }
}

impl ConformanceRule for ExtensionInvariantRule {
    fn id(&self) -> CheckId {
        CheckId::new("extension-invariant")
    }

    fn name(&self) -> &str {
        "Extension Invariant"
    }

    fn description(&self) -> &str {
        "Each layer's fragments, rules and plugins extend the layer beneath it"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Vec<ConformanceDiagnostic> {
        let mut diagnostics = Vec::new();

        for layer in Layer::ALL {
            let Some(parent) = layer.parent() else {
                continue;
            };
            let child_def = ctx.registry.definition(layer);
            let parent_def = ctx.registry.definition(parent);

            if !child_def.fragments.starts_with(&parent_def.fragments) {
                diagnostics.push(
                    self.diag(
                        layer,
                        format!("Layer '{layer}' does not start with the fragments of '{parent}'"),
                    )
                    .with_suggestion(format!("Declare `extends: {parent}` in layers.yml")),
                );
            }

            for id in parent_def.effective.rules.keys() {
                if !child_def.effective.rules.contains_key(id) {
                    diagnostics.push(self.diag(
                        layer,
                        format!("Rule '{id}' from '{parent}' is missing in '{layer}'"),
                    ));
                }
            }

            for name in parent_def.effective.plugins.keys() {
                if !child_def.effective.plugins.contains_key(name) {
                    diagnostics.push(self.diag(
                        layer,
                        format!("Plugin '{name}' from '{parent}' is missing in '{layer}'"),
                    ));
                }
            }
        }

        diagnostics
    }
}
