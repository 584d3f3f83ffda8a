//! Built-in conformance checks.

mod extension_invariant;
mod inherited_rule_disabled;
mod plugin_conflict;
mod type_aware_allow_list;

pub use extension_invariant::ExtensionInvariantRule;
pub use inherited_rule_disabled::InheritedRuleDisabledRule;
pub use plugin_conflict::PluginConflictRule;
pub use type_aware_allow_list::TypeAwareAllowListRule;
