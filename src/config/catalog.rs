//! Rule catalog metadata.
//!
//! The catalog records facts about known upstream rules that the presets
//! cannot express themselves, currently which rules need whole-program type
//! information. The verification harness keeps its own explicit allow-list;
//! the `type-aware-allow-list` conformance rule compares the two so a new
//! type-aware rule in the catalog cannot slip past the harness unnoticed.

use std::collections::BTreeSet;

use serde::Deserialize;

use super::fragment::RuleId;

/// Metadata about known rules.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleCatalog {
    pub version: u32,

    /// Rules that cannot run without type information.
    #[serde(default)]
    pub requires_type_information: BTreeSet<RuleId>,
}

impl RuleCatalog {
    /// Parse a catalog document.
    pub fn from_yaml_str(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    pub fn requires_type_information(&self, id: &RuleId) -> bool {
        self.requires_type_information.contains(id)
    }

    /// Type-aware rules in the catalog, sorted.
    pub fn type_aware_rules(&self) -> impl Iterator<Item = &RuleId> {
        self.requires_type_information.iter()
    }
}
