//! Resolving which configuration a command works on.

use std::path::Path;

use tracing::debug;

use crate::config::{load_project_config, EffectiveConfig, Layer, LayerRegistry, ProjectConfig};
use crate::error::Result;

/// The configuration a command operates on: an explicit layer, or the
/// project's own configuration.
#[derive(Debug)]
pub struct ConfigTarget {
    /// Human label, e.g. `layer functional` or `project (base + 2 fragments)`.
    pub label: String,
    pub project: ProjectConfig,
    pub effective: EffectiveConfig,
}

impl ConfigTarget {
    /// Resolve `layer`, or the project configuration under `project_root`
    /// when no layer is given.
    ///
    /// The project config is loaded either way so its engine settings and
    /// extra type-aware rules still apply to an explicit layer.
    pub fn resolve(project_root: &Path, layer: Option<Layer>) -> Result<Self> {
        let registry = LayerRegistry::builtin()?;
        let project = load_project_config(project_root)?;

        let target = match layer {
            Some(layer) => Self {
                label: format!("layer {layer}"),
                effective: registry.effective(layer).clone(),
                project,
            },
            None => {
                let label = if project.fragments.is_empty() {
                    format!("project ({})", project.layer)
                } else {
                    format!(
                        "project ({} + {} fragment{})",
                        project.layer,
                        project.fragments.len(),
                        if project.fragments.len() == 1 { "" } else { "s" }
                    )
                };
                Self {
                    label,
                    effective: project.compose(registry)?,
                    project,
                }
            }
        };

        debug!("Resolved configuration target: {}", target.label);
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_layer_ignores_project_fragments() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".lintstack.yml"),
            "layer: functional\nfragments:\n  - rules:\n      no-console: error\n",
        )
        .unwrap();

        let target = ConfigTarget::resolve(temp.path(), Some(Layer::Base)).unwrap();

        assert_eq!(target.label, "layer base");
        assert!(target.effective.rule("no-console").is_none());
        assert_eq!(target.project.layer, Layer::Functional);
    }

    #[test]
    fn project_target_appends_fragments() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".lintstack.yml"),
            "layer: functional\nfragments:\n  - rules:\n      no-console: error\n",
        )
        .unwrap();

        let target = ConfigTarget::resolve(temp.path(), None).unwrap();

        assert_eq!(target.label, "project (functional + 1 fragment)");
        assert!(target.effective.is_rule_enabled("no-console"));
        assert!(target.effective.is_rule_enabled("functional/no-let"));
    }

    #[test]
    fn project_without_config_is_base() {
        let temp = TempDir::new().unwrap();
        let target = ConfigTarget::resolve(temp.path(), None).unwrap();
        assert_eq!(target.label, "project (base)");
        assert!(target.effective.has_plugin("simple-import-sort"));
    }
}
