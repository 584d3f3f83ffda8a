//! Project configuration.
//!
//! A downstream project may carry a `.lintstack.yml` (or `lintstack.yml`)
//! choosing a layer and appending its own fragments:
//!
//! ```yaml
//! layer: functional
//! fragments:
//!   - name: project-overrides
//!     rules:
//!       no-console: warn
//! type_aware_rules:
//!   - "@acme/no-unsafe-query"
//! engine:
//!   command: pnpm exec eslint
//! ```
//!
//! `.lintstack.local.yml` is deep-merged on top (see [`super::merger`]).

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::debug;

use super::composer::{compose, EffectiveConfig};
use super::fragment::{Fragment, RuleId};
use super::layers::{Layer, LayerRegistry};
use super::merger::merge_configs;
use crate::error::{LintstackError, Result};

/// Candidate project config file names, in lookup order.
pub const PROJECT_CONFIG_FILES: &[&str] = &[".lintstack.yml", "lintstack.yml"];

/// Local override file name.
pub const LOCAL_CONFIG_FILE: &str = ".lintstack.local.yml";

/// Default command used to run the analysis engine.
pub const DEFAULT_ENGINE_COMMAND: &str = "npx eslint";

/// Contents of a project configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Layer the project builds on.
    #[serde(default)]
    pub layer: Layer,

    /// Project fragments appended after the layer's fragments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fragments: Vec<Fragment>,

    /// Extra rules the verification harness must turn off because they
    /// need type information.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_aware_rules: Vec<RuleId>,

    #[serde(default)]
    pub engine: EngineConfig,
}

/// How to run the analysis engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Command line prefix, split on whitespace. Defaults to `npx eslint`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Extra arguments passed after the harness's own.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl EngineConfig {
    pub fn command(&self) -> &str {
        self.command.as_deref().unwrap_or(DEFAULT_ENGINE_COMMAND)
    }
}

impl ProjectConfig {
    /// Parse a single configuration document.
    pub fn parse(content: &str, source_path: &Path) -> Result<Self> {
        let value: Value =
            serde_yaml::from_str(content).map_err(|e| LintstackError::ConfigParseError {
                path: source_path.to_path_buf(),
                message: e.to_string(),
            })?;
        Self::from_value(value, source_path)
    }

    fn from_value(value: Value, source_path: &Path) -> Result<Self> {
        // An empty file parses to null.
        let value = if value.is_null() {
            Value::Mapping(Default::default())
        } else {
            value
        };

        let mut config: ProjectConfig =
            serde_yaml::from_value(value).map_err(|e| LintstackError::ConfigParseError {
                path: source_path.to_path_buf(),
                message: e.to_string(),
            })?;

        for (index, fragment) in config.fragments.iter_mut().enumerate() {
            if fragment.name.is_none() {
                fragment.name = Some(format!("project-{}", index + 1));
            }
            fragment.validate()?;
        }

        Ok(config)
    }

    /// The layer's fragments followed by the project's.
    pub fn fragments(&self, registry: &LayerRegistry) -> Vec<Fragment> {
        let mut fragments = registry.fragments(self.layer).to_vec();
        fragments.extend(self.fragments.iter().cloned());
        fragments
    }

    /// Compose the project's effective configuration.
    pub fn compose(&self, registry: &LayerRegistry) -> Result<EffectiveConfig> {
        compose(&self.fragments(registry))
    }
}

/// Locations of project configuration files.
#[derive(Debug, Clone, Default)]
pub struct ProjectPaths {
    /// `.lintstack.yml` or `lintstack.yml`
    pub project: Option<PathBuf>,

    /// `.lintstack.local.yml`
    pub local: Option<PathBuf>,
}

impl ProjectPaths {
    /// Discover config files in a project root.
    pub fn discover(project_root: &Path) -> Self {
        let project = PROJECT_CONFIG_FILES
            .iter()
            .map(|name| project_root.join(name))
            .find(|path| path.is_file());
        let local = Some(project_root.join(LOCAL_CONFIG_FILE)).filter(|path| path.is_file());

        Self { project, local }
    }

    /// Existing paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.local.iter()).collect()
    }

    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

/// Walk up from `start` to the nearest directory holding a lintstack config,
/// a `package.json` or a `.git` directory.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if PROJECT_CONFIG_FILES
            .iter()
            .any(|name| current.join(name).is_file())
        {
            return Some(current);
        }
        if current.join("package.json").is_file() || current.join(".git").exists() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load a single file as a raw YAML value.
pub fn load_config_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;

    let value: Value =
        serde_yaml::from_str(&content).map_err(|e| LintstackError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(if value.is_null() {
        Value::Mapping(Default::default())
    } else {
        value
    })
}

/// Load the project config with local overrides merged on top.
///
/// A project without config files gets the default configuration
/// (the `base` layer, no extra fragments).
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let paths = ProjectPaths::discover(project_root);
    let existing = paths.all_existing();

    if existing.is_empty() {
        debug!("No lintstack config in {}", project_root.display());
        return Ok(ProjectConfig::default());
    }

    let mut values = Vec::with_capacity(existing.len());
    for path in &existing {
        debug!("Loading project config {}", path.display());
        values.push(load_config_value(path)?);
    }

    let source = existing
        .last()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| project_root.to_path_buf());
    ProjectConfig::from_value(merge_configs(&values), &source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fragment::{RuleSetting, Severity};
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn defaults_without_config_files() {
        let temp = TempDir::new().unwrap();
        let config = load_project_config(temp.path()).unwrap();

        assert_eq!(config.layer, Layer::Base);
        assert!(config.fragments.is_empty());
        assert_eq!(config.engine.command(), DEFAULT_ENGINE_COMMAND);
    }

    #[test]
    fn parses_layer_and_fragments() {
        let config = ProjectConfig::parse(
            r#"
layer: functional
fragments:
  - rules:
      no-console: warn
engine:
  command: pnpm exec eslint
"#,
            Path::new(".lintstack.yml"),
        )
        .unwrap();

        assert_eq!(config.layer, Layer::Functional);
        assert_eq!(config.fragments[0].label(), "project-1");
        assert_eq!(config.engine.command(), "pnpm exec eslint");
    }

    #[test]
    fn accepts_layer_aliases() {
        let config = ProjectConfig::parse("layer: functype\n", Path::new("x.yml")).unwrap();
        assert_eq!(config.layer, Layer::FunctionalLibrary);
    }

    #[test]
    fn unknown_layer_is_a_configuration_error() {
        let err = ProjectConfig::parse("layer: strictest\n", Path::new(".lintstack.yml"))
            .unwrap_err();
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains(".lintstack.yml"));
    }

    #[test]
    fn empty_file_is_default_config() {
        let config = ProjectConfig::parse("", Path::new(".lintstack.yml")).unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn local_overrides_merge_on_top() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            ".lintstack.yml",
            "layer: functional\nfragments:\n  - name: team\n    rules: { no-console: warn }\n",
        );
        write(
            temp.path(),
            ".lintstack.local.yml",
            "fragments:\n  - name: mine\n    rules: { no-console: \"off\" }\n",
        );

        let config = load_project_config(temp.path()).unwrap();

        assert_eq!(config.layer, Layer::Functional);
        let names: Vec<_> = config.fragments.iter().map(|f| f.label()).collect();
        assert_eq!(names, ["team", "mine"]);
    }

    #[test]
    fn unprefixed_file_is_found() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "lintstack.yml", "layer: functional-library\n");

        let paths = ProjectPaths::discover(temp.path());
        assert!(paths.has_project_config());
        assert_eq!(
            load_project_config(temp.path()).unwrap().layer,
            Layer::FunctionalLibrary
        );
    }

    #[test]
    fn project_fragments_compose_after_layer() {
        let registry = LayerRegistry::builtin().unwrap();
        let config = ProjectConfig {
            layer: Layer::Functional,
            fragments: vec![
                Fragment::named("local").with_rule("functional/no-let", RuleSetting::warn())
            ],
            ..Default::default()
        };

        let effective = config.compose(registry).unwrap();

        assert_eq!(
            effective.rule("functional/no-let").map(RuleSetting::level),
            Some(Severity::Warn)
        );
        assert_eq!(
            effective.fragments.len(),
            registry.fragments(Layer::Functional).len() + 1
        );
    }

    #[test]
    fn finds_project_root_from_nested_directory() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "package.json", "{}");
        let nested = temp.path().join("src").join("lib");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested), Some(temp.path().to_path_buf()));
    }
}
