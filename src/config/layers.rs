//! Built-in layer registry.
//!
//! The three shareable presets are data, embedded at compile time from
//! `presets/`:
//!
//! - `layers.yml` names each layer's fragments and the layer it `extends`
//! - `fragments/*.yml` hold one [`Fragment`] each
//! - `globals.yml` holds global-identifier sets that fragments pull in with
//!   a top-level `globalSets: [browser, node]` key
//! - `catalog.yml` holds rule metadata ([`RuleCatalog`])
//!
//! The registry is parsed and composed once per process and is read-only
//! afterwards; [`LayerRegistry::builtin`] hands out a shared reference.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use include_dir::{include_dir, Dir};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::debug;

use super::catalog::RuleCatalog;
use super::composer::{compose, EffectiveConfig};
use super::fragment::{Fragment, GlobalAccess};
use crate::error::{LintstackError, Result};

/// Embedded presets directory.
static PRESETS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/presets");

/// Global-identifier sets by name.
pub type GlobalSets = BTreeMap<String, BTreeMap<String, GlobalAccess>>;

/// One of the shareable presets.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Layer {
    /// TypeScript recommended rules, formatting and import sorting.
    #[default]
    Base,
    /// `base` plus functional-programming rules.
    #[serde(alias = "fp")]
    Functional,
    /// `functional` plus library-specific preferences.
    #[serde(alias = "functype")]
    FunctionalLibrary,
}

impl Layer {
    /// All layers, each extending the one before it.
    pub const ALL: [Layer; 3] = [Layer::Base, Layer::Functional, Layer::FunctionalLibrary];

    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Base => "base",
            Layer::Functional => "functional",
            Layer::FunctionalLibrary => "functional-library",
        }
    }

    /// The layer this one is expected to extend.
    pub fn parent(self) -> Option<Layer> {
        match self {
            Layer::Base => None,
            Layer::Functional => Some(Layer::Base),
            Layer::FunctionalLibrary => Some(Layer::Functional),
        }
    }
}

impl FromStr for Layer {
    type Err = LintstackError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "base" => Ok(Layer::Base),
            "functional" | "fp" => Ok(Layer::Functional),
            "functional-library" | "functype" => Ok(Layer::FunctionalLibrary),
            other => Err(LintstackError::UnknownLayer {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Parsed `layers.yml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerManifest {
    pub version: u32,
    pub layers: BTreeMap<String, ManifestEntry>,
}

/// One layer in the manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub fragments: Vec<String>,
}

/// A fully resolved layer.
#[derive(Debug, Clone)]
pub struct LayerDefinition {
    pub layer: Layer,
    pub description: String,
    /// Ordered fragments, inherited ones first.
    pub fragments: Vec<Fragment>,
    /// The composed configuration.
    pub effective: EffectiveConfig,
}

/// Registry of the resolved layers.
#[derive(Debug, Clone)]
pub struct LayerRegistry {
    layers: BTreeMap<Layer, LayerDefinition>,
    catalog: RuleCatalog,
}

impl LayerRegistry {
    /// The process-wide registry built from the embedded presets.
    pub fn builtin() -> Result<&'static LayerRegistry> {
        static REGISTRY: OnceLock<LayerRegistry> = OnceLock::new();

        if let Some(registry) = REGISTRY.get() {
            return Ok(registry);
        }
        let registry = Self::load_embedded()?;
        Ok(REGISTRY.get_or_init(|| registry))
    }

    /// Parse and compose the embedded presets.
    pub fn load_embedded() -> Result<Self> {
        let manifest: LayerManifest = parse_embedded("layers.yml")?;
        let globals: GlobalSets = parse_embedded("globals.yml")?;
        let catalog: RuleCatalog = parse_embedded("catalog.yml")?;

        let mut fragments = BTreeMap::new();
        for name in manifest.layers.values().flat_map(|e| e.fragments.iter()) {
            if fragments.contains_key(name) {
                continue;
            }
            let path = format!("fragments/{name}.yml");
            let source = embedded_str(&path)?;
            fragments.insert(name.clone(), load_fragment(name, source, &globals)?);
        }

        debug!(
            "Loaded {} embedded fragment(s) for {} layer(s)",
            fragments.len(),
            manifest.layers.len()
        );

        Self::from_parts(&manifest, &fragments, catalog)
    }

    /// Resolve a manifest against already-parsed fragments.
    pub fn from_parts(
        manifest: &LayerManifest,
        fragments: &BTreeMap<String, Fragment>,
        catalog: RuleCatalog,
    ) -> Result<Self> {
        for name in manifest.layers.keys() {
            name.parse::<Layer>()?;
        }

        let mut layers = BTreeMap::new();
        for layer in Layer::ALL {
            let entry = manifest.layers.get(layer.as_str()).ok_or_else(|| {
                LintstackError::PresetParseError {
                    path: PathBuf::from("presets/layers.yml"),
                    message: format!("layer '{layer}' is not defined"),
                }
            })?;
            let resolved = resolve_fragments(layer.as_str(), manifest, fragments, &mut Vec::new())?;
            let effective = compose(&resolved)?;
            layers.insert(
                layer,
                LayerDefinition {
                    layer,
                    description: entry.description.clone(),
                    fragments: resolved,
                    effective,
                },
            );
        }

        Ok(Self { layers, catalog })
    }

    /// Definition of a layer.
    pub fn definition(&self, layer: Layer) -> &LayerDefinition {
        // from_parts inserts every Layer::ALL entry
        &self.layers[&layer]
    }

    /// Ordered fragments of a layer.
    pub fn fragments(&self, layer: Layer) -> &[Fragment] {
        &self.definition(layer).fragments
    }

    /// Composed configuration of a layer.
    pub fn effective(&self, layer: Layer) -> &EffectiveConfig {
        &self.definition(layer).effective
    }

    /// Fragments of a layer given by name.
    pub fn build_layer(&self, name: &str) -> Result<Vec<Fragment>> {
        let layer: Layer = name.parse()?;
        Ok(self.fragments(layer).to_vec())
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Layer definitions from `base` upward.
    pub fn iter(&self) -> impl Iterator<Item = &LayerDefinition> {
        self.layers.values()
    }
}

/// Fragments of a built-in layer given by name.
///
/// Fails with [`LintstackError::UnknownLayer`] for names other than
/// `base`, `functional` and `functional-library` (or their aliases).
pub fn build_layer(name: &str) -> Result<Vec<Fragment>> {
    LayerRegistry::builtin()?.build_layer(name)
}

/// Pre-composed configuration of a built-in layer.
pub fn preset(layer: Layer) -> Result<&'static EffectiveConfig> {
    Ok(LayerRegistry::builtin()?.effective(layer))
}

fn resolve_fragments(
    name: &str,
    manifest: &LayerManifest,
    fragments: &BTreeMap<String, Fragment>,
    visiting: &mut Vec<String>,
) -> Result<Vec<Fragment>> {
    if visiting.iter().any(|v| v == name) {
        let mut cycle = visiting.clone();
        cycle.push(name.to_string());
        return Err(LintstackError::CircularExtends {
            cycle: cycle.join(" → "),
        });
    }

    let entry = manifest
        .layers
        .get(name)
        .ok_or_else(|| LintstackError::UnknownLayer {
            name: name.to_string(),
        })?;

    visiting.push(name.to_string());
    let mut resolved = match &entry.extends {
        Some(parent) => resolve_fragments(parent, manifest, fragments, visiting)?,
        None => Vec::new(),
    };
    visiting.pop();

    for fragment_name in &entry.fragments {
        let fragment =
            fragments
                .get(fragment_name)
                .ok_or_else(|| LintstackError::PresetNotFound {
                    path: Path::new("presets/fragments").join(format!("{fragment_name}.yml")),
                })?;
        resolved.push(fragment.clone());
    }

    Ok(resolved)
}

/// Parse one fragment file, expanding its `globalSets` key.
pub fn load_fragment(name: &str, source: &str, globals: &GlobalSets) -> Result<Fragment> {
    let mut value: Value =
        serde_yaml::from_str(source).map_err(|e| LintstackError::MalformedFragment {
            fragment: name.to_string(),
            message: e.to_string(),
        })?;
    expand_global_sets(name, &mut value, globals)?;
    Fragment::from_yaml_value(name, value)
}

fn expand_global_sets(name: &str, value: &mut Value, sets: &GlobalSets) -> Result<()> {
    let malformed = |message: String| LintstackError::MalformedFragment {
        fragment: name.to_string(),
        message,
    };

    let Some(mapping) = value.as_mapping_mut() else {
        return Ok(());
    };
    let Some(requested) = mapping.remove("globalSets") else {
        return Ok(());
    };
    let requested: Vec<String> =
        serde_yaml::from_value(requested).map_err(|e| malformed(e.to_string()))?;

    let mut globals = Mapping::new();
    for set_name in &requested {
        let set = sets
            .get(set_name)
            .ok_or_else(|| malformed(format!("unknown global set '{set_name}'")))?;
        for (identifier, access) in set {
            let access = serde_yaml::to_value(access).map_err(|e| malformed(e.to_string()))?;
            globals.insert(Value::from(identifier.as_str()), access);
        }
    }

    if !mapping.contains_key("languageOptions") {
        mapping.insert(
            Value::from("languageOptions"),
            Value::Mapping(Mapping::new()),
        );
    }
    let options = mapping
        .get_mut("languageOptions")
        .and_then(Value::as_mapping_mut)
        .ok_or_else(|| malformed("languageOptions must be a mapping".to_string()))?;

    // Globals spelled out in the fragment win over the sets.
    if let Some(Value::Mapping(explicit)) = options.remove("globals") {
        for (identifier, access) in explicit {
            globals.insert(identifier, access);
        }
    }
    options.insert(Value::from("globals"), Value::Mapping(globals));

    Ok(())
}

fn embedded_str(path: &str) -> Result<&'static str> {
    let file = PRESETS_DIR
        .get_file(path)
        .ok_or_else(|| LintstackError::PresetNotFound {
            path: Path::new("presets").join(path),
        })?;

    file.contents_utf8()
        .ok_or_else(|| LintstackError::PresetParseError {
            path: Path::new("presets").join(path),
            message: "Invalid UTF-8".to_string(),
        })
}

fn parse_embedded<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let source = embedded_str(path)?;
    serde_yaml::from_str(source).map_err(|e| LintstackError::PresetParseError {
        path: Path::new("presets").join(path),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fragment::{RuleId, RuleSetting};

    fn manifest(source: &str) -> LayerManifest {
        serde_yaml::from_str(source).unwrap()
    }

    fn tiny_fragments() -> BTreeMap<String, Fragment> {
        BTreeMap::from([
            (
                "core".to_string(),
                Fragment::named("core").with_rule("no-undef", RuleSetting::error()),
            ),
            (
                "fp".to_string(),
                Fragment::named("fp").with_rule("functional/no-let", RuleSetting::error()),
            ),
            (
                "lib".to_string(),
                Fragment::named("lib").with_rule("functype/prefer-option", RuleSetting::warn()),
            ),
        ])
    }

    const TINY_MANIFEST: &str = r#"
version: 1
layers:
  base:
    fragments: [core]
  functional:
    extends: base
    fragments: [fp]
  functional-library:
    extends: functional
    fragments: [lib]
"#;

    #[test]
    fn layer_parses_names_and_aliases() {
        assert_eq!("base".parse::<Layer>().unwrap(), Layer::Base);
        assert_eq!("fp".parse::<Layer>().unwrap(), Layer::Functional);
        assert_eq!(
            "functype".parse::<Layer>().unwrap(),
            Layer::FunctionalLibrary
        );
        assert_eq!(Layer::FunctionalLibrary.to_string(), "functional-library");
    }

    #[test]
    fn unknown_layer_name_is_a_configuration_error() {
        let err = "nonexistent".parse::<Layer>().unwrap_err();
        assert!(matches!(err, LintstackError::UnknownLayer { .. }));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn layer_parents_follow_extension_chain() {
        assert_eq!(Layer::Base.parent(), None);
        assert_eq!(Layer::Functional.parent(), Some(Layer::Base));
        assert_eq!(Layer::FunctionalLibrary.parent(), Some(Layer::Functional));
    }

    #[test]
    fn extends_prepends_parent_fragments() {
        let registry = LayerRegistry::from_parts(
            &manifest(TINY_MANIFEST),
            &tiny_fragments(),
            RuleCatalog::default(),
        )
        .unwrap();

        let names: Vec<_> = registry
            .fragments(Layer::FunctionalLibrary)
            .iter()
            .map(|f| f.label().to_string())
            .collect();
        assert_eq!(names, ["core", "fp", "lib"]);

        let effective = registry.effective(Layer::Functional);
        assert!(effective.rules.contains_key(&RuleId::new("no-undef")));
        assert!(effective.rules.contains_key(&RuleId::new("functional/no-let")));
    }

    #[test]
    fn circular_extends_is_rejected() {
        let looped = manifest(
            r#"
version: 1
layers:
  base:
    extends: functional
    fragments: [core]
  functional:
    extends: base
    fragments: [fp]
  functional-library:
    fragments: [lib]
"#,
        );

        let err = LayerRegistry::from_parts(&looped, &tiny_fragments(), RuleCatalog::default())
            .unwrap_err();
        match err {
            LintstackError::CircularExtends { cycle } => {
                assert_eq!(cycle, "base → functional → base");
            }
            other => panic!("expected CircularExtends, got {other:?}"),
        }
    }

    #[test]
    fn missing_fragment_is_reported() {
        let missing = manifest(
            r#"
version: 1
layers:
  base:
    fragments: [core, nowhere]
  functional:
    fragments: [fp]
  functional-library:
    fragments: [lib]
"#,
        );

        let err = LayerRegistry::from_parts(&missing, &tiny_fragments(), RuleCatalog::default())
            .unwrap_err();
        assert!(err.to_string().contains("nowhere.yml"));
    }

    #[test]
    fn unknown_manifest_layer_is_rejected() {
        let extra = manifest(
            r#"
version: 1
layers:
  base: { fragments: [core] }
  functional: { fragments: [fp] }
  functional-library: { fragments: [lib] }
  strict: { fragments: [core] }
"#,
        );

        let err = LayerRegistry::from_parts(&extra, &tiny_fragments(), RuleCatalog::default())
            .unwrap_err();
        assert!(matches!(err, LintstackError::UnknownLayer { ref name } if name == "strict"));
    }

    #[test]
    fn undefined_builtin_layer_is_rejected() {
        let partial = manifest("version: 1\nlayers:\n  base: { fragments: [core] }\n");
        let err = LayerRegistry::from_parts(&partial, &tiny_fragments(), RuleCatalog::default())
            .unwrap_err();
        assert!(err.to_string().contains("functional"));
    }

    #[test]
    fn global_sets_expand_into_language_options() {
        let sets: GlobalSets = BTreeMap::from([(
            "browser".to_string(),
            BTreeMap::from([
                ("window".to_string(), GlobalAccess::Readonly),
                ("name".to_string(), GlobalAccess::Readonly),
            ]),
        )]);

        let fragment = load_fragment(
            "lang",
            r#"
globalSets: [browser]
languageOptions:
  ecmaVersion: 2020
  globals:
    name: "off"
"#,
            &sets,
        )
        .unwrap();

        let options = fragment.language_options.unwrap();
        assert_eq!(options.ecma_version, Some(2020));
        assert_eq!(options.globals["window"], GlobalAccess::Readonly);
        assert_eq!(options.globals["name"], GlobalAccess::Off);
    }

    #[test]
    fn unknown_global_set_is_malformed() {
        let err = load_fragment("lang", "globalSets: [deno]\n", &GlobalSets::new()).unwrap_err();
        assert!(matches!(err, LintstackError::MalformedFragment { .. }));
        assert!(err.to_string().contains("deno"));
    }

    #[test]
    fn embedded_registry_loads() {
        let registry = LayerRegistry::builtin().unwrap();
        assert_eq!(registry.iter().count(), 3);
        assert!(registry.catalog().version >= 1);
        for definition in registry.iter() {
            assert!(!definition.description.is_empty());
            assert!(!definition.fragments.is_empty());
        }
    }

    #[test]
    fn build_layer_returns_ordered_fragments() {
        let base = build_layer("base").unwrap();
        let functional = build_layer("functional").unwrap();
        let library = build_layer("functional-library").unwrap();

        assert_eq!(functional.len(), base.len() + 1);
        assert_eq!(&functional[..base.len()], &base[..]);
        assert_eq!(library.len(), functional.len() + 2);
        assert_eq!(&library[..functional.len()], &functional[..]);
    }

    #[test]
    fn build_layer_rejects_unknown_name() {
        let err = build_layer("nonexistent").unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn base_starts_with_shared_ignores() {
        let base = build_layer("base").unwrap();
        assert!(base[0].is_global_ignore());
        assert!(base[0].ignores.iter().any(|p| p == "**/node_modules"));
    }

    #[test]
    fn base_language_options_merge_global_sets() {
        let effective = preset(Layer::Base).unwrap();
        let globals = &effective.language_options.globals;
        assert!(globals.contains_key("window"));
        assert!(globals.contains_key("define"));
        assert!(globals.contains_key("process"));
        assert_eq!(effective.language_options.ecma_version, Some(2020));
    }
}
