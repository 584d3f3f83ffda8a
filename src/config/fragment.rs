//! Configuration fragments.
//!
//! A [`Fragment`] is one immutable unit of lint configuration, shaped like a
//! single entry of an ESLint flat-config array:
//!
//! ```yaml
//! name: import-sort
//! plugins:
//!   simple-import-sort: eslint-plugin-simple-import-sort
//! rules:
//!   simple-import-sort/imports: error
//!   prettier/prettier: [error, {}, { usePrettierrc: true }]
//! ```
//!
//! Rule settings are atomic values ([`RuleSetting`]): a level optionally
//! followed by options. Anything else is rejected as a malformed fragment.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use globset::{Glob, GlobSetBuilder};
use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{LintstackError, Result};

/// Identifier of a lint rule: `no-undef` or `<plugin>/<rule>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    /// Create a new rule ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The full identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The plugin namespace, or `None` for core rules.
    ///
    /// Scoped plugins split at the last `/`, so
    /// `@typescript-eslint/no-explicit-any` belongs to `@typescript-eslint`.
    pub fn plugin(&self) -> Option<&str> {
        self.0.rsplit_once('/').map(|(plugin, _)| plugin)
    }

    /// The rule name without its plugin namespace.
    pub fn rule_name(&self) -> &str {
        self.0.rsplit_once('/').map_or(&self.0, |(_, name)| name)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RuleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RuleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Level a rule is configured at.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Rule is disabled.
    Off,
    /// Rule reports warnings.
    Warn,
    /// Rule reports errors.
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    /// Whether a rule at this level runs at all.
    pub fn is_enabled(self) -> bool {
        self != Severity::Off
    }

    /// Read a level token: `"off" | "warn" | "error"` or `0 | 1 | 2`.
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => s.parse().ok(),
            Value::Number(n) => match n.as_u64()? {
                0 => Some(Severity::Off),
                1 => Some(Severity::Warn),
                2 => Some(Severity::Error),
                _ => None,
            },
            _ => None,
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "off" => Ok(Severity::Off),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            other => Err(format!("unknown rule level: {other}")),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Setting for one rule: a level plus rule-specific options.
///
/// Serialized as the bare level token when there are no options
/// (`"error"`), otherwise as an array (`["error", {...}]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct RuleSetting {
    level: Severity,
    options: Vec<Value>,
}

impl RuleSetting {
    /// A setting with no options.
    pub fn new(level: Severity) -> Self {
        Self {
            level,
            options: Vec::new(),
        }
    }

    pub fn off() -> Self {
        Self::new(Severity::Off)
    }

    pub fn warn() -> Self {
        Self::new(Severity::Warn)
    }

    pub fn error() -> Self {
        Self::new(Severity::Error)
    }

    /// A setting carrying rule options after the level.
    pub fn with_options(level: Severity, options: Vec<Value>) -> Self {
        Self { level, options }
    }

    /// Parse a raw value, attributing failures to `fragment`.
    pub fn from_value(fragment: &str, value: Value) -> Result<Self> {
        Self::try_from(value).map_err(|message| LintstackError::MalformedFragment {
            fragment: fragment.to_string(),
            message,
        })
    }

    pub fn level(&self) -> Severity {
        self.level
    }

    pub fn options(&self) -> &[Value] {
        &self.options
    }

    pub fn is_enabled(&self) -> bool {
        self.level.is_enabled()
    }
}

impl TryFrom<Value> for RuleSetting {
    type Error = String;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::Array(mut items) => {
                if items.is_empty() {
                    return Err("rule setting array must start with a level".to_string());
                }
                let head = items.remove(0);
                let level = Severity::from_value(&head).ok_or_else(|| {
                    format!("rule setting array must start with a level, found {head}")
                })?;
                Ok(Self::with_options(level, items))
            }
            other => Severity::from_value(&other).map(Self::new).ok_or_else(|| {
                format!("rule setting must be a level or [level, options...], found {other}")
            }),
        }
    }
}

impl From<RuleSetting> for Value {
    fn from(setting: RuleSetting) -> Self {
        let level = Value::String(setting.level.as_str().to_string());
        if setting.options.is_empty() {
            level
        } else {
            let mut items = Vec::with_capacity(setting.options.len() + 1);
            items.push(level);
            items.extend(setting.options);
            Value::Array(items)
        }
    }
}

impl JsonSchema for RuleSetting {
    fn schema_name() -> Cow<'static, str> {
        "RuleSetting".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        schemars::json_schema!({
            "description": "Rule level, or an array of a level followed by rule options",
            "oneOf": [
                { "enum": ["off", "warn", "error", 0, 1, 2] },
                {
                    "type": "array",
                    "minItems": 1,
                    "prefixItems": [{ "enum": ["off", "warn", "error", 0, 1, 2] }]
                }
            ]
        })
    }
}

/// Capability handle for a plugin or parser: the package providing it and
/// an optional named export (`typescript-eslint#plugin`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PluginHandle {
    package: String,
    export: Option<String>,
}

impl PluginHandle {
    /// Handle for a package's default export.
    pub fn package(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            export: None,
        }
    }

    /// Handle for a named export of a package.
    pub fn export(package: impl Into<String>, export: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            export: Some(export.into()),
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package
    }

    pub fn export_name(&self) -> Option<&str> {
        self.export.as_deref()
    }
}

impl FromStr for PluginHandle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (package, export) = match s.split_once('#') {
            Some((package, export)) => (package, Some(export)),
            None => (s, None),
        };
        if package.trim().is_empty() {
            return Err(format!("plugin handle '{s}' has no package"));
        }
        if export.is_some_and(|e| e.trim().is_empty()) {
            return Err(format!("plugin handle '{s}' has an empty export name"));
        }
        Ok(Self {
            package: package.to_string(),
            export: export.map(str::to_string),
        })
    }
}

impl TryFrom<String> for PluginHandle {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PluginHandle> for String {
    fn from(handle: PluginHandle) -> Self {
        handle.to_string()
    }
}

impl fmt::Display for PluginHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.export {
            Some(export) => write!(f, "{}#{}", self.package, export),
            None => f.write_str(&self.package),
        }
    }
}

impl JsonSchema for PluginHandle {
    fn schema_name() -> Cow<'static, str> {
        "PluginHandle".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        schemars::json_schema!({
            "description": "Package providing the plugin, optionally `package#namedExport`",
            "type": "string",
            "minLength": 1
        })
    }
}

/// Access a global identifier is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GlobalAccess {
    #[serde(alias = "readable")]
    Readonly,
    #[serde(alias = "writeable")]
    Writable,
    Off,
}

/// Module system the parser assumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Module,
    Script,
    Commonjs,
}

/// Language and parser options of a fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LanguageOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecma_version: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,

    /// Parser package, e.g. `@typescript-eslint/parser`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser: Option<PluginHandle>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub globals: BTreeMap<String, GlobalAccess>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parser_options: Map<String, Value>,
}

impl LanguageOptions {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Shallow-merge `overlay` into `self`.
    ///
    /// Scalars are replaced when the overlay sets them. Globals are unioned,
    /// so a later fragment may change a global's access but never drops one.
    /// Parser options merge key-wise.
    pub fn merge(&mut self, overlay: &LanguageOptions) {
        if overlay.ecma_version.is_some() {
            self.ecma_version = overlay.ecma_version;
        }
        if overlay.source_type.is_some() {
            self.source_type = overlay.source_type;
        }
        if overlay.parser.is_some() {
            self.parser = overlay.parser.clone();
        }
        for (name, access) in &overlay.globals {
            self.globals.insert(name.clone(), *access);
        }
        for (key, value) in &overlay.parser_options {
            self.parser_options.insert(key.clone(), value.clone());
        }
    }

    /// Whether any of `keys` is set to something other than `false`/`null`
    /// in the parser options.
    pub fn requests_any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| {
            self.parser_options
                .get(*key)
                .is_some_and(|v| !matches!(v, Value::Null | Value::Bool(false)))
        })
    }

    /// Copy of these options with the given parser options removed.
    pub fn without_parser_options(&self, keys: &[&str]) -> LanguageOptions {
        let mut stripped = self.clone();
        stripped
            .parser_options
            .retain(|key, _| !keys.contains(&key.as_str()));
        stripped
    }
}

/// One immutable unit of lint configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Fragment {
    /// Label used in diagnostics and rendered configs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Glob patterns selecting the files this fragment applies to. Empty
    /// means every file the engine lints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,

    /// Glob patterns this fragment excludes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignores: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub plugins: BTreeMap<String, PluginHandle>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<RuleId, RuleSetting>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_options: Option<LanguageOptions>,

    /// Shared settings visible to every rule (e.g. resolver options).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub settings: Map<String, Value>,
}

impl Fragment {
    /// An empty fragment with a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Parse a fragment from YAML (JSON is valid YAML too).
    pub fn from_yaml_str(label: &str, source: &str) -> Result<Self> {
        let mut fragment: Fragment =
            serde_yaml::from_str(source).map_err(|e| LintstackError::MalformedFragment {
                fragment: label.to_string(),
                message: e.to_string(),
            })?;
        if fragment.name.is_none() {
            fragment.name = Some(label.to_string());
        }
        fragment.validate()?;
        Ok(fragment)
    }

    /// Parse a fragment from an already-decoded YAML value.
    pub fn from_yaml_value(label: &str, value: serde_yaml::Value) -> Result<Self> {
        let mut fragment: Fragment =
            serde_yaml::from_value(value).map_err(|e| LintstackError::MalformedFragment {
                fragment: label.to_string(),
                message: e.to_string(),
            })?;
        if fragment.name.is_none() {
            fragment.name = Some(label.to_string());
        }
        fragment.validate()?;
        Ok(fragment)
    }

    pub fn with_files<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn with_ignores<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignores.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn with_plugin(mut self, name: impl Into<String>, handle: PluginHandle) -> Self {
        self.plugins.insert(name.into(), handle);
        self
    }

    pub fn with_rule(mut self, id: impl Into<RuleId>, setting: RuleSetting) -> Self {
        self.rules.insert(id.into(), setting);
        self
    }

    pub fn with_language_options(mut self, options: LanguageOptions) -> Self {
        self.language_options = Some(options);
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: Value) -> Self {
        self.settings.insert(key.into(), value);
        self
    }

    /// Name for messages, falling back to a placeholder.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }

    /// A fragment carrying nothing but ignore patterns applies them globally.
    pub fn is_global_ignore(&self) -> bool {
        !self.ignores.is_empty()
            && self.files.is_empty()
            && self.plugins.is_empty()
            && self.rules.is_empty()
            && self.language_options.is_none()
            && self.settings.is_empty()
    }

    /// Check the parts serde cannot: glob syntax and empty rule ids.
    pub fn validate(&self) -> Result<()> {
        let patterns = self
            .files
            .iter()
            .map(|p| ("files", p))
            .chain(self.ignores.iter().map(|p| ("ignore", p)));
        for (kind, pattern) in patterns {
            Glob::new(pattern).map_err(|e| LintstackError::MalformedFragment {
                fragment: self.label().to_string(),
                message: format!("invalid {kind} pattern '{pattern}': {e}"),
            })?;
        }
        if let Some(id) = self.rules.keys().find(|id| id.as_str().trim().is_empty()) {
            return Err(LintstackError::MalformedFragment {
                fragment: self.label().to_string(),
                message: format!("empty rule id '{id}'"),
            });
        }
        Ok(())
    }

    /// Whether `path`, or any directory above it, matches one of this
    /// fragment's ignore patterns.
    pub fn ignores_path(&self, path: &Path) -> Result<bool> {
        if self.ignores.is_empty() {
            return Ok(false);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in &self.ignores {
            let glob = Glob::new(pattern).map_err(|e| LintstackError::MalformedFragment {
                fragment: self.label().to_string(),
                message: format!("invalid ignore pattern '{pattern}': {e}"),
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|e| LintstackError::MalformedFragment {
            fragment: self.label().to_string(),
            message: e.to_string(),
        })?;

        Ok(path
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .any(|p| set.is_match(p)))
    }
}
