//! Rendering an effective configuration as an `eslint.config.mjs` module.
//!
//! Each fragment becomes one flat-config entry, in composition order, so
//! ESLint applies the same last-wins layering the composer does. Plugin and
//! parser handles become `import` bindings at the top of the module.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::config::{EffectiveConfig, Fragment, LanguageOptions, PluginHandle};
use crate::error::{LintstackError, Result};

/// Binding names for every plugin and parser handle a configuration uses.
#[derive(Debug, Default)]
struct Bindings {
    by_handle: BTreeMap<PluginHandle, String>,
    taken: Vec<String>,
}

impl Bindings {
    fn collect(fragments: &[Fragment]) -> Self {
        let mut bindings = Self::default();
        for fragment in fragments {
            for handle in fragment.plugins.values() {
                bindings.bind(handle);
            }
            if let Some(parser) = fragment
                .language_options
                .as_ref()
                .and_then(|o| o.parser.as_ref())
            {
                bindings.bind(parser);
            }
        }
        bindings
    }

    fn bind(&mut self, handle: &PluginHandle) {
        if self.by_handle.contains_key(handle) {
            return;
        }
        let base = identifier_for(handle);
        let mut name = base.clone();
        let mut suffix = 2;
        while self.taken.contains(&name) {
            name = format!("{base}{suffix}");
            suffix += 1;
        }
        self.taken.push(name.clone());
        self.by_handle.insert(handle.clone(), name);
    }

    fn name(&self, handle: &PluginHandle) -> &str {
        self.by_handle
            .get(handle)
            .map(String::as_str)
            .unwrap_or("undefined")
    }

    /// One import statement per package, named exports grouped.
    fn imports(&self) -> Vec<String> {
        let mut packages: BTreeMap<&str, (Option<&str>, Vec<(&str, &str)>)> = BTreeMap::new();
        for (handle, name) in &self.by_handle {
            let entry = packages.entry(handle.package_name()).or_default();
            match handle.export_name() {
                Some(export) => entry.1.push((export, name.as_str())),
                None => entry.0 = Some(name.as_str()),
            }
        }

        packages
            .into_iter()
            .map(|(package, (default, named))| {
                let named = named
                    .iter()
                    .map(|(export, name)| format!("{export} as {name}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                match (default, named.is_empty()) {
                    (Some(default), true) => format!("import {default} from \"{package}\";"),
                    (Some(default), false) => {
                        format!("import {default}, {{ {named} }} from \"{package}\";")
                    }
                    (None, _) => format!("import {{ {named} }} from \"{package}\";"),
                }
            })
            .collect()
    }
}

/// A JavaScript identifier derived from a package name and export.
///
/// `eslint-plugin-functional` becomes `eslintPluginFunctional`,
/// `typescript-eslint#parser` becomes `typescriptEslintParser`.
fn identifier_for(handle: &PluginHandle) -> String {
    let words = handle
        .package_name()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .chain(handle.export_name())
        .filter(|w| !w.is_empty());

    let mut ident = String::new();
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if ident.is_empty() {
                ident.push(first.to_ascii_lowercase());
            } else {
                ident.push(first.to_ascii_uppercase());
            }
            ident.extend(chars);
        }
    }

    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| LintstackError::Other(e.into()))
}

/// Indent every line after the first by `depth` levels of two spaces.
fn indent(text: &str, depth: usize) -> String {
    let pad = "  ".repeat(depth);
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_language_options(options: &LanguageOptions, bindings: &Bindings) -> Result<String> {
    let mut lines = Vec::new();
    if let Some(parser) = &options.parser {
        lines.push(format!("parser: {},", bindings.name(parser)));
    }

    // Everything but the parser is plain data.
    let mut data = options.clone();
    data.parser = None;
    let data = serde_json::to_value(&data).map_err(|e| LintstackError::Other(e.into()))?;
    if let Value::Object(map) = data {
        for (key, value) in map {
            lines.push(format!("{key}: {},", to_json(&value)?));
        }
    }

    Ok(format!(
        "{{\n{}\n}}",
        lines
            .iter()
            .map(|l| format!("  {}", indent(l, 1)))
            .collect::<Vec<_>>()
            .join("\n")
    ))
}

fn render_fragment(fragment: &Fragment, bindings: &Bindings) -> Result<String> {
    let mut lines = Vec::new();

    if let Some(name) = &fragment.name {
        lines.push(format!("name: {},", to_json(name)?));
    }
    if !fragment.files.is_empty() {
        lines.push(format!("files: {},", to_json(&fragment.files)?));
    }
    if !fragment.ignores.is_empty() {
        lines.push(format!("ignores: {},", to_json(&fragment.ignores)?));
    }
    if !fragment.plugins.is_empty() {
        let entries = fragment
            .plugins
            .iter()
            .map(|(name, handle)| {
                Ok(format!("  {}: {},", to_json(name)?, bindings.name(handle)))
            })
            .collect::<Result<Vec<_>>>()?;
        lines.push(format!("plugins: {{\n{}\n}},", entries.join("\n")));
    }
    if let Some(options) = fragment.language_options.as_ref().filter(|o| !o.is_empty()) {
        lines.push(format!(
            "languageOptions: {},",
            render_language_options(options, bindings)?
        ));
    }
    if !fragment.settings.is_empty() {
        lines.push(format!("settings: {},", to_json(&fragment.settings)?));
    }
    if !fragment.rules.is_empty() {
        lines.push(format!("rules: {},", to_json(&fragment.rules)?));
    }

    Ok(format!(
        "{{\n{}\n}}",
        lines
            .iter()
            .map(|l| format!("  {}", indent(l, 1)))
            .collect::<Vec<_>>()
            .join("\n")
    ))
}

/// Render `config` as an ES module whose default export is the fragment
/// list. `header` is emitted as a leading line comment.
pub fn render_module(config: &EffectiveConfig, header: &str) -> Result<String> {
    let bindings = Bindings::collect(&config.fragments);

    let mut out = String::new();
    for line in header.lines() {
        out.push_str(&format!("// {line}\n"));
    }
    for import in bindings.imports() {
        out.push_str(&import);
        out.push('\n');
    }
    out.push_str("\nexport default [\n");
    for fragment in &config.fragments {
        let entry = render_fragment(fragment, &bindings)?;
        out.push_str(&format!("  {},\n", indent(&entry, 1)));
    }
    out.push_str("];\n");
    Ok(out)
}
