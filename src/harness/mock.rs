//! Mock analysis engine for testing.
//!
//! `MockEngine` implements [`AnalysisEngine`] with a handful of cheap,
//! deterministic checks that stand in for the real rules. Every check
//! honours the configured rule level: a rule that is absent or `off` never
//! reports, and `warn`/`error` map to diagnostic severities 1 and 2.
//!
//! | Check | Reported as |
//! |-------|-------------|
//! | unbalanced `()[]{}`, unterminated string or regex literal | one fatal diagnostic, nothing else |
//! | parser options still request type information | one fatal diagnostic |
//! | enabled rule listed as type-aware | that rule, "requires type information" |
//! | unsorted run of single-line imports | `simple-import-sort/imports` |
//! | `let` declaration | `functional/no-let` |
//! | `var` declaration | `no-var` |
//!
//! # Example
//!
//! ```
//! use lintstack::config::build_layer;
//! use lintstack::harness::{Harness, MockEngine};
//!
//! let config = lintstack::config::compose(&build_layer("functional").unwrap()).unwrap();
//! let harness = Harness::new(MockEngine::new());
//!
//! let diagnostics = harness.verify("let x = 1\n", &config, "test.ts").unwrap();
//! assert!(diagnostics.iter().any(|d| d.is_rule("functional/no-let")));
//! ```

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use super::diagnostic::{Diagnostic, DiagnosticSeverity};
use super::engine::AnalysisEngine;
use super::sanitize::TYPE_INFORMATION_OPTIONS;
use crate::config::{EffectiveConfig, RuleCatalog, RuleId, Severity};
use crate::error::Result;

static IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*import\s+(?:type\s+)?(?:(.+?)\s+from\s+)?["']([^"']+)["']"#).unwrap()
});
static LET_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:export\s+)?(?:for\s*\(\s*)?(let)\s").unwrap());
static VAR_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:export\s+)?(?:for\s*\(\s*)?(var)\s").unwrap());

/// Deterministic engine stand-in for tests.
#[derive(Debug, Clone, Default)]
pub struct MockEngine {
    type_aware_rules: BTreeSet<RuleId>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `rules` as needing type information.
    pub fn with_type_aware_rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RuleId>,
    {
        self.type_aware_rules
            .extend(rules.into_iter().map(Into::into));
        self
    }

    /// Treat the catalog's type-aware rules as needing type information.
    pub fn from_catalog(catalog: &RuleCatalog) -> Self {
        Self::new().with_type_aware_rules(catalog.type_aware_rules().cloned())
    }

    fn severity(config: &EffectiveConfig, id: &str) -> Option<DiagnosticSeverity> {
        match config.rule(id)?.level() {
            Severity::Off => None,
            Severity::Warn => Some(DiagnosticSeverity::Warning),
            Severity::Error => Some(DiagnosticSeverity::Error),
        }
    }

    fn check_type_information(&self, config: &EffectiveConfig, out: &mut Vec<Diagnostic>) {
        for id in &self.type_aware_rules {
            if let Some(severity) = Self::severity(config, id.as_str()) {
                out.push(
                    Diagnostic::new(
                        id.clone(),
                        severity,
                        format!(
                            "You have used a rule which requires type information, but don't \
                             have parserOptions set to generate type information for this \
                             file. ({id})"
                        ),
                    )
                    .at(1, 1),
                );
            }
        }
    }

    fn check_import_order(source: &str, config: &EffectiveConfig, out: &mut Vec<Diagnostic>) {
        let Some(severity) = Self::severity(config, "simple-import-sort/imports") else {
            return;
        };

        let mut chunk: Vec<(u32, (u8, String))> = Vec::new();
        let mut flush = |chunk: &mut Vec<(u32, (u8, String))>| {
            let keys: Vec<_> = chunk.iter().map(|(_, key)| key).collect();
            if !keys.windows(2).all(|pair| pair[0] <= pair[1]) {
                out.push(
                    Diagnostic::new(
                        "simple-import-sort/imports",
                        severity,
                        "Run autofix to sort these imports!",
                    )
                    .at(chunk[0].0, 1),
                );
            }
            chunk.clear();
        };

        for (index, line) in source.lines().enumerate() {
            if let Some(caps) = IMPORT.captures(line) {
                let specifier = caps.get(2).map_or("", |m| m.as_str());
                let side_effect = caps.get(1).is_none();
                chunk.push((line_number(index), import_sort_key(specifier, side_effect)));
            } else if !line.trim().is_empty() {
                flush(&mut chunk);
            }
        }
        flush(&mut chunk);
    }

    fn check_declarations(source: &str, config: &EffectiveConfig, out: &mut Vec<Diagnostic>) {
        let checks = [
            (
                &*LET_DECLARATION,
                "functional/no-let",
                "Unexpected let, use const instead.",
            ),
            (
                &*VAR_DECLARATION,
                "no-var",
                "Unexpected var, use let or const instead.",
            ),
        ];

        for (index, line) in source.lines().enumerate() {
            for (pattern, rule, message) in &checks {
                let Some(severity) = Self::severity(config, rule) else {
                    continue;
                };
                if let Some(keyword) = pattern.captures(line).and_then(|c| c.get(1)) {
                    out.push(
                        Diagnostic::new(*rule, severity, *message)
                            .at(line_number(index), column_number(keyword.start())),
                    );
                }
            }
        }
    }
}

impl AnalysisEngine for MockEngine {
    fn name(&self) -> &str {
        "mock"
    }

    fn analyze(
        &self,
        source: &str,
        config: &EffectiveConfig,
        filename: &str,
    ) -> Result<Vec<Diagnostic>> {
        if let Some(fatal) = scan_delimiters(source) {
            return Ok(vec![fatal]);
        }

        if config.language_options.requests_any(TYPE_INFORMATION_OPTIONS) {
            return Ok(vec![Diagnostic::fatal(format!(
                "Parsing error: {filename} was not found by the project service."
            ))
            .at(1, 1)]);
        }

        let mut diagnostics = Vec::new();
        self.check_type_information(config, &mut diagnostics);
        Self::check_import_order(source, config, &mut diagnostics);
        Self::check_declarations(source, config, &mut diagnostics);
        Ok(diagnostics)
    }
}

/// Group and lowercase specifier, ordered the way simple-import-sort
/// orders import chunks.
fn import_sort_key(specifier: &str, side_effect: bool) -> (u8, String) {
    let group = if side_effect {
        0
    } else if specifier.starts_with("node:") {
        1
    } else if specifier.starts_with('.') {
        4
    } else if specifier.starts_with('/') {
        3
    } else {
        2
    };
    (group, specifier.to_lowercase())
}

fn line_number(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

fn column_number(offset: usize) -> u32 {
    u32::try_from(offset + 1).unwrap_or(u32::MAX)
}

#[derive(Clone, Copy, PartialEq)]
enum Scan {
    Code,
    LineComment,
    BlockComment,
    Str(char),
    Regex { in_class: bool },
}

/// Whether a `/` after `prev` (the last significant code character)
/// starts a regular expression literal rather than a division.
///
/// Decided on one character, so `return /x/` reads as a division.
fn starts_regex(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => {
            !(c.is_alphanumeric()
                || matches!(c, '_' | '$' | ')' | ']' | '}' | '"' | '\'' | '`' | '/'))
        }
    }
}

fn closing(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// Report the first delimiter or string that does not close.
fn scan_delimiters(source: &str) -> Option<Diagnostic> {
    let mut stack: Vec<char> = Vec::new();
    let mut state = Scan::Code;
    let (mut line, mut column) = (1u32, 0u32);
    let mut chars = source.chars().peekable();
    let mut prev: Option<char> = None;

    while let Some(c) = chars.next() {
        if c == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }

        let in_comment = matches!(state, Scan::LineComment | Scan::BlockComment);
        match state {
            Scan::Code => match c {
                '/' if chars.peek() == Some(&'/') => state = Scan::LineComment,
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    column += 1;
                    state = Scan::BlockComment;
                }
                '"' | '\'' | '`' => state = Scan::Str(c),
                '/' if starts_regex(prev) => state = Scan::Regex { in_class: false },
                '(' | '[' | '{' => stack.push(c),
                ')' | ']' | '}' => {
                    if stack.pop().map(closing) != Some(c) {
                        return Some(
                            Diagnostic::fatal(format!(
                                "Parsing error: Unexpected token '{c}'."
                            ))
                            .at(line, column),
                        );
                    }
                }
                _ => {}
            },
            Scan::LineComment => {
                if c == '\n' {
                    state = Scan::Code;
                }
            }
            Scan::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    column += 1;
                    state = Scan::Code;
                }
            }
            Scan::Regex { in_class } => match c {
                '\\' => {
                    if chars.peek().is_some_and(|&n| n != '\n') {
                        chars.next();
                        column += 1;
                    }
                }
                '[' => state = Scan::Regex { in_class: true },
                ']' => state = Scan::Regex { in_class: false },
                '/' if !in_class => state = Scan::Code,
                '\n' => {
                    return Some(
                        Diagnostic::fatal("Parsing error: Unterminated regular expression.")
                            .at(line - 1, 1),
                    );
                }
                _ => {}
            },
            Scan::Str(quote) => {
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        if escaped == '\n' {
                            line += 1;
                            column = 0;
                        } else {
                            column += 1;
                        }
                    }
                } else if c == quote {
                    state = Scan::Code;
                } else if c == '\n' && quote != '`' {
                    return Some(
                        Diagnostic::fatal("Parsing error: Unterminated string literal.")
                            .at(line - 1, 1),
                    );
                }
            }
        }

        if !c.is_whitespace()
            && !in_comment
            && !matches!(state, Scan::LineComment | Scan::BlockComment)
        {
            prev = Some(c);
        }
    }

    if let Scan::Regex { .. } = state {
        return Some(
            Diagnostic::fatal("Parsing error: Unterminated regular expression.")
                .at(line, column + 1),
        );
    }
    if let Scan::Str(_) = state {
        return Some(
            Diagnostic::fatal("Parsing error: Unterminated string literal.").at(line, column + 1),
        );
    }
    stack.last().map(|open| {
        Diagnostic::fatal(format!("Parsing error: '{}' expected.", closing(*open)))
            .at(line, column + 1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{compose, Fragment, LanguageOptions, RuleSetting};
    use serde_json::{json, Map};

    fn config(rules: &[(&str, RuleSetting)]) -> EffectiveConfig {
        let fragment = rules
            .iter()
            .fold(Fragment::named("test"), |f, (id, setting)| {
                f.with_rule(*id, setting.clone())
            });
        compose(&[fragment]).unwrap()
    }

    fn analyze(source: &str, config: &EffectiveConfig) -> Vec<Diagnostic> {
        MockEngine::new().analyze(source, config, "test.ts").unwrap()
    }

    #[test]
    fn unbalanced_brace_is_one_fatal_diagnostic() {
        let cfg = config(&[("functional/no-let", RuleSetting::error())]);
        let diagnostics = analyze("let x = {\n", &cfg);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fatal);
        assert_eq!(diagnostics[0].rule_id, None);
        assert!(diagnostics[0].message.contains("'}' expected"));
    }

    #[test]
    fn stray_closer_is_fatal() {
        let diagnostics = analyze("const a = [1, 2)\n", &config(&[]));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, Some(1));
        assert_eq!(diagnostics[0].column, Some(16));
    }

    #[test]
    fn delimiters_in_strings_and_comments_are_ignored() {
        let source = "const a = \"(\" // )\nconst b = '['; /* { */\nconst c = `}`\n";
        assert!(analyze(source, &config(&[])).is_empty());
    }

    #[test]
    fn quotes_and_brackets_in_regex_literals_are_ignored() {
        let source = "const r = /'/\nconst s = /[/(]\\//g.test(x) ? a / b : (c)\n";
        assert!(analyze(source, &config(&[])).is_empty());
    }

    #[test]
    fn division_is_not_a_regex() {
        let source = "const half = (a + b) / 2 /* avg */ / 1\nconst q = xs[0] / 'n'.length\n";
        assert!(analyze(source, &config(&[])).is_empty());
    }

    #[test]
    fn unterminated_regex_is_fatal() {
        let diagnostics = analyze("const r = /abc\nconst b = 1\n", &config(&[]));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("regular expression"));
    }

    #[test]
    fn unterminated_string_is_fatal() {
        let diagnostics = analyze("const a = \"open\nconst b = 1\n", &config(&[]));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fatal);
    }

    #[test]
    fn let_reported_only_when_rule_enabled() {
        let on = config(&[("functional/no-let", RuleSetting::warn())]);
        let off = config(&[("functional/no-let", RuleSetting::off())]);

        let diagnostics = analyze("  let x = 1\n", &on);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, DiagnosticSeverity::Warning);
        assert_eq!(diagnostics[0].column, Some(3));

        assert!(analyze("let x = 1\n", &off).is_empty());
        assert!(analyze("const x = 1\n", &on).is_empty());
    }

    #[test]
    fn let_in_for_loop_is_reported() {
        let cfg = config(&[("functional/no-let", RuleSetting::error())]);
        let diagnostics = analyze("for (let i = 0; i < 3; i++) {}\n", &cfg);
        assert!(diagnostics[0].is_rule("functional/no-let"));
    }

    #[test]
    fn var_reported_as_no_var() {
        let cfg = config(&[("no-var", RuleSetting::error())]);
        let diagnostics = analyze("var legacy = true\n", &cfg);
        assert!(diagnostics[0].is_rule("no-var"));
    }

    #[test]
    fn unsorted_imports_reported_once_per_chunk() {
        let cfg = config(&[("simple-import-sort/imports", RuleSetting::error())]);
        let source = "import { z } from \"zod\"\nimport { a } from \"axios\"\n\nconst x = 1\n";

        let diagnostics = analyze(source, &cfg);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is_rule("simple-import-sort/imports"));
        assert_eq!(diagnostics[0].line, Some(1));
    }

    #[test]
    fn sorted_imports_pass() {
        let cfg = config(&[("simple-import-sort/imports", RuleSetting::error())]);
        let source = "import \"./polyfill\"\nimport { readFile } from \"node:fs\"\nimport { a } from \"axios\"\nimport { z } from \"zod\"\n\nimport { local } from \"./local\"\n";
        assert!(analyze(source, &cfg).is_empty());
    }

    #[test]
    fn relative_imports_sort_after_packages() {
        let cfg = config(&[("simple-import-sort/imports", RuleSetting::error())]);
        let source = "import { local } from \"./local\"\nimport { z } from \"zod\"\n";
        assert_eq!(analyze(source, &cfg).len(), 1);
    }

    #[test]
    fn type_aware_rule_without_type_information_reports() {
        let cfg = config(&[(
            "@typescript-eslint/await-thenable",
            RuleSetting::error(),
        )]);
        let engine = MockEngine::new().with_type_aware_rules(["@typescript-eslint/await-thenable"]);

        let diagnostics = engine.analyze("const x = 1\n", &cfg, "test.ts").unwrap();

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is_rule("@typescript-eslint/await-thenable"));
        assert!(diagnostics[0].message.contains("requires type information"));
    }

    #[test]
    fn project_service_request_is_fatal() {
        let cfg = compose(&[Fragment::named("typed").with_language_options(LanguageOptions {
            parser_options: Map::from_iter([("projectService".to_string(), json!(true))]),
            ..Default::default()
        })])
        .unwrap();

        let diagnostics = analyze("const x = 1\n", &cfg);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fatal);
        assert!(diagnostics[0].message.contains("test.ts"));
    }
}
