//! The `show` command: print an effective configuration.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::cli::args::ShowArgs;
use crate::config::{EffectiveConfig, RuleSetting};
use crate::error::{LintstackError, Result};
use crate::ui::{LintstackTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::target::ConfigTarget;

/// The `show` command.
pub struct ShowCommand {
    project_root: PathBuf,
    args: ShowArgs,
}

impl ShowCommand {
    pub fn new(project_root: &Path, args: ShowArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    fn format_setting(setting: &RuleSetting) -> String {
        Value::from(setting.clone()).to_string()
    }

    fn format_summary(&self, config: &EffectiveConfig, theme: &LintstackTheme) -> String {
        let mut out = String::new();

        out.push_str(&format!("{}\n", theme.key.apply_to("Plugins:")));
        for (name, handle) in &config.plugins {
            out.push_str(&format!("  {:<24} {}\n", name, theme.dim.apply_to(handle)));
        }

        let options = &config.language_options;
        out.push_str(&format!("{}\n", theme.key.apply_to("Language options:")));
        if let Some(version) = options.ecma_version {
            out.push_str(&format!("  ecmaVersion    {version}\n"));
        }
        if let Some(parser) = &options.parser {
            out.push_str(&format!("  parser         {parser}\n"));
        }
        if !options.globals.is_empty() {
            out.push_str(&format!("  globals        {} defined\n", options.globals.len()));
        }
        for (key, value) in &options.parser_options {
            out.push_str(&format!("  parserOptions.{key} = {value}\n"));
        }

        let ignores: Vec<&str> = config
            .fragments
            .iter()
            .filter(|f| f.is_global_ignore())
            .flat_map(|f| f.ignores.iter().map(String::as_str))
            .collect();
        if !ignores.is_empty() {
            out.push_str(&format!("{}\n", theme.key.apply_to("Ignores:")));
            for pattern in ignores {
                out.push_str(&format!("  {pattern}\n"));
            }
        }

        out.push_str(&format!(
            "{}\n",
            theme.key.apply_to(format!(
                "Rules ({} enabled, {} total):",
                config.enabled_rules().count(),
                config.rules.len()
            ))
        ));
        for (id, setting) in &config.rules {
            let formatted = Self::format_setting(setting);
            let styled = if setting.is_enabled() {
                theme.highlight.apply_to(formatted)
            } else {
                theme.dim.apply_to(formatted)
            };
            out.push_str(&format!("  {:<50} {}\n", id.as_str(), styled));
        }

        out
    }
}

impl Command for ShowCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let target = ConfigTarget::resolve(&self.project_root, self.args.layer)?;
        let config = &target.effective;

        for conflict in &config.conflicts {
            ui.warning(&format!(
                "Plugin '{}' re-registered by fragment '{}' ({} replaces {})",
                conflict.plugin, conflict.fragment, conflict.replacement, conflict.previous
            ));
        }

        if let Some(rule) = &self.args.rule {
            return match config.rule(rule) {
                Some(setting) => {
                    ui.output(&Self::format_setting(setting));
                    Ok(CommandResult::success())
                }
                None => {
                    ui.error(&format!("Rule '{}' is not configured in {}", rule, target.label));
                    Ok(CommandResult::failure(1))
                }
            };
        }

        if self.args.json {
            let json = serde_json::to_string_pretty(config)
                .map_err(|e| LintstackError::Other(e.into()))?;
            ui.output(&json);
            return Ok(CommandResult::success());
        }

        ui.show_header(&target.label);
        let theme = ui.theme().clone();
        ui.output(&self.format_summary(config, &theme));
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Layer;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn run(args: ShowArgs) -> (CommandResult, MockUI) {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let result = ShowCommand::new(temp.path(), args).execute(&mut ui).unwrap();
        (result, ui)
    }

    #[test]
    fn summary_lists_plugins_and_rules() {
        let (result, ui) = run(ShowArgs {
            layer: Some(Layer::Functional),
            ..Default::default()
        });

        assert!(result.success);
        assert_eq!(ui.headers(), ["layer functional"]);
        let text = ui.output_text();
        assert!(text.contains("functional"));
        assert!(text.contains("functional/no-let"));
        assert!(text.contains("**/node_modules"));
    }

    #[test]
    fn single_rule_prints_setting() {
        let (result, ui) = run(ShowArgs {
            layer: Some(Layer::Base),
            rule: Some("@typescript-eslint/no-unused-vars".to_string()),
            ..Default::default()
        });

        assert!(result.success);
        assert_eq!(ui.output_text(), "\"off\"");
    }

    #[test]
    fn unknown_rule_fails() {
        let (result, ui) = run(ShowArgs {
            layer: Some(Layer::Base),
            rule: Some("functional/no-let".to_string()),
            ..Default::default()
        });

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("not configured in layer base"));
    }

    #[test]
    fn json_is_effective_config() {
        let (_, ui) = run(ShowArgs {
            layer: Some(Layer::FunctionalLibrary),
            json: true,
            ..Default::default()
        });

        let json: serde_json::Value = serde_json::from_str(&ui.output_text()).unwrap();
        assert!(json["plugins"]["functype"].is_string());
        assert_eq!(json["rules"]["functional/no-let"], "error");
        assert!(json["fragments"].as_array().unwrap().len() >= 8);
    }
}
