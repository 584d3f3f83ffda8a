//! The `check` command: run the conformance checks over the built-in
//! layers.

use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;
use crate::config::{load_project_config, LayerRegistry};
use crate::conformance::{
    CheckContext, CheckRegistry, ConformanceDiagnostic, ConformanceFormatter, HumanFormatter,
    JsonFormatter, OutputFormat, Severity,
};
use crate::error::{LintstackError, Result};
use crate::harness::default_type_aware_rules;
use crate::ui::{should_use_colors, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The `check` command.
pub struct CheckCommand {
    project_root: PathBuf,
    args: CheckArgs,
}

impl CheckCommand {
    pub fn new(project_root: &Path, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    fn format_output(
        &self,
        diagnostics: &[ConformanceDiagnostic],
        use_color: bool,
    ) -> Result<String> {
        let mut output = Vec::new();
        match self.args.format {
            OutputFormat::Json => JsonFormatter::new().format(diagnostics, &mut output)?,
            OutputFormat::Human => {
                HumanFormatter::new(use_color).format(diagnostics, &mut output)?
            }
        }
        String::from_utf8(output).map_err(|e| LintstackError::Other(e.into()))
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = LayerRegistry::builtin()?;

        // Project-specific type-aware rules extend the allow-list checked
        // against the catalog.
        let mut type_aware_rules = default_type_aware_rules();
        type_aware_rules.extend(load_project_config(&self.project_root)?.type_aware_rules);

        let checks = CheckRegistry::with_builtins();
        for check in checks.iter() {
            ui.detail(&format!("{}: {}", check.id(), check.description()));
        }

        let diagnostics = checks.check_all(&CheckContext {
            registry,
            type_aware_rules: &type_aware_rules,
        });

        let use_color = self.args.format == OutputFormat::Human && should_use_colors();
        ui.output(&self.format_output(&diagnostics, use_color)?);

        let has_errors = diagnostics.iter().any(|d| d.severity == Severity::Error);
        let has_warnings = diagnostics.iter().any(|d| d.severity == Severity::Warning);
        if has_errors || (self.args.strict && has_warnings) {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
