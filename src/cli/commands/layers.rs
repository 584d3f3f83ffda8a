//! The `layers` command: list the built-in layers.

use serde::Serialize;

use crate::cli::args::LayersArgs;
use crate::config::{Layer, LayerDefinition, LayerRegistry};
use crate::error::{LintstackError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// One row of `layers --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LayerSummary<'a> {
    name: Layer,
    #[serde(skip_serializing_if = "Option::is_none")]
    extends: Option<Layer>,
    description: &'a str,
    fragments: Vec<&'a str>,
    plugins: Vec<&'a str>,
    enabled_rules: usize,
}

impl<'a> From<&'a LayerDefinition> for LayerSummary<'a> {
    fn from(def: &'a LayerDefinition) -> Self {
        Self {
            name: def.layer,
            extends: def.layer.parent(),
            description: &def.description,
            fragments: def.fragments.iter().map(|f| f.label()).collect(),
            plugins: def.effective.plugins.keys().map(String::as_str).collect(),
            enabled_rules: def.effective.enabled_rules().count(),
        }
    }
}

/// The `layers` command.
pub struct LayersCommand {
    args: LayersArgs,
}

impl LayersCommand {
    pub fn new(args: LayersArgs) -> Self {
        Self { args }
    }
}

impl Command for LayersCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = LayerRegistry::builtin()?;
        let summaries: Vec<LayerSummary> = registry.iter().map(LayerSummary::from).collect();

        if self.args.json {
            let json = serde_json::to_string_pretty(&summaries)
                .map_err(|e| LintstackError::Other(e.into()))?;
            ui.output(&json);
            return Ok(CommandResult::success());
        }

        let theme = ui.theme().clone();
        let mut out = String::new();
        for summary in &summaries {
            out.push_str(&format!(
                "{}  {}\n",
                theme.info.apply_to(format!("{:<20}", summary.name)),
                summary.description
            ));
            out.push_str(&format!(
                "{}\n",
                theme.dim.apply_to(format!(
                    "{:<20}  extends: {}  fragments: {}  plugins: {}  enabled rules: {}",
                    "",
                    summary.extends.map_or("-", Layer::as_str),
                    summary.fragments.len(),
                    summary.plugins.join(", "),
                    summary.enabled_rules
                ))
            ));
        }
        ui.output(&out);
        Ok(CommandResult::success())
    }
}
