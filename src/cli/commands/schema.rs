//! The `schema` command: print the JSON Schema of `.lintstack.yml`.

use schemars::schema_for;

use crate::config::ProjectConfig;
use crate::error::{LintstackError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The `schema` command.
pub struct SchemaCommand;

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let schema = schema_for!(ProjectConfig);
        let json =
            serde_json::to_string_pretty(&schema).map_err(|e| LintstackError::Other(e.into()))?;
        ui.output(&json);
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn schema_describes_project_config() {
        let mut ui = MockUI::new();
        SchemaCommand.execute(&mut ui).unwrap();

        let json: serde_json::Value = serde_json::from_str(&ui.output_text()).unwrap();
        assert_eq!(json["title"], "ProjectConfig");
        let properties = json["properties"].as_object().unwrap();
        for key in ["layer", "fragments", "type_aware_rules", "engine"] {
            assert!(properties.contains_key(key), "missing {key}");
        }
    }
}
