//! Command-line interface.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    CheckArgs, Cli, Commands, CompletionsArgs, EngineKind, ExportArgs, LayersArgs, PresetArgs,
    ShowArgs, VerifyArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
