//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::config::Layer;
use crate::conformance::OutputFormat;
use crate::presets::PresetKind;

/// lintstack - layered lint configurations for TypeScript projects.
#[derive(Debug, Parser)]
#[command(name = "lintstack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides discovery from the current directory)
    #[arg(short, long, global = true, env = "LINTSTACK_PROJECT")]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the built-in layers
    Layers(LayersArgs),

    /// Show the effective configuration of a layer or of the project
    Show(ShowArgs),

    /// Check the built-in layers for conformance
    Check(CheckArgs),

    /// Run files through the project's configuration
    Verify(VerifyArgs),

    /// Render a configuration as an eslint.config.mjs module
    Export(ExportArgs),

    /// Print a build preset
    Preset(PresetArgs),

    /// Print the JSON Schema of the project config file
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `layers` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LayersArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ShowArgs {
    /// Layer to show (defaults to the project's configuration)
    pub layer: Option<Layer>,

    /// Show only this rule's setting
    #[arg(long)]
    pub rule: Option<String>,

    /// Output the full effective configuration as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Which analysis engine `verify` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EngineKind {
    /// The project's ESLint installation
    #[default]
    Eslint,
    /// Built-in deterministic engine covering a handful of rules
    Mock,
}

/// Arguments for the `verify` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct VerifyArgs {
    /// Files to verify, relative to the project root
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Verify against this layer instead of the project's configuration
    #[arg(long)]
    pub layer: Option<Layer>,

    /// Analysis engine
    #[arg(long, value_enum, default_value_t = EngineKind::Eslint)]
    pub engine: EngineKind,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `export` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ExportArgs {
    /// Layer to export (defaults to the project's configuration)
    pub layer: Option<Layer>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `preset` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PresetArgs {
    /// Preset to print
    #[arg(value_enum)]
    pub kind: PresetKind,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
