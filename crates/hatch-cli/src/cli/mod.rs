//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use hatch_adapters::DescriptorFormat;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "hatch",
    bin_name = "hatch",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Create projects from a directory of templates",
    long_about = "Hatch discovers project templates under a root directory and \
                  creates new projects from them. A project either appears \
                  complete or not at all.",
    after_help = "EXAMPLES:\n\
        \x20 hatch list --templates ./templates\n\
        \x20 hatch new MyGame --template empty --path ~/projects\n\
        \x20 hatch completions bash > /usr/share/bash-completion/completions/hatch",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from a template.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 hatch new MyGame --template empty\n\
            \x20 hatch new MyGame --template empty --path ~/projects --yes\n\
            \x20 hatch new MyGame --templates ./tpl --format toml --dry-run"
    )]
    New(NewArgs),

    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 hatch list\n\
            \x20 hatch list --templates ./templates --format json"
    )]
    List(ListArgs),

    /// Initialise a Hatch configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 hatch init\n\
            \x20 hatch init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 hatch completions bash > ~/.local/share/bash-completion/completions/hatch\n\
            \x20 hatch completions zsh  > ~/.zfunc/_hatch\n\
            \x20 hatch completions fish > ~/.config/fish/completions/hatch.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Hatch configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 hatch config get templates.root\n\
            \x20 hatch config list\n\
            \x20 hatch config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Where to look for templates.  Falls back to the configuration.
#[derive(Debug, Clone, Default, Args)]
pub struct TemplateSourceArgs {
    /// Template root directory.
    #[arg(
        long = "templates",
        value_name = "ROOT",
        help = "Template root directory (default: templates.root)"
    )]
    pub templates: Option<PathBuf>,
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `hatch new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Name of the project directory and of its project file.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Template id, i.e. the template's directory name.
    #[arg(
        short = 't',
        long = "template",
        value_name = "ID",
        help = "Template id to use"
    )]
    pub template: Option<String>,

    /// Directory the project is created in.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        help = "Parent directory (default: defaults.location)"
    )]
    pub path: Option<PathBuf>,

    #[command(flatten)]
    pub source: TemplateSourceArgs,

    /// Descriptor format to scan for.
    #[arg(
        long = "format",
        value_name = "FORMAT",
        help = "Descriptor format: xml or toml (default: templates.format)"
    )]
    pub format: Option<DescriptorFormat>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `hatch list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: TemplateSourceArgs,

    /// Descriptor format to scan for.
    #[arg(
        long = "descriptor",
        value_name = "FORMAT",
        help = "Descriptor format: xml or toml (default: templates.format)"
    )]
    pub descriptor: Option<DescriptorFormat>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `hatch init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `hatch completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `hatch config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `templates.root`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
