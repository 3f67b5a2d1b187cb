//! Flags shared by every subcommand, flattened into [`super::Cli`].

use clap::{ArgAction, Args, builder::FalseyValueParser};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Log level: `-v` reports commits, `-vv` every discovered template,
    /// `-vvv` everything.
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "More log output (-v info, -vv debug, -vvv trace)"
    )]
    pub verbose: u8,

    /// Only errors reach the terminal. Machine-readable payloads such as
    /// `list --format json` are still printed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors and requested data only"
    )]
    pub quiet: bool,

    /// Plain glyphs, no ANSI styling.
    ///
    /// `NO_COLOR` set to any value other than empty, `0`, `false`, `no` or
    /// `off` has the same effect (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
        help = "Disable styled output"
    )]
    pub no_color: bool,

    /// TOML file layered over the built-in defaults, below `HATCH_*`
    /// variables.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read settings from FILE instead of the platform config dir"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How results are rendered"
    )]
    pub output_format: OutputFormat,

    /// Log events are appended here in addition to stderr.
    #[arg(
        long = "log-file",
        global = true,
        value_name = "FILE",
        help = "Also write log events to FILE"
    )]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Styled when stdout is a terminal, plain otherwise.
    #[default]
    Auto,
    /// Styled text with a scan spinner.
    Human,
    /// Unstyled text, safe to pipe.
    Plain,
    /// One JSON document per command.
    Json,
}
