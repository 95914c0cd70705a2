//! CLI argument definitions for the dashboard onboarding tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use onboard_map::MappingFilter;

#[derive(Parser)]
#[command(
    name = "dashboard-onboard",
    version,
    about = "Dashboard onboarding - resolve column mappings, pack widget layouts, replay sessions",
    long_about = "Work with the dashboard onboarding pipeline from JSON files.\n\n\
                  Resolves column mapping drafts against a field catalog, packs widgets\n\
                  onto the dashboard grid and replays recorded wizard sessions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Settings file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify a mapping draft and check whether it can be confirmed.
    Resolve(ResolveArgs),

    /// Pack widgets onto the dashboard grid.
    Pack(PackArgs),

    /// Replay a recorded wizard session against in-memory collaborators.
    Replay(ReplayArgs),
}

#[derive(Parser)]
pub struct ResolveArgs {
    /// JSON array of column mappings.
    #[arg(long = "mappings", value_name = "FILE")]
    pub mappings: PathBuf,

    /// JSON array of available target fields.
    ///
    /// Without a catalog the unknown-target check is skipped.
    #[arg(long = "fields", value_name = "FILE")]
    pub fields: Option<PathBuf>,

    /// Only list the mappings under this tab.
    #[arg(long = "filter", value_enum, default_value = "all")]
    pub filter: FilterArg,
}

#[derive(Parser)]
pub struct PackArgs {
    /// JSON array of widget items.
    #[arg(long = "widgets", value_name = "FILE")]
    pub widgets: PathBuf,

    /// Grid width in columns (overrides the settings file).
    #[arg(long = "cols", value_name = "N")]
    pub cols: Option<u32>,

    /// Row-scan bound (overrides the settings file).
    #[arg(long = "max-rows", value_name = "N")]
    pub max_rows: Option<u32>,

    /// Print the layout configuration as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,

    /// Also draw the grid as text.
    #[arg(long = "preview", conflicts_with = "json")]
    pub preview: bool,
}

#[derive(Parser)]
pub struct ReplayArgs {
    /// Scenario file with the collaborator fixture, widget library and steps.
    #[arg(long = "scenario", value_name = "FILE")]
    pub scenario: PathBuf,

    /// Print the dashboard request on one line.
    #[arg(long = "compact")]
    pub compact: bool,
}

/// Mapping filter tabs.
#[derive(Clone, Copy, ValueEnum)]
pub enum FilterArg {
    All,
    Unmapped,
    Conflicts,
    NeedsReview,
    Ignored,
}

impl From<FilterArg> for MappingFilter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => MappingFilter::All,
            FilterArg::Unmapped => MappingFilter::Unmapped,
            FilterArg::Conflicts => MappingFilter::Conflicts,
            FilterArg::NeedsReview => MappingFilter::NeedsReview,
            FilterArg::Ignored => MappingFilter::Ignored,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
