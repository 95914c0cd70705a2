//! Dashboard onboarding CLI.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use onboard_cli::logging::{LogConfig, LogFormat, init_logging};
use onboard_model::LayoutConfig;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{load_settings, run_pack, run_replay, run_resolve};
use crate::summary::{print_layout, print_replay_calls, print_resolution};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    let settings = load_settings(cli.config.as_deref())?;
    match cli.command {
        Command::Resolve(args) => {
            let report = run_resolve(&args)?;
            print_resolution(&report, &settings.mapping);
            Ok(if report.resolution.gate.is_blocked() { 1 } else { 0 })
        }
        Command::Pack(args) => {
            let layout = run_pack(&args, &settings)?;
            if args.json {
                let config = LayoutConfig {
                    layouts: layout.entries(),
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&config).context("failed to encode layout")?
                );
            } else {
                print_layout(&layout, args.preview);
            }
            Ok(0)
        }
        Command::Replay(args) => {
            let outcome = run_replay(&args, &settings)?;
            print_replay_calls(&outcome);
            let json = if args.compact {
                serde_json::to_string(&outcome.request)
            } else {
                serde_json::to_string_pretty(&outcome.request)
            };
            println!("{}", json.context("failed to encode dashboard request")?);
            Ok(0)
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
