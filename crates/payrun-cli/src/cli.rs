//! CLI argument definitions for the payrun reconciler.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "payrun",
    version,
    about = "Payrun reconciliation - align payroll sources into the employee form",
    long_about = "Reconcile a payrun sheet, the employee directory and the bank account\n\
                  registry onto one employee axis and write the employee form workbook.\n\n\
                  Each PROFILE is a directory holding inputs/, template/ and mapping.json."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

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

    /// Allow employee-level values (names, IBANs) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile one or more profiles and write their employee forms.
    Run(RunArgs),

    /// Show the template columns of a profile and their mapping.
    ///
    /// Creates the mapping scaffold if the profile has none yet.
    Mapping(MappingArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Profile directories, processed in order.
    #[arg(value_name = "PROFILE", required = true)]
    pub profiles: Vec<PathBuf>,

    /// Config file to use instead of <PROFILE>/payrun.toml.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Leave employees with unresolved duplicate records empty instead of
    /// failing the run.
    #[arg(long = "allow-unresolved")]
    pub allow_unresolved: bool,

    /// Reconcile and report without writing the result workbook.
    ///
    /// The mapping scaffold is still created when missing.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct MappingArgs {
    #[arg(value_name = "PROFILE")]
    pub profile: PathBuf,

    /// Config file to use instead of <PROFILE>/payrun.toml.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
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
