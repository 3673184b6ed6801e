//! Command-line parsing for the FX volatility report.
//!
//! One subcommand per research step. Argument parsing stays here; dispatch
//! lives in `app`.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fxvol", version, about = "FX volatility diagnostics and LaTeX estimation tables")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config.json (defaults to $FXVOL_CONFIG, then ./config.json).
    #[arg(long, value_name = "JSON", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Descriptive statistics, diagnostics tables and figures for all samples.
    Descriptives(DescriptivesArgs),
    /// Replication table for Dataset I (GARCH, APARCH, FIGARCH).
    ModelsD1,
    /// Replication table for Dataset II (APARCH, AGARCH).
    ModelsD2,
    /// GARCH and FIGARCH under normal, t and GED errors on the extended sample.
    ModelsExtended,
    /// Write return series and model requests for the external estimator.
    ExportInputs,
    /// Write one sample as `date,value` CSV.
    Series(SeriesArgs),
}

#[derive(Debug, Clone, Args)]
pub struct DescriptivesArgs {
    /// Skip the figures and only write the tables.
    #[arg(long)]
    pub no_figures: bool,

    /// Lags shown in the ACF/PACF figure.
    #[arg(long, default_value_t = 20)]
    pub nlags: usize,
}

#[derive(Debug, Clone, Args)]
pub struct SeriesArgs {
    /// Sample label: "Dataset I", "Dataset II", "Extended" or "Global".
    pub dataset: String,

    /// Raw rates instead of percentage log returns.
    #[arg(long)]
    pub levels: bool,
}
