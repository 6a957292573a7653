//! Command-line parsing for the fusion matrix scorer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the scoring code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Domain;
use crate::engine::cache::DEFAULT_CACHE_CAPACITY;
use crate::engine::fusion::DEFAULT_INSIGHT_LIMIT;
use crate::math::YearMonth;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fm", version, about = "Saju x Western astrology Fusion Matrix scorer")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score one profile: summary, domain scores, signals, insights and an optional timeline plot.
    Score(ScoreArgs),
    /// Print the twelve-month overlap timeline per domain.
    Timeline(TimelineArgs),
    /// Score a JSON array of profiles through the memoization cache.
    Batch(BatchArgs),
    /// Check layer-table invariants, or export the built-in tables.
    Tables(TablesArgs),
}

/// Options shared by every scoring command.
#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    /// Input JSON file (`batch` also takes a directory of profiles). If omitted,
    /// scorable JSON under the current directory is offered.
    #[arg(short = 'i', long, value_name = "JSON")]
    pub input: Option<PathBuf>,

    /// Layer tables JSON file (defaults to the built-in tables).
    #[arg(long, value_name = "JSON", env = "FM_TABLES")]
    pub tables: Option<PathBuf>,

    /// First month of the timeline (YYYY-MM); defaults to the current month.
    #[arg(long, value_name = "YYYY-MM", value_parser = parse_month)]
    pub start: Option<YearMonth>,
}

#[derive(Debug, Args, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Number of ranked insights to show.
    #[arg(long, default_value_t = DEFAULT_INSIGHT_LIMIT)]
    pub top: usize,

    /// Disable the terminal timeline plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot one domain's timeline instead of the global one.
    #[arg(long, value_enum)]
    pub domain: Option<Domain>,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,

    /// Export the full report to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct TimelineArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only show one domain.
    #[arg(long, value_enum)]
    pub domain: Option<Domain>,

    /// Also render the selected timeline as a plot.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Number of ranked insights kept per report.
    #[arg(long, default_value_t = DEFAULT_INSIGHT_LIMIT)]
    pub top: usize,

    /// Maximum number of memoized reports (0 disables the cache).
    #[arg(long, default_value_t = DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: usize,

    /// Export all reports to one JSON array.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct TablesArgs {
    /// Tables JSON file to check (defaults to the built-in tables).
    #[arg(long, value_name = "JSON", env = "FM_TABLES")]
    pub tables: Option<PathBuf>,

    /// Write the checked tables to this JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

fn parse_month(s: &str) -> Result<YearMonth, String> {
    s.parse::<YearMonth>().map_err(|e| e.to_string())
}
