//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - runs the scoring pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{BatchArgs, Command, CommonArgs, ScoreArgs, TablesArgs, TimelineArgs};
use crate::engine::FusionOptions;
use crate::engine::cache::DEFAULT_CACHE_CAPACITY;
use crate::engine::fusion::DEFAULT_INSIGHT_LIMIT;
use crate::error::AppError;
use crate::io::BatchReport;

pub mod pipeline;

pub use pipeline::FusionConfig;

/// Entry point for the `fm` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` may set FM_TABLES / RUST_LOG; a missing file is fine.
    let dotenv = dotenvy::dotenv();

    // We want `fm -i me.json` to behave like `fm score -i me.json`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    crate::logging::init_cli_logger(cli.verbose);
    if let Err(err) = dotenv {
        if !err.not_found() {
            tracing::warn!(error = %err, "failed to load .env");
        }
    }

    match cli.command {
        Command::Score(args) => handle_score(args),
        Command::Timeline(args) => handle_timeline(args),
        Command::Batch(args) => handle_batch(args),
        Command::Tables(args) => handle_tables(args),
    }
}

fn handle_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = fusion_config_from_args(&args.common, args.top, DEFAULT_CACHE_CAPACITY);
    let run = pipeline::run_score(&config)?;
    let report = &run.report;

    println!("{}", crate::report::format_fusion_summary(report, &run.tables_version));
    println!("{}", crate::report::format_domain_scores(report));
    println!("{}", crate::report::format_signals(&report.signals));
    println!("{}", crate::report::format_insights(&report.insights));

    if !args.no_plot {
        let points = match args.domain {
            Some(domain) => report.timeline_by_domain.get(&domain).map_or(&[][..], Vec::as_slice),
            None => report.timeline.as_slice(),
        };
        println!("{}", crate::plot::render_timeline_plot(points, args.width, args.height));
    }

    if let Some(path) = &args.export {
        crate::io::write_report_json(path, report)?;
        tracing::info!(path = %path.display(), "wrote report");
    }

    Ok(())
}

fn handle_timeline(args: TimelineArgs) -> Result<(), AppError> {
    let config = fusion_config_from_args(&args.common, DEFAULT_INSIGHT_LIMIT, DEFAULT_CACHE_CAPACITY);
    let run = pipeline::run_score(&config)?;
    let report = &run.report;

    println!("Timeline from {} (tables {})", report.start_month, run.tables_version);
    println!("{}", crate::report::format_timeline_table(report, args.domain));

    if args.plot {
        let points = match args.domain {
            Some(domain) => report.timeline_by_domain.get(&domain).map_or(&[][..], Vec::as_slice),
            None => report.timeline.as_slice(),
        };
        println!("{}", crate::plot::render_timeline_plot(points, args.width, args.height));
    }

    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = fusion_config_from_args(&args.common, args.top, args.cache_capacity);
    let out = pipeline::run_batch(&config)?;

    println!(
        "=== fm batch: {} scored, {} skipped (tables {}) ===",
        out.reports.len(),
        out.errors.len(),
        out.tables_version
    );
    println!("{:>5}  {:>8}  {:>9}  {:>7}  top domain", "entry", "coverage", "alignment", "overlap");
    for (index, report) in &out.reports {
        let top = report
            .domain_scores
            .values()
            .max_by(|a, b| a.final_score_adjusted.total_cmp(&b.final_score_adjusted))
            .map(|d| format!("{} {:.2}", d.domain.key(), d.final_score_adjusted))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>5}  {:>7.0}%  {:>9.3}  {:>7.3}  {}",
            index,
            report.components.data_coverage * 100.0,
            report.alignment_score,
            report.time_overlap.overlap_strength,
            top
        );
    }

    if !out.errors.is_empty() {
        println!("\nSkipped entries:");
        for err in &out.errors {
            println!("  #{}: {}", err.index, err.message);
        }
    }

    if let Some(path) = &args.export {
        let entries: Vec<BatchReport<'_>> = out
            .reports
            .iter()
            .map(|(index, report)| BatchReport { index: *index, report })
            .collect();
        crate::io::write_batch_json(path, &entries)?;
        tracing::info!(path = %path.display(), entries = entries.len(), "wrote batch export");
    }

    Ok(())
}

fn handle_tables(args: TablesArgs) -> Result<(), AppError> {
    let tables = pipeline::load_tables(args.tables.as_deref())?;
    tables.validate()?;

    println!("Tables {}: {} cells", tables.version, tables.total_cells());
    for table in tables.tables.values() {
        println!(
            "  {:<18} {:>3} x {:<3} = {:>4}",
            table.layer.key(),
            table.rows.len(),
            table.cols.len(),
            table.cell_count()
        );
    }

    if let Some(path) = &args.export {
        crate::io::write_tables_json(path, &tables)?;
        tracing::info!(path = %path.display(), "wrote tables");
    }

    Ok(())
}

pub fn fusion_config_from_args(common: &CommonArgs, insight_limit: usize, cache_capacity: usize) -> FusionConfig {
    FusionConfig {
        input: common.input.clone(),
        tables: common.tables.clone(),
        options: FusionOptions {
            start_month: common.start,
            insight_limit,
        },
        cache_capacity,
    }
}

/// Rewrite argv so `fm` defaults to `fm score`.
///
/// Rules:
/// - `fm`                      -> `fm score`
/// - `fm -i me.json ...`       -> `fm score -i me.json ...`
/// - `fm --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    // `-v` is global, so look past any leading verbosity flags.
    let first = argv
        .iter()
        .skip(1)
        .find(|arg| !is_verbosity_flag(arg))
        .cloned();
    let Some(first) = first else {
        argv.push("score".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        first.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(first.as_str(), "score" | "timeline" | "batch" | "tables");
    if is_subcommand {
        return argv;
    }

    if first.starts_with('-') {
        argv.insert(1, "score".to_string());
        return argv;
    }

    argv
}

fn is_verbosity_flag(arg: &str) -> bool {
    arg == "--verbose" || (arg.len() > 1 && arg.starts_with('-') && arg[1..].chars().all(|c| c == 'v'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_score() {
        assert_eq!(rewrite_args(argv(&["fm"])), argv(&["fm", "score"]));
        assert_eq!(
            rewrite_args(argv(&["fm", "-i", "me.json"])),
            argv(&["fm", "score", "-i", "me.json"])
        );
    }

    #[test]
    fn leading_verbosity_flags_are_skipped() {
        assert_eq!(rewrite_args(argv(&["fm", "-vv", "batch"])), argv(&["fm", "-vv", "batch"]));
        assert_eq!(rewrite_args(argv(&["fm", "-v"])), argv(&["fm", "-v", "score"]));
        assert_eq!(
            rewrite_args(argv(&["fm", "-v", "-i", "me.json"])),
            argv(&["fm", "score", "-v", "-i", "me.json"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(rewrite_args(argv(&["fm", "--help"])), argv(&["fm", "--help"]));
        assert_eq!(
            rewrite_args(argv(&["fm", "batch", "-i", "all.json"])),
            argv(&["fm", "batch", "-i", "all.json"])
        );
    }

    #[test]
    fn config_carries_common_args() {
        let cli = crate::cli::Cli::try_parse_from(["fm", "score", "-i", "me.json", "--start", "2024-12"]).unwrap();
        let Command::Score(args) = cli.command else {
            panic!("expected score");
        };
        let config = fusion_config_from_args(&args.common, 3, 16);
        assert_eq!(config.options.start_month, crate::math::YearMonth::new(2024, 12));
        assert_eq!(config.options.insight_limit, 3);
        assert_eq!(config.cache_capacity, 16);
        assert_eq!(config.input.as_deref(), Some(std::path::Path::new("me.json")));
    }
}
