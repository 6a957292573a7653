//! Shared scoring pipeline used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! tables -> input -> fusion (or batch through the cache)
//!
//! The subcommand handlers can then focus on presentation.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::data::LayerTables;
use crate::domain::{FusionReport, MatrixCalculationInput};
use crate::engine::{FusionCache, FusionOptions, calculate_fusion};
use crate::error::AppError;
use crate::io::{
    DISCOVERY_DEPTH, EntryError, IngestedBatch, InputCandidate, InputShape, choose_input, discover_inputs,
};

/// Resolved settings for one run.
#[derive(Debug, Clone, Default)]
pub struct FusionConfig {
    /// `None` offers the scorable JSON found under the current directory.
    pub input: Option<PathBuf>,
    /// `None` uses the built-in tables.
    pub tables: Option<PathBuf>,
    pub options: FusionOptions,
    pub cache_capacity: usize,
}

/// All computed outputs of a single `fm score` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub input: MatrixCalculationInput,
    pub report: FusionReport,
    pub tables_version: String,
}

/// All computed outputs of a `fm batch` run.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    /// Reports keyed by the original batch index.
    pub reports: Vec<(usize, FusionReport)>,
    pub errors: Vec<EntryError>,
    pub tables_version: String,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

/// Load tables from `path`, or borrow the built-in set.
pub fn load_tables(path: Option<&Path>) -> Result<Cow<'static, LayerTables>, AppError> {
    match path {
        Some(path) => crate::io::read_tables_json(path).map(Cow::Owned),
        None => Ok(Cow::Borrowed(LayerTables::builtin())),
    }
}

/// Explicit path if given, otherwise offer the discovered inputs on stdin.
///
/// `accept_batches` also lists array files; `fm score` only wants single profiles.
pub fn resolve_input_path(path: Option<&Path>, accept_batches: bool) -> Result<PathBuf, AppError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }

    let candidates: Vec<InputCandidate> = discover_inputs(Path::new("."), DISCOVERY_DEPTH)
        .into_iter()
        .filter(|c| accept_batches || c.shape == InputShape::Profile)
        .collect();
    if candidates.is_empty() {
        return Err(AppError::new(
            2,
            "No scorable JSON found under the current directory. Pass one with `-i <path>`.",
        ));
    }

    let stdin = std::io::stdin();
    choose_input(&candidates, stdin.lock(), std::io::stdout())
}

/// Score one profile.
pub fn run_score(config: &FusionConfig) -> Result<RunOutput, AppError> {
    let tables = load_tables(config.tables.as_deref())?;
    let path = resolve_input_path(config.input.as_deref(), false)?;
    let input = crate::io::read_input_json(&path)?;

    let report = calculate_fusion(&input, &tables, &config.options);
    tracing::info!(
        input = %path.display(),
        coverage = report.components.data_coverage,
        "scored profile"
    );

    Ok(RunOutput {
        input,
        report,
        tables_version: tables.version.clone(),
    })
}

/// Score every valid entry of a batch file.
pub fn run_batch(config: &FusionConfig) -> Result<BatchOutput, AppError> {
    let tables = load_tables(config.tables.as_deref())?;
    let path = resolve_input_path(config.input.as_deref(), true)?;
    let batch = crate::io::read_input_batch(&path)?;

    let output = run_batch_with_tables(batch, &tables, &config.options, config.cache_capacity);
    tracing::info!(
        input = %path.display(),
        scored = output.reports.len(),
        skipped = output.errors.len(),
        hits = output.cache_hits,
        misses = output.cache_misses,
        "batch complete"
    );
    Ok(output)
}

/// Run an already-ingested batch through a fresh cache.
pub fn run_batch_with_tables(
    batch: IngestedBatch,
    tables: &LayerTables,
    options: &FusionOptions,
    cache_capacity: usize,
) -> BatchOutput {
    let cache = FusionCache::new(cache_capacity);
    let reports = batch
        .inputs
        .iter()
        .map(|(index, input)| (*index, cache.get_or_compute(input, tables, options)))
        .collect();

    BatchOutput {
        reports,
        errors: batch.errors,
        tables_version: tables.version.clone(),
        cache_hits: cache.hits(),
        cache_misses: cache.misses(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::YearMonth;

    const ALICE: &str = r#"{"dayMasterElement":"wood","pillarElements":["wood","fire","earth","water"],
        "currentDaeunElement":"water","dominantWesternElement":"water"}"#;
    const BOB: &str = r#"{"dayMasterElement":"fire","pillarElements":["fire","fire","metal","earth"]}"#;

    fn options() -> FusionOptions {
        FusionOptions {
            start_month: YearMonth::new(2025, 1),
            ..FusionOptions::default()
        }
    }

    #[test]
    fn repeated_batch_entries_hit_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.json");
        std::fs::write(&path, format!("[{ALICE}, {BOB}, {ALICE}]")).unwrap();

        let batch = crate::io::read_input_batch(&path).unwrap();
        let out = run_batch_with_tables(batch, LayerTables::builtin(), &options(), 8);

        assert_eq!(out.reports.len(), 3);
        assert_eq!(out.cache_hits, 1);
        assert_eq!(out.cache_misses, 2);
        assert_eq!(out.reports[0].1, out.reports[2].1);
        assert_eq!(out.tables_version, LayerTables::builtin().version);
    }

    #[test]
    fn score_reads_input_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alice.json");
        std::fs::write(&path, ALICE).unwrap();

        let config = FusionConfig {
            input: Some(path),
            options: options(),
            ..FusionConfig::default()
        };
        let out = run_score(&config).unwrap();
        let direct = calculate_fusion(&out.input, LayerTables::builtin(), &options());
        assert_eq!(out.report, direct);
        assert_eq!(out.report.start_month, "2025-01");
    }

    #[test]
    fn missing_tables_file_is_an_io_error() {
        let err = load_tables(Some(Path::new("definitely/not/here.json"))).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
