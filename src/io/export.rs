//! Export fusion reports to JSON.
//!
//! The export is the full `FusionReport` (all resolved cells included), so it can be
//! consumed by the narrative assembler or reloaded for comparison.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::domain::FusionReport;
use crate::error::AppError;

/// One batch entry in an export: the original batch index and its report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport<'a> {
    pub index: usize,
    pub report: &'a FusionReport,
}

pub fn write_report_json(path: &Path, report: &FusionReport) -> Result<(), AppError> {
    write_json(path, report)
}

pub fn write_batch_json(path: &Path, reports: &[BatchReport<'_>]) -> Result<(), AppError> {
    write_json(path, reports)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LayerTables;
    use crate::domain::{FiveElement, MatrixCalculationInput};
    use crate::engine::{FusionOptions, calculate_fusion};
    use crate::math::YearMonth;

    #[test]
    fn exported_report_reloads_identically() {
        let input = MatrixCalculationInput::new(FiveElement::Metal, vec![FiveElement::Earth; 4]);
        let options = FusionOptions {
            start_month: YearMonth::new(2025, 6),
            insight_limit: 5,
        };
        let report = calculate_fusion(&input, LayerTables::builtin(), &options);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_report_json(&path, &report).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: FusionReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back.layers, report.layers);
        assert_eq!(back.insights.len(), report.insights.len());
        for (a, b) in back.timeline.iter().zip(&report.timeline) {
            assert_eq!(a.month, b.month);
            assert!((a.overlap_strength - b.overlap_strength).abs() < 1e-12);
        }
        assert!(text.contains("\"startMonth\": \"2025-06\""));
    }

    #[test]
    fn batch_export_is_an_array() {
        let input = MatrixCalculationInput::new(FiveElement::Water, vec![FiveElement::Water; 4]);
        let options = FusionOptions {
            start_month: YearMonth::new(2025, 6),
            insight_limit: 1,
        };
        let report = calculate_fusion(&input, LayerTables::builtin(), &options);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.json");
        write_batch_json(&path, &[BatchReport { index: 3, report: &report }]).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["index"], 3);
    }
}
