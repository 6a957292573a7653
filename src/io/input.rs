//! Input ingest and validation.
//!
//! This is the validation boundary in front of the scoring engine:
//! - **Strict enums**: unknown symbol names fail deserialization (exit code 3)
//! - **Structural checks** serde cannot express (pillar count, house range, orbs)
//! - **Batch tolerance**: in a batch file or directory, bad entries are skipped and reported
//!
//! The engine itself never re-validates; it treats unknown table keys as "no match".

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;

use crate::domain::MatrixCalculationInput;
use crate::error::AppError;
use crate::io::discover::list_profile_files;

pub const PILLAR_COUNT: usize = 4;

/// An entry of a batch file that failed to parse or validate.
#[derive(Debug, Clone)]
pub struct EntryError {
    /// 0-based position in the batch array.
    pub index: usize,
    pub message: String,
}

/// Result of ingesting a batch file.
#[derive(Debug, Clone)]
pub struct IngestedBatch {
    /// Valid inputs with their original batch index.
    pub inputs: Vec<(usize, MatrixCalculationInput)>,
    pub errors: Vec<EntryError>,
}

/// Read and validate a single input record.
pub fn read_input_json(path: &Path) -> Result<MatrixCalculationInput, AppError> {
    let value = read_json_value(path)?;
    parse_input_value(value)
        .map_err(|msg| AppError::new(3, format!("Invalid input '{}': {msg}", path.display())))
}

/// Parse and validate a single input record from a JSON string.
pub fn parse_input_str(json: &str) -> Result<MatrixCalculationInput, AppError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| AppError::new(3, format!("Invalid input JSON: {e}")))?;
    parse_input_value(value).map_err(|msg| AppError::new(3, format!("Invalid input: {msg}")))
}

/// Read a batch: a JSON array of input records, or a directory of profile files.
///
/// A single object is treated as a batch of one. In a directory every `*.json`
/// file is one entry, indexed in file-name order.
pub fn read_input_batch(path: &Path) -> Result<IngestedBatch, AppError> {
    let entries = if path.is_dir() {
        read_batch_dir(path)?
    } else {
        match read_json_value(path)? {
            Value::Array(values) => values.into_iter().map(Ok).collect(),
            single @ Value::Object(_) => vec![Ok(single)],
            _ => {
                return Err(AppError::new(
                    3,
                    format!("Batch file '{}' must contain a JSON array of inputs.", path.display()),
                ));
            }
        }
    };

    let mut inputs = Vec::with_capacity(entries.len());
    let mut errors = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        match entry.and_then(parse_input_value) {
            Ok(input) => inputs.push((index, input)),
            Err(message) => {
                tracing::warn!(index, %message, "skipping invalid batch entry");
                errors.push(EntryError { index, message });
            }
        }
    }

    if inputs.is_empty() && !errors.is_empty() {
        return Err(AppError::new(
            3,
            format!(
                "No valid inputs in '{}' ({} invalid; first: {}).",
                path.display(),
                errors.len(),
                errors[0].message
            ),
        ));
    }

    Ok(IngestedBatch { inputs, errors })
}

/// One entry per profile file; unreadable files become entry errors.
fn read_batch_dir(dir: &Path) -> Result<Vec<Result<Value, String>>, AppError> {
    let files = list_profile_files(dir)?;
    if files.is_empty() {
        return Err(AppError::new(2, format!("No .json files in '{}'.", dir.display())));
    }
    tracing::debug!(dir = %dir.display(), files = files.len(), "reading batch directory");

    Ok(files
        .iter()
        .map(|file| {
            let name = file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            match read_json_value(file) {
                Ok(value @ Value::Object(_)) => Ok(value),
                Ok(_) => Err(format!("{name}: expected a single profile object.")),
                Err(err) => Err(format!("{name}: {}", err.message())),
            }
        })
        .collect())
}

/// Structural checks on a deserialized input.
pub fn validate_input(input: &MatrixCalculationInput) -> Result<(), String> {
    if input.pillar_elements.len() != PILLAR_COUNT {
        return Err(format!(
            "pillarElements must have exactly {PILLAR_COUNT} entries (got {}).",
            input.pillar_elements.len()
        ));
    }

    for (planet, house) in &input.planet_houses {
        if !(1..=12).contains(house) {
            return Err(format!("planetHouses.{} = {house} is outside 1..12.", planet.key()));
        }
    }
    for (asteroid, house) in &input.asteroid_houses {
        if !(1..=12).contains(house) {
            return Err(format!("asteroidHouses.{} = {house} is outside 1..12.", asteroid.key()));
        }
    }

    for (i, aspect) in input.aspects.iter().enumerate() {
        if aspect.planet1 == aspect.planet2 {
            return Err(format!("aspects[{i}] pairs {} with itself.", aspect.planet1.key()));
        }
        if let Some(orb) = aspect.orb {
            if !orb.is_finite() || orb < 0.0 {
                return Err(format!("aspects[{i}].orb must be a non-negative number (got {orb})."));
            }
        }
        if let Some(angle) = aspect.angle {
            if !angle.is_finite() || !(0.0..=360.0).contains(&angle) {
                return Err(format!("aspects[{i}].angle must be within 0..360 (got {angle})."));
            }
        }
    }

    Ok(())
}

fn parse_input_value(value: Value) -> Result<MatrixCalculationInput, String> {
    let input: MatrixCalculationInput = serde_json::from_value(value).map_err(|e| e.to_string())?;
    validate_input(&input)?;
    Ok(input)
}

fn read_json_value(path: &Path) -> Result<Value, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open input JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(3, format!("Invalid JSON in '{}': {e}", path.display())))
}
