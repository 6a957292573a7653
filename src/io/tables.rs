//! Read/write layer-table JSON files.
//!
//! A table file is the serialized `LayerTables`: a version tag plus one exhaustive
//! table per layer. Loading always validates; a broken table is a configuration
//! error (exit code 2), never a silent scoring change.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::data::LayerTables;
use crate::error::AppError;

pub fn read_tables_json(path: &Path) -> Result<LayerTables, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open tables JSON '{}': {e}", path.display())))?;
    let tables: LayerTables = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(2, format!("Invalid tables JSON '{}': {e}", path.display())))?;
    tables.validate()?;
    tracing::info!(
        path = %path.display(),
        version = %tables.version,
        cells = tables.total_cells(),
        "loaded layer tables"
    );
    Ok(tables)
}

pub fn write_tables_json(path: &Path, tables: &LayerTables) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create tables JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, tables)
        .map_err(|e| AppError::new(2, format!("Failed to write tables JSON: {e}")))?;
    Ok(())
}
