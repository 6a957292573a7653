//! Layer lookup-table types.
//!
//! A layer table is an exhaustive map from a fixed row axis × fixed column axis
//! to an `InteractionCode`. Tables are read-only configuration: swapping a table
//! file changes scores deterministically without touching the engine.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::domain::{InteractionCode, InteractionLevel, LayerId};
use crate::error::AppError;

/// One layer's lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerTable {
    pub layer: LayerId,
    pub rows: Vec<String>,
    pub cols: Vec<String>,
    /// row key → column key → code
    pub cells: BTreeMap<String, BTreeMap<String, InteractionCode>>,
}

impl LayerTable {
    /// Unknown rows or columns are simply "no match".
    pub fn lookup(&self, row: &str, col: &str) -> Option<&InteractionCode> {
        self.cells.get(row).and_then(|cols| cols.get(col))
    }

    pub fn cell_count(&self) -> usize {
        self.cells.values().map(|c| c.len()).sum()
    }

    /// Check exhaustiveness over the declared axes and score/level consistency.
    pub fn validate(&self) -> Result<(), AppError> {
        let name = self.layer.key();
        if self.rows.is_empty() || self.cols.is_empty() {
            return Err(AppError::new(2, format!("Layer table '{name}' has an empty axis.")));
        }
        for row in &self.rows {
            for col in &self.cols {
                let Some(code) = self.lookup(row, col) else {
                    return Err(AppError::new(
                        2,
                        format!("Layer table '{name}' is missing cell ({row}, {col})."),
                    ));
                };
                if !(1..=10).contains(&code.score) {
                    return Err(AppError::new(
                        2,
                        format!(
                            "Layer table '{name}' cell ({row}, {col}) has score {} outside 1..=10.",
                            code.score
                        ),
                    ));
                }
                if code.level != InteractionLevel::from_score(code.score) {
                    return Err(AppError::new(
                        2,
                        format!(
                            "Layer table '{name}' cell ({row}, {col}) has level {:?} inconsistent with score {}.",
                            code.level, code.score
                        ),
                    ));
                }
            }
        }
        if self.cell_count() != self.rows.len() * self.cols.len() {
            return Err(AppError::new(
                2,
                format!("Layer table '{name}' has cells outside its declared axes."),
            ));
        }
        Ok(())
    }
}

/// The full set of ten layer tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerTables {
    pub version: String,
    pub tables: BTreeMap<LayerId, LayerTable>,
}

static BUILTIN: OnceLock<LayerTables> = OnceLock::new();

impl LayerTables {
    /// Assemble and validate a table set; every layer must appear exactly once.
    pub fn from_tables(version: impl Into<String>, tables: Vec<LayerTable>) -> Result<Self, AppError> {
        let mut map = BTreeMap::new();
        for table in tables {
            let layer = table.layer;
            if map.insert(layer, table).is_some() {
                return Err(AppError::new(
                    2,
                    format!("Duplicate table for layer '{}'.", layer.key()),
                ));
            }
        }
        let out = Self {
            version: version.into(),
            tables: map,
        };
        out.validate()?;
        Ok(out)
    }

    /// Built-in tables, derived once per process.
    pub fn builtin() -> &'static LayerTables {
        BUILTIN.get_or_init(crate::data::builtin::build_tables)
    }

    pub fn table(&self, layer: LayerId) -> Option<&LayerTable> {
        self.tables.get(&layer)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        for layer in LayerId::ALL {
            let Some(table) = self.tables.get(&layer) else {
                return Err(AppError::new(
                    2,
                    format!("Missing table for layer '{}'.", layer.key()),
                ));
            };
            if table.layer != layer {
                return Err(AppError::new(
                    2,
                    format!(
                        "Table stored under '{}' declares layer '{}'.",
                        layer.key(),
                        table.layer.key()
                    ),
                ));
            }
            table.validate()?;
        }
        Ok(())
    }

    pub fn total_cells(&self) -> usize {
        self.tables.values().map(LayerTable::cell_count).sum()
    }
}
