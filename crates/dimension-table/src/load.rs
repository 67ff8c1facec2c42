use fitting_types::{FittingKind, LengthUnit};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::errors::TableError;
use crate::table::DimensionTable;

/// Header of the column holding the part name.
pub const NAME_COLUMN: &str = "Name";

/// A table cell as written in JSON: catalog text or a plain number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    Text(String),
    Number(f64),
}

impl RawCell {
    fn into_text(self) -> String {
        match self {
            RawCell::Text(s) => s,
            RawCell::Number(n) => n.to_string(),
        }
    }
}

/// The top-level table file structure for deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct TableFileRaw {
    pub kind: FittingKind,
    pub unit: LengthUnit,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

/// Deserialize a dimension table from a JSON string and check its schema.
#[instrument(skip_all)]
pub fn load_table(json: &str) -> Result<DimensionTable, TableError> {
    let raw: TableFileRaw =
        serde_json::from_str(json).map_err(|e| TableError::ParseError(e.to_string()))?;

    let rows: Vec<Vec<String>> = raw
        .rows
        .into_iter()
        .map(|row| row.into_iter().map(RawCell::into_text).collect())
        .collect();
    let table = DimensionTable::from_rows(raw.kind, raw.unit, &raw.columns, &rows)?;
    info!(kind = %table.kind(), parts = table.len(), "loaded dimension table");
    Ok(table)
}
