//! Import of vendor catalog listings pasted from PDF datasheets.
//!
//! Each non-blank line is one part, its cells separated by whitespace, in
//! the order of `columns`. Cells use the usual catalog notation
//! (`1-1/8`, `31/32`, `.04`).

use fitting_types::{FittingKind, LengthUnit};
use tracing::instrument;

use crate::errors::TableError;
use crate::table::DimensionTable;

#[instrument(skip(columns, text), fields(kind = %kind))]
pub fn parse_catalog_text(
    kind: FittingKind,
    unit: LengthUnit,
    columns: &[&str],
    text: &str,
) -> Result<DimensionTable, TableError> {
    let columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    let rows: Vec<Vec<String>> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect();
    DimensionTable::from_rows(kind, unit, &columns, &rows)
}
