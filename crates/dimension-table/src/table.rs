use std::collections::HashMap;

use fitting_types::{DimensionSet, FittingKind, FittingSpec, LengthUnit, Quantity};
use tracing::debug;

use crate::errors::TableError;
use crate::load::NAME_COLUMN;

/// Catalog of named parts of one fitting kind, in catalog order.
///
/// The schema is checked once when the table is built, so a lookup only ever
/// fails because the name is unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionTable {
    kind: FittingKind,
    unit: LengthUnit,
    parts: Vec<(String, DimensionSet)>,
    index: HashMap<String, usize>,
}

impl DimensionTable {
    /// Build a table from a header row and text cells.
    ///
    /// `columns` must hold [`NAME_COLUMN`] and every symbol `kind` requires.
    /// Other columns (sizes, schedules, weights) are carried by catalogs but
    /// ignored here. Bare cell numbers are read in `unit`; angles in degrees.
    pub fn from_rows(
        kind: FittingKind,
        unit: LengthUnit,
        columns: &[String],
        rows: &[Vec<String>],
    ) -> Result<Self, TableError> {
        let mismatch = |reason: String| TableError::SchemaMismatch { kind, reason };

        let mut position: HashMap<&str, usize> = HashMap::new();
        for (i, column) in columns.iter().enumerate() {
            if position.insert(column.as_str(), i).is_some() {
                return Err(mismatch(format!("column {column:?} appears twice")));
            }
        }
        let name_at = *position
            .get(NAME_COLUMN)
            .ok_or_else(|| mismatch(format!("missing {NAME_COLUMN} column")))?;
        let missing: Vec<&str> = kind
            .required_symbols()
            .iter()
            .copied()
            .filter(|s| !position.contains_key(s))
            .collect();
        if !missing.is_empty() {
            return Err(mismatch(format!("missing columns {}", missing.join(", "))));
        }

        let mut table = Self {
            kind,
            unit,
            parts: Vec::with_capacity(rows.len()),
            index: HashMap::with_capacity(rows.len()),
        };
        for (row_no, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(mismatch(format!(
                    "row {} has {} cells, header has {}",
                    row_no + 1,
                    row.len(),
                    columns.len()
                )));
            }
            let name = row[name_at].trim().to_string();
            if name.is_empty() {
                return Err(mismatch(format!("row {} has an empty name", row_no + 1)));
            }
            if table.index.contains_key(&name) {
                return Err(TableError::DuplicateName { kind, name });
            }

            let mut dims = DimensionSet::new();
            for &symbol in kind.required_symbols() {
                let cell = &row[position[symbol]];
                let quantity = Quantity::parse(cell, FittingKind::symbol_dim(symbol), unit)
                    .map_err(|source| TableError::BadCell {
                        kind,
                        name: name.clone(),
                        column: symbol.to_string(),
                        source,
                    })?;
                dims.insert(symbol, quantity);
            }
            table.index.insert(name.clone(), table.parts.len());
            table.parts.push((name, dims));
        }
        debug!(kind = %kind, parts = table.parts.len(), "built dimension table");
        Ok(table)
    }

    pub fn kind(&self) -> FittingKind {
        self.kind
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Part names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(name, _)| name.as_str())
    }

    pub fn lookup(&self, name: &str) -> Result<&DimensionSet, TableError> {
        self.index
            .get(name.trim())
            .map(|&i| &self.parts[i].1)
            .ok_or_else(|| TableError::PartNotFound {
                kind: self.kind,
                name: name.to_string(),
            })
    }

    /// The part as a buildable spec.
    pub fn spec(&self, name: &str) -> Result<FittingSpec, TableError> {
        Ok(FittingSpec::new(self.kind, self.lookup(name)?.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn pipe_table(rows: &[&[&str]]) -> Result<DimensionTable, TableError> {
        let columns = strings(&["Name", "Size", "OD", "ID", "L"]);
        let rows: Vec<Vec<String>> = rows.iter().map(|r| strings(r)).collect();
        DimensionTable::from_rows(FittingKind::Pipe, LengthUnit::In, &columns, &rows)
    }

    #[test]
    fn lookup_reads_catalog_notation() {
        let table = pipe_table(&[
            &["P-1", "1\"", "1-5/16", "1.049", "10 ft"],
            &["P-2", "2\"", "2-3/8", "2.067", "240"],
        ]);
        // "ft" is not a supported suffix.
        assert!(matches!(table, Err(TableError::BadCell { ref column, .. }) if column == "L"));

        let table = pipe_table(&[
            &["P-1", "1\"", "1-5/16", "1.049", "120"],
            &["P-2", "2\"", "2-3/8", "2.067", "6 m"],
        ])
        .unwrap();
        assert_eq!(table.names().collect::<Vec<_>>(), ["P-1", "P-2"]);
        let p1 = table.lookup("P-1").unwrap();
        assert!((p1.length("OD").unwrap() - 1.3125 * 25.4).abs() < 1e-9);
        assert!((table.lookup("P-2").unwrap().length("L").unwrap() - 6000.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_part_is_not_found() {
        let table = pipe_table(&[&["P-1", "1\"", "1-5/16", "1.049", "120"]]).unwrap();
        let err = table.lookup("P-9").unwrap_err();
        assert!(matches!(err, TableError::PartNotFound { ref name, .. } if name == "P-9"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = pipe_table(&[
            &["P-1", "1\"", "1-5/16", "1.049", "120"],
            &["P-1", "2\"", "2-3/8", "2.067", "240"],
        ])
        .unwrap_err();
        assert!(matches!(err, TableError::DuplicateName { .. }));
    }

    #[test]
    fn short_row_is_a_schema_mismatch() {
        let err = pipe_table(&[&["P-1", "1\"", "1-5/16", "1.049"]]).unwrap_err();
        assert!(err.to_string().contains("row 1 has 4 cells"), "{}", err);
    }
}
