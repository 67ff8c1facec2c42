use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::quantity::{Quantity, UnitDim};

/// A named bag of physical quantities describing one fitting instance.
///
/// Symbols follow catalog column names (`M`, `POD`, `PID`, `G`, `H`, `alpha`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionSet {
    values: BTreeMap<String, Quantity>,
}

/// Why a symbol could not be read from a [`DimensionSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum DimLookup {
    Missing { symbol: String },
    WrongDim { symbol: String, expected: UnitDim, found: UnitDim },
}

impl DimensionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, symbol: &str, quantity: Quantity) -> Self {
        self.insert(symbol, quantity);
        self
    }

    pub fn insert(&mut self, symbol: &str, quantity: Quantity) {
        self.values.insert(symbol.to_string(), quantity);
    }

    pub fn get(&self, symbol: &str) -> Option<&Quantity> {
        self.values.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Quantity)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Length value in millimetres.
    pub fn length(&self, symbol: &str) -> Result<f64, DimLookup> {
        self.typed(symbol, UnitDim::Length)
    }

    /// Angle value in radians.
    pub fn angle(&self, symbol: &str) -> Result<f64, DimLookup> {
        self.typed(symbol, UnitDim::Angle)
    }

    fn typed(&self, symbol: &str, expected: UnitDim) -> Result<f64, DimLookup> {
        let q = self.values.get(symbol).ok_or_else(|| DimLookup::Missing {
            symbol: symbol.to_string(),
        })?;
        if q.dim != expected {
            return Err(DimLookup::WrongDim {
                symbol: symbol.to_string(),
                expected,
                found: q.dim,
            });
        }
        Ok(q.value)
    }

    /// One-line `SYM=value` summary for diagnostics.
    pub fn summary(&self) -> String {
        self.values
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<(String, Quantity)> for DimensionSet {
    fn from_iter<I: IntoIterator<Item = (String, Quantity)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
