use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical dimension of a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitDim {
    Length,
    Angle,
}

/// Unit a bare catalog number is read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Mm,
    Cm,
    M,
    In,
}

impl LengthUnit {
    /// Millimetres per unit.
    pub fn factor(self) -> f64 {
        match self {
            LengthUnit::Mm => 1.0,
            LengthUnit::Cm => 10.0,
            LengthUnit::M => 1000.0,
            LengthUnit::In => 25.4,
        }
    }
}

/// A magnitude with its unit dimension.
///
/// Lengths are stored in millimetres, angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub dim: UnitDim,
}

impl Quantity {
    pub fn length_mm(value: f64) -> Self {
        Self {
            value,
            dim: UnitDim::Length,
        }
    }

    pub fn mm(value: f64) -> Self {
        Self::length_mm(value)
    }

    pub fn cm(value: f64) -> Self {
        Self::length_mm(value * LengthUnit::Cm.factor())
    }

    pub fn m(value: f64) -> Self {
        Self::length_mm(value * LengthUnit::M.factor())
    }

    pub fn inch(value: f64) -> Self {
        Self::length_mm(value * LengthUnit::In.factor())
    }

    pub fn rad(value: f64) -> Self {
        Self {
            value,
            dim: UnitDim::Angle,
        }
    }

    pub fn deg(value: f64) -> Self {
        Self::rad(value.to_radians())
    }

    /// Parse a catalog cell such as `1-1/8`, `3/8 in`, `.04`, `30 cm` or `45°`.
    ///
    /// A bare number is a length in `default_unit`, unless `dim` asks for an
    /// angle, in which case it is read in degrees.
    pub fn parse(text: &str, dim: UnitDim, default_unit: LengthUnit) -> Result<Self, QuantityError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(QuantityError::Empty);
        }

        let (number, suffix) = split_suffix(trimmed);
        let magnitude = parse_mixed_number(number.trim()).ok_or_else(|| QuantityError::BadNumber {
            text: trimmed.to_string(),
        })?;

        match (dim, suffix) {
            (UnitDim::Length, None) => Ok(Self::length_mm(magnitude * default_unit.factor())),
            (UnitDim::Length, Some(Suffix::Length(unit))) => {
                Ok(Self::length_mm(magnitude * unit.factor()))
            }
            (UnitDim::Angle, None) | (UnitDim::Angle, Some(Suffix::Degrees)) => {
                Ok(Self::deg(magnitude))
            }
            (UnitDim::Angle, Some(Suffix::Radians)) => Ok(Self::rad(magnitude)),
            (expected, Some(_)) => Err(QuantityError::WrongUnit {
                text: trimmed.to_string(),
                expected,
            }),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dim {
            UnitDim::Length => write!(f, "{:.4} mm", self.value),
            UnitDim::Angle => write!(f, "{:.4}°", self.value.to_degrees()),
        }
    }
}

/// Errors from parsing quantity text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuantityError {
    #[error("empty quantity")]
    Empty,

    #[error("not a number: {text:?}")]
    BadNumber { text: String },

    #[error("{text:?} is not a {expected:?} quantity")]
    WrongUnit { text: String, expected: UnitDim },
}

#[derive(Clone, Copy)]
enum Suffix {
    Length(LengthUnit),
    Degrees,
    Radians,
}

fn split_suffix(text: &str) -> (&str, Option<Suffix>) {
    // Longest suffixes first so "mm" is not read as "m".
    const SUFFIXES: [(&str, Suffix); 8] = [
        ("deg", Suffix::Degrees),
        ("rad", Suffix::Radians),
        ("mm", Suffix::Length(LengthUnit::Mm)),
        ("cm", Suffix::Length(LengthUnit::Cm)),
        ("in", Suffix::Length(LengthUnit::In)),
        ("\"", Suffix::Length(LengthUnit::In)),
        ("°", Suffix::Degrees),
        ("m", Suffix::Length(LengthUnit::M)),
    ];
    for (suffix, kind) in SUFFIXES {
        if let Some(number) = text.strip_suffix(suffix) {
            return (number, Some(kind));
        }
    }
    (text, None)
}

/// Parse `12`, `.04`, `3/8` or the catalog mixed form `1-1/8`.
fn parse_mixed_number(text: &str) -> Option<f64> {
    if let Some(rest) = text.strip_prefix('-') {
        return parse_unsigned_mixed(rest).map(|v| -v);
    }
    parse_unsigned_mixed(text)
}

fn parse_unsigned_mixed(text: &str) -> Option<f64> {
    match text.split_once('-') {
        Some((whole, fraction)) => {
            let whole: f64 = whole.trim().parse().ok()?;
            Some(whole + parse_fraction(fraction.trim())?)
        }
        None => parse_fraction(text),
    }
}

fn parse_fraction(text: &str) -> Option<f64> {
    match text.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            Some(num / den)
        }
        None => text.parse().ok(),
    }
}
