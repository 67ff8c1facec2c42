//! Fail-fast dimension plausibility checks.
//!
//! Each check names the quantities involved and their values, so the first
//! violation is enough for the caller to correct the input.

use fitting_types::{DimLookup, DimensionSet, FittingKind};

use crate::types::FittingError;

/// A named length or angle, for messages.
pub type Named = (&'static str, f64);

/// Check runner bound to one fitting kind.
#[derive(Debug, Clone, Copy)]
pub struct Rules {
    kind: FittingKind,
}

impl Rules {
    pub fn new(kind: FittingKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> FittingKind {
        self.kind
    }

    pub fn reject(&self, reason: String) -> FittingError {
        FittingError::ImplausibleDimensions {
            kind: self.kind,
            reason,
        }
    }

    pub fn check(&self, ok: bool, reason: impl FnOnce() -> String) -> Result<(), FittingError> {
        if ok {
            Ok(())
        } else {
            Err(self.reject(reason()))
        }
    }

    pub fn positive(&self, (name, value): Named) -> Result<(), FittingError> {
        self.check(value.is_finite() && value > 0.0, || {
            format!("{} must be positive (got {:.4})", name, value)
        })
    }

    pub fn all_positive(&self, values: &[Named]) -> Result<(), FittingError> {
        values.iter().try_for_each(|&v| self.positive(v))
    }

    /// `a > b`.
    pub fn greater(&self, a: Named, b: Named) -> Result<(), FittingError> {
        self.check(a.1 > b.1, || {
            format!("{} ({:.4}) must exceed {} ({:.4})", a.0, a.1, b.0, b.1)
        })
    }

    /// `a >= b`.
    pub fn at_least(&self, a: Named, b: Named) -> Result<(), FittingError> {
        self.check(a.1 >= b.1, || {
            format!("{} ({:.4}) must be at least {} ({:.4})", a.0, a.1, b.0, b.1)
        })
    }

    /// `outer > socket > bore` at one socket.
    pub fn wall_order(&self, outer: Named, socket: Named, bore: Named) -> Result<(), FittingError> {
        self.greater(outer, socket)?;
        self.greater(socket, bore)
    }

    /// `0 < inner < whole`.
    pub fn inset(&self, inner: Named, whole: Named) -> Result<(), FittingError> {
        self.positive(inner)?;
        self.greater(whole, inner)
    }
}

/// Typed dimension reads that report against a fitting kind.
pub struct Dims<'a> {
    kind: FittingKind,
    set: &'a DimensionSet,
}

impl<'a> Dims<'a> {
    pub fn new(kind: FittingKind, set: &'a DimensionSet) -> Self {
        Self { kind, set }
    }

    fn map(&self, err: DimLookup) -> FittingError {
        match err {
            DimLookup::Missing { symbol } => FittingError::MissingDimension {
                kind: self.kind,
                symbol,
            },
            DimLookup::WrongDim {
                symbol,
                expected,
                found,
            } => FittingError::UnitMismatch {
                kind: self.kind,
                symbol,
                expected,
                found,
            },
        }
    }

    /// Length in millimetres.
    pub fn length(&self, symbol: &str) -> Result<f64, FittingError> {
        self.set.length(symbol).map_err(|e| self.map(e))
    }

    /// Angle in radians.
    pub fn angle(&self, symbol: &str) -> Result<f64, FittingError> {
        self.set.angle(symbol).map_err(|e| self.map(e))
    }
}
