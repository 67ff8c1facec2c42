use fitting_types::{FittingKind, UnitDim};
use geom_kernel::{KernelError, KernelSolidHandle};
use serde::{Deserialize, Serialize};

/// Knobs for one construction attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Relative growth applied to every tool volume at its open ends.
    pub tool_margin: f64,
    /// Whether callers that do not say otherwise get a single solid back.
    pub convert_to_solid: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            tool_margin: 0.1,
            convert_to_solid: true,
        }
    }
}

/// Shapes a construction attempt hands back.
#[derive(Debug, Clone, PartialEq)]
pub enum SolidBody {
    Single(KernelSolidHandle),
    /// Frame-box assemblies.
    Group(Vec<KernelSolidHandle>),
}

/// Result of building one fitting.
#[derive(Debug, Clone, PartialEq)]
pub struct FittingSolid {
    pub kind: FittingKind,
    pub body: SolidBody,
    /// True once the body was converted to solid(s) after a recompute.
    pub solidified: bool,
}

impl FittingSolid {
    pub fn single(kind: FittingKind, handle: KernelSolidHandle) -> Self {
        Self {
            kind,
            body: SolidBody::Single(handle),
            solidified: false,
        }
    }

    pub fn group(kind: FittingKind, handles: Vec<KernelSolidHandle>) -> Self {
        Self {
            kind,
            body: SolidBody::Group(handles),
            solidified: false,
        }
    }

    pub fn handles(&self) -> &[KernelSolidHandle] {
        match &self.body {
            SolidBody::Single(h) => std::slice::from_ref(h),
            SolidBody::Group(hs) => hs,
        }
    }

    /// The handle of a single-body fitting.
    pub fn as_single(&self) -> Option<&KernelSolidHandle> {
        match &self.body {
            SolidBody::Single(h) => Some(h),
            SolidBody::Group(_) => None,
        }
    }
}

/// Errors from fitting construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FittingError {
    #[error("implausible {kind} dimensions: {reason}")]
    ImplausibleDimensions { kind: FittingKind, reason: String },

    #[error("{kind} requires dimension {symbol}")]
    MissingDimension { kind: FittingKind, symbol: String },

    #[error("{kind} dimension {symbol} must be a {expected:?} quantity, got {found:?}")]
    UnitMismatch {
        kind: FittingKind,
        symbol: String,
        expected: UnitDim,
        found: UnitDim,
    },

    #[error("geometry kernel failed building {kind} [{dims}]: {source}")]
    GeometryKernelFailure {
        kind: FittingKind,
        dims: String,
        #[source]
        source: KernelError,
    },
}

impl FittingError {
    /// Input problems detected before any kernel object exists.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, FittingError::GeometryKernelFailure { .. })
    }
}
