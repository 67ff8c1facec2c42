use std::fmt;

use dimension_table::TableError;
use fitting_ops::FittingError;

/// Coarse outcome class reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    ImplausibleDimensions,
    PartNotFound,
    GeometryKernelFailure,
    SchemaMismatch,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::ImplausibleDimensions => "implausible dimensions",
            ErrorCategory::PartNotFound => "part not found",
            ErrorCategory::GeometryKernelFailure => "geometry kernel failure",
            ErrorCategory::SchemaMismatch => "schema mismatch",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from the fitting engine.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Fitting(#[from] FittingError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("invalid build config: {reason}")]
    InvalidConfig { reason: String },
}

impl EngineError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EngineError::Fitting(FittingError::ImplausibleDimensions { .. }) => {
                ErrorCategory::ImplausibleDimensions
            }
            EngineError::Fitting(FittingError::GeometryKernelFailure { .. }) => {
                ErrorCategory::GeometryKernelFailure
            }
            EngineError::Fitting(
                FittingError::MissingDimension { .. } | FittingError::UnitMismatch { .. },
            ) => ErrorCategory::SchemaMismatch,
            EngineError::Table(TableError::PartNotFound { .. }) => ErrorCategory::PartNotFound,
            EngineError::Table(_) | EngineError::InvalidConfig { .. } => {
                ErrorCategory::SchemaMismatch
            }
        }
    }
}
