use fitting_types::{FittingKind, QuantityError};

/// Errors from loading or querying a dimension table.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TableError {
    #[error("failed to parse table: {0}")]
    ParseError(String),

    #[error("{kind} table does not match its schema: {reason}")]
    SchemaMismatch { kind: FittingKind, reason: String },

    #[error("{kind} table lists part {name:?} more than once")]
    DuplicateName { kind: FittingKind, name: String },

    #[error("{kind} part {name:?}, column {column}: {source}")]
    BadCell {
        kind: FittingKind,
        name: String,
        column: String,
        #[source]
        source: QuantityError,
    },

    #[error("no {kind} part named {name:?}")]
    PartNotFound { kind: FittingKind, name: String },
}
