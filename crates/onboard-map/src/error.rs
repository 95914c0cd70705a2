//! Error types for mapping edits.

use thiserror::Error;

/// Errors from mapping edit operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MappingError {
    /// Source column not present in the mapping set.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Target field not present in the available-field catalog.
    #[error("Unknown target field '{field}' for column '{column}'")]
    UnknownField {
        /// The column being edited.
        column: String,
        /// The requested target field.
        field: String,
    },

    /// The mapping set was already confirmed and is read-only.
    #[error("Mapping is finalized and can no longer be edited")]
    Finalized,

    /// Finalization attempted while the confirm gate is closed.
    #[error("Mapping cannot be confirmed: {conflicts} conflicting field(s), {needs_attention} column(s) need attention")]
    GateBlocked {
        /// Number of conflicting target fields.
        conflicts: usize,
        /// Number of active, unmapped columns.
        needs_attention: usize,
    },
}

impl MappingError {
    /// Get the column name associated with this error, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::ColumnNotFound(c) => Some(c),
            Self::UnknownField { column, .. } => Some(column),
            _ => None,
        }
    }
}
