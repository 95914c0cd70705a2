use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("{kind} must not be empty (got {value:?})")]
    EmptyId { kind: &'static str, value: String },
    #[error("confidence for column '{column}' must be within [0, 1], got {value}")]
    ConfidenceOutOfRange { column: String, value: f32 },
    #[error("source column '{0}' appears more than once in the mapping set")]
    DuplicateSourceColumn(String),
    #[error("source column name must not be blank")]
    BlankSourceColumn,
}

pub type Result<T> = std::result::Result<T, ModelError>;
