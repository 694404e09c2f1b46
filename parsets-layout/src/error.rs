use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Unsupported method: `{0}` (expected one of parset, angle, adj.angle, hammock)")]
    UnsupportedMethod(String),

    #[error("A positive `ratio` is required for method `{0}`")]
    RatioRequired(String),

    #[error("Column not found: `{0}`")]
    ColumnLookupError(String),

    #[error("Column `{name}` has {actual} values, expected {expected}")]
    ColumnLengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Column `{column}` has an invalid value at row {row}: {reason}")]
    InvalidValue {
        column: String,
        row: usize,
        reason: String,
    },

    #[error("Invalid weight at row {row}: {value} (weights must be finite and non-negative)")]
    InvalidWeight { row: usize, value: f64 },

    #[error("Invalid level order code: {0} (expected -1, 0 or 1)")]
    InvalidOrderCode(i64),

    #[error("Expected {expected} level order flags, got {actual}")]
    OrderLengthMismatch { expected: usize, actual: usize },

    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Level index {index} of `{variable}` is out of range for {levels} levels")]
    LevelOutOfRange {
        variable: String,
        index: usize,
        levels: usize,
    },
}
