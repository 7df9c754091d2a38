use thiserror::Error;

use crate::grid::ColumnKind;

/// Rejected configuration or data mutation. The object that returned it is
/// left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("grid needs at least one column")]
    EmptyHeaders,

    #[error("row {row} has {found} values, grid has {expected} columns")]
    RowArity {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row} column {column}: expected {expected} value, got {found}")]
    TypeMismatch {
        row: usize,
        column: usize,
        expected: ColumnKind,
        found: ColumnKind,
    },

    #[error("{what}: expected {expected} entries, got {found}")]
    SpecCount {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("column {index} has a ratio of 0")]
    ZeroRatio { index: usize },

    #[error("column {column} out of range, grid has {columns} columns")]
    ColumnOutOfRange { column: usize, columns: usize },

    #[error("invalid theme: {0}")]
    Theme(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
