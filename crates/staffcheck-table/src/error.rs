//! Load errors.
//!
//! Anything reported here is fatal: the table is not produced and no rule
//! runs. Unparseable cells are not errors (see [`crate::Coercion`]).

use thiserror::Error;

/// Errors that can occur while loading an employee table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read the input file.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// The input has no header row.
    #[error("input is empty: expected a header row")]
    Empty,

    /// A required column is absent from the header.
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// A column name appears more than once in the header.
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    /// A data row has more fields than the header.
    #[error("line {line}: expected at most {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A quoted field is never closed.
    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },
}
