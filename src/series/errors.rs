//! Errors for time-indexed series construction and column access.
//!
//! [`SeriesError`] covers shape mismatches between the timestamp index and
//! the value matrix, non-finite readings, and out-of-range column lookups.
//! All variants carry the offending sizes or values so callers can report
//! them without holding on to the input data.
use thiserror::Error;

/// Result alias for series construction and access.
pub type SeriesResult<T> = Result<T, SeriesError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    // ---- Shape ----
    /// The value matrix must have one row per timestamp.
    #[error("Series Error: index has {index_len} timestamps but values have {rows} rows")]
    LengthMismatch { index_len: usize, rows: usize },

    /// A series needs at least one value column.
    #[error("Series Error: value matrix has no columns")]
    NoColumns,

    /// Requested column does not exist.
    #[error("Series Error: column {column} out of range (series has {ncols} columns)")]
    ColumnOutOfRange { column: usize, ncols: usize },

    // ---- Values ----
    /// Readings must be finite (missing entries are dropped upstream).
    #[error("Series Error: non-finite value {value} at row {row}, column {column}")]
    NonFiniteValue { row: usize, column: usize, value: f64 },
}
