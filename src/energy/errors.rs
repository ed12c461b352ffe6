//! Errors for run grouping and energy integration.
use thiserror::Error;

/// Result alias for grouping and integration.
pub type EnergyResult<T> = Result<T, EnergyError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnergyError {
    // ---- Thresholds ----
    /// An offset string such as "15 min" could not be parsed.
    #[error("Energy Error: '{text}' is not a time offset ({reason})")]
    InvalidOffset { text: String, reason: &'static str },

    /// Gap thresholds must be non-negative.
    #[error("Energy Error: gap threshold must be non-negative (got {seconds} s)")]
    NegativeThreshold { seconds: i64 },

    // ---- Integration ----
    /// Consecutive timestamps too far apart to express in nanoseconds.
    #[error("Energy Error: gap after row {row} overflows nanosecond precision")]
    SpanOverflow { row: usize },

    /// A column total does not fit in an `i64` hour count.
    #[error("Energy Error: energy total for column {column} overflows")]
    TotalOverflow { column: usize },

    // ---- Columns ----
    /// Requested column does not exist.
    #[error("Energy Error: column {column} out of range (series has {ncols} columns)")]
    ColumnOutOfRange { column: usize, ncols: usize },
}
