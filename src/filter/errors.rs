//! Errors for filter configuration.
//!
//! Filtering itself cannot fail on data; only a malformed
//! [`FilterSpec`](crate::filter::FilterSpec) is rejected.
use thiserror::Error;

use crate::range::RangeError;

/// Result alias for filter construction and application.
pub type FilterResult<T> = Result<T, FilterError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    // ---- Time-of-day windows ----
    /// A clock time is not `HH:MM` or `HH:MM:SS`.
    #[error("Filter Error: '{text}' is not a time of day (expected HH:MM)")]
    InvalidTimeOfDay { text: String },

    // ---- Calendar sets ----
    /// Weekdays are numbered 0 (Monday) to 6 (Sunday).
    #[error("Filter Error: day of week {day} outside 0..=6")]
    InvalidDayOfWeek { day: u32 },

    /// Months are numbered 1 (January) to 12 (December).
    #[error("Filter Error: month {month} outside 1..=12")]
    InvalidMonth { month: u32 },

    // ---- Ranges ----
    /// A range token in `include` or `blacklist` could not be built.
    #[error(transparent)]
    Range(#[from] RangeError),
}
