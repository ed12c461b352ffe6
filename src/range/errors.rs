//! Errors for calendar labels and range tokens.
//!
//! Only malformed structured input is an error here. A well-formed label that
//! matches no rows is not: resolution reports it through `tracing` and
//! yields an empty selection.
use thiserror::Error;

/// Result alias for label parsing and token construction.
pub type RangeResult<T> = Result<T, RangeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    // ---- Labels ----
    /// The string is not a recognised calendar label.
    #[error("Range Error: '{text}' is not a calendar label ({reason})")]
    MalformedLabel { text: String, reason: &'static str },

    /// The label names a date/time that does not exist (e.g. month 13).
    #[error("Range Error: '{text}' is out of the calendar range")]
    InvalidCalendarValue { text: String },

    // ---- Spans ----
    /// An explicit span whose start lies after its end.
    #[error("Range Error: span start {start} lies after span end {end}")]
    InvertedSpan { start: String, end: String },
}
