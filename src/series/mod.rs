//! series — time-indexed readings, alignment, and reshaping.
//!
//! Purpose
//! -------
//! Define the in-memory dataset every other module operates on: a validated,
//! timestamp-ordered matrix of readings. Also hosts the two utilities that
//! work on whole series rather than on ranges or runs: aligning two series on
//! shared timestamps and unstacking a column into a time-of-day grid.
//!
//! Key behaviors
//! -------------
//! - [`TimeSeries`] validates shapes and finiteness and sorts rows by
//!   timestamp at construction.
//! - [`intersect`] restricts two series to their common timestamps.
//! - [`unstack_by_time`] builds a [`TimeOfDayGrid`] for day-over-day views.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every `TimeSeries` visible outside this module is sorted by timestamp
//!   and contains only finite values.
//! - Operations return new series; nothing is mutated in place.
//!
//! Conventions
//! -----------
//! - Timestamps are `chrono::NaiveDateTime` in one implicit local timezone.
//! - Values are `ndarray::Array2<f64>` with rows = time, columns = channels.
//!
//! Downstream usage
//! ----------------
//! - Source readers build a `TimeSeries` once; `range`, `filter`, and
//!   `energy` consume it; `distribution` consumes one of its columns.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; property tests for
//!   [`intersect`] live in the crate's integration tests.

pub mod align;
pub mod data;
pub mod errors;
pub mod reshape;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::align::intersect;
pub use self::data::TimeSeries;
pub use self::errors::{SeriesError, SeriesResult};
pub use self::reshape::{TimeOfDayGrid, unstack_by_time};

pub mod prelude {
    pub use super::align::intersect;
    pub use super::data::TimeSeries;
    pub use super::errors::{SeriesError, SeriesResult};
    pub use super::reshape::{TimeOfDayGrid, unstack_by_time};
}
