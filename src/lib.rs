//! rust_loadseries — meter-reading time series: selection, energy, and
//! robust distribution fitting.
//!
//! Purpose
//! -------
//! Serve as the crate root for a small analysis pipeline over timestamped
//! power readings: select periods by calendar labels and spans, filter by
//! clock windows and calendar sets, integrate energy over contiguous runs,
//! and fit/adjust the distribution of a column with a robust log-normal
//! model.
//!
//! Key behaviors
//! -------------
//! - [`series`]: the validated, time-ordered [`series::TimeSeries`] plus
//!   alignment ([`series::intersect`]) and time-of-day reshaping.
//! - [`range`]: calendar labels, range tokens, unions, and their resolution
//!   against a series; localisation of calendar events into ranges.
//! - [`filter`]: the staged [`filter::time_filter`] driven by a
//!   [`filter::FilterSpec`].
//! - [`energy`]: gap thresholds, run grouping, and trapezoidal totals.
//! - [`distribution`]: log-normal fitting (MAD shape, KDE-mode scale) and
//!   rank-preserving sample adjustment.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every operation takes its inputs by reference and returns new values;
//!   no dataset is modified in place.
//! - Each module reports failures through its own `thiserror` enum
//!   (`SeriesError`, `RangeError`, `FilterError`, `EnergyError`,
//!   `FitError`); nothing panics on bad input.
//!
//! Conventions
//! -----------
//! - Timestamps are `chrono::NaiveDateTime` in a single implicit timezone;
//!   only `range::calendar` deals with zoned instants.
//! - Diagnostics are emitted through `tracing`; install a subscriber to see
//!   them.
//!
//! Downstream usage
//! ----------------
//! - `use rust_loadseries::prelude::*;` brings the common types and entry
//!   points into scope.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; end-to-end scenarios and
//!   `proptest` properties live under `tests/`.

pub mod distribution;
pub mod energy;
pub mod filter;
pub mod range;
pub mod series;

pub mod prelude {
    pub use crate::distribution::prelude::*;
    pub use crate::energy::prelude::*;
    pub use crate::filter::prelude::*;
    pub use crate::range::prelude::*;
    pub use crate::series::prelude::*;
}
