//! energy — gap-aware grouping and trapezoidal energy totals.
//!
//! Purpose
//! -------
//! Convert filtered power readings into energy totals without integrating
//! across missing-data periods. Readings are grouped into maximal contiguous
//! runs by a gap threshold and each run is integrated on its own.
//!
//! Key behaviors
//! -------------
//! - [`parse_offset`] reads thresholds written as `"15 min"`, `"1 day"`, ….
//! - [`consecutive_spans`] / [`consecutives`] partition a series into runs.
//! - [`integrate`] sums whole-hour trapezoidal areas per run and column.
//!
//! Invariants & assumptions
//! ------------------------
//! - Runs partition the series exactly; gaps larger than the threshold only
//!   ever occur between runs.
//! - Inputs are sorted `TimeSeries`; nothing here re-sorts.
//!
//! Conventions
//! -----------
//! - Thresholds are `Option<chrono::TimeDelta>`, `None` meaning unbounded.
//! - Totals are `i64` counts of value-hours (kW readings → kWh).
//!
//! Testing notes
//! -------------
//! - Unit tests pin the unit convention, per-run flooring, and gap
//!   exclusion; the partition property is checked with `proptest` in the
//!   integration tests.

pub mod errors;
pub mod grouping;
pub mod integrate;
pub mod offset;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{EnergyError, EnergyResult};
pub use self::grouping::{consecutive_spans, consecutives, run_labels};
pub use self::integrate::{integrate, integrate_column};
pub use self::offset::parse_offset;

pub mod prelude {
    pub use super::errors::{EnergyError, EnergyResult};
    pub use super::grouping::{consecutive_spans, consecutives};
    pub use super::integrate::{integrate, integrate_column};
    pub use super::offset::parse_offset;
}
