//! filter — calendar and time-of-day filtering of readings.
//!
//! Purpose
//! -------
//! Select the readings relevant to a question ("school hours on school
//! days", "weekend nights since August", "summer months") by applying a
//! [`FilterSpec`] to a [`TimeSeries`](crate::series::TimeSeries).
//!
//! Key behaviors
//! -------------
//! - [`FilterSpec`] enumerates every option explicitly, each defaulting to
//!   disabled.
//! - [`time_filter`] applies include → times → weekdays → months →
//!   blacklist, always returning a timestamp-sorted series.
//!
//! Invariants & assumptions
//! ------------------------
//! - `include` and `blacklist` are resolved against the unfiltered input.
//! - Filtering never fails on data. Only an invalid spec is an error.
//!
//! Downstream usage
//! ----------------
//! - The filtered series feeds `energy::integrate` or, via one of its
//!   columns, `distribution::fit_lognormal`.

pub mod apply;
pub mod errors;
pub mod spec;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::apply::time_filter;
pub use self::errors::{FilterError, FilterResult};
pub use self::spec::{FilterSpec, TimeWindow};

pub mod prelude {
    pub use super::apply::time_filter;
    pub use super::errors::{FilterError, FilterResult};
    pub use super::spec::{FilterSpec, TimeWindow};
}
