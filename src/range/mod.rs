//! range — calendar labels, range tokens, and their resolution.
//!
//! Purpose
//! -------
//! Describe spans of wall-clock time in the forms analysts actually write
//! them ("2017", "2017-03", "2/9/17", a start/end pair with an open side, a
//! list of holidays) and resolve those descriptions against a sorted
//! [`TimeSeries`](crate::series::TimeSeries) index.
//!
//! Key behaviors
//! -------------
//! - [`CalendarLabel`] parses partial dates/times into half-open spans.
//! - [`RangeToken`] is an explicit tagged variant: a label or a span.
//! - [`DateRange`] unions several tokens.
//! - [`resolve`] / [`resolve_token`] select matching rows; unknown labels
//!   are logged and skipped.
//! - [`calendar`] converts event-source instants and dates into tokens.
//!
//! Invariants & assumptions
//! ------------------------
//! - Spans built through [`RangeToken::span`] are not inverted.
//! - Resolution output is sorted by timestamp and may contain duplicate rows
//!   when tokens of a union overlap.
//!
//! Conventions
//! -----------
//! - Errors are [`RangeError`] via [`RangeResult`]; they only arise from
//!   malformed input, never from a label that simply matches nothing.
//! - Diagnostics go through `tracing`; this module never prints.
//!
//! Downstream usage
//! ----------------
//! - `filter` uses the resolver for its `include` and `blacklist` stages.
//! - Event sources feed [`calendar::localize_events`] to build blacklists.
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule cover parsing, span validation, and
//!   resolution; the subset property is checked with `proptest` in the
//!   integration tests.

pub mod calendar;
pub mod errors;
pub mod label;
pub mod resolver;
pub mod token;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::calendar::{CalendarEvent, all_day_event, localize_event, localize_events};
pub use self::errors::{RangeError, RangeResult};
pub use self::label::{CalendarLabel, Resolution};
pub use self::resolver::{resolve, resolve_token};
pub use self::token::{DateRange, RangeBound, RangeToken};

pub mod prelude {
    pub use super::errors::{RangeError, RangeResult};
    pub use super::label::CalendarLabel;
    pub use super::resolver::{resolve, resolve_token};
    pub use super::token::{DateRange, RangeBound, RangeToken};
}
