//! Compound calendar/time-of-day filtering of a dataset.
//!
//! Purpose
//! -------
//! Apply a [`FilterSpec`] to a [`TimeSeries`] in a fixed stage order, each
//! stage narrowing the previous stage's rows.
//!
//! Key behaviors
//! -------------
//! 1. `include`: replace the working rows with the resolution of the range
//!    over the input.
//! 2. `times`: keep rows inside a clock window; with several windows each is
//!    applied to the current rows, the results concatenated and re-sorted.
//! 3. `days_of_week`: keep rows whose Monday-based weekday is listed.
//! 4. `months`: keep rows whose month is listed.
//! 5. `blacklist`: resolve the range over the input and drop every working
//!    row whose timestamp it selects. Blacklisted timestamps absent from the
//!    working rows are ignored.
//!
//! Invariants & assumptions
//! ------------------------
//! - The working set is a list of row positions into the input, kept in
//!   ascending order, so the output is always sorted by timestamp.
//! - A spec with every stage disabled returns the input unchanged.
//! - Duplicate rows can arise from overlapping `include` tokens or
//!   overlapping clock windows and are kept.
use std::collections::HashSet;

use chrono::{Datelike, NaiveDateTime};

use crate::{
    filter::{errors::FilterResult, spec::FilterSpec},
    range::resolver::range_rows,
    series::TimeSeries,
};

/// Filter `series` by `spec`.
///
/// Parameters
/// ----------
/// - `series`: `&TimeSeries`
///   Dataset to filter; never modified.
/// - `spec`: `&FilterSpec`
///   Stages to apply. Disabled stages are no-ops.
///
/// Returns
/// -------
/// `FilterResult<TimeSeries>`
///   - `Ok(filtered)` sorted by timestamp.
///   - `Err(FilterError)` if the spec carries out-of-range weekday or month
///     numbers.
///
/// Notes
/// -----
/// - Unresolvable labels in `include` or `blacklist` are logged by the
///   resolver and contribute no rows; filtering continues.
pub fn time_filter(series: &TimeSeries, spec: &FilterSpec) -> FilterResult<TimeSeries> {
    spec.validate()?;
    if spec.is_noop() {
        return Ok(series.clone());
    }

    let index = series.index();
    let mut rows: Vec<usize> = match &spec.include {
        Some(range) => range_rows(index, range.tokens()),
        None => (0..series.len()).collect(),
    };
    tracing::debug!(rows = rows.len(), "filter: after include");

    if let Some(windows) = &spec.times {
        let mut unioned: Vec<usize> = windows
            .iter()
            .flat_map(|window| {
                rows.iter().copied().filter(move |&row| window.contains(&index[row].time()))
            })
            .collect();
        unioned.sort();
        rows = unioned;
        tracing::debug!(rows = rows.len(), windows = windows.len(), "filter: after times");
    }

    if let Some(days) = &spec.days_of_week {
        rows.retain(|&row| days.contains(&index[row].weekday().num_days_from_monday()));
        tracing::debug!(rows = rows.len(), "filter: after days_of_week");
    }

    if let Some(months) = &spec.months {
        rows.retain(|&row| months.contains(&index[row].month()));
        tracing::debug!(rows = rows.len(), "filter: after months");
    }

    if let Some(range) = &spec.blacklist {
        let excluded: HashSet<NaiveDateTime> =
            range_rows(index, range.tokens()).into_iter().map(|row| index[row]).collect();
        rows.retain(|&row| !excluded.contains(&index[row]));
        tracing::debug!(rows = rows.len(), excluded = excluded.len(), "filter: after blacklist");
    }

    Ok(series.take_rows(&rows))
}
