//! Alignment of two series on their shared timestamps.
//!
//! Used wherever two independently filtered series (e.g. energy totals and
//! daily temperatures) must be compared row by row.
use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::series::data::TimeSeries;

/// Restrict two series to the timestamps they have in common.
///
/// Parameters
/// ----------
/// - `a`, `b`: `&TimeSeries`
///   Series to align. Column layouts may differ.
///
/// Returns
/// -------
/// `(TimeSeries, TimeSeries)`
///   Rows of `a` and of `b` whose timestamp appears in both inputs, in
///   timestamp order. An empty intersection yields two empty series with the
///   original column counts.
///
/// Notes
/// -----
/// - With unique indexes both outputs have the same length, equal to the
///   number of shared timestamps. A timestamp repeated inside one input
///   keeps all of its rows on that side.
pub fn intersect(a: &TimeSeries, b: &TimeSeries) -> (TimeSeries, TimeSeries) {
    let a_stamps: BTreeSet<NaiveDateTime> = a.index().iter().copied().collect();
    let shared: BTreeSet<NaiveDateTime> =
        b.index().iter().copied().filter(|ts| a_stamps.contains(ts)).collect();

    (restrict(a, &shared), restrict(b, &shared))
}

fn restrict(series: &TimeSeries, keep: &BTreeSet<NaiveDateTime>) -> TimeSeries {
    let rows: Vec<usize> = series
        .index()
        .iter()
        .enumerate()
        .filter(|(_, ts)| keep.contains(ts))
        .map(|(row, _)| row)
        .collect();
    series.take_rows(&rows)
}
