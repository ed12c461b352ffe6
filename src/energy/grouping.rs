//! Grouping of readings into maximal contiguous runs.
//!
//! Purpose
//! -------
//! Split an ordered series wherever two consecutive timestamps are further
//! apart than a gap threshold, so that downstream integration never spans
//! missing-data periods (meter downtime, filtered-out days).
//!
//! Key behaviors
//! -------------
//! - [`run_labels`] assigns each row a run label: 0 for the first run, +1 at
//!   every gap strictly larger than the threshold.
//! - [`consecutive_spans`] turns the labels into contiguous row spans.
//! - [`consecutives`] materialises one [`TimeSeries`] per run.
//! - A threshold of `None` is unbounded: the whole series is one run.
//!
//! Invariants & assumptions
//! ------------------------
//! - Spans partition `0..n` exactly, in order, without overlap.
//! - Inside a span every consecutive gap is `≤ threshold`; the gap before
//!   each span after the first is `> threshold`.
//! - An empty series has zero runs; a one-row series has one run.
use std::ops::Range;

use chrono::{NaiveDateTime, TimeDelta};

use crate::{
    energy::errors::{EnergyError, EnergyResult},
    series::TimeSeries,
};

/// Per-row run labels for a sorted index.
///
/// # Errors
/// `EnergyError::NegativeThreshold` when `threshold < 0`.
pub fn run_labels(index: &[NaiveDateTime], threshold: Option<TimeDelta>) -> EnergyResult<Vec<usize>> {
    check_threshold(threshold)?;
    let mut label = 0usize;
    let mut labels = Vec::with_capacity(index.len());
    for (row, ts) in index.iter().enumerate() {
        if row > 0 {
            if let Some(limit) = threshold {
                if *ts - index[row - 1] > limit {
                    label += 1;
                }
            }
        }
        labels.push(label);
    }
    Ok(labels)
}

/// Contiguous row spans of the runs of a sorted index.
pub fn consecutive_spans(
    index: &[NaiveDateTime], threshold: Option<TimeDelta>,
) -> EnergyResult<Vec<Range<usize>>> {
    let labels = run_labels(index, threshold)?;
    let mut spans = Vec::new();
    let mut start = 0;
    for row in 1..=labels.len() {
        if row == labels.len() || labels[row] != labels[row - 1] {
            spans.push(start..row);
            start = row;
        }
    }
    Ok(spans)
}

/// Split `series` into its maximal contiguous runs.
///
/// Parameters
/// ----------
/// - `series`: `&TimeSeries`
///   Sorted readings.
/// - `threshold`: `Option<TimeDelta>`
///   Largest gap allowed inside a run; `None` for unbounded.
///
/// Returns
/// -------
/// `EnergyResult<Vec<TimeSeries>>`
///   Runs in time order; concatenated they equal `series`.
pub fn consecutives(series: &TimeSeries, threshold: Option<TimeDelta>) -> EnergyResult<Vec<TimeSeries>> {
    let spans = consecutive_spans(series.index(), threshold)?;
    tracing::debug!(rows = series.len(), runs = spans.len(), "grouped readings into runs");
    Ok(spans.into_iter().map(|span| series.slice_rows(span)).collect())
}

fn check_threshold(threshold: Option<TimeDelta>) -> EnergyResult<()> {
    match threshold {
        Some(limit) if limit < TimeDelta::zero() => {
            Err(EnergyError::NegativeThreshold { seconds: limit.num_seconds() })
        }
        _ => Ok(()),
    }
}
