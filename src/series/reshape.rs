//! Reshape a single column into a time-of-day × date grid.
//!
//! The grid lines up the same clock time across days, which is the layout
//! used for day-over-day load-profile comparison.
use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveTime};
use ndarray::Array2;

use crate::series::{data::TimeSeries, errors::SeriesResult};

/// Readings of one column arranged with clock times as rows and dates as columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeOfDayGrid {
    /// Sorted, unique times of day (row labels).
    pub times: Vec<NaiveTime>,
    /// Sorted, unique dates (column labels).
    pub dates: Vec<NaiveDate>,
    /// `times.len() × dates.len()` readings; `NaN` where a date has no reading
    /// at that time.
    pub values: Array2<f64>,
}

/// Unstack `column` of `series` into a [`TimeOfDayGrid`].
///
/// When several rows share a timestamp the last one wins.
///
/// # Errors
/// `SeriesError::ColumnOutOfRange` when `column` does not exist.
pub fn unstack_by_time(series: &TimeSeries, column: usize) -> SeriesResult<TimeOfDayGrid> {
    let col = series.column(column)?;

    let times: Vec<NaiveTime> =
        series.index().iter().map(|ts| ts.time()).collect::<BTreeSet<_>>().into_iter().collect();
    let dates: Vec<NaiveDate> =
        series.index().iter().map(|ts| ts.date()).collect::<BTreeSet<_>>().into_iter().collect();
    let time_pos: BTreeMap<NaiveTime, usize> =
        times.iter().enumerate().map(|(i, &t)| (t, i)).collect();
    let date_pos: BTreeMap<NaiveDate, usize> =
        dates.iter().enumerate().map(|(j, &d)| (d, j)).collect();

    let mut values = Array2::from_elem((times.len(), dates.len()), f64::NAN);
    for (ts, &value) in series.index().iter().zip(col.iter()) {
        let (Some(&i), Some(&j)) = (time_pos.get(&ts.time()), date_pos.get(&ts.date())) else {
            continue;
        };
        values[[i, j]] = value;
    }

    Ok(TimeOfDayGrid { times, dates, values })
}
