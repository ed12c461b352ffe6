//! Time-indexed reading container shared by every stage of the pipeline.
//!
//! Purpose
//! -------
//! Provide a small, validated container pairing a wall-clock timestamp index
//! with an `n × p` matrix of readings. Filtering, grouping, integration, and
//! alignment all consume and produce this type, so its invariants are checked
//! once at construction and then relied upon downstream.
//!
//! Key behaviors
//! -------------
//! - [`TimeSeries::new`] validates shapes and finiteness and stably sorts rows
//!   by timestamp, so every series observed by callers is ordered.
//! - Row-selection helpers (`take_rows`, `slice_rows`) always produce new
//!   values; a series is never mutated after construction.
//!
//! Invariants & assumptions
//! ------------------------
//! - `index.len() == values.nrows()` and `values.ncols() ≥ 1`.
//! - All values are finite; missing readings are dropped before data enters
//!   the crate.
//! - `index` is non-decreasing. Duplicate timestamps are allowed and keep
//!   their relative order from the input.
//!
//! Conventions
//! -----------
//! - Timestamps are naive wall-clock times in a single, implicit timezone.
//! - Rows are time, columns are value series (e.g. one meter channel each).
//!
//! Testing notes
//! -------------
//! - Unit tests cover validation errors, the sort-on-construction guarantee,
//!   and column access.
use std::ops::Range;

use chrono::NaiveDateTime;
use ndarray::{Array2, ArrayView1, Axis};

use crate::series::errors::{SeriesError, SeriesResult};

/// `TimeSeries` — ordered timestamps paired with rows of finite readings.
///
/// Fields
/// ------
/// - `index`: `Vec<NaiveDateTime>`
///   Row timestamps, non-decreasing.
/// - `values`: `Array2<f64>`
///   Readings with shape `index.len() × ncols`.
///
/// Notes
/// -----
/// - Fields are private so the ordering and finiteness invariants cannot be
///   broken after validation; use the accessors to read them.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    index: Vec<NaiveDateTime>,
    values: Array2<f64>,
}

impl TimeSeries {
    /// Construct a validated series, sorting rows by timestamp.
    ///
    /// Parameters
    /// ----------
    /// - `index`: `Vec<NaiveDateTime>`
    ///   One timestamp per row, in any order.
    /// - `values`: `Array2<f64>`
    ///   Readings; must have `index.len()` rows, at least one column, and only
    ///   finite entries.
    ///
    /// Errors
    /// ------
    /// - `SeriesError::NoColumns` when `values.ncols() == 0`.
    /// - `SeriesError::LengthMismatch` when row count and index length differ.
    /// - `SeriesError::NonFiniteValue` for the first NaN/±∞ entry found.
    ///
    /// Notes
    /// -----
    /// - Sorting is stable: rows sharing a timestamp keep their input order.
    pub fn new(index: Vec<NaiveDateTime>, values: Array2<f64>) -> SeriesResult<Self> {
        if values.ncols() == 0 {
            return Err(SeriesError::NoColumns);
        }
        if values.nrows() != index.len() {
            return Err(SeriesError::LengthMismatch { index_len: index.len(), rows: values.nrows() });
        }
        for ((row, column), &value) in values.indexed_iter() {
            if !value.is_finite() {
                return Err(SeriesError::NonFiniteValue { row, column, value });
            }
        }

        if index.windows(2).all(|w| w[0] <= w[1]) {
            return Ok(TimeSeries { index, values });
        }

        let mut order: Vec<usize> = (0..index.len()).collect();
        order.sort_by_key(|&row| index[row]);
        let sorted_index = order.iter().map(|&row| index[row]).collect();
        let sorted_values = values.select(Axis(0), &order);
        Ok(TimeSeries { index: sorted_index, values: sorted_values })
    }

    /// Construct a single-column series from parallel timestamp and value vectors.
    pub fn from_column(index: Vec<NaiveDateTime>, values: Vec<f64>) -> SeriesResult<Self> {
        let rows = values.len();
        let column = Array2::from_shape_vec((rows, 1), values)
            .map_err(|_| SeriesError::LengthMismatch { index_len: index.len(), rows })?;
        Self::new(index, column)
    }

    /// An empty series with `ncols` value columns.
    pub fn empty(ncols: usize) -> Self {
        TimeSeries { index: Vec::new(), values: Array2::zeros((0, ncols)) }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Earliest timestamp, if any.
    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.index.first().copied()
    }

    /// Latest timestamp, if any.
    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.index.last().copied()
    }

    /// View of one value column.
    ///
    /// # Errors
    /// `SeriesError::ColumnOutOfRange` when `column >= self.ncols()`.
    pub fn column(&self, column: usize) -> SeriesResult<ArrayView1<'_, f64>> {
        if column >= self.ncols() {
            return Err(SeriesError::ColumnOutOfRange { column, ncols: self.ncols() });
        }
        Ok(self.values.column(column))
    }

    /// Iterate `(timestamp, row)` pairs in index order.
    pub fn rows(&self) -> impl Iterator<Item = (NaiveDateTime, ArrayView1<'_, f64>)> + '_ {
        self.index.iter().copied().zip(self.values.rows())
    }

    /// Build a new series from the given row positions, in the given order.
    ///
    /// Callers pass positions that are already in timestamp order (sorted
    /// row numbers of an ordered series satisfy this); repeated positions
    /// produce duplicate rows.
    pub(crate) fn take_rows(&self, rows: &[usize]) -> TimeSeries {
        let index = rows.iter().map(|&row| self.index[row]).collect();
        let values = self.values.select(Axis(0), rows);
        TimeSeries { index, values }
    }

    /// Contiguous row slice `[range.start, range.end)`.
    pub(crate) fn slice_rows(&self, range: Range<usize>) -> TimeSeries {
        let index = self.index[range.clone()].to_vec();
        let values = self.values.slice(ndarray::s![range, ..]).to_owned();
        TimeSeries { index, values }
    }
}
