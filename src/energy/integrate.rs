//! Trapezoidal energy integration over contiguous runs.
//!
//! Purpose
//! -------
//! Turn instantaneous power readings into consumed energy. Each run from
//! [`consecutive_spans`] is integrated on its own with the trapezoidal rule,
//! converted to whole hours, and the per-run results are summed, so gaps
//! between runs never contribute area.
//!
//! Key behaviors
//! -------------
//! - Elapsed time is measured from each run's own timestamps in nanoseconds.
//! - Each trapezoid's area is truncated to whole value-nanoseconds before
//!   summation; each run's area is then floored to whole value-hours
//!   (e.g. kW → kWh), so a negative run rounds toward negative infinity.
//! - Multi-column series are integrated column by column.
//!
//! Invariants & assumptions
//! ------------------------
//! - A single-row run has zero area.
//! - A constant reading `v` held for one hour contributes `⌊v⌋` hours-units.
//!
//! Conventions
//! -----------
//! - Units: value units × hours. No rescaling is applied to the readings.
use chrono::{NaiveDateTime, TimeDelta};
use ndarray::{Array1, ArrayView1};

use crate::{
    energy::{
        errors::{EnergyError, EnergyResult},
        grouping::consecutive_spans,
    },
    series::TimeSeries,
};

const NANOS_PER_HOUR: i128 = 3_600_000_000_000;

/// Integrate every column of `series` over its contiguous runs.
///
/// Parameters
/// ----------
/// - `series`: `&TimeSeries`
///   Sorted readings (typically instantaneous power).
/// - `threshold`: `Option<TimeDelta>`
///   Largest gap allowed inside a run; `None` integrates the whole series as
///   one run.
///
/// Returns
/// -------
/// `EnergyResult<Array1<i64>>`
///   One total per column: the sum over runs of each run's whole-hour area.
///
/// Errors
/// ------
/// - `EnergyError::NegativeThreshold` for a negative threshold.
/// - `EnergyError::SpanOverflow` when two consecutive timestamps are too far
///   apart for nanosecond arithmetic.
/// - `EnergyError::TotalOverflow` when a column total exceeds `i64`.
pub fn integrate(series: &TimeSeries, threshold: Option<TimeDelta>) -> EnergyResult<Array1<i64>> {
    let spans = consecutive_spans(series.index(), threshold)?;
    let mut totals = Array1::<i64>::zeros(series.ncols());

    for (column, values) in series.values().columns().into_iter().enumerate() {
        let mut hours: i128 = 0;
        for span in &spans {
            let area = trapezoid_nanos(
                &series.index()[span.clone()],
                values.slice(ndarray::s![span.clone()]),
                span.start,
            )?;
            hours += area.div_euclid(NANOS_PER_HOUR);
        }
        totals[column] = i64::try_from(hours).map_err(|_| EnergyError::TotalOverflow { column })?;
    }
    tracing::debug!(runs = spans.len(), columns = series.ncols(), "integrated energy");
    Ok(totals)
}

/// Integrate a single column; convenience for single-channel meters.
///
/// # Errors
/// As [`integrate`], plus `EnergyError::ColumnOutOfRange`.
pub fn integrate_column(
    series: &TimeSeries, column: usize, threshold: Option<TimeDelta>,
) -> EnergyResult<i64> {
    let totals = integrate(series, threshold)?;
    totals
        .get(column)
        .copied()
        .ok_or(EnergyError::ColumnOutOfRange { column, ncols: series.ncols() })
}

/// Trapezoidal area of one run in value-nanoseconds.
///
/// `row_offset` is the run's first row in the parent series, used only for
/// error reporting.
fn trapezoid_nanos(
    index: &[NaiveDateTime], values: ArrayView1<'_, f64>, row_offset: usize,
) -> EnergyResult<i128> {
    let mut area: i128 = 0;
    for i in 1..index.len() {
        let dt = (index[i] - index[i - 1])
            .num_nanoseconds()
            .ok_or(EnergyError::SpanOverflow { row: row_offset + i - 1 })?;
        let height = 0.5 * (values[i] + values[i - 1]);
        area += (dt as f64 * height).trunc() as i128;
    }
    Ok(area)
}
