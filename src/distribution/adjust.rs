//! Rank-preserving sample adjustment through a fitted log-normal model.
//!
//! Purpose
//! -------
//! Replace each reading by the fitted model's quantile at the reading's
//! rank, producing a smoothed sample that keeps the original ordering while
//! following the robust log-normal shape.
//!
//! Key behaviors
//! -------------
//! - The reading of rank `i` (0-based, ascending) maps to quantile
//!   `qᵢ = (buffer + i) / (n + 2·buffer − 1)`.
//! - A larger `buffer` pulls the extreme quantiles away from 0 and 1.
//! - Equal readings keep their input order (stable ranking).
//!
//! Invariants & assumptions
//! ------------------------
//! - `buffer ≥ 1`, so every `qᵢ` lies strictly inside (0, 1).
//! - Output has the same length and position order as the input.
//! - If `sample[a] < sample[b]` then `adjusted[a] < adjusted[b]`.
use ndarray::Array1;

use crate::{
    distribution::{
        errors::{FitError, FitResult},
        fit::{FitOptions, fit_lognormal_with},
    },
    series::TimeSeries,
};

/// Rank quantiles `(buffer + i) / (n + 2·buffer − 1)` for `i in 0..n`.
///
/// # Errors
/// `FitError::InvalidBuffer` when `buffer == 0` or `n + 2·buffer` overflows.
pub fn rank_quantiles(n: usize, buffer: usize) -> FitResult<Vec<f64>> {
    if buffer == 0 {
        return Err(FitError::InvalidBuffer { buffer });
    }
    // `buffer + i < n + 2·buffer − 1` for every rank, so only the
    // denominator needs checking.
    let denom = buffer
        .checked_mul(2)
        .and_then(|b| b.checked_add(n))
        .ok_or(FitError::InvalidBuffer { buffer })?
        - 1;
    Ok((0..n).map(|i| (buffer + i) as f64 / denom as f64).collect())
}

/// Adjust `sample` with default [`FitOptions`].
///
/// # Errors
/// As [`adjust_sample_with`].
pub fn adjust_sample(sample: &[f64], buffer: usize) -> FitResult<Array1<f64>> {
    adjust_sample_with(sample, buffer, &FitOptions::default())
}

/// Adjust `sample` through a log-normal model fitted to it.
///
/// Parameters
/// ----------
/// - `sample`: `&[f64]`
///   Non-negative readings.
/// - `buffer`: `usize`
///   Quantile buffer, at least 1.
/// - `opts`: `&FitOptions`
///   Options for the underlying fit.
///
/// Returns
/// -------
/// `FitResult<Array1<f64>>`
///   Adjusted readings, position `k` holding the replacement for
///   `sample[k]`.
///
/// Errors
/// ------
/// - `FitError::InvalidBuffer` when `buffer == 0` or too large for the rank
///   denominator.
/// - Any error of [`fit_lognormal_with`].
pub fn adjust_sample_with(sample: &[f64], buffer: usize, opts: &FitOptions) -> FitResult<Array1<f64>> {
    let quantiles = rank_quantiles(sample.len(), buffer)?;
    let model = fit_lognormal_with(sample, opts)?;

    let mut order: Vec<usize> = (0..sample.len()).collect();
    order.sort_by(|&a, &b| sample[a].total_cmp(&sample[b]));

    let mut adjusted = Array1::<f64>::zeros(sample.len());
    for (rank, &position) in order.iter().enumerate() {
        adjusted[position] = model.ppf(quantiles[rank])?;
    }
    tracing::debug!(n = sample.len(), buffer, shape = model.shape, scale = model.scale, "adjusted sample");
    Ok(adjusted)
}

/// Adjust one column of `series`, keeping its timestamps.
///
/// # Errors
/// - `FitError::Series` when `column` is out of range.
/// - Any error of [`adjust_sample_with`].
pub fn adjust_series(
    series: &TimeSeries, column: usize, buffer: usize, opts: &FitOptions,
) -> FitResult<TimeSeries> {
    let values = series.column(column)?.to_vec();
    let adjusted = adjust_sample_with(&values, buffer, opts)?;
    Ok(TimeSeries::from_column(series.index().to_vec(), adjusted.to_vec())?)
}
