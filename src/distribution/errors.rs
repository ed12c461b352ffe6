//! distribution::errors — failure modes of log-normal fitting.
//!
//! Purpose
//! -------
//! Surface every statistical-precondition violation of the fitting chain as
//! a hard error instead of a plausible-looking but meaningless model.
//!
//! Key behaviors
//! -------------
//! - Sample problems: empty, non-finite, negative, or (under
//!   `ZeroLogPolicy::Reject`) zero readings.
//! - Degeneracies: too few points or zero variance for the density
//!   estimate, zero robust spread.
//! - Backend problems: optimizer failures and non-finite results, wrapped as
//!   text so `argmin`/`statrs` error types never leak.
//! - Configuration problems: invalid bandwidth factors, tolerances,
//!   iteration limits, quantile buffers.
//!
//! Conventions
//! -----------
//! - Variants carry the offending value or index; messages are phrased as
//!   domain constraints ("buffer must be ≥ 1").
use thiserror::Error;

use crate::series::SeriesError;

/// Result alias for fitting and adjustment.
pub type FitResult<T> = Result<T, FitError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    // ---- Sample validation ----
    /// The sample has no values.
    #[error("Fit Error: sample is empty")]
    EmptySample,

    /// A sample value is NaN/±inf.
    #[error("Fit Error: non-finite sample value {value} at index {index}")]
    NonFiniteSample { index: usize, value: f64 },

    /// A negative reading has no logarithm.
    #[error("Fit Error: negative sample value {value} at index {index} has no logarithm")]
    NegativeSample { index: usize, value: f64 },

    /// A zero reading under `ZeroLogPolicy::Reject`.
    #[error("Fit Error: zero sample value at index {index} rejected by log policy")]
    ZeroReading { index: usize },

    // ---- Density estimation ----
    /// Kernel density estimation needs at least `min` points.
    #[error("Fit Error: density estimate needs at least {min} points (got {len})")]
    InsufficientData { len: usize, min: usize },

    /// Zero (or non-finite) variance makes the kernel covariance singular.
    #[error("Fit Error: log-sample variance {variance} is degenerate")]
    DegenerateVariance { variance: f64 },

    /// Bandwidth factors must be finite and > 0.
    #[error("Fit Error: bandwidth factor {factor} must be finite and > 0")]
    InvalidBandwidth { factor: f64 },

    /// The density evaluated to a non-finite value.
    #[error("Fit Error: density at {x} is non-finite ({value})")]
    NonFiniteDensity { x: f64, value: f64 },

    // ---- Parameters ----
    /// Median absolute deviation of the log-sample is zero.
    #[error("Fit Error: robust spread is zero (MAD = {mad}); shape is undefined")]
    ZeroSpread { mad: f64 },

    /// Fitted shape/scale must be finite and > 0.
    #[error("Fit Error: fitted parameters are not usable (shape = {shape}, scale = {scale})")]
    InvalidParams { shape: f64, scale: f64 },

    /// Quantiles passed to the inverse CDF must lie strictly inside (0, 1).
    #[error("Fit Error: quantile {q} outside (0, 1)")]
    InvalidQuantile { q: f64 },

    // ---- Options ----
    /// `max_iter` must be positive.
    #[error("Fit Error: max_iter must be positive (got {max_iter})")]
    InvalidMaxIter { max_iter: u64 },

    /// Tolerances must be finite and > 0.
    #[error("Fit Error: tolerance {tol} must be finite and > 0")]
    InvalidTolerance { tol: f64 },

    /// Quantile buffers must be at least 1 and keep `n + 2·buffer` within `usize`.
    #[error("Fit Error: quantile buffer must be >= 1 and not overflow the rank denominator (got {buffer})")]
    InvalidBuffer { buffer: usize },

    // ---- Backends ----
    /// Wrapper for `argmin` failures during the mode search.
    #[error("Fit Error: optimizer failed: {text}")]
    Optimizer { text: String },

    /// Wrapper for `statrs` distribution-construction failures.
    #[error("Fit Error: distribution error: {text}")]
    Distribution { text: String },

    /// Column access on a series failed.
    #[error(transparent)]
    Series(#[from] SeriesError),
}
