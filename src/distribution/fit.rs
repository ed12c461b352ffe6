//! Robust log-normal fitting.
//!
//! Purpose
//! -------
//! Fit a log-normal model to positive readings without being pulled by
//! outliers: the shape comes from the scaled median absolute deviation of the
//! log-sample and the scale from the mode of its kernel density estimate.
//!
//! Key behaviors
//! -------------
//! 1. Log-transform the sample under the configured [`ZeroLogPolicy`].
//! 2. `shape = 1.4826 · MAD(log-sample)`.
//! 3. `scale = exp(mode)`, where `mode` maximises a Gaussian KDE of the
//!    log-sample on `[min, max]` of the log-sample.
//! 4. `location = 0`.
//!
//! Invariants & assumptions
//! ------------------------
//! - A returned [`LogNormalFit`] always has finite `shape > 0` and finite
//!   `scale > 0`; degenerate samples fail instead.
//! - Fitting is deterministic for a given sample and [`FitOptions`].
//!
//! Conventions
//! -----------
//! - Parameters follow the (shape, location, scale) convention: for
//!   `x > location`, `ln((x − location) / scale) / shape` is standard normal.
//!
//! Downstream usage
//! ----------------
//! - `distribution::adjust` evaluates [`LogNormalFit::ppf`] at rank
//!   quantiles to produce adjusted samples.
use statrs::distribution::{Continuous, ContinuousCDF, LogNormal, Normal};

use crate::distribution::{
    errors::{FitError, FitResult},
    kde::{Bandwidth, GaussianKde},
    log_transform::{ZeroLogPolicy, log_transform},
    mode::density_mode,
    robust::{MAD_NORMAL_SCALE, mad},
};

/// Options for [`fit_lognormal_with`].
///
/// Fields
/// ------
/// - `bandwidth`: `Bandwidth`
///   KDE bandwidth rule for the mode search (default Scott).
/// - `zero_policy`: `ZeroLogPolicy`
///   Treatment of zero readings (default: substitute `0.0` for `ln 0`).
/// - `max_iter`: `u64`
///   Iteration cap for the mode search (default 500).
/// - `x_tol`: `f64`
///   Absolute location tolerance of the mode search (default 1e-5).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    pub bandwidth: Bandwidth,
    pub zero_policy: ZeroLogPolicy,
    pub max_iter: u64,
    pub x_tol: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        FitOptions {
            bandwidth: Bandwidth::Scott,
            zero_policy: ZeroLogPolicy::SubstituteZero,
            max_iter: 500,
            x_tol: 1e-5,
        }
    }
}

impl FitOptions {
    /// Construct validated options.
    ///
    /// # Errors
    /// As [`FitOptions::validate`].
    pub fn new(
        bandwidth: Bandwidth, zero_policy: ZeroLogPolicy, max_iter: u64, x_tol: f64,
    ) -> FitResult<Self> {
        let opts = FitOptions { bandwidth, zero_policy, max_iter, x_tol };
        opts.validate()?;
        Ok(opts)
    }

    /// Check the numeric options.
    ///
    /// # Errors
    /// - `FitError::InvalidMaxIter` when `max_iter == 0`.
    /// - `FitError::InvalidTolerance` when `x_tol` is not finite and > 0.
    /// - `FitError::InvalidBandwidth` for a bad fixed bandwidth factor.
    pub fn validate(&self) -> FitResult<()> {
        if self.max_iter == 0 {
            return Err(FitError::InvalidMaxIter { max_iter: self.max_iter });
        }
        if !(self.x_tol.is_finite() && self.x_tol > 0.0) {
            return Err(FitError::InvalidTolerance { tol: self.x_tol });
        }
        if let Bandwidth::Factor(factor) = self.bandwidth {
            if !(factor.is_finite() && factor > 0.0) {
                return Err(FitError::InvalidBandwidth { factor });
            }
        }
        Ok(())
    }
}

/// Fitted log-normal parameters `(shape, location, scale)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogNormalFit {
    pub shape: f64,
    pub location: f64,
    pub scale: f64,
}

impl LogNormalFit {
    /// Construct a model, checking the parameters.
    ///
    /// # Errors
    /// `FitError::InvalidParams` unless `shape` and `scale` are finite and
    /// > 0 and `location` is finite.
    pub fn new(shape: f64, location: f64, scale: f64) -> FitResult<Self> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !(usable(shape) && usable(scale) && location.is_finite()) {
            return Err(FitError::InvalidParams { shape, scale });
        }
        Ok(LogNormalFit { shape, location, scale })
    }

    /// Mean of the underlying normal, `ln(scale)`.
    pub fn mu(&self) -> f64 {
        self.scale.ln()
    }

    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.shape, self.location, self.scale)
    }

    /// Cumulative probability at `x`; zero at or below `location`.
    ///
    /// # Errors
    /// `FitError::Distribution` if the parameters were mutated into an
    /// invalid state after construction.
    pub fn cdf(&self, x: f64) -> FitResult<f64> {
        if x <= self.location {
            return Ok(0.0);
        }
        Ok(self.distribution()?.cdf(x - self.location))
    }

    /// Density at `x`; zero at or below `location`.
    ///
    /// # Errors
    /// As [`LogNormalFit::cdf`].
    pub fn pdf(&self, x: f64) -> FitResult<f64> {
        if x <= self.location {
            return Ok(0.0);
        }
        Ok(self.distribution()?.pdf(x - self.location))
    }

    /// Inverse CDF at `q ∈ (0, 1)`:
    /// `location + scale · exp(shape · Φ⁻¹(q))`.
    ///
    /// # Errors
    /// - `FitError::InvalidQuantile` for `q` outside the open unit interval.
    /// - `FitError::Distribution` for invalid parameters.
    pub fn ppf(&self, q: f64) -> FitResult<f64> {
        if !(q > 0.0 && q < 1.0) {
            return Err(FitError::InvalidQuantile { q });
        }
        let normal = Normal::new(self.mu(), self.shape)
            .map_err(|e| FitError::Distribution { text: e.to_string() })?;
        Ok(self.location + normal.inverse_cdf(q).exp())
    }

    fn distribution(&self) -> FitResult<LogNormal> {
        LogNormal::new(self.mu(), self.shape).map_err(|e| FitError::Distribution { text: e.to_string() })
    }
}

/// Fit a log-normal model with default [`FitOptions`].
///
/// # Errors
/// As [`fit_lognormal_with`].
pub fn fit_lognormal(sample: &[f64]) -> FitResult<LogNormalFit> {
    fit_lognormal_with(sample, &FitOptions::default())
}

/// Fit a log-normal model to `sample`.
///
/// Parameters
/// ----------
/// - `sample`: `&[f64]`
///   Non-negative readings; at least two distinct values after the log
///   transform.
/// - `opts`: `&FitOptions`
///   Bandwidth rule, zero policy, and mode-search settings.
///
/// Returns
/// -------
/// `FitResult<LogNormalFit>`
///   `(shape, 0, scale)` with finite, strictly positive shape and scale.
///
/// Errors
/// ------
/// - `FitError::EmptySample` for an empty sample.
/// - Log-transform errors (`NonFiniteSample`, `NegativeSample`,
///   `ZeroReading`).
/// - `FitError::InsufficientData` / `DegenerateVariance` when the density
///   estimate is undefined.
/// - `FitError::ZeroSpread` when the MAD of the log-sample is zero.
/// - `FitError::Optimizer` if the mode search fails.
/// - `FitError::InvalidParams` if the fitted parameters are not usable.
pub fn fit_lognormal_with(sample: &[f64], opts: &FitOptions) -> FitResult<LogNormalFit> {
    opts.validate()?;
    if sample.is_empty() {
        return Err(FitError::EmptySample);
    }
    let logs = log_transform(sample, opts.zero_policy)?;
    let kde = GaussianKde::new(&logs, opts.bandwidth)?;

    let spread = mad(&logs).ok_or(FitError::EmptySample)?;
    let shape = MAD_NORMAL_SCALE * spread;
    if !(shape > 0.0) {
        return Err(FitError::ZeroSpread { mad: spread });
    }

    let (lower, upper) = kde.support();
    let mode = density_mode(&kde, lower, upper, opts.max_iter, opts.x_tol)?;
    let fit = LogNormalFit::new(shape, 0.0, mode.exp())?;
    tracing::debug!(
        n = sample.len(),
        shape = fit.shape,
        scale = fit.scale,
        bandwidth = kde.bandwidth(),
        "fitted log-normal model"
    );
    Ok(fit)
}
