//! distribution — robust log-normal fitting and rank-preserving adjustment.
//!
//! Purpose
//! -------
//! Model the distribution of a column of readings as log-normal using
//! outlier-resistant estimators, and use the model to produce an adjusted
//! sample that keeps each reading's rank.
//!
//! Key behaviors
//! -------------
//! - [`log_transform`] maps readings to log space under an explicit
//!   [`ZeroLogPolicy`].
//! - [`GaussianKde`] estimates the log-sample density with a [`Bandwidth`]
//!   rule; [`density_mode`] maximises it with `argmin`'s Brent solver.
//! - [`fit_lognormal`] combines the two: shape from the scaled MAD, scale
//!   from the density mode, location zero.
//! - [`adjust_sample`] / [`adjust_series`] evaluate the fitted inverse CDF
//!   at buffered rank quantiles.
//!
//! Invariants & assumptions
//! ------------------------
//! - A successful fit always has finite, strictly positive shape and scale.
//!   Degenerate samples (empty, single point, constant, zero MAD, negative
//!   readings) fail with a [`FitError`].
//! - Adjustment preserves length, position order, and strict ordering of
//!   distinct readings.
//!
//! Conventions
//! -----------
//! - Parameter order is `(shape, location, scale)`.
//! - Backend errors (`argmin`, `statrs`) are wrapped into [`FitError`]
//!   variants carrying the backend message.
//!
//! Downstream usage
//! ----------------
//! - Typical flow: `filter::time_filter` → pick a column →
//!   `adjust_series(&filtered, column, buffer, &FitOptions::default())`.
//!
//! Testing notes
//! -------------
//! - Unit tests use idealised log-normal samples built from normal
//!   quantiles so expected parameters are known; monotonicity of the
//!   adjustment is also checked with `proptest` in the integration tests.

pub mod adjust;
pub mod errors;
pub mod fit;
pub mod kde;
pub mod log_transform;
pub mod mode;
pub mod robust;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::adjust::{adjust_sample, adjust_sample_with, adjust_series, rank_quantiles};
pub use self::errors::{FitError, FitResult};
pub use self::fit::{FitOptions, LogNormalFit, fit_lognormal, fit_lognormal_with};
pub use self::kde::{Bandwidth, GaussianKde};
pub use self::log_transform::{ZeroLogPolicy, log_transform};
pub use self::mode::density_mode;
pub use self::robust::{MAD_NORMAL_SCALE, mad, median};

pub mod prelude {
    pub use super::adjust::{adjust_sample, adjust_series};
    pub use super::errors::{FitError, FitResult};
    pub use super::fit::{FitOptions, LogNormalFit, fit_lognormal};
    pub use super::kde::Bandwidth;
    pub use super::log_transform::ZeroLogPolicy;
}
