//! Density-mode search with `argmin`.
//!
//! Purpose
//! -------
//! Locate the maximum of a [`GaussianKde`] on the closed interval spanned by
//! its sample. The maximum is found by minimising the negated density with
//! Brent's bounded scalar method.
//!
//! Key behaviors
//! -------------
//! - [`NegDensityAdapter`] exposes `−pdf(x)` as an `argmin` `CostFunction`.
//!   Non-finite densities are reported as `FitError::NonFiniteDensity`.
//! - [`density_mode`] runs `BrentOpt` within `[lower, upper]` with relative
//!   tolerance `√ε` and absolute tolerance `x_tol`, capped at `max_iter`
//!   iterations.
//!
//! Invariants & assumptions
//! ------------------------
//! - The returned mode lies in `[lower, upper]`.
//! - For a multi-modal density Brent's method may settle on a local maximum;
//!   the result is still a point of high density inside the sample range.
//!
//! Conventions
//! -----------
//! - `argmin` errors are converted to `FitError::Optimizer` with the
//!   backend's message; they never escape this module.
use argmin::{
    core::{CostFunction, Error, Executor, State},
    solver::brent::BrentOpt,
};

use crate::distribution::{
    errors::{FitError, FitResult},
    kde::GaussianKde,
};

/// Bridges a [`GaussianKde`] to `argmin`'s `CostFunction`.
///
/// `CostFunction::cost` returns `−pdf(x)`, so minimising the cost maximises
/// the density.
#[derive(Debug, Clone)]
pub struct NegDensityAdapter<'a> {
    pub kde: &'a GaussianKde,
}

impl<'a> NegDensityAdapter<'a> {
    pub fn new(kde: &'a GaussianKde) -> Self {
        Self { kde }
    }
}

impl CostFunction for NegDensityAdapter<'_> {
    type Param = f64;
    type Output = f64;

    fn cost(&self, x: &Self::Param) -> Result<Self::Output, Error> {
        let density = self.kde.pdf(*x);
        if !density.is_finite() {
            return Err((FitError::NonFiniteDensity { x: *x, value: density }).into());
        }
        Ok(-density)
    }
}

/// Location of the density maximum inside `[lower, upper]`.
///
/// Parameters
/// ----------
/// - `kde`: `&GaussianKde`
///   Density to maximise.
/// - `lower`, `upper`: `f64`
///   Search bracket; typically the smallest and largest sample point.
/// - `max_iter`: `u64`
///   Iteration cap for the solver.
/// - `x_tol`: `f64`
///   Absolute tolerance on the location.
///
/// Returns
/// -------
/// `FitResult<f64>`
///   The best point found. A zero-width bracket returns `lower` directly.
///
/// Errors
/// ------
/// - `FitError::Optimizer` when the solver fails or reports no best point.
pub fn density_mode(
    kde: &GaussianKde, lower: f64, upper: f64, max_iter: u64, x_tol: f64,
) -> FitResult<f64> {
    if lower >= upper {
        return Ok(lower);
    }
    let solver = BrentOpt::new(lower, upper).set_tolerance(f64::EPSILON.sqrt(), x_tol);
    let result = Executor::new(NegDensityAdapter::new(kde), solver)
        .configure(|state| state.max_iters(max_iter))
        .run()
        .map_err(|e| FitError::Optimizer { text: e.to_string() })?;

    let state = result.state();
    let mode = state
        .get_best_param()
        .copied()
        .ok_or_else(|| FitError::Optimizer { text: "solver returned no best point".to_string() })?;
    tracing::trace!(mode, iterations = state.get_iter(), "located density mode");
    Ok(mode.clamp(lower, upper))
}
