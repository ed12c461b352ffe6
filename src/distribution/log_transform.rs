//! Scoped natural-log transform of a reading sample.
//!
//! Purpose
//! -------
//! Map readings to log space for the log-normal fit while making the
//! treatment of zero readings an explicit, per-call choice.
//!
//! Key behaviors
//! -------------
//! - Positive readings map to `ln(x)`.
//! - Zero readings follow [`ZeroLogPolicy`]: substitute `0.0` (the default),
//!   or reject the sample.
//! - Negative readings have no logarithm and always fail.
//!
//! Invariants & assumptions
//! ------------------------
//! - The policy is an argument of the call; no process-wide numeric error
//!   state is read or changed.
//! - Inputs are expected to be finite; non-finite readings are rejected.
use crate::distribution::errors::{FitError, FitResult};

/// What to do with a reading of exactly zero, whose logarithm is `-inf`.
///
/// - `SubstituteZero`: treat `ln(0)` as `0.0`, i.e. the zero reading lands on
///   the same point in log space as a reading of `1.0`.
/// - `Reject`: fail with `FitError::ZeroReading`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroLogPolicy {
    #[default]
    SubstituteZero,
    Reject,
}

/// Natural log of every reading under `policy`.
///
/// # Errors
/// - `FitError::NonFiniteSample` for NaN/±inf readings.
/// - `FitError::NegativeSample` for readings below zero.
/// - `FitError::ZeroReading` for zero readings under `ZeroLogPolicy::Reject`.
pub fn log_transform(sample: &[f64], policy: ZeroLogPolicy) -> FitResult<Vec<f64>> {
    let mut zeros = 0usize;
    let logs = sample
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if !value.is_finite() {
                Err(FitError::NonFiniteSample { index, value })
            } else if value < 0.0 {
                Err(FitError::NegativeSample { index, value })
            } else if value == 0.0 {
                match policy {
                    ZeroLogPolicy::SubstituteZero => {
                        zeros += 1;
                        Ok(0.0)
                    }
                    ZeroLogPolicy::Reject => Err(FitError::ZeroReading { index }),
                }
            } else {
                Ok(value.ln())
            }
        })
        .collect::<FitResult<Vec<f64>>>()?;
    if zeros > 0 {
        tracing::debug!(zeros, "substituted 0.0 for log of zero readings");
    }
    Ok(logs)
}
