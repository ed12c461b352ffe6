//! Gaussian kernel density estimation in one dimension.
//!
//! Purpose
//! -------
//! Provide a smooth density estimate of a sample whose maximum locates the
//! sample's mode (see `distribution::mode`).
//!
//! Key behaviors
//! -------------
//! - The kernel is Gaussian with standard deviation `h = factor · s`, where
//!   `s` is the sample standard deviation (ddof = 1) and `factor` follows a
//!   [`Bandwidth`] rule.
//! - `pdf(x) = (1 / (n·h·√(2π))) · Σ exp(−½ ((x − xᵢ) / h)²)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - At least two points and a finite, strictly positive sample variance are
//!   required; otherwise the kernel covariance is singular.
//! - Sample values must be finite.
use statrs::{consts::SQRT_2PI, statistics::Statistics};

use crate::distribution::errors::{FitError, FitResult};

/// Bandwidth factor rule.
///
/// - `Scott`: `n^(−1/5)`.
/// - `Silverman`: `(3n/4)^(−1/5)`.
/// - `Factor(f)`: a fixed factor `f > 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Bandwidth {
    #[default]
    Scott,
    Silverman,
    Factor(f64),
}

impl Bandwidth {
    /// Multiplier applied to the sample standard deviation for `n` points.
    ///
    /// # Errors
    /// `FitError::InvalidBandwidth` when a fixed factor is not finite and > 0.
    pub fn factor(&self, n: usize) -> FitResult<f64> {
        let n = n as f64;
        match *self {
            Bandwidth::Scott => Ok(n.powf(-0.2)),
            Bandwidth::Silverman => Ok((0.75 * n).powf(-0.2)),
            Bandwidth::Factor(factor) if factor.is_finite() && factor > 0.0 => Ok(factor),
            Bandwidth::Factor(factor) => Err(FitError::InvalidBandwidth { factor }),
        }
    }
}

/// Gaussian KDE over a fixed sample.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKde {
    points: Vec<f64>,
    bandwidth: f64,
    norm: f64,
}

impl GaussianKde {
    /// Build a density estimate of `points` under the bandwidth `rule`.
    ///
    /// # Errors
    /// - `FitError::InsufficientData` for fewer than two points.
    /// - `FitError::NonFiniteSample` for NaN/±inf points.
    /// - `FitError::DegenerateVariance` for zero or non-finite variance.
    /// - `FitError::InvalidBandwidth` for a bad fixed factor.
    pub fn new(points: &[f64], rule: Bandwidth) -> FitResult<Self> {
        if points.len() < 2 {
            return Err(FitError::InsufficientData { len: points.len(), min: 2 });
        }
        if let Some((index, &value)) = points.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(FitError::NonFiniteSample { index, value });
        }
        let variance = points.iter().variance();
        if !(variance.is_finite() && variance > 0.0) {
            return Err(FitError::DegenerateVariance { variance });
        }
        let bandwidth = rule.factor(points.len())? * variance.sqrt();
        let norm = 1.0 / (points.len() as f64 * bandwidth * SQRT_2PI);
        Ok(GaussianKde { points: points.to_vec(), bandwidth, norm })
    }

    /// Estimated density at `x`.
    pub fn pdf(&self, x: f64) -> f64 {
        let sum: f64 = self
            .points
            .iter()
            .map(|p| {
                let z = (x - p) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum();
        self.norm * sum
    }

    /// Kernel standard deviation `h`.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Smallest and largest sample point.
    pub fn support(&self) -> (f64, f64) {
        self.points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| (lo.min(p), hi.max(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Bandwidth rules on a known sample.
    // - Density normalisation and symmetry.
    // - Degenerate inputs.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Scott and Silverman factors scale the sample standard deviation.
    //
    // Given
    // -----
    // - Points [0, 1, 2, 3, 4] (sample std √2.5), n = 5.
    //
    // Expect
    // ------
    // - h = 5^(−1/5)·√2.5 for Scott, (3.75)^(−1/5)·√2.5 for Silverman,
    //   0.5·√2.5 for `Factor(0.5)`.
    fn bandwidth_rules() {
        let points = [0.0, 1.0, 2.0, 3.0, 4.0];
        let sd = 2.5_f64.sqrt();

        let scott = GaussianKde::new(&points, Bandwidth::Scott).unwrap();
        let silverman = GaussianKde::new(&points, Bandwidth::Silverman).unwrap();
        let fixed = GaussianKde::new(&points, Bandwidth::Factor(0.5)).unwrap();

        assert!((scott.bandwidth() - 5.0_f64.powf(-0.2) * sd).abs() < 1e-12);
        assert!((silverman.bandwidth() - 3.75_f64.powf(-0.2) * sd).abs() < 1e-12);
        assert!((fixed.bandwidth() - 0.5 * sd).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The estimate integrates to one and is symmetric for a symmetric sample.
    //
    // Given
    // -----
    // - Points [−1, 0, 1]; Riemann sum over [−10, 10] with step 1e-3.
    //
    // Expect
    // ------
    // - Integral ≈ 1; pdf(0.7) == pdf(−0.7); peak at 0.
    fn density_is_normalised_and_symmetric() {
        let kde = GaussianKde::new(&[-1.0, 0.0, 1.0], Bandwidth::Scott).unwrap();

        let step = 1e-3;
        let integral: f64 = (0..20_000).map(|i| kde.pdf(-10.0 + i as f64 * step) * step).sum();

        assert!((integral - 1.0).abs() < 1e-6, "integral = {integral}");
        assert!((kde.pdf(0.7) - kde.pdf(-0.7)).abs() < 1e-12);
        assert!(kde.pdf(0.0) > kde.pdf(0.3));
        assert_eq!(kde.support(), (-1.0, 1.0));
    }

    #[test]
    // Purpose
    // -------
    // Degenerate samples and bad factors are rejected.
    //
    // Given
    // -----
    // - One point; three equal points; `Factor(0.0)`.
    //
    // Expect
    // ------
    // - `InsufficientData`, `DegenerateVariance`, `InvalidBandwidth`.
    fn degenerate_inputs_are_rejected() {
        assert_eq!(
            GaussianKde::new(&[1.0], Bandwidth::Scott).unwrap_err(),
            FitError::InsufficientData { len: 1, min: 2 }
        );
        assert!(matches!(
            GaussianKde::new(&[2.0, 2.0, 2.0], Bandwidth::Scott),
            Err(FitError::DegenerateVariance { .. })
        ));
        assert_eq!(
            GaussianKde::new(&[1.0, 2.0], Bandwidth::Factor(0.0)).unwrap_err(),
            FitError::InvalidBandwidth { factor: 0.0 }
        );
    }
}
