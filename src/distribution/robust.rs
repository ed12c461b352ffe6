//! Robust location and spread: median and median absolute deviation.
use statrs::statistics::{Data, Median};

/// Scale factor making the MAD a consistent estimator of the standard
/// deviation under normality (`1 / Φ⁻¹(3/4)`).
pub const MAD_NORMAL_SCALE: f64 = 1.4826;

/// Sample median; `None` for an empty slice.
///
/// Even-length samples average the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(Data::new(values.to_vec()).median())
}

/// Median absolute deviation from the median (unscaled); `None` when empty.
pub fn mad(values: &[f64]) -> Option<f64> {
    let center = median(values)?;
    let deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    median(&deviations)
}
