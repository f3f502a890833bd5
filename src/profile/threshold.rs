//! Time above and below a threshold

use serde::{Deserialize, Serialize};

use super::error::ProfileError;

/// Share of grid points above and below a threshold
///
/// `fraction_above + fraction_below == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdStats {
    pub threshold: f64,
    /// Fraction of points strictly greater than the threshold
    pub fraction_above: f64,
    /// Fraction of points at or below the threshold
    pub fraction_below: f64,
}

/// Count the points strictly above `threshold`; everything else, including
/// points equal to it, counts as below
///
/// # Errors
/// [`ProfileError::EmptySeries`] if `values` is empty.
pub fn analyze(values: &[f64], threshold: f64) -> Result<ThresholdStats, ProfileError> {
    if values.is_empty() {
        return Err(ProfileError::EmptySeries);
    }
    let total = values.len();
    let above = values.iter().filter(|&&value| value > threshold).count();
    let below = total - above;

    Ok(ThresholdStats {
        threshold,
        fraction_above: above as f64 / total as f64,
        fraction_below: below as f64 / total as f64,
    })
}
