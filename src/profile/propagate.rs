//! First-order elimination of snapped doses across the grid
//!
//! Each dose decays as `D · e^(−ke·i)` where `i` is the time since the dose in
//! minutes and `ke = ln 2 / (60 · t½)`. A dose is carried forward one tick at a
//! time until one of three things happens:
//!
//! - it reaches the decay horizon of ten half-lives,
//! - it runs off the end of the grid,
//! - it reaches a tick that already holds a value (its own dose, or the decay
//!   of an earlier dose). The decayed contribution is added to that tick and
//!   the dose stops there.
//!
//! The third rule means the curve is not a plain sum of independent
//! exponentials: past the first occupied tick, a dose only shows through the
//! value it left on that tick. Doses are read from the snapped [`DoseSeries`]
//! and written into a separate output buffer, so propagation never reads back
//! its own partial results as dose amounts.

use super::error::ProfileError;
use super::series::{ConcentrationSeries, DoseSeries};

/// Number of half-lives after which a dose is treated as fully eliminated
pub const DECAY_HORIZON_HALF_LIVES: f64 = 10.0;

/// Elimination rate constant per minute for a half-life in hours
#[inline]
pub fn elimination_rate(half_life_hours: f64) -> f64 {
    std::f64::consts::LN_2 / (half_life_hours * 60.0)
}

/// Decay horizon in whole minutes, rounded down
///
/// A dose contributes to ticks strictly less than this many minutes after it.
#[inline]
pub fn decay_horizon_minutes(half_life_hours: f64) -> f64 {
    (DECAY_HORIZON_HALF_LIVES * 60.0 * half_life_hours).floor()
}

/// Propagate every dose in `doses` forward in time
///
/// Ticks that no dose reaches stay at zero. The result has one value per
/// grid point and every value is non-negative.
///
/// # Errors
/// [`ProfileError::InvalidParameter`] unless `half_life_hours` is finite and
/// positive, and yields a finite elimination rate.
pub fn propagate(
    doses: &DoseSeries,
    half_life_hours: f64,
) -> Result<ConcentrationSeries, ProfileError> {
    if !(half_life_hours.is_finite() && half_life_hours > 0.0) {
        return Err(ProfileError::invalid_parameter(
            "half_life_hours",
            half_life_hours,
        ));
    }
    let ke = elimination_rate(half_life_hours);
    if !(ke.is_finite() && ke > 0.0) {
        return Err(ProfileError::invalid_parameter("ke", ke));
    }
    let horizon = decay_horizon_minutes(half_life_hours);
    let step = doses.grid().resolution_minutes() as usize;

    let source = doses.values();
    let mut values = source.to_vec();
    // A tick is occupied once it holds a dose or any decayed contribution,
    // even one that underflowed to zero.
    let mut occupied: Vec<bool> = source.iter().map(|&units| units > 0.0).collect();

    let mut dosed = 0usize;
    for origin in doses.dosed_indices() {
        dosed += 1;
        let dose = source[origin];
        for offset in 1.. {
            let minutes = offset * step;
            let target = origin + offset;
            if minutes as f64 >= horizon || target >= values.len() {
                break;
            }
            let contribution = dose * (-ke * minutes as f64).exp();
            if occupied[target] {
                values[target] += contribution;
                break;
            }
            values[target] = contribution;
            occupied[target] = true;
        }
    }

    tracing::debug!(
        dosed,
        ke,
        horizon_minutes = horizon,
        "propagated doses"
    );
    Ok(ConcentrationSeries::new(*doses.grid(), values))
}
