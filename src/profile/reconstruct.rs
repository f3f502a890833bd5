use chrono::NaiveDate;

use super::error::ProfileError;
use super::grid::TimeGrid;
use super::propagate::propagate;
use super::snap::{snap, SnappedEvents};
use super::threshold::analyze;
use super::types::{PkProfile, ProfileOptions, RunSummary};
use crate::data::EventLog;

/// Reconstruct a patient's plasma level profile between two dates
///
/// Builds the grid, snaps every event in `log` onto it, propagates the doses,
/// scales the result by the volume of distribution and measures the time
/// spent above the threshold. The log must already be restricted to the
/// window; an event outside it fails the run.
///
/// # Errors
/// Any [`ProfileError`] from the individual stages. Nothing is dropped or
/// defaulted: the run either completes or fails.
pub fn reconstruct(
    log: &EventLog,
    from: NaiveDate,
    to: NaiveDate,
    options: &ProfileOptions,
) -> Result<PkProfile, ProfileError> {
    options.validate()?;

    let grid = TimeGrid::build(from, to, options.resolution_minutes)?;
    tracing::debug!(
        patient = log.patient_id(),
        points = grid.len(),
        events = log.len(),
        "built time grid"
    );

    let SnappedEvents {
        doses,
        bleeds,
        reasons,
    } = snap(log, &grid)?;

    let amounts = propagate(&doses, options.half_life_hours)?;
    let levels = amounts.scaled(options.volume_of_distribution)?;
    let stats = analyze(levels.values(), options.threshold)?;
    tracing::debug!(
        patient = log.patient_id(),
        above = stats.fraction_above,
        below = stats.fraction_below,
        threshold = stats.threshold,
        "analyzed profile"
    );

    let summary = RunSummary {
        patient_id: log.patient_id().to_string(),
        from,
        to,
        half_life_hours: options.half_life_hours,
        volume_of_distribution: options.volume_of_distribution,
        threshold: options.threshold,
        fraction_above: stats.fraction_above,
        fraction_below: stats.fraction_below,
    };

    Ok(PkProfile {
        summary,
        doses,
        amounts,
        levels,
        bleeds,
        reasons,
        stats,
    })
}
