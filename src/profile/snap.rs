//! Snapping irregular event times onto the grid

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime, Timelike};

use super::error::ProfileError;
use super::grid::TimeGrid;
use super::series::DoseSeries;
use crate::data::{Bleed, Event, TreatmentReason};

/// Events placed on grid points
///
/// Doses that land on the same tick are summed. Bleed and reason annotations
/// are keyed by their snapped tick; when two land on the same tick the later
/// one in event order replaces the earlier one.
#[derive(Debug, Clone, PartialEq)]
pub struct SnappedEvents {
    pub doses: DoseSeries,
    pub bleeds: BTreeMap<NaiveDateTime, Bleed>,
    pub reasons: BTreeMap<NaiveDateTime, TreatmentReason>,
}

/// Round `timestamp` to the nearest multiple of `resolution_minutes` past the hour
///
/// Seconds are discarded first. With `r = minute mod Δ`, the time moves down
/// by `r` minutes when `r < Δ/2`, and up by `Δ - r` minutes otherwise, so an
/// exact half rounds up.
pub fn snap_timestamp(timestamp: NaiveDateTime, resolution_minutes: u32) -> NaiveDateTime {
    let timestamp = timestamp
        - Duration::seconds(timestamp.second() as i64)
        - Duration::nanoseconds(timestamp.nanosecond() as i64);
    let r = timestamp.minute() % resolution_minutes;
    if r == 0 {
        timestamp
    } else if 2 * r < resolution_minutes {
        timestamp - Duration::minutes(r as i64)
    } else {
        timestamp + Duration::minutes((resolution_minutes - r) as i64)
    }
}

/// Place every event on `grid`
///
/// # Errors
/// - [`ProfileError::OutOfRange`] if an event snaps outside the grid
/// - [`ProfileError::InvalidParameter`] for a dose that is negative or not finite
pub fn snap<'a, I>(events: I, grid: &TimeGrid) -> Result<SnappedEvents, ProfileError>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut doses = DoseSeries::zeros(*grid);
    let mut bleeds = BTreeMap::new();
    let mut reasons = BTreeMap::new();

    for event in events {
        let timestamp = event.timestamp();
        let snapped = snap_timestamp(timestamp, grid.resolution_minutes());
        let index = grid
            .index_of(snapped)
            .ok_or_else(|| ProfileError::OutOfRange {
                timestamp,
                snapped,
                start: grid.start(),
                end: grid.end(),
            })?;
        tracing::trace!(%timestamp, %snapped, "snapped event");

        match event {
            Event::Administration(administration) => {
                let units = administration.units();
                if !(units.is_finite() && units >= 0.0) {
                    return Err(ProfileError::invalid_parameter("units", units));
                }
                doses.add(index, units);
                if let Some(reason) = administration.reason() {
                    if let Some(previous) = reasons.insert(snapped, reason) {
                        tracing::warn!(
                            tick = %snapped,
                            %previous,
                            %reason,
                            "treatment reason replaced at grid tick"
                        );
                    }
                }
            }
            Event::Bleed(bleed) => {
                if let Some(previous) = bleeds.insert(snapped, bleed.clone()) {
                    tracing::warn!(
                        tick = %snapped,
                        previous = previous.location(),
                        location = bleed.location(),
                        "bleed annotation replaced at grid tick"
                    );
                }
            }
        }
    }

    Ok(SnappedEvents {
        doses,
        bleeds,
        reasons,
    })
}
