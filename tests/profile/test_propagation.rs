//! Decay propagation through the public API

use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveDateTime};
use pkprofile::prelude::profile::*;
use pkprofile::prelude::*;
use pkprofile::profile::{decay_horizon_minutes, elimination_rate};

fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2016, 3, d)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn dose_series(doses: &[(NaiveDateTime, f64)], from: NaiveDate, to: NaiveDate) -> DoseSeries {
    let grid = TimeGrid::build(from, to, 5).unwrap();
    let mut builder = EventLog::builder("test");
    for &(t, units) in doses {
        builder = builder.administration(t, units);
    }
    snap(&builder.build(), &grid).unwrap().doses
}

#[test]
fn test_single_dose_is_exponential() {
    let from = NaiveDate::from_ymd_opt(2016, 3, 15).unwrap();
    let to = NaiveDate::from_ymd_opt(2016, 3, 20).unwrap();
    let doses = dose_series(&[(at(15, 6, 0), 2500.0)], from, to);

    for half_life in [4.0, 10.0, 12.5, 19.0] {
        let series = propagate(&doses, half_life).unwrap();
        let ke = elimination_rate(half_life);
        let origin = doses.grid().index_of(at(15, 6, 0)).unwrap();
        let horizon = decay_horizon_minutes(half_life);

        for (index, &value) in series.values().iter().enumerate() {
            if index < origin {
                assert_eq!(value, 0.0);
                continue;
            }
            let minutes = ((index - origin) * 5) as f64;
            if index == origin {
                assert_eq!(value, 2500.0);
            } else if minutes < horizon {
                assert_relative_eq!(value, 2500.0 * (-ke * minutes).exp(), max_relative = 1e-12);
            } else {
                assert_eq!(value, 0.0, "t½={half_life}: {minutes} min after the dose");
            }
        }
    }
}

#[test]
fn test_half_life_halves_level() {
    let from = NaiveDate::from_ymd_opt(2016, 3, 15).unwrap();
    let to = NaiveDate::from_ymd_opt(2016, 3, 17).unwrap();
    let doses = dose_series(&[(at(15, 0, 0), 1000.0)], from, to);
    let series = propagate(&doses, 10.0).unwrap();
    assert_relative_eq!(series.get(at(15, 10, 0)).unwrap(), 500.0, max_relative = 1e-12);
    assert_relative_eq!(series.get(at(15, 20, 0)).unwrap(), 250.0, max_relative = 1e-12);
}

#[test]
fn test_repeated_dosing_follows_stop_rule() {
    // twice-daily dosing with a 10 hour half-life: every dose reaches the next one
    let from = NaiveDate::from_ymd_opt(2016, 3, 15).unwrap();
    let to = NaiveDate::from_ymd_opt(2016, 3, 17).unwrap();
    let doses = dose_series(
        &[
            (at(15, 8, 0), 1000.0),
            (at(15, 20, 0), 1000.0),
            (at(16, 8, 0), 1000.0),
        ],
        from,
        to,
    );
    let series = propagate(&doses, 10.0).unwrap();
    let ke = elimination_rate(10.0);
    let carried = 1000.0 * (-ke * 720.0).exp();

    // each later dose tick holds its own dose plus one twelve hour decay of the previous dose
    assert_relative_eq!(series.get(at(15, 20, 0)).unwrap(), 1000.0 + carried, max_relative = 1e-12);
    assert_relative_eq!(series.get(at(16, 8, 0)).unwrap(), 1000.0 + carried, max_relative = 1e-12);
    // and the tick after restarts from the dose alone
    assert_relative_eq!(
        series.get(at(16, 8, 5)).unwrap(),
        1000.0 * (-ke * 5.0).exp(),
        max_relative = 1e-12
    );
}

#[test]
fn test_values_never_negative() {
    let from = NaiveDate::from_ymd_opt(2016, 3, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(2016, 3, 31).unwrap();
    let schedule: Vec<(NaiveDateTime, f64)> = (1..31)
        .step_by(3)
        .map(|d| (at(d, 7, (d * 7) % 60), 250.0 * d as f64))
        .collect();
    let doses = dose_series(&schedule, from, to);
    let series = propagate(&doses, 8.0).unwrap();
    assert_eq!(series.len(), doses.len());
    assert!(series.values().iter().all(|&v| v >= 0.0 && v.is_finite()));
}
