//! Grid construction and snapping through the public API

use chrono::{Duration, NaiveDate, NaiveDateTime};
use pkprofile::prelude::profile::*;
use pkprofile::profile::snap_timestamp;
use pkprofile::ProfileError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_grid_length_matches_span() {
    let ranges = [
        (date(2016, 3, 15), date(2016, 3, 15)),
        (date(2016, 3, 15), date(2016, 4, 15)),
        (date(2015, 12, 30), date(2016, 1, 2)),
        (date(2016, 2, 28), date(2016, 3, 1)), // leap day
    ];
    for resolution in [1, 5, 10, 15, 30, 60] {
        for (from, to) in ranges {
            let grid = TimeGrid::build(from, to, resolution).unwrap();
            let minutes = (to - from).num_minutes() as usize;
            assert_eq!(grid.len(), minutes / resolution as usize + 1);
            assert_eq!(grid.end(), to.and_hms_opt(0, 0, 0).unwrap());

            let points: Vec<NaiveDateTime> = grid.points().collect();
            assert!(points
                .windows(2)
                .all(|w| w[1] - w[0] == Duration::minutes(resolution as i64)));
        }
    }
}

#[test]
fn test_reversed_dates_rejected() {
    assert!(matches!(
        TimeGrid::build(date(2016, 4, 15), date(2016, 3, 15), 5),
        Err(ProfileError::InvalidRange { .. })
    ));
}

#[test]
fn test_aligned_timestamps_unchanged() {
    let day = date(2016, 3, 15);
    for minute in (0..60).step_by(5) {
        let t = day.and_hms_opt(10, minute, 0).unwrap();
        assert_eq!(snap_timestamp(t, 5), t);
    }
}

#[test]
fn test_snap_is_nearest_tick() {
    let day = date(2016, 3, 15);
    for minute in 0..60u32 {
        let t = day.and_hms_opt(10, minute, 0).unwrap();
        let snapped = snap_timestamp(t, 5);
        let distance = (snapped - t).num_minutes();
        assert!(distance.abs() <= 2, "{t} snapped to {snapped}");
        assert_eq!(snapped.and_utc().timestamp() % 300, 0);
        // 1 and 2 round down, 3 and 4 round up
        match minute % 5 {
            0 => assert_eq!(distance, 0),
            1 | 2 => assert_eq!(distance, -((minute % 5) as i64)),
            _ => assert_eq!(distance, (5 - minute % 5) as i64),
        }
    }
}

#[test]
fn test_snap_across_midnight() {
    let t = date(2016, 3, 15).and_hms_opt(23, 58, 0).unwrap();
    assert_eq!(
        snap_timestamp(t, 5),
        date(2016, 3, 16).and_hms_opt(0, 0, 0).unwrap()
    );
}
