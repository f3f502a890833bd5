//! End-to-end: treatment export on disk to persisted report

use std::fs;

use approx::assert_relative_eq;
use chrono::NaiveDate;
use pkprofile::prelude::data::*;
use pkprofile::prelude::profile::TimeGrid;
use pkprofile::prelude::report::*;
use pkprofile::{reconstruct, ProfileError, ProfileOptions};

const EXPORT: &str = "\
PatientID,TreatedDate,TreatedTime,TotalUnits,Reason,Location,BleedCause,BleedSeverity,TimeAfterBleed
105,2016-03-14,08:00,1000,4,,,,
105,2016-03-15,08:02,1000,4,,,,
105,2016-03-16,19:13,2000,1,Left knee,0,1,45
105,2016-03-17,08:00,1000,4,,,,
106,2016-03-15,09:00,3000,3,,,,
105,2016-03-19,08:04,1000,4,,,,
105,2016-03-25,08:00,1000,4,,,,
";

fn write_export(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("treatments.csv");
    fs::write(&path, EXPORT).unwrap();
    path
}

#[test]
fn test_export_to_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_export(dir.path());
    let from = NaiveDate::from_ymd_opt(2016, 3, 15).unwrap();
    let to = NaiveDate::from_ymd_opt(2016, 3, 22).unwrap();

    let grid = TimeGrid::build(from, to, 5).unwrap();
    let log = read_patient(&path, "105", &grid).unwrap();
    assert_eq!(log.administrations().count(), 4);
    assert_eq!(log.bleeds().count(), 1);

    let options = ProfileOptions::default();
    let profile = reconstruct(&log, from, to, &options).unwrap();

    let bleed_tick = NaiveDate::from_ymd_opt(2016, 3, 16)
        .unwrap()
        .and_hms_opt(19, 15, 0)
        .unwrap();
    assert_eq!(profile.doses().get(bleed_tick), Some(2000.0));
    assert_eq!(profile.bleeds()[&bleed_tick].cause(), BleedCause::Spontaneous);
    assert_eq!(profile.reasons()[&bleed_tick], TreatmentReason::NewBleed);
    assert_relative_eq!(
        profile.levels().get(bleed_tick).unwrap(),
        profile.amounts().get(bleed_tick).unwrap() / 32.0,
        epsilon = 1e-12
    );

    let mut sink = CsvSink::new(dir.path().join("reports"));
    publish(&profile, &TextRenderer::new(), &mut sink).unwrap();
    let written = sink.written();
    assert_eq!(written.len(), 3);
    assert!(written.iter().all(|p| p.exists()));

    let report = fs::read_to_string(&written[2]).unwrap();
    assert!(report.contains("Leftknee,Spontaneous,Major(very bad)"));
    assert!(report.contains("New Bleed, 2000 IUs"));
}

#[test]
fn test_unfiltered_log_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_export(dir.path());
    let logs = read_treatments(&path).unwrap();
    let log = logs.iter().find(|l| l.patient_id() == "105").unwrap();

    let from = NaiveDate::from_ymd_opt(2016, 3, 15).unwrap();
    let to = NaiveDate::from_ymd_opt(2016, 3, 22).unwrap();
    let err = reconstruct(log, from, to, &ProfileOptions::default()).unwrap_err();
    assert!(matches!(err, ProfileError::OutOfRange { .. }));
}

#[test]
fn test_unknown_patient_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_export(dir.path());
    let from = NaiveDate::from_ymd_opt(2016, 3, 15).unwrap();
    let to = NaiveDate::from_ymd_opt(2016, 3, 22).unwrap();
    let grid = TimeGrid::build(from, to, 5).unwrap();
    let log = read_patient(&path, "999", &grid).unwrap();
    assert!(log.is_empty());
    let profile = reconstruct(&log, from, to, &ProfileOptions::default()).unwrap();
    assert_eq!(profile.stats().fraction_above, 0.0);
}

#[test]
fn test_read_patient_keeps_doses_rounding_onto_window_edges() {
    let export = "\
PatientID,TreatedDate,TreatedTime,TotalUnits,Reason,Location,BleedCause,BleedSeverity,TimeAfterBleed
105,2016-03-14,23:57,250,4,,,,
105,2016-03-14,23:58,500,4,,,,
105,2016-03-16,08:00,1000,4,,,,
105,2016-03-22,00:02,2000,1,,,,
105,2016-03-22,00:03,4000,1,,,,
";
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edges.csv");
    fs::write(&path, export).unwrap();

    let from = NaiveDate::from_ymd_opt(2016, 3, 15).unwrap();
    let to = NaiveDate::from_ymd_opt(2016, 3, 22).unwrap();
    let grid = TimeGrid::build(from, to, 5).unwrap();
    let log = read_patient(&path, "105", &grid).unwrap();
    assert_eq!(log.administrations().count(), 3);

    let profile = reconstruct(&log, from, to, &ProfileOptions::default()).unwrap();
    assert_eq!(profile.doses().get(grid.start()), Some(500.0));
    assert_eq!(profile.doses().get(grid.end()), Some(2000.0));
    let total: f64 = profile.doses().values().iter().sum();
    assert_eq!(total, 3500.0);
}
