//! Coverage statistics through the public API

use approx::assert_relative_eq;
use pkprofile::prelude::profile::*;
use pkprofile::ProfileError;

#[test]
fn test_fractions_sum_to_one() {
    let series: Vec<f64> = (0..2017).map(|i| 100.0 * (-(i as f64) / 400.0).exp()).collect();
    for threshold in [0.0, 1.0, 25.0, 50.0, 99.9, 100.0, 1000.0] {
        let stats = analyze(&series, threshold).unwrap();
        assert_relative_eq!(stats.fraction_above + stats.fraction_below, 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_equal_to_threshold_is_below() {
    let stats = analyze(&[50.0, 50.0, 50.0, 50.1], 50.0).unwrap();
    assert_eq!(stats.fraction_above, 0.25);
    assert_eq!(stats.fraction_below, 0.75);
}

#[test]
fn test_empty_series_is_an_error() {
    let empty: Vec<f64> = Vec::new();
    assert!(matches!(analyze(&empty, 50.0), Err(ProfileError::EmptySeries)));
}
