//! Plasma level reconstruction from a sparse treatment log
//!
//! A patient's diary records when factor was given and how much. This module
//! turns it into a plasma level curve over a date range using a one-compartment
//! model with first-order elimination, and reports how long the level stayed
//! above a threshold.
//!
//! # Stages
//!
//! | Stage | Item | Description |
//! |-------|------|-------------|
//! | Grid | [`TimeGrid`] | 5 minute axis from the first date to the last, both at midnight |
//! | Snap | [`snap()`] | round each event to the nearest tick (halves round up) |
//! | Propagate | [`propagate()`] | decay each dose forward, `ke = ln 2 / t½` |
//! | Scale | [`ConcentrationSeries::scaled`] | divide by the volume of distribution |
//! | Threshold | [`analyze()`] | fraction of ticks above / at-or-below the threshold |
//!
//! # Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pkprofile::prelude::*;
//!
//! let day = NaiveDate::from_ymd_opt(2016, 3, 15).unwrap();
//! let log = EventLog::builder("105")
//!     .treatment(
//!         day.and_hms_opt(8, 2, 0).unwrap(),
//!         2000.0,
//!         TreatmentReason::RoutineProphylaxis,
//!     )
//!     .build();
//!
//! let options = ProfileOptions::default().with_threshold(20.0);
//! let profile = reconstruct(&log, day, day.succ_opt().unwrap(), &options)?;
//!
//! let peak = profile.levels().max().unwrap_or(0.0);
//! assert_eq!(peak, 2000.0 / 32.0);
//! assert!(profile.stats().fraction_above > 0.5);
//! # Ok::<(), pkprofile::PkProfileError>(())
//! ```

mod error;
mod grid;
mod propagate;
mod reconstruct;
mod series;
mod snap;
mod threshold;
mod types;


pub use error::ProfileError;
pub use grid::{TimeGrid, DEFAULT_RESOLUTION_MINUTES};
pub use propagate::{
    decay_horizon_minutes, elimination_rate, propagate, DECAY_HORIZON_HALF_LIVES,
};
pub use reconstruct::reconstruct;
pub use series::{ConcentrationSeries, DoseSeries};
pub use snap::{snap, snap_timestamp, SnappedEvents};
pub use threshold::{analyze, ThresholdStats};
pub use types::{PkProfile, ProfileOptions, RunSummary};
