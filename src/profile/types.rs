//! Profile options and results

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::error::ProfileError;
use super::grid::{TimeGrid, DEFAULT_RESOLUTION_MINUTES};
use super::series::{ConcentrationSeries, DoseSeries};
use super::threshold::ThresholdStats;
use crate::data::{Bleed, TreatmentReason};
use crate::error::PkProfileError;

// ============================================================================
// Configuration
// ============================================================================

/// Parameters of a profile reconstruction
///
/// Defaults describe factor VIII in an adult: a 10 hour half-life, a plasma
/// volume of 32 dL and a 50 IU/dL threshold, on a 5 minute grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOptions {
    /// Grid spacing in minutes; must divide 60
    pub resolution_minutes: u32,
    /// Elimination half-life in hours
    pub half_life_hours: f64,
    /// Volume of distribution in dL, converting units to IU/dL
    pub volume_of_distribution: f64,
    /// Plasma level (IU/dL) the patient should stay above
    pub threshold: f64,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            resolution_minutes: DEFAULT_RESOLUTION_MINUTES,
            half_life_hours: 10.0,
            volume_of_distribution: 32.0,
            threshold: 50.0,
        }
    }
}

impl ProfileOptions {
    /// Parse options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, PkProfileError> {
        let options: ProfileOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn with_resolution_minutes(mut self, resolution_minutes: u32) -> Self {
        self.resolution_minutes = resolution_minutes;
        self
    }

    pub fn with_half_life(mut self, half_life_hours: f64) -> Self {
        self.half_life_hours = half_life_hours;
        self
    }

    pub fn with_volume_of_distribution(mut self, volume_of_distribution: f64) -> Self {
        self.volume_of_distribution = volume_of_distribution;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Check every numeric option
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.resolution_minutes == 0 || 60 % self.resolution_minutes != 0 {
            return Err(ProfileError::invalid_parameter(
                "resolution_minutes",
                self.resolution_minutes,
            ));
        }
        if !(self.half_life_hours.is_finite() && self.half_life_hours > 0.0) {
            return Err(ProfileError::invalid_parameter(
                "half_life_hours",
                self.half_life_hours,
            ));
        }
        if !(self.volume_of_distribution.is_finite() && self.volume_of_distribution > 0.0) {
            return Err(ProfileError::invalid_parameter(
                "volume_of_distribution",
                self.volume_of_distribution,
            ));
        }
        if !self.threshold.is_finite() {
            return Err(ProfileError::invalid_parameter("threshold", self.threshold));
        }
        Ok(())
    }
}

// ============================================================================
// Results
// ============================================================================

/// Parameters and outcome of one run, for archiving next to the artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub patient_id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub half_life_hours: f64,
    pub volume_of_distribution: f64,
    pub threshold: f64,
    pub fraction_above: f64,
    pub fraction_below: f64,
}

/// A reconstructed concentration profile with its annotations
///
/// Everything a renderer needs to draw the curve, the threshold line and the
/// bleed and treatment markers, without repeating any computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PkProfile {
    pub(crate) summary: RunSummary,
    pub(crate) doses: DoseSeries,
    pub(crate) amounts: ConcentrationSeries,
    pub(crate) levels: ConcentrationSeries,
    pub(crate) bleeds: BTreeMap<NaiveDateTime, Bleed>,
    pub(crate) reasons: BTreeMap<NaiveDateTime, TreatmentReason>,
    pub(crate) stats: ThresholdStats,
}

impl PkProfile {
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn patient_id(&self) -> &str {
        &self.summary.patient_id
    }

    pub fn grid(&self) -> &TimeGrid {
        self.doses.grid()
    }

    /// Units given at each tick
    pub fn doses(&self) -> &DoseSeries {
        &self.doses
    }

    /// Propagated drug amount in units
    pub fn amounts(&self) -> &ConcentrationSeries {
        &self.amounts
    }

    /// Plasma level in IU/dL (amounts divided by the volume of distribution)
    pub fn levels(&self) -> &ConcentrationSeries {
        &self.levels
    }

    /// Bleeds keyed by their snapped tick
    pub fn bleeds(&self) -> &BTreeMap<NaiveDateTime, Bleed> {
        &self.bleeds
    }

    /// Treatment reasons keyed by their snapped tick
    pub fn reasons(&self) -> &BTreeMap<NaiveDateTime, TreatmentReason> {
        &self.reasons
    }

    pub fn stats(&self) -> &ThresholdStats {
        &self.stats
    }
}
