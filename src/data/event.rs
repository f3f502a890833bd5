use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::data::codes::{BleedCause, BleedSeverity, TreatmentReason};

/// A record from a patient's treatment diary
///
/// Events are either:
/// - [Administration]s (a dose of factor given at a point in time)
/// - [Bleed]s (a bleeding episode reported alongside a treatment)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Event {
    /// A dose of drug given to the patient
    Administration(Administration),
    /// A reported bleed
    Bleed(Bleed),
}

impl Event {
    /// Wall-clock time of the event
    pub fn timestamp(&self) -> NaiveDateTime {
        match self {
            Event::Administration(administration) => administration.timestamp,
            Event::Bleed(bleed) => bleed.timestamp,
        }
    }
}

impl From<Administration> for Event {
    fn from(administration: Administration) -> Self {
        Event::Administration(administration)
    }
}

impl From<Bleed> for Event {
    fn from(bleed: Bleed) -> Self {
        Event::Bleed(bleed)
    }
}

/// A single treatment: a dose of factor given at a point in time
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Administration {
    timestamp: NaiveDateTime,
    units: f64,
    reason: Option<TreatmentReason>,
}

impl Administration {
    /// Create a new administration
    ///
    /// # Arguments
    ///
    /// * `timestamp` - When the dose was given
    /// * `units` - Amount administered, in international units
    /// * `reason` - Why the treatment was given, if recorded
    pub fn new(timestamp: NaiveDateTime, units: f64, reason: Option<TreatmentReason>) -> Self {
        Administration {
            timestamp,
            units,
            reason,
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Amount administered, in international units
    pub fn units(&self) -> f64 {
        self.units
    }

    pub fn reason(&self) -> Option<TreatmentReason> {
        self.reason
    }
}

/// A bleeding episode
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Bleed {
    timestamp: NaiveDateTime,
    location: String,
    cause: BleedCause,
    severity: BleedSeverity,
    minutes_since_onset: u32,
}

impl Bleed {
    /// Create a new bleed record
    ///
    /// # Arguments
    ///
    /// * `timestamp` - When the bleed was reported (the time of the treatment that followed it)
    /// * `location` - Body location, free text
    /// * `cause` - What caused the bleed
    /// * `severity` - Reported severity
    /// * `minutes_since_onset` - Minutes elapsed between bleed onset and `timestamp`
    pub fn new(
        timestamp: NaiveDateTime,
        location: impl Into<String>,
        cause: BleedCause,
        severity: BleedSeverity,
        minutes_since_onset: u32,
    ) -> Self {
        Bleed {
            timestamp,
            location: location.into(),
            cause,
            severity,
            minutes_since_onset,
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn cause(&self) -> BleedCause {
        self.cause
    }

    pub fn severity(&self) -> BleedSeverity {
        self.severity
    }

    pub fn minutes_since_onset(&self) -> u32 {
        self.minutes_since_onset
    }

    /// Estimated start of the bleed
    pub fn onset(&self) -> NaiveDateTime {
        self.timestamp - Duration::minutes(self.minutes_since_onset as i64)
    }
}
