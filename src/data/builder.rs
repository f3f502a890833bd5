use chrono::{Duration, NaiveDateTime};

use crate::data::*;

pub trait EventLogBuilderExt {
    fn builder(patient_id: impl Into<String>) -> EventLogBuilder;
}

impl EventLogBuilderExt for EventLog {
    fn builder(patient_id: impl Into<String>) -> EventLogBuilder {
        EventLogBuilder {
            patient_id: patient_id.into(),
            events: Vec::new(),
        }
    }
}

/// Fluent construction of an [EventLog]
///
/// ```rust
/// use chrono::NaiveDate;
/// use pkprofile::prelude::data::*;
///
/// let morning = NaiveDate::from_ymd_opt(2016, 3, 15)
///     .unwrap()
///     .and_hms_opt(8, 0, 0)
///     .unwrap();
/// let log = EventLog::builder("105")
///     .treatment(morning, 1000.0, TreatmentReason::RoutineProphylaxis)
///     .repeat(6, chrono::Duration::days(2))
///     .build();
/// assert_eq!(log.len(), 7);
/// ```
pub struct EventLogBuilder {
    patient_id: String,
    events: Vec<Event>,
}

impl EventLogBuilder {
    pub fn patient_id(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = patient_id.into();
        self
    }

    pub fn event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    /// A dose without a recorded reason
    pub fn administration(self, timestamp: NaiveDateTime, units: f64) -> Self {
        self.event(Administration::new(timestamp, units, None).into())
    }

    /// A dose with a treatment reason
    pub fn treatment(self, timestamp: NaiveDateTime, units: f64, reason: TreatmentReason) -> Self {
        self.event(Administration::new(timestamp, units, Some(reason)).into())
    }

    pub fn bleed(
        self,
        timestamp: NaiveDateTime,
        location: impl Into<String>,
        cause: BleedCause,
        severity: BleedSeverity,
        minutes_since_onset: u32,
    ) -> Self {
        self.event(Bleed::new(timestamp, location, cause, severity, minutes_since_onset).into())
    }

    /// Repeat the last event `n` times, each shifted by a further `delta`
    ///
    /// # Panics
    ///
    /// Panics if no event has been added yet.
    pub fn repeat(mut self, n: usize, delta: Duration) -> Self {
        let last_event = match self.events.last() {
            Some(event) => event.clone(),
            None => panic!("There is no event to repeat"),
        };
        for i in 1..=n {
            let shift = delta * i as i32;
            let event = match &last_event {
                Event::Administration(administration) => Administration::new(
                    administration.timestamp() + shift,
                    administration.units(),
                    administration.reason(),
                )
                .into(),
                Event::Bleed(bleed) => Bleed::new(
                    bleed.timestamp() + shift,
                    bleed.location(),
                    bleed.cause(),
                    bleed.severity(),
                    bleed.minutes_since_onset(),
                )
                .into(),
            };
            self.events.push(event);
        }
        self
    }

    pub fn build(self) -> EventLog {
        EventLog::new(self.patient_id, self.events)
    }
}
