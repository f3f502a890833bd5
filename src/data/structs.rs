use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::event::{Administration, Bleed, Event};
use crate::profile::{snap_timestamp, TimeGrid};

/// The treatment diary of a single patient
///
/// Events are kept in chronological order. Sorting is stable, so records that
/// share a timestamp keep the order in which they were added. Deserialized
/// logs go through [EventLog::new] and are sorted the same way.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "EventLogRecord")]
pub struct EventLog {
    patient_id: String,
    events: Vec<Event>,
}

#[derive(Deserialize)]
struct EventLogRecord {
    patient_id: String,
    events: Vec<Event>,
}

impl From<EventLogRecord> for EventLog {
    fn from(record: EventLogRecord) -> Self {
        EventLog::new(record.patient_id, record.events)
    }
}

impl EventLog {
    /// Create a new [EventLog], sorting the events by timestamp
    pub fn new(patient_id: impl Into<String>, mut events: Vec<Event>) -> Self {
        events.sort_by_key(|event| event.timestamp());
        EventLog {
            patient_id: patient_id.into(),
            events,
        }
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Iterate over all administrations
    pub fn administrations(&self) -> impl Iterator<Item = &Administration> {
        self.events.iter().filter_map(|event| match event {
            Event::Administration(administration) => Some(administration),
            _ => None,
        })
    }

    /// Iterate over all bleeds
    pub fn bleeds(&self) -> impl Iterator<Item = &Bleed> {
        self.events.iter().filter_map(|event| match event {
            Event::Bleed(bleed) => Some(bleed),
            _ => None,
        })
    }

    /// Keep only the events that snap onto `grid`
    ///
    /// An event just before the first point or just after the last one is
    /// kept when it rounds onto the grid, so the result is exactly the set of
    /// events a reconstruction over `grid` accepts.
    pub fn within(&self, grid: &TimeGrid) -> EventLog {
        EventLog {
            patient_id: self.patient_id.clone(),
            events: self
                .events
                .iter()
                .filter(|event| {
                    grid.contains(snap_timestamp(
                        event.timestamp(),
                        grid.resolution_minutes(),
                    ))
                })
                .cloned()
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl fmt::Display for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Patient {}", self.patient_id)?;
        for event in &self.events {
            match event {
                Event::Administration(administration) => {
                    write!(
                        f,
                        "  {} dose {} IU",
                        administration.timestamp().format("%Y-%m-%d %H:%M"),
                        administration.units()
                    )?;
                    if let Some(reason) = administration.reason() {
                        write!(f, " ({})", reason)?;
                    }
                    writeln!(f)?;
                }
                Event::Bleed(bleed) => writeln!(
                    f,
                    "  {} bleed {}, {}, {}",
                    bleed.timestamp().format("%Y-%m-%d %H:%M"),
                    bleed.location(),
                    bleed.cause(),
                    bleed.severity()
                )?,
            }
        }
        Ok(())
    }
}
