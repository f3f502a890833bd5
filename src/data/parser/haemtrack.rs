use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::data::*;
use crate::profile::TimeGrid;

/// Errors raised while reading a treatment export
#[derive(Error, Debug, Clone)]
pub enum SourceError {
    /// Error encountered when reading CSV data
    #[error("CSV error: {0}")]
    CSVError(String),
    /// The treated date could not be parsed
    #[error("Invalid treated date '{value}' for patient {patient_id}")]
    InvalidDate { patient_id: String, value: String },
    /// The treated time could not be parsed
    #[error("Invalid treated time '{value}' for patient {patient_id}")]
    InvalidTime { patient_id: String, value: String },
    /// A numeric cause, severity or reason code is not known
    #[error("{source} for patient {patient_id} at {timestamp}")]
    UnknownCode {
        patient_id: String,
        timestamp: NaiveDateTime,
        source: CodeError,
    },
    /// A bleed location was given but one of the other bleed fields is missing
    #[error("Bleed {field} is missing for patient {patient_id} at {timestamp}")]
    IncompleteBleed {
        patient_id: String,
        timestamp: NaiveDateTime,
        field: &'static str,
    },
}

/// Read every patient from a treatment export
///
/// The file is a CSV export of treatments left-joined with their bleed
/// details, one row per treatment. Headers are matched case-insensitively:
///
/// | Column | Meaning |
/// |--------|---------|
/// | `PatientID` | patient identifier |
/// | `TreatedDate` | `YYYY-MM-DD` |
/// | `TreatedTime` | `HH:MM` (24h) or `h:MM AM/PM` |
/// | `TotalUnits` | units administered |
/// | `Reason` | treatment reason code, may be empty |
/// | `Location` | bleed location; empty when the treatment had no bleed |
/// | `BleedCause`, `BleedSeverity`, `TimeAfterBleed` | required when `Location` is set |
///
/// Empty cells, `NULL` and `NA` are read as missing. Each treatment becomes an
/// [Administration]; a treatment with a bleed location also yields a [Bleed]
/// at the same timestamp. Logs are returned sorted by patient id.
pub fn read_treatments(path: impl AsRef<Path>) -> Result<Vec<EventLog>, SourceError> {
    let reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .has_headers(true)
        .from_path(path.as_ref())
        .map_err(|e| SourceError::CSVError(e.to_string()))?;
    parse(reader)
}

/// Same as [read_treatments], reading from any [Read] source
pub fn from_reader<R: Read>(reader: R) -> Result<Vec<EventLog>, SourceError> {
    let reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .has_headers(true)
        .from_reader(reader);
    parse(reader)
}

/// Read the events of one patient that snap onto `grid`
///
/// See [EventLog::within]. A patient without any records yields an empty log.
pub fn read_patient(
    path: impl AsRef<Path>,
    patient_id: &str,
    grid: &TimeGrid,
) -> Result<EventLog, SourceError> {
    let log = read_treatments(path)?
        .into_iter()
        .find(|log| log.patient_id() == patient_id)
        .unwrap_or_else(|| EventLog::new(patient_id, Vec::new()));
    Ok(log.within(grid))
}

fn parse<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<EventLog>, SourceError> {
    let headers = reader
        .headers()
        .map_err(|e| SourceError::CSVError(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<_>>();
    reader.set_headers(csv::StringRecord::from(headers));

    let mut events_by_patient: BTreeMap<String, Vec<Event>> = BTreeMap::new();
    for row_result in reader.deserialize() {
        let row: Row = row_result.map_err(|e| SourceError::CSVError(e.to_string()))?;
        let patient_id = row.patientid.clone();
        let events = row.parse_events()?;
        events_by_patient
            .entry(patient_id)
            .or_default()
            .extend(events);
    }

    let logs = events_by_patient
        .into_iter()
        .map(|(patient_id, events)| EventLog::new(patient_id, events))
        .collect::<Vec<_>>();
    tracing::debug!(patients = logs.len(), "read treatment export");
    Ok(logs)
}

/// One row of the treatment/bleed export
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "lowercase")]
struct Row {
    patientid: String,
    treateddate: String,
    treatedtime: String,
    totalunits: f64,
    #[serde(default, deserialize_with = "deserialize_option_i64")]
    reason: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_string")]
    location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_i64")]
    bleedcause: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_i64")]
    bleedseverity: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_u32")]
    timeafterbleed: Option<u32>,
}

impl Row {
    fn timestamp(&self) -> Result<NaiveDateTime, SourceError> {
        let date = NaiveDate::parse_from_str(self.treateddate.trim(), "%Y-%m-%d").map_err(|_| {
            SourceError::InvalidDate {
                patient_id: self.patientid.clone(),
                value: self.treateddate.clone(),
            }
        })?;
        let time = parse_time(&self.treatedtime).ok_or_else(|| SourceError::InvalidTime {
            patient_id: self.patientid.clone(),
            value: self.treatedtime.clone(),
        })?;
        Ok(date.and_time(time))
    }

    fn parse_events(self) -> Result<Vec<Event>, SourceError> {
        let timestamp = self.timestamp()?;
        let code_error = |source: CodeError| SourceError::UnknownCode {
            patient_id: self.patientid.clone(),
            timestamp,
            source,
        };

        let reason = self
            .reason
            .map(TreatmentReason::try_from)
            .transpose()
            .map_err(code_error)?;
        let mut events = vec![Event::Administration(Administration::new(
            timestamp,
            self.totalunits,
            reason,
        ))];

        if let Some(location) = &self.location {
            let missing = |field: &'static str| SourceError::IncompleteBleed {
                patient_id: self.patientid.clone(),
                timestamp,
                field,
            };
            let cause = BleedCause::try_from(self.bleedcause.ok_or_else(|| missing("cause"))?)
                .map_err(code_error)?;
            let severity =
                BleedSeverity::try_from(self.bleedseverity.ok_or_else(|| missing("severity"))?)
                    .map_err(code_error)?;
            let minutes = self
                .timeafterbleed
                .ok_or_else(|| missing("time after bleed"))?;
            events.push(Event::Bleed(Bleed::new(
                timestamp,
                location.clone(),
                cause,
                severity,
                minutes,
            )));
        }
        Ok(events)
    }
}

/// Parse a 24h `HH:MM` time, or a 12h `h:MM AM/PM` time
fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    let upper = value.to_uppercase();
    if upper.ends_with("AM") || upper.ends_with("PM") {
        NaiveTime::parse_from_str(&upper, "%I:%M %p")
            .or_else(|_| NaiveTime::parse_from_str(&upper, "%I:%M%p"))
            .ok()
    } else {
        NaiveTime::parse_from_str(value, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
            .ok()
    }
}

fn is_missing(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s.eq_ignore_ascii_case("null") || s == "NA"
}

/// Deserialize Option<T> from a string
fn deserialize_option<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    if is_missing(&s) {
        Ok(None)
    } else {
        T::from_str(s.trim())
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

fn deserialize_option_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_option::<i64, D>(deserializer)
}

fn deserialize_option_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_option::<u32, D>(deserializer)
}

fn deserialize_option_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    if is_missing(&s) {
        Ok(None)
    } else {
        Ok(Some(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
PatientID,TreatedDate,TreatedTime,TotalUnits,Reason,Location,BleedCause,BleedSeverity,TimeAfterBleed
105,2016-03-16,08:06,1000,4,,,,
105,2016-03-17,2:30 PM,1500,1,Left knee,0,1,45
# a commented line
107,2016-03-16,07:00,500,NULL,NULL,NULL,NULL,NULL
105,2016-03-15,21:00,1000,,,,,
";

    #[test]
    fn test_parse_export() {
        let logs = from_reader(EXPORT.as_bytes()).unwrap();
        assert_eq!(logs.len(), 2);

        let log = &logs[0];
        assert_eq!(log.patient_id(), "105");
        assert_eq!(log.administrations().count(), 3);
        assert_eq!(log.bleeds().count(), 1);

        // chronological order
        let first = log.administrations().next().unwrap();
        assert_eq!(first.timestamp().format("%Y-%m-%d %H:%M").to_string(), "2016-03-15 21:00");
        assert_eq!(first.reason(), None);

        let bleed = log.bleeds().next().unwrap();
        assert_eq!(bleed.timestamp().format("%H:%M").to_string(), "14:30");
        assert_eq!(bleed.location(), "Left knee");
        assert_eq!(bleed.cause(), BleedCause::Spontaneous);
        assert_eq!(bleed.severity(), BleedSeverity::Major);
        assert_eq!(bleed.minutes_since_onset(), 45);

        assert_eq!(logs[1].patient_id(), "107");
        assert_eq!(logs[1].bleeds().count(), 0);
    }

    #[test]
    fn test_unknown_reason_code() {
        let data = "patientid,treateddate,treatedtime,totalunits,reason\n1,2016-03-16,08:00,1000,12\n";
        let err = from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            SourceError::UnknownCode {
                source: CodeError::UnknownReason(12),
                ..
            }
        ));
    }

    #[test]
    fn test_incomplete_bleed() {
        let data = "\
patientid,treateddate,treatedtime,totalunits,reason,location,bleedcause,bleedseverity,timeafterbleed
1,2016-03-16,08:00,1000,1,Elbow,2,,30
";
        let err = from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            SourceError::IncompleteBleed {
                field: "severity",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_time() {
        let data = "patientid,treateddate,treatedtime,totalunits\n1,2016-03-16,25:99,1000\n";
        let err = from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, SourceError::InvalidTime { .. }));
    }

    #[test]
    fn test_parse_time_formats() {
        assert_eq!(parse_time("13:05"), NaiveTime::from_hms_opt(13, 5, 0));
        assert_eq!(parse_time("1:05 PM"), NaiveTime::from_hms_opt(13, 5, 0));
        assert_eq!(parse_time("12:15 am"), NaiveTime::from_hms_opt(0, 15, 0));
        assert_eq!(parse_time("noon"), None);
    }
}
