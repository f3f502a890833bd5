use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};

use super::{ReportError, ResultSink};
use crate::profile::PkProfile;

/// One row of the exported level series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelRow {
    pub timestamp: NaiveDateTime,
    /// Units given at this tick
    pub dose: f64,
    /// Propagated amount in units
    pub amount: f64,
    /// Plasma level in IU/dL
    pub level: f64,
}

/// Writes each run into a directory as three files sharing a stem
/// `<patient>_<from>_<to>`:
///
/// - `<stem>.csv`: the level series, one [`LevelRow`] per grid point
/// - `<stem>.json`: the [`RunSummary`](crate::profile::RunSummary)
/// - `<stem>.<extension>`: the rendered artifact
#[derive(Debug, Clone)]
pub struct CsvSink {
    dir: PathBuf,
    extension: String,
    written: Vec<PathBuf>,
}

impl CsvSink {
    /// A sink writing into `dir`, created on first use
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        CsvSink {
            dir: dir.into(),
            extension: "txt".to_string(),
            written: Vec::new(),
        }
    }

    /// File extension for the artifact
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every file written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn stem(profile: &PkProfile) -> String {
        let summary = profile.summary();
        format!(
            "{}_{}_{}",
            summary.patient_id,
            summary.from.format("%Y%m%d"),
            summary.to.format("%Y%m%d")
        )
    }

    fn write_levels(path: &Path, profile: &PkProfile) -> Result<(), ReportError> {
        let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
        let rows = profile
            .doses()
            .iter()
            .zip(profile.amounts().values())
            .zip(profile.levels().values())
            .map(|(((timestamp, dose), &amount), &level)| LevelRow {
                timestamp,
                dose,
                amount,
                level,
            });
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl ResultSink for CsvSink {
    fn persist(&mut self, profile: &PkProfile, artifact: &[u8]) -> Result<(), ReportError> {
        fs::create_dir_all(&self.dir)?;
        let stem = Self::stem(profile);

        let levels = self.dir.join(format!("{stem}.csv"));
        Self::write_levels(&levels, profile)?;

        let summary = self.dir.join(format!("{stem}.json"));
        fs::write(&summary, serde_json::to_string_pretty(profile.summary())?)?;

        let artifact_path = self.dir.join(format!("{stem}.{}", self.extension));
        fs::write(&artifact_path, artifact)?;

        tracing::debug!(dir = %self.dir.display(), %stem, "persisted run");
        self.written.extend([levels, summary, artifact_path]);
        Ok(())
    }
}
