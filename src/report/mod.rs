//! Rendering and archiving reconstructed profiles
//!
//! Drawing the chart and storing it are left to the caller through two
//! traits: [`ReportRenderer`] turns a [`PkProfile`] into an artifact and
//! [`ResultSink`] stores that artifact with the run's summary. A plain-text
//! renderer and a directory sink are provided.

mod sink;
mod text;

use thiserror::Error;

use crate::profile::PkProfile;

pub use sink::{CsvSink, LevelRow};
pub use text::TextRenderer;

/// Errors raised while rendering or persisting a report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// Turns a profile into a viewable artifact
pub trait ReportRenderer {
    type Output: AsRef<[u8]>;

    fn render(&self, profile: &PkProfile) -> Result<Self::Output, ReportError>;
}

/// Stores a rendered artifact together with the profile it was drawn from
pub trait ResultSink {
    fn persist(&mut self, profile: &PkProfile, artifact: &[u8]) -> Result<(), ReportError>;
}

/// Render `profile` and hand the artifact to `sink`
pub fn publish<R, S>(profile: &PkProfile, renderer: &R, sink: &mut S) -> Result<(), ReportError>
where
    R: ReportRenderer,
    S: ResultSink,
{
    let artifact = renderer.render(profile)?;
    sink.persist(profile, artifact.as_ref())?;
    tracing::debug!(patient = profile.patient_id(), "published report");
    Ok(())
}
