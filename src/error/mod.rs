use thiserror::Error;

use crate::data::parser::SourceError;
use crate::data::CodeError;
use crate::profile::ProfileError;
use crate::report::ReportError;

#[derive(Error, Debug)]
pub enum PkProfileError {
    #[error("Error in the profile reconstruction: {0}")]
    Profile(#[from] ProfileError),
    #[error("Error reading treatment records: {0}")]
    Source(#[from] SourceError),
    #[error("Unknown code: {0}")]
    Code(#[from] CodeError),
    #[error("Error producing the report: {0}")]
    Report(#[from] ReportError),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}
