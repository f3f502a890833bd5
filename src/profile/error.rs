//! Profile reconstruction error types

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Errors that can occur while reconstructing a concentration profile
///
/// Every variant is terminal for the run: the inputs are fixed, so retrying
/// cannot change the outcome.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// The reporting window ends before it starts
    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    /// Invalid parameter value
    #[error("Invalid parameter: {param} = {value}")]
    InvalidParameter { param: String, value: String },

    /// An event snapped to a tick outside the grid
    #[error("Event at {timestamp} snaps to {snapped}, outside the grid [{start}, {end}]")]
    OutOfRange {
        timestamp: NaiveDateTime,
        snapped: NaiveDateTime,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// Threshold analysis over a series with no points
    #[error("Cannot analyze an empty series")]
    EmptySeries,
}

impl ProfileError {
    pub(crate) fn invalid_parameter(param: &str, value: impl ToString) -> Self {
        ProfileError::InvalidParameter {
            param: param.to_string(),
            value: value.to_string(),
        }
    }
}
