//! Categorical codes attached to treatments and bleeds
//!
//! Records carry these as small integer codes. Each category is a closed enum
//! with a display label, and unknown codes are rejected with a [`CodeError`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An integer code that does not belong to its category
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodeError {
    #[error("Unknown bleed cause code: {0}")]
    UnknownCause(i64),
    #[error("Unknown bleed severity code: {0}")]
    UnknownSeverity(i64),
    #[error("Unknown treatment reason code: {0}")]
    UnknownReason(i64),
}

/// What caused a bleed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BleedCause {
    Spontaneous,
    TraumaActivity,
    SurgeryDental,
}

impl BleedCause {
    /// Human readable label used on reports
    pub fn label(&self) -> &'static str {
        match self {
            BleedCause::Spontaneous => "Spontaneous",
            BleedCause::TraumaActivity => "Trauma/Activity",
            BleedCause::SurgeryDental => "Surgery/Dental",
        }
    }

    /// The numeric code stored in treatment records
    pub fn code(&self) -> i64 {
        match self {
            BleedCause::Spontaneous => 0,
            BleedCause::TraumaActivity => 1,
            BleedCause::SurgeryDental => 2,
        }
    }
}

impl TryFrom<i64> for BleedCause {
    type Error = CodeError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(BleedCause::Spontaneous),
            1 => Ok(BleedCause::TraumaActivity),
            2 => Ok(BleedCause::SurgeryDental),
            other => Err(CodeError::UnknownCause(other)),
        }
    }
}

impl fmt::Display for BleedCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How severe a bleed was, as reported by the patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BleedSeverity {
    Minor,
    Major,
    LifeOrLimbThreatening,
}

impl BleedSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            BleedSeverity::Minor => "Minor(not so bad)",
            BleedSeverity::Major => "Major(very bad)",
            BleedSeverity::LifeOrLimbThreatening => "Life or Limb threatening",
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            BleedSeverity::Minor => 0,
            BleedSeverity::Major => 1,
            BleedSeverity::LifeOrLimbThreatening => 2,
        }
    }
}

impl TryFrom<i64> for BleedSeverity {
    type Error = CodeError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(BleedSeverity::Minor),
            1 => Ok(BleedSeverity::Major),
            2 => Ok(BleedSeverity::LifeOrLimbThreatening),
            other => Err(CodeError::UnknownSeverity(other)),
        }
    }
}

impl fmt::Display for BleedSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a treatment was given
///
/// Codes start at 1; there is no reason code 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreatmentReason {
    NewBleed,
    FollowUpBleed,
    Prescribed,
    RoutineProphylaxis,
    Surgery,
    Activity,
    Physiotherapy,
    ImmuneTolerance,
    Other,
}

impl TreatmentReason {
    pub fn label(&self) -> &'static str {
        match self {
            TreatmentReason::NewBleed => "New Bleed",
            TreatmentReason::FollowUpBleed => "FollowUp Bleed",
            TreatmentReason::Prescribed => "Prescribed treatment",
            TreatmentReason::RoutineProphylaxis => "Routine Prophylaxis",
            TreatmentReason::Surgery => "Surgery",
            TreatmentReason::Activity => "Activity",
            TreatmentReason::Physiotherapy => "Physiotherapy",
            TreatmentReason::ImmuneTolerance => "Immune Tolerance",
            TreatmentReason::Other => "Other",
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            TreatmentReason::NewBleed => 1,
            TreatmentReason::FollowUpBleed => 2,
            TreatmentReason::Prescribed => 3,
            TreatmentReason::RoutineProphylaxis => 4,
            TreatmentReason::Surgery => 5,
            TreatmentReason::Activity => 6,
            TreatmentReason::Physiotherapy => 7,
            TreatmentReason::ImmuneTolerance => 8,
            TreatmentReason::Other => 9,
        }
    }
}

impl TryFrom<i64> for TreatmentReason {
    type Error = CodeError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(TreatmentReason::NewBleed),
            2 => Ok(TreatmentReason::FollowUpBleed),
            3 => Ok(TreatmentReason::Prescribed),
            4 => Ok(TreatmentReason::RoutineProphylaxis),
            5 => Ok(TreatmentReason::Surgery),
            6 => Ok(TreatmentReason::Activity),
            7 => Ok(TreatmentReason::Physiotherapy),
            8 => Ok(TreatmentReason::ImmuneTolerance),
            9 => Ok(TreatmentReason::Other),
            other => Err(CodeError::UnknownReason(other)),
        }
    }
}

impl fmt::Display for TreatmentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
