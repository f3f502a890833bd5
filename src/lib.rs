pub mod data;
pub mod error;
pub mod profile;
pub mod report;

//extension traits
pub use crate::data::builder::EventLogBuilderExt;
pub use crate::data::*;
pub use crate::profile::{reconstruct, PkProfile, ProfileError, ProfileOptions};
pub use error::PkProfileError;

pub mod prelude {
    pub mod data {
        pub use crate::data::{
            builder::EventLogBuilderExt,
            parser::{read_patient, read_treatments},
            Administration, Bleed, BleedCause, BleedSeverity, Event, EventLog, TreatmentReason,
        };
    }
    pub mod profile {
        pub use crate::profile::{
            analyze, propagate, reconstruct, snap, ConcentrationSeries, DoseSeries, PkProfile,
            ProfileOptions, RunSummary, ThresholdStats, TimeGrid,
        };
    }
    pub mod report {
        pub use crate::report::{publish, CsvSink, ReportRenderer, ResultSink, TextRenderer};
    }

    //extension traits
    pub use crate::data::builder::EventLogBuilderExt;
    pub use crate::data::*;
    pub use crate::profile::{reconstruct, PkProfile, ProfileOptions};
}
