pub mod haemtrack;

pub use haemtrack::SourceError;
pub use haemtrack::{from_reader, read_patient, read_treatments};
