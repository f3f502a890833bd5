pub mod builder;
pub mod codes;
pub mod event;
pub mod parser;
pub mod structs;
pub use codes::*;
pub use event::*;
pub use structs::EventLog;
