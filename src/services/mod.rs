//! Service layer for student-records
//!
//! The service layer provides business logic on top of the storage layer:
//! the session manager, queries and reports, and CSV import.

pub mod import;
pub mod manager;
pub mod search;
pub mod statistics;
pub mod transcript;

pub use import::ImportReport;
pub use manager::StudentManager;
pub use search::SearchCriteria;
pub use statistics::{AgeBracket, Statistics};
pub use transcript::{Transcript, TranscriptLine};
