//! Export module for student-records
//!
//! CSV is the interchange format; the same layout is read back by
//! `services::import`.

pub mod csv;

pub use self::csv::{default_export_filename, export_students_csv, CSV_COLUMNS, REQUIRED_COLUMNS};
