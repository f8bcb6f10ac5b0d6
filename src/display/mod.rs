//! Display formatting for terminal output
//!
//! Formats students and reports for the terminal, as tables and detail views.

pub mod report;
pub mod student;

pub use report::{format_import_report, format_statistics, format_transcript};
pub use student::{format_ranked_list, format_student_details, format_student_list};
