//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod course;
pub mod query;
pub mod student;
pub mod transfer;

pub use backup::{handle_backup_command, BackupCommands};
pub use course::{handle_course_command, handle_grade_command, CourseCommands, GradeCommands};
pub use query::{handle_query_command, QueryCommands};
pub use student::{handle_student_command, NewStudentArgs, StudentCommands};
pub use transfer::{handle_transfer_command, TransferCommands};
