//! Student Records - terminal-based student record management
//!
//! This library provides the core functionality for the `students` command:
//! a collection of student records kept in a single JSON file, with course
//! enrollment, graded GPA tracking, search and statistics, CSV interchange,
//! automatic backups and an audit trail of every change.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Student records, identifiers and field validation
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer (the student manager, search, statistics)
//! - `audit`: Audit logging system
//! - `backup`: Automatic backup management and restore
//! - `export`: CSV export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use student_records::config::paths::RecordsPaths;
//! use student_records::services::StudentManager;
//!
//! let paths = RecordsPaths::new()?;
//! let manager = StudentManager::open(paths)?;
//! println!("{} student(s)", manager.len());
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{RecordsError, RecordsResult};
pub use models::{NewStudent, Student, StudentId, StudentUpdate};
pub use services::StudentManager;
