//! Core data models for student-records
//!
//! This module contains the student entity, its identifier type, and the
//! field validators every write path goes through.

pub mod ids;
pub mod student;
pub mod validation;

pub use ids::StudentId;
pub use student::{NewStudent, Student, StudentRecord, StudentUpdate};
