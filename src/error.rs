//! Custom error types for student-records
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::Path;

use thiserror::Error;

/// The main error type for student record operations
#[derive(Error, Debug)]
pub enum RecordsError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A field failed format or range validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Course enrollment rule violations
    #[error("Enrollment error: {0}")]
    Enrollment(String),

    /// The persisted data file could not be understood
    #[error("Corrupt data in {path}: {reason}")]
    CorruptData { path: String, reason: String },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl RecordsError {
    /// Create a "not found" error for students
    pub fn student_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Student",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for courses
    pub fn course_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Course",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for student IDs
    pub fn duplicate_student(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Student",
            identifier: identifier.into(),
        }
    }

    /// Create a corrupt-data error for a file
    pub fn corrupt(path: &Path, reason: impl Into<String>) -> Self {
        Self::CorruptData {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a corrupt-data error
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptData { .. })
    }

    /// Message without the "Validation error:" prefix, for per-field lists
    pub(crate) fn into_reason(self) -> String {
        match self {
            Self::Validation(reason) => reason,
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for RecordsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RecordsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for RecordsError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

/// Result type alias for student record operations
pub type RecordsResult<T> = Result<T, RecordsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RecordsError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = RecordsError::student_not_found("STU001");
        assert_eq!(err.to_string(), "Student not found: STU001");
        assert!(err.is_not_found());

        let err = RecordsError::course_not_found("Physics");
        assert_eq!(err.to_string(), "Course not found: Physics");
    }

    #[test]
    fn test_duplicate_error() {
        let err = RecordsError::duplicate_student("STU001");
        assert_eq!(err.to_string(), "Student already exists: STU001");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_corrupt_error() {
        let err = RecordsError::corrupt(Path::new("students.json"), "expected value");
        assert_eq!(
            err.to_string(),
            "Corrupt data in students.json: expected value"
        );
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_into_reason() {
        let err = RecordsError::Validation("Invalid email format: x".into());
        assert_eq!(err.into_reason(), "Invalid email format: x");

        let err = RecordsError::student_not_found("STU404");
        assert_eq!(err.into_reason(), "Student not found: STU404");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let records_err: RecordsError = io_err.into();
        assert!(matches!(records_err, RecordsError::Io(_)));
    }
}
