//! Student repository for JSON storage
//!
//! Loads and saves the student collection to students.json. The file holds a
//! plain JSON array of flat student records.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{RecordsError, RecordsResult};
use crate::models::{Student, StudentRecord};

use super::file_io::{read_json, write_json_atomic};

/// Repository for student persistence
pub struct StudentRepository {
    path: PathBuf,
}

impl StudentRepository {
    /// Create a new student repository
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists yet
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load all students from disk
    ///
    /// A missing file yields an empty collection. Malformed JSON, or a record
    /// that fails validation, yields `CorruptData`.
    pub fn load(&self) -> RecordsResult<Vec<Student>> {
        let records: Vec<StudentRecord> = read_json(&self.path)?;
        let students = decode_records(&self.path, &records)?;
        debug!(count = students.len(), path = %self.path.display(), "loaded students");
        Ok(students)
    }

    /// Write all students to disk atomically
    pub fn save(&self, students: &[Student]) -> RecordsResult<()> {
        let records: Vec<StudentRecord> = students.iter().map(Student::to_record).collect();
        write_json_atomic(&self.path, &records)?;
        debug!(count = records.len(), path = %self.path.display(), "saved students");
        Ok(())
    }
}

/// Validate a list of records, rejecting duplicates and invalid entries
pub(crate) fn decode_records(path: &Path, records: &[StudentRecord]) -> RecordsResult<Vec<Student>> {
    let mut students: Vec<Student> = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let student = Student::from_record(record).map_err(|e| {
            RecordsError::corrupt(
                path,
                format!("record {} ({}): {}", index, record.student_id, e),
            )
        })?;

        if students
            .iter()
            .any(|s| s.student_id() == student.student_id())
        {
            return Err(RecordsError::corrupt(
                path,
                format!("record {}: duplicate student ID {}", index, student.student_id()),
            ));
        }

        students.push(student);
    }

    Ok(students)
}
